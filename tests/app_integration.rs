//! Integration tests for the application container.
//!
//! The recording renderer stands in for the PNG backends so the full
//! load → estimate → render path runs without writing images.

mod common;

use std::path::{Path, PathBuf};

use common::{two_basins, write_xvg};
use gel::{
    Error,
    adapters::{HeatmapRenderer, RecordingRenderer, SurfaceRenderer},
    app::{App, LandscapeConfig},
    ports::LandscapeRenderer,
};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn assert_png(path: &Path) {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.len() > PNG_SIGNATURE.len(), "{} is empty", path.display());
    assert_eq!(bytes[..8], PNG_SIGNATURE, "{} is not a PNG", path.display());
}

#[test]
fn xvg_file_flows_through_to_the_renderer() {
    let input = write_xvg(&two_basins(17));
    let renderer = RecordingRenderer::new();
    let app = App::for_testing()
        .with_renderer(renderer.clone())
        .with_config(LandscapeConfig::square().with_bins(24))
        .build();

    let report = app.run(input.path(), Some(Path::new("basins.png"))).unwrap();

    assert_eq!(report.output, PathBuf::from("basins.png"));
    assert_eq!(report.landscape.energy.rows(), 24);
    let calls = renderer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, PathBuf::from("basins.png"));
    assert_eq!(calls[0].min_energy, Some(0.0));
}

#[test]
fn malformed_input_is_reported_with_its_line() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut input, b"# header\n0.1 0.2\n0.3 0.4 0.5\n").unwrap();

    let renderer = RecordingRenderer::new();
    let app = App::for_testing().with_renderer(renderer.clone()).build();
    let err = app.run(input.path(), None).unwrap_err();

    match err {
        Error::InputFormat { reason, .. } => assert!(reason.contains("line 3"), "{reason}"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(renderer.count(), 0);
}

#[test]
fn missing_file_is_an_input_error() {
    let app = App::for_testing().with_renderer(RecordingRenderer::new()).build();
    let err = app.run(Path::new("does/not/exist.xvg"), None).unwrap_err();
    assert!(matches!(err, Error::InputFormat { .. }));
}

#[test]
fn collinear_samples_never_reach_the_renderer() {
    let points: Vec<(f64, f64)> = (0..20).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
    let input = write_xvg(&points);
    let renderer = RecordingRenderer::new();
    let app = App::for_testing().with_renderer(renderer.clone()).build();

    assert!(matches!(
        app.run(input.path(), None),
        Err(Error::DegenerateInput { .. })
    ));
    assert_eq!(renderer.count(), 0);
}

#[test]
fn surface_needs_two_bins_per_axis() {
    let input = write_xvg(&two_basins(5));
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("surface.png");
    let app = App::for_testing()
        .with_renderer(SurfaceRenderer::new(10.0))
        .with_config(LandscapeConfig::surface().with_bins(1))
        .build();

    let err = app.run(input.path(), Some(&output)).unwrap_err();
    assert!(matches!(err, Error::Render { .. }));
}

#[test]
fn surface_default_name_tracks_input_and_ceiling() {
    let renderer = SurfaceRenderer::new(8.0);
    assert_eq!(
        renderer.default_output(Path::new("/data/run1/2Dproj.xvg")),
        PathBuf::from("GEL_surface_3D_2Dproj_clip8.png")
    );
}

#[test]
fn heatmap_writes_a_png_with_cells_above_the_scale() {
    let input = write_xvg(&two_basins(3));
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("square.png");
    let app = App::for_testing()
        .with_renderer(HeatmapRenderer::new(10.1).with_size(400))
        .with_config(LandscapeConfig::square().with_bins(30))
        .build();

    let report = app.run(input.path(), Some(&output)).unwrap();

    assert_eq!(report.output, output);
    assert!(report.landscape.energy.count_above(10.1) > 0);
    assert_png(&output);
}

#[test]
fn surface_writes_a_png_clipped_to_its_ceiling() {
    let input = write_xvg(&two_basins(3));
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("surface.png");
    let app = App::for_testing()
        .with_renderer(SurfaceRenderer::new(10.0).with_size(480, 400))
        .with_config(LandscapeConfig::surface().with_bins(20))
        .build();

    let report = app.run(input.path(), Some(&output)).unwrap();

    assert!(report.landscape.energy.values().iter().all(|&e| e <= 10.0));
    assert_png(&output);
}
