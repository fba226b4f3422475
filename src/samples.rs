//! Two-column sample sets and the XVG-style text format they are read from.
//!
//! Input files are whitespace-delimited with exactly two numeric columns per
//! data line. Lines whose first non-blank character is `#` or `@` are
//! comments (the GROMACS `.xvg` header convention) and are skipped, as are
//! blank lines.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::debug;

use crate::{Error, Result};

const COMMENT_PREFIXES: [char; 2] = ['#', '@'];

/// An immutable pair of equal-length coordinate columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Descriptive statistics of a sample set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_mean: f64,
    pub y_mean: f64,
    pub x_std: f64,
    pub y_std: f64,
    pub covariance: f64,
    pub correlation: f64,
}

impl SampleSet {
    /// Build a sample set from two columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputFormat`] if the columns differ in length or
    /// contain a non-finite value.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::InputFormat {
                origin: "sample columns".to_string(),
                reason: format!("column lengths differ ({} vs {})", x.len(), y.len()),
            });
        }
        if let Some(index) = x
            .iter()
            .zip(&y)
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(Error::InputFormat {
                origin: "sample columns".to_string(),
                reason: format!("sample {index} is not finite"),
            });
        }
        Ok(Self { x, y })
    }

    /// Build a sample set from `(x, y)` pairs.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let (x, y): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
        Self::new(x, y)
    }

    /// Load samples from a two-column text file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputFormat`] if the file is missing, unreadable,
    /// or does not hold exactly two numeric columns on every data line.
    pub fn from_path(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::InputFormat {
            origin: origin.clone(),
            reason: e.to_string(),
        })?;
        Self::from_reader(BufReader::new(file), &origin)
    }

    /// Parse samples from any buffered reader. `origin` names the source in
    /// error messages.
    pub fn from_reader<R: BufRead>(reader: R, origin: &str) -> Result<Self> {
        let malformed = |reason: String| Error::InputFormat {
            origin: origin.to_string(),
            reason,
        };

        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut skipped = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| malformed(format!("line {line_no}: {e}")))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIXES) {
                skipped += 1;
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != 2 {
                return Err(malformed(format!(
                    "line {line_no}: expected 2 columns, found {}",
                    fields.len()
                )));
            }

            let mut values = [0.0f64; 2];
            for (slot, field) in values.iter_mut().zip(&fields) {
                let value: f64 = field.parse().map_err(|_| {
                    malformed(format!("line {line_no}: cannot parse '{field}' as a number"))
                })?;
                if !value.is_finite() {
                    return Err(malformed(format!(
                        "line {line_no}: non-finite value '{field}'"
                    )));
                }
                *slot = value;
            }
            x.push(values[0]);
            y.push(values[1]);
        }

        if x.is_empty() {
            return Err(malformed("no data lines found".to_string()));
        }

        debug!(origin, samples = x.len(), skipped, "loaded samples");
        Ok(Self { x, y })
    }

    /// Parse samples from an in-memory string.
    pub fn parse_str(text: &str, origin: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes(), origin)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Iterate over `(x, y)` pairs in file order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// `(min, max)` of the x column, `None` when empty.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        column_range(&self.x)
    }

    /// `(min, max)` of the y column, `None` when empty.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        column_range(&self.y)
    }

    /// Column means `(x̄, ȳ)`.
    pub fn mean(&self) -> (f64, f64) {
        (
            Statistics::mean(self.x.iter()),
            Statistics::mean(self.y.iter()),
        )
    }

    /// Unbiased (`n - 1`) covariance matrix `[[σxx, σxy], [σxy, σyy]]`.
    ///
    /// Entries are NaN for fewer than two samples.
    pub fn covariance(&self) -> [[f64; 2]; 2] {
        let xx = Statistics::variance(self.x.iter());
        let yy = Statistics::variance(self.y.iter());
        let xy = Statistics::covariance(self.x.iter(), self.y.iter());
        [[xx, xy], [xy, yy]]
    }

    /// Descriptive statistics, `None` when empty.
    pub fn summary(&self) -> Option<SampleSummary> {
        let (x_min, x_max) = self.x_range()?;
        let (y_min, y_max) = self.y_range()?;
        let (x_mean, y_mean) = self.mean();
        let [[xx, xy], [_, yy]] = self.covariance();
        let x_std = xx.sqrt();
        let y_std = yy.sqrt();
        let correlation = if x_std > 0.0 && y_std > 0.0 {
            xy / (x_std * y_std)
        } else {
            f64::NAN
        };

        Some(SampleSummary {
            count: self.len(),
            x_min,
            x_max,
            y_min,
            y_max,
            x_mean,
            y_mean,
            x_std,
            y_std,
            covariance: xy,
            correlation,
        })
    }
}

fn column_range(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const XVG: &str = "\
# This file was created by gmx anaeig
@    title \"2D projection of trajectory\"
@    xaxis  label \"projection on eigenvector 1 (nm)\"
@TYPE xy
   -1.25   0.50
    0.75  -0.25

    2.00   1.00
";

    #[test]
    fn parses_xvg_skipping_comments_and_blank_lines() {
        let samples = SampleSet::parse_str(XVG, "proj.xvg").unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples.x(), &[-1.25, 0.75, 2.0]);
        assert_eq!(samples.y(), &[0.5, -0.25, 1.0]);
        assert_eq!(samples.x_range(), Some((-1.25, 2.0)));
        assert_eq!(samples.y_range(), Some((-0.25, 1.0)));
    }

    #[test]
    fn rejects_extra_columns() {
        let err = SampleSet::parse_str("1 2 3\n", "three.xvg").unwrap_err();
        match err {
            Error::InputFormat { origin, reason } => {
                assert_eq!(origin, "three.xvg");
                assert!(reason.contains("line 1"), "{reason}");
                assert!(reason.contains("found 3"), "{reason}");
            }
            other => panic!("expected InputFormat, got {other:?}"),
        }
    }

    #[test]
    fn rejects_single_column() {
        let err = SampleSet::parse_str("0 0\n5\n", "short.xvg").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite_values() {
        assert!(matches!(
            SampleSet::parse_str("1.0 abc\n", "t").unwrap_err(),
            Error::InputFormat { .. }
        ));
        let err = SampleSet::parse_str("1.0 inf\n", "t").unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn rejects_input_without_data() {
        let err = SampleSet::parse_str("# only\n@ header\n\n", "empty.xvg").unwrap_err();
        assert!(err.to_string().contains("no data lines"));
    }

    #[test]
    fn missing_file_is_an_input_format_error() {
        let err = SampleSet::from_path(Path::new("/nonexistent/proj.xvg")).unwrap_err();
        assert!(matches!(err, Error::InputFormat { .. }));
    }

    #[test]
    fn new_rejects_mismatched_columns() {
        assert!(SampleSet::new(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(SampleSet::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn covariance_is_unbiased() {
        let samples =
            SampleSet::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]).unwrap();
        let cov = samples.covariance();
        assert!((cov[0][0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((cov[1][1] - 1.0 / 3.0).abs() < 1e-12);
        assert!(cov[0][1].abs() < 1e-12);

        let summary = samples.summary().unwrap();
        assert_eq!(summary.count, 4);
        assert!((summary.x_mean - 0.5).abs() < 1e-12);
        assert!(summary.correlation.abs() < 1e-12);
    }
}
