//! Application layer with dependency injection container.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │   App (container) + LandscapeConfig  │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ owns                       │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Infrastructure (adapters)           │   │
//! │  │  - HeatmapRenderer                   │   │
//! │  │  - SurfaceRenderer                   │   │
//! │  │  - RecordingRenderer (testing)       │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implements                 │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Ports (ports)                │   │
//! │  │  - LandscapeRenderer trait           │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ used by                    │
//! │                 ▼                            │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Logic                        │   │
//! │  │  - SampleSet                         │   │
//! │  │  - FreeEnergyEstimator               │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use gel::adapters::RecordingRenderer;
//! use gel::app::{App, LandscapeConfig};
//!
//! let app = App::for_testing()
//!     .with_renderer(RecordingRenderer::new())
//!     .with_config(LandscapeConfig::surface())
//!     .build();
//! ```

pub mod config;
pub mod container;

pub use config::{KB_KJ_PER_MOL, LandscapeConfig, LandscapeOverrides};
pub use container::{App, AppBuilder, RunReport};
