//! Ports (trait boundaries) for external collaborators.
//!
//! Following hexagonal architecture, these traits are owned by the domain and
//! implemented by adapters in the infrastructure layer.

pub mod renderer;

pub use renderer::LandscapeRenderer;
