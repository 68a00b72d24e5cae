//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (seconds, world units, decibels, bins)
//! - Documented ranges and meanings
//! - A `validate()` per section, run once at startup

mod audio;
mod camera;
mod geometry;
mod morph;
mod render;

// Re-export all types
pub use audio::{AnalyserConfig, LevelConfig};
pub use camera::CameraConfig;
pub use geometry::{GeometryConfig, MAX_GRID_RESOLUTION};
pub use morph::MorphConfig;
pub use render::RenderConfig;
