//! Neon Geometry library - morphing parametric surfaces driven by microphone input

pub mod audio;
pub mod camera;
pub mod cli;
pub mod error;
pub mod morph;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod surface;
