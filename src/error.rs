//! Error types for geometry, audio, configuration and GPU setup.

use thiserror::Error;

/// Failures while building the cached surface geometry. All of these are fatal
/// at startup: rendering never sees NaN or collapsed point sets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Grid needs at least two samples per side for `u`/`v` to span [0, 1], and
    /// at most `MAX_GRID_RESOLUTION` to fit one GPU vertex buffer.
    #[error(
        "grid resolution must be in 2..={max}, got {0}",
        max = crate::params::MAX_GRID_RESOLUTION
    )]
    InvalidGrid(usize),

    /// Nothing to cache.
    #[error("surface catalog is empty")]
    EmptyCatalog,

    /// A generator produced NaN or infinity.
    #[error("surface '{surface}' produced a non-finite point at index {index}")]
    NonFinitePoint { surface: String, index: usize },

    /// All points coincide (or lie within epsilon), so no scale factor exists.
    #[error("surface '{surface}' has degenerate extent {extent}")]
    DegenerateExtent { surface: String, extent: f64 },
}

/// Audio capture failures. Non-fatal: the visual keeps running without audio.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    /// Host has no usable input device or cannot capture at all.
    #[error("audio input not supported: {0}")]
    Unsupported(String),

    /// Requested device id is not present.
    #[error("audio input device not found: {0}")]
    DeviceNotFound(String),

    /// Device refused to open the stream (busy, permission denied, unplugged).
    #[error("audio input denied: {0}")]
    Denied(String),

    /// Host-side failure reported by the backend.
    #[error("audio backend error: {0}")]
    Backend(String),
}

impl AudioError {
    /// Short platform-style reason shown next to the audio status.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unsupported(_) => "NotSupportedError",
            Self::DeviceNotFound(_) => "NotFoundError",
            Self::Denied(_) => "NotAllowedError",
            Self::Backend(_) => "AbortError",
        }
    }
}

/// Invalid parameter values caught by `validate()`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {section} config: {message}")]
pub struct ConfigError {
    pub section: &'static str,
    pub message: String,
}

impl ConfigError {
    pub fn new(section: &'static str, message: impl Into<String>) -> Self {
        Self {
            section,
            message: message.into(),
        }
    }
}

/// GPU setup failures.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
