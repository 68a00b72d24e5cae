//! Parameter grid and cache normalization settings.

use crate::error::ConfigError;

/// Largest accepted grid side. The line pipeline stores every vertex as 32 bytes
/// (two positions plus uv); 2048² of them stay under wgpu's default 256 MiB
/// buffer limit.
pub const MAX_GRID_RESOLUTION: usize = 2048;

/// Geometry cache parameters
#[derive(Debug, Clone)]
pub struct GeometryConfig {
    /// Samples per grid side (R). Every surface is evaluated at R² lattice points.
    pub grid_resolution: usize,

    /// Largest bounding-box dimension after normalization (world units)
    pub target_size: f32,

    /// Extents at or below this are treated as collapsed (world units)
    pub min_extent: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 90, // 8,100 vertices per surface
            target_size: 50.0,
            min_extent: 1e-9,
        }
    }
}

impl GeometryConfig {
    /// Number of vertices in every cached point set
    pub fn vertex_count(&self) -> usize {
        self.grid_resolution.saturating_mul(self.grid_resolution)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_GRID_RESOLUTION).contains(&self.grid_resolution) {
            return Err(ConfigError::new(
                "geometry",
                format!(
                    "grid resolution must be in 2..={}, got {}",
                    MAX_GRID_RESOLUTION, self.grid_resolution
                ),
            ));
        }
        if !(self.target_size.is_finite() && self.target_size > 0.0) {
            return Err(ConfigError::new(
                "geometry",
                format!("target size must be positive, got {}", self.target_size),
            ));
        }
        Ok(())
    }
}
