//! Rendering configuration.

use crate::error::ConfigError;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Clear color, linear RGB
    pub background: [f32; 3],

    /// Fog starts at this eye distance (world units)
    pub fog_near: f32,

    /// Fog fully hides lines at this eye distance (world units)
    pub fog_far: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            background: [0.0196, 0.0196, 0.0314], // #050508
            fog_near: 50.0,
            fog_far: 150.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::new("render", "window size must be non-zero"));
        }
        if !(self.near_plane > 0.0 && self.near_plane < self.far_plane) {
            return Err(ConfigError::new(
                "render",
                format!(
                    "clip planes must satisfy 0 < near < far, got {}..{}",
                    self.near_plane, self.far_plane
                ),
            ));
        }
        if self.fog_near >= self.fog_far {
            return Err(ConfigError::new("render", "fog near must be below fog far"));
        }
        Ok(())
    }
}
