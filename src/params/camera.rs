//! Orbit camera configuration.

use crate::error::ConfigError;

/// Auto-rotating orbit camera around the origin
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Initial eye position (world units)
    pub position: [f32; 3],

    /// Orbit center / look-at point (world units)
    pub target: [f32; 3],

    /// Rotation speed: 2.0 = one full orbit every 30 seconds
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 15.0, 55.0], // Frames a 50-unit surface with margin
            target: [0.0, 0.0, 0.0],
            auto_rotate_speed: 2.0,
        }
    }
}

impl CameraConfig {
    /// Angular velocity around the Y axis (radians per second)
    pub fn angular_velocity(&self) -> f32 {
        // One orbit takes 60 / speed seconds
        std::f32::consts::TAU * self.auto_rotate_speed / 60.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.auto_rotate_speed.is_finite() {
            return Err(ConfigError::new("camera", "rotate speed must be finite"));
        }
        let dx = self.position[0] - self.target[0];
        let dz = self.position[2] - self.target[2];
        if dx * dx + dz * dz == 0.0 {
            return Err(ConfigError::new(
                "camera",
                "eye must not sit on the orbit axis",
            ));
        }
        Ok(())
    }
}
