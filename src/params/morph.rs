//! Morph animation timing.

use crate::error::ConfigError;

/// Morph timing parameters
#[derive(Debug, Clone)]
pub struct MorphConfig {
    /// Time from trigger to the target surface being fully shown (seconds)
    pub duration_s: f32,

    /// Exponential ease-out steepness: factor = 1 - 2^(-k * progress)
    pub ease_exponent: f32,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            duration_s: 1.5,
            ease_exponent: 10.0,
        }
    }
}

impl MorphConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(ConfigError::new(
                "morph",
                format!("duration must be positive, got {}", self.duration_s),
            ));
        }
        if !(self.ease_exponent.is_finite() && self.ease_exponent > 0.0) {
            return Err(ConfigError::new(
                "morph",
                format!("ease exponent must be positive, got {}", self.ease_exponent),
            ));
        }
        Ok(())
    }
}
