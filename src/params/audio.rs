//! Audio analysis configuration.

use crate::error::ConfigError;

/// Spectrum analyser configuration
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT window size (must be power of 2). Yields fft_size / 2 frequency bins.
    pub fft_size: usize,

    /// Per-bin averaging with the previous read, 0 = none (dimensionless, [0, 1))
    pub smoothing_time_constant: f32,

    /// Magnitude mapped to byte 0 (dBFS)
    pub min_decibels: f32,

    /// Magnitude mapped to byte 255 (dBFS)
    pub max_decibels: f32,

    /// Samples retained by the capture tap (multiple of fft_size keeps headroom
    /// for a slow frame)
    pub tap_capacity: usize,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 256, // 128 bins
            smoothing_time_constant: 0.3,
            min_decibels: -100.0,
            max_decibels: -30.0,
            tap_capacity: 4096,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins produced per read
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(ConfigError::new(
                "analyser",
                format!("FFT size must be a power of 2 >= 32, got {}", self.fft_size),
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing_time_constant) {
            return Err(ConfigError::new(
                "analyser",
                format!(
                    "smoothing time constant must be in [0, 1), got {}",
                    self.smoothing_time_constant
                ),
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(ConfigError::new(
                "analyser",
                format!(
                    "min decibels ({}) must be below max decibels ({})",
                    self.min_decibels, self.max_decibels
                ),
            ));
        }
        if self.tap_capacity < self.fft_size {
            return Err(ConfigError::new(
                "analyser",
                "tap capacity must hold at least one FFT window",
            ));
        }
        Ok(())
    }
}

/// Low-band level extraction and smoothing
#[derive(Debug, Clone)]
pub struct LevelConfig {
    /// Number of lowest frequency bins averaged into the level
    /// 20 bins @ 256-point FFT, 48 kHz ≈ 0-3.7 kHz
    pub band_bins: usize,

    /// Weight of the new sample per frame (single-pole low-pass, (0, 1])
    pub smoothing: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            band_bins: 20,
            smoothing: 0.2,
        }
    }
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.band_bins == 0 {
            return Err(ConfigError::new("level", "band must cover at least one bin"));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::new(
                "level",
                format!("smoothing must be in (0, 1], got {}", self.smoothing),
            ));
        }
        Ok(())
    }
}
