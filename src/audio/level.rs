//! Low-band audio level: band average, normalized and low-pass filtered per frame.

use crate::params::LevelConfig;

/// One frame's reading
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LevelReading {
    /// Smoothed level in [0, 1]
    pub level: f32,
    /// Loudest raw byte in the band this frame
    pub peak: u8,
}

impl LevelReading {
    /// Status text, e.g. `"37% (max: 212)"`
    pub fn display(&self) -> String {
        format!("{}% (max: {})", (self.level * 100.0).round(), self.peak)
    }
}

pub struct LevelSampler {
    config: LevelConfig,
    reading: LevelReading,
}

impl LevelSampler {
    pub fn new(config: LevelConfig) -> Self {
        Self {
            config,
            reading: LevelReading::default(),
        }
    }

    pub fn reading(&self) -> LevelReading {
        self.reading
    }

    pub fn level(&self) -> f32 {
        self.reading.level
    }

    /// Fold one byte spectrum into the level:
    /// `level = lerp(level, avg(bins[..band]) / 255, smoothing)`.
    pub fn update(&mut self, bins: &[u8]) -> LevelReading {
        let band = &bins[..bins.len().min(self.config.band_bins)];

        let sum: u32 = band.iter().map(|&b| b as u32).sum();
        let avg = sum as f32 / self.config.band_bins as f32;
        let peak = band.iter().copied().max().unwrap_or(0);

        let target = avg / 255.0;
        let level = self.reading.level + (target - self.reading.level) * self.config.smoothing;

        self.reading = LevelReading {
            level: level.clamp(0.0, 1.0),
            peak,
        };
        self.reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_geometrically() {
        let mut sampler = LevelSampler::new(LevelConfig::default());
        let bins = [128u8; 128];
        let target = 128.0 / 255.0;

        let mut gap = target;
        for _ in 0..60 {
            let level = sampler.update(&bins).level;
            let next_gap = target - level;
            assert!((next_gap - gap * 0.8).abs() < 1e-5);
            gap = next_gap;
        }
        assert!((sampler.level() - target).abs() < 1e-5);
    }

    #[test]
    fn test_only_low_band_counts() {
        let mut sampler = LevelSampler::new(LevelConfig::default());
        let mut bins = [0u8; 128];
        bins[20..].fill(255);

        let reading = sampler.update(&bins);
        assert_eq!(reading.level, 0.0);
        assert_eq!(reading.peak, 0);
    }

    #[test]
    fn test_first_frame_takes_fifth_of_sample() {
        let mut sampler = LevelSampler::new(LevelConfig::default());
        let mut bins = [0u8; 128];
        bins[..20].fill(255);
        bins[3] = 255;

        let reading = sampler.update(&bins);
        assert!((reading.level - 0.2).abs() < 1e-6);
        assert_eq!(reading.peak, 255);
        assert_eq!(reading.display(), "20% (max: 255)");
    }

    #[test]
    fn test_short_spectrum_counts_missing_bins_as_zero() {
        let mut sampler = LevelSampler::new(LevelConfig::default());
        let reading = sampler.update(&[255u8; 10]);
        // avg = 10·255 / 20
        assert!((reading.level - 0.1).abs() < 1e-6);

        let mut empty = LevelSampler::new(LevelConfig::default());
        assert_eq!(empty.update(&[]), LevelReading::default());
    }
}
