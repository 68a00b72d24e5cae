//! Spectrum analysis: time-domain samples → byte magnitudes per frequency bin.
//!
//! One read per rendered frame. Magnitudes are smoothed against the previous read,
//! converted to decibels and mapped linearly from `[min_decibels, max_decibels]`
//! onto `0..=255`.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use super::tap::SampleTap;
use crate::params::AnalyserConfig;

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

pub struct Analyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    samples: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    /// Smoothed linear magnitude per bin
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl Analyser {
    /// `config` must already be validated
    pub fn new(config: AnalyserConfig) -> Self {
        let size = config.fft_size;
        let bins = config.bin_count();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);

        Self {
            window: (0..size).map(|i| hann_window(i, size)).collect(),
            samples: vec![0.0; size],
            spectrum: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; bins],
            bytes: vec![0; bins],
            fft,
            config,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.config.bin_count()
    }

    /// Analyse the newest window held by `tap`. Missing history reads as silence.
    pub fn byte_frequency_data(&mut self, tap: &SampleTap) -> &[u8] {
        let mut samples = std::mem::take(&mut self.samples);
        tap.latest(&mut samples);
        self.process(&samples);
        self.samples = samples;
        &self.bytes
    }

    /// Analyse exactly `fft_size` samples.
    pub fn process(&mut self, samples: &[f32]) -> &[u8] {
        let size = self.config.fft_size;
        debug_assert_eq!(samples.len(), size);

        for ((slot, &s), &w) in self.spectrum.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.spectrum);

        let tau = self.config.smoothing_time_constant;
        let min_db = self.config.min_decibels;
        let range_scale = 1.0 / (self.config.max_decibels - min_db);

        for (k, byte) in self.bytes.iter_mut().enumerate() {
            let magnitude = self.spectrum[k].norm() / size as f32;
            let smoothed = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            // Keep denormals and non-finite input from sticking in the history
            self.smoothed[k] = if smoothed.is_finite() { smoothed } else { 0.0 };

            let db = 20.0 * self.smoothed[k].log10();
            let scaled = 255.0 * (db - min_db) * range_scale;
            *byte = if scaled.is_nan() {
                0
            } else {
                scaled.clamp(0.0, 255.0) as u8
            };
        }

        &self.bytes
    }

    /// Forget smoothing history (used when the capture device changes)
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.bytes.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(bin: usize, amplitude: f32, size: usize) -> Vec<f32> {
        (0..size)
            .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / size as f32).sin())
            .collect()
    }

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_silence_maps_to_zero() {
        let mut analyser = Analyser::new(AnalyserConfig::default());
        let bytes = analyser.process(&vec![0.0; 256]);
        assert_eq!(bytes.len(), 128);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_loud_low_tone_saturates_its_bin() {
        let mut analyser = Analyser::new(AnalyserConfig::default());
        let bytes = analyser.process(&tone(4, 1.0, 256)).to_vec();

        // 0.25 magnitude × 0.7 first-read weight ≈ -15 dB, above the -30 dB ceiling
        assert_eq!(bytes[4], 255);
        assert!(bytes[100] < bytes[4]);
    }

    #[test]
    fn test_smoothing_decays_after_tone_stops() {
        let mut analyser = Analyser::new(AnalyserConfig::default());
        analyser.process(&tone(4, 0.01, 256));
        let loud = analyser.process(&tone(4, 0.01, 256))[4];
        let fading = analyser.process(&vec![0.0; 256])[4];

        // History keeps 30% of the previous magnitude, roughly 10.5 dB down
        assert!(fading > 0);
        assert!(fading < loud);
    }

    #[test]
    fn test_reads_newest_window_from_tap() {
        let mut analyser = Analyser::new(AnalyserConfig::default());
        let tap = SampleTap::new(1024);

        tap.push_interleaved(&vec![0.0; 512], 1);
        tap.push_interleaved(&tone(4, 1.0, 256), 1);

        assert_eq!(analyser.byte_frequency_data(&tap)[4], 255);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut analyser = Analyser::new(AnalyserConfig::default());
        analyser.process(&tone(4, 1.0, 256));
        analyser.reset();
        assert!(analyser.process(&vec![0.0; 256]).iter().all(|&b| b == 0));
    }
}
