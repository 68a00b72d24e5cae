//! Command-line argument parsing.

use clap::Parser;

use crate::error::ConfigError;
use crate::params::{
    AnalyserConfig, CameraConfig, GeometryConfig, LevelConfig, MorphConfig, RenderConfig,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "neon-geometry")]
#[command(about = "Audio-reactive morphing parametric surfaces", long_about = None)]
pub struct Args {
    /// Microphone to capture from (device name); default input if omitted
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Print available audio inputs and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Start audio capture immediately instead of waiting for the A key
    #[arg(long)]
    pub audio: bool,

    /// Lattice samples per side
    #[arg(long, value_name = "N", default_value = "90")]
    pub grid_res: usize,

    /// Morph duration
    #[arg(long, value_name = "SECONDS", default_value = "1.5")]
    pub morph_duration: f32,

    /// Camera auto-rotate speed (2.0 = one orbit per 30 s, 0 = still)
    #[arg(long, value_name = "SPEED", default_value = "2.0")]
    pub rotate_speed: f32,
}

/// Every parameter section, after command-line overrides
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub geometry: GeometryConfig,
    pub morph: MorphConfig,
    pub analyser: AnalyserConfig,
    pub level: LevelConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.morph.validate()?;
        self.analyser.validate()?;
        self.level.validate()?;
        self.camera.validate()?;
        self.render.validate()
    }
}

impl Args {
    /// Apply overrides on top of the defaults
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.geometry.grid_resolution = self.grid_res;
        settings.morph.duration_s = self.morph_duration;
        settings.camera.auto_rotate_speed = self.rotate_speed;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        let args = Args::parse_from(["neon-geometry"]);
        let settings = args.settings();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.geometry.grid_resolution, 90);
        assert_eq!(settings.morph.duration_s, 1.5);
        assert_eq!(settings.camera.auto_rotate_speed, 2.0);
        assert!(args.device.is_none());
        assert!(!args.audio);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "neon-geometry",
            "--device",
            "USB Mic",
            "--audio",
            "--grid-res",
            "40",
            "--morph-duration",
            "3",
        ]);
        let settings = args.settings();

        assert_eq!(args.device.as_deref(), Some("USB Mic"));
        assert!(args.audio);
        assert_eq!(settings.geometry.grid_resolution, 40);
        assert_eq!(settings.morph.duration_s, 3.0);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let args = Args::parse_from(["neon-geometry", "--morph-duration", "0"]);
        let err = args.settings().validate().unwrap_err();
        assert_eq!(err.section, "morph");
    }

    #[test]
    fn test_oversized_grid_fails_validation() {
        for res in ["3000", "5000000000"] {
            let args = Args::parse_from(["neon-geometry", "--grid-res", res]);
            let err = args.settings().validate().unwrap_err();
            assert_eq!(err.section, "geometry");
        }
    }
}
