//! Scene session: owns the geometry cache, morph controller and audio level, and
//! turns one frame's time and audio into the scalars the renderer consumes.

use std::sync::Arc;

use crate::audio::{Analyser, LevelReading, LevelSampler, SampleTap};
use crate::morph::{MorphController, MorphStart};
use crate::params::{AnalyserConfig, LevelConfig, MorphConfig};
use crate::surface::GeometryCache;

pub const STATUS_MORPHING: &str = "Reconfiguring Lattice...";
pub const STATUS_STABLE: &str = "Structure: Stable";

/// Shader animation terms (`sin(1.5t)`, `sin(3t)`) all repeat after 4π seconds,
/// so the uniform time wraps there and stays precise in f32.
pub const SHADER_TIME_PERIOD: f64 = 4.0 * std::f64::consts::PI;

/// Per-frame shader inputs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    /// Seconds, wrapped to `SHADER_TIME_PERIOD`
    pub time: f32,
    pub morph_factor: f32,
    pub audio_level: f32,
    /// A morph landed this frame
    pub morph_completed: bool,
}

/// Text and flags for the overlay / window title
#[derive(Clone, Debug, PartialEq)]
pub struct SceneStatus {
    /// Surface name, or "From >> To" while morphing
    pub title: String,
    pub description: &'static str,
    pub status: &'static str,
    /// Trigger control should be disabled while this is set
    pub morphing: bool,
}

pub struct Scene {
    morph: MorphController,
    analyser: Analyser,
    level: LevelSampler,
    /// Description only changes once a morph lands
    description: &'static str,
}

impl Scene {
    pub fn new(
        cache: Arc<GeometryCache>,
        morph: MorphConfig,
        analyser: AnalyserConfig,
        level: LevelConfig,
    ) -> Self {
        let description = cache.surface(0).description;
        Self {
            morph: MorphController::new(cache, morph),
            analyser: Analyser::new(analyser),
            level: LevelSampler::new(level),
            description,
        }
    }

    pub fn morph(&self) -> &MorphController {
        &self.morph
    }

    pub fn cache(&self) -> &GeometryCache {
        self.morph.cache()
    }

    /// Request a morph to the next surface; `None` if one is already running.
    pub fn trigger_morph(&mut self, now_s: f64) -> Option<MorphStart> {
        self.morph.trigger(now_s)
    }

    /// Advance the morph and, when `tap` is live, the audio level.
    ///
    /// Without a tap the level holds its last smoothed value.
    pub fn frame(&mut self, now_s: f64, tap: Option<&SampleTap>) -> FrameParams {
        if let Some(tap) = tap {
            let bins = self.analyser.byte_frequency_data(tap);
            self.level.update(bins);
        }

        let morph = self.morph.update(now_s);
        if morph.completed {
            let current = self.morph.current_index();
            self.description = self.cache().surface(current).description;
        }

        FrameParams {
            time: now_s.rem_euclid(SHADER_TIME_PERIOD) as f32,
            morph_factor: morph.factor,
            audio_level: self.level.level(),
            morph_completed: morph.completed,
        }
    }

    pub fn audio(&self) -> LevelReading {
        self.level.reading()
    }

    /// Drop analyser history after the capture device changes
    pub fn reset_audio_history(&mut self) {
        self.analyser.reset();
    }

    pub fn status(&self) -> SceneStatus {
        let cache = self.cache();
        let current = cache.surface(self.morph.current_index());

        if self.morph.is_morphing() {
            let next = cache.surface(self.morph.next_index());
            SceneStatus {
                title: format!("{} >> {}", current.name, next.name),
                description: self.description,
                status: STATUS_MORPHING,
                morphing: true,
            }
        } else {
            SceneStatus {
                title: current.name.to_string(),
                description: self.description,
                status: STATUS_STABLE,
                morphing: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GeometryConfig;
    use crate::surface::CATALOG;

    fn scene() -> Scene {
        let config = GeometryConfig {
            grid_resolution: 10,
            ..Default::default()
        };
        let cache = Arc::new(GeometryCache::build(&CATALOG, &config).unwrap());
        Scene::new(
            cache,
            MorphConfig::default(),
            AnalyserConfig::default(),
            LevelConfig::default(),
        )
    }

    #[test]
    fn test_status_follows_morph() {
        let mut scene = scene();
        assert_eq!(scene.status().title, "Breather Surface");
        assert_eq!(scene.status().status, STATUS_STABLE);

        scene.trigger_morph(0.0);
        let status = scene.status();
        assert_eq!(status.title, "Breather Surface >> Klein Bottle");
        assert_eq!(status.status, STATUS_MORPHING);
        assert!(status.morphing);
        assert_eq!(status.description, CATALOG[0].description);

        let frame = scene.frame(1.5, None);
        assert!(frame.morph_completed);
        assert_eq!(frame.morph_factor, 1.0);

        let status = scene.status();
        assert_eq!(status.title, "Klein Bottle");
        assert_eq!(status.description, CATALOG[1].description);
        assert!(!status.morphing);
    }

    #[test]
    fn test_level_holds_without_tap() {
        let mut scene = scene();
        let tap = SampleTap::new(1024);
        let tone: Vec<f32> = (0..256)
            .map(|i| (2.0 * std::f32::consts::PI * 4.0 * i as f32 / 256.0).sin())
            .collect();
        tap.push_interleaved(&tone, 1);

        let live = scene.frame(0.0, Some(&tap)).audio_level;
        assert!(live > 0.0);

        let held = scene.frame(0.1, None).audio_level;
        assert_eq!(held, live);
    }

    #[test]
    fn test_shader_time_wraps_continuously() {
        let mut scene = scene();
        assert_eq!(scene.frame(1.25, None).time, 1.25);

        let wrapped = scene.frame(SHADER_TIME_PERIOD + 1.25, None).time;
        assert!((wrapped - 1.25).abs() < 1e-5);

        let late = scene.frame(1.0e7, None).time;
        assert!((0.0..SHADER_TIME_PERIOD as f32).contains(&late));
    }

    #[test]
    fn test_silent_scene_has_zero_level() {
        let mut scene = scene();
        assert_eq!(scene.frame(0.0, None).audio_level, 0.0);
        assert_eq!(scene.audio().display(), "0% (max: 0)");
    }
}
