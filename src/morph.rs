//! Morph controller: cross-fades between cached surfaces in a fixed cycle.
//!
//! Two states. `Stable` shows `current`; a trigger moves to `Morphing`, which
//! eases from the previous target to the next surface over a fixed duration and
//! then settles back to `Stable` on the new surface. Source and target are views
//! into the immutable cache chosen by an index pair, so nothing is copied or
//! mutated mid-morph.

use std::sync::Arc;

use crate::params::MorphConfig;
use crate::surface::{GeometryCache, PointSet};

/// Exponential ease-out: `1 - 2^(-k·t)`, pinned to exactly 1 at `t >= 1`.
pub fn ease_out_expo(progress: f32, exponent: f32) -> f32 {
    if progress >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-exponent * progress)
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MorphState {
    Stable,
    Morphing { started_at: f64, next: usize },
}

/// Emitted when a trigger is accepted; the renderer uploads `source`/`target` then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphStart {
    pub from: usize,
    pub to: usize,
}

/// Per-frame result of `MorphController::update`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphFrame {
    /// Blend weight of the target, in [0, 1]
    pub factor: f32,
    /// True on the single frame the morph lands
    pub completed: bool,
}

pub struct MorphController {
    cache: Arc<GeometryCache>,
    config: MorphConfig,
    state: MorphState,
    current: usize,
    /// Index whose points are in the source slot
    source: usize,
    /// Index whose points are in the target slot
    target: usize,
    factor: f32,
}

impl MorphController {
    /// Start stable on the first surface: source = target = cache[0].
    pub fn new(cache: Arc<GeometryCache>, config: MorphConfig) -> Self {
        debug_assert!(!cache.is_empty());
        Self {
            cache,
            config,
            state: MorphState::Stable,
            current: 0,
            source: 0,
            target: 0,
            factor: 0.0,
        }
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn is_morphing(&self) -> bool {
        matches!(self.state, MorphState::Morphing { .. })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Surface the next trigger (or the morph in flight) lands on
    pub fn next_index(&self) -> usize {
        match self.state {
            MorphState::Morphing { next, .. } => next,
            MorphState::Stable => (self.current + 1) % self.cache.len(),
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn source(&self) -> &PointSet {
        self.cache.point_set(self.source)
    }

    pub fn target(&self) -> &PointSet {
        self.cache.point_set(self.target)
    }

    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    /// Begin a morph to the next surface. Ignored (returns `None`) while one is
    /// already running.
    pub fn trigger(&mut self, now_s: f64) -> Option<MorphStart> {
        if self.is_morphing() {
            log::debug!("Morph trigger ignored: already morphing");
            return None;
        }

        let next = (self.current + 1) % self.cache.len();

        // Previous target becomes the source, so a chain of morphs never jumps
        self.source = self.target;
        self.target = next;
        self.factor = 0.0;
        self.state = MorphState::Morphing {
            started_at: now_s,
            next,
        };

        log::info!(
            "Morph: {} >> {}",
            self.cache.surface(self.current).name,
            self.cache.surface(next).name
        );

        Some(MorphStart {
            from: self.source,
            to: next,
        })
    }

    /// Advance the eased factor. Lands on the next surface once the duration has
    /// elapsed.
    pub fn update(&mut self, now_s: f64) -> MorphFrame {
        let MorphState::Morphing { started_at, next } = self.state else {
            return MorphFrame {
                factor: self.factor,
                completed: false,
            };
        };

        let elapsed = (now_s - started_at).max(0.0);
        let progress = (elapsed / f64::from(self.config.duration_s)).min(1.0) as f32;
        self.factor = ease_out_expo(progress, self.config.ease_exponent);

        let completed = progress >= 1.0;
        if completed {
            self.current = next;
            self.state = MorphState::Stable;
            log::info!("Structure stable: {}", self.cache.surface(next).name);
        }

        MorphFrame {
            factor: self.factor,
            completed,
        }
    }

    /// CPU-side blend `lerp(source[i], target[i], factor)` into flat xyz `out`.
    pub fn interpolate(&self, factor: f32, out: &mut [f32]) {
        let source = self.source().as_slice();
        let target = self.target().as_slice();
        debug_assert_eq!(out.len(), source.len());

        for ((o, &s), &t) in out.iter_mut().zip(source).zip(target) {
            *o = s + (t - s) * factor;
        }
    }
}
