// End-to-end morph behavior through the scene session, at full grid resolution.

use std::sync::Arc;

use neon_geometry::morph::MorphState;
use neon_geometry::params::{AnalyserConfig, GeometryConfig, LevelConfig, MorphConfig};
use neon_geometry::scene::{Scene, STATUS_MORPHING, STATUS_STABLE};
use neon_geometry::surface::{GeometryCache, CATALOG};

fn scene() -> Scene {
    let cache = GeometryCache::build(&CATALOG, &GeometryConfig::default()).unwrap();
    Scene::new(
        Arc::new(cache),
        MorphConfig::default(),
        AnalyserConfig::default(),
        LevelConfig::default(),
    )
}

#[test]
fn test_morph_lands_on_second_surface_after_duration() {
    let mut scene = scene();
    assert_eq!(scene.morph().current_index(), 0);

    assert!(scene.trigger_morph(10.0).is_some());
    assert_eq!(scene.status().status, STATUS_MORPHING);

    // Frames in between keep morphing with a rising factor
    let mut last = 0.0;
    for step in 1..15 {
        let frame = scene.frame(10.0 + step as f64 * 0.1, None);
        assert!(!frame.morph_completed);
        assert!(frame.morph_factor > last);
        last = frame.morph_factor;
    }

    let frame = scene.frame(11.5, None);
    assert!(frame.morph_completed);
    assert_eq!(frame.morph_factor, 1.0);

    assert_eq!(scene.morph().current_index(), 1);
    assert_eq!(scene.morph().state(), MorphState::Stable);

    let status = scene.status();
    assert_eq!(status.title, "Klein Bottle");
    assert_eq!(status.status, STATUS_STABLE);
    assert!(!status.morphing);
}

#[test]
fn test_rapid_double_trigger_changes_nothing() {
    let mut scene = scene();

    scene.trigger_morph(0.0);
    let next = scene.morph().next_index();
    let source = scene.morph().source().clone();
    let target = scene.morph().target().clone();

    assert!(scene.trigger_morph(0.016).is_none());
    assert_eq!(scene.morph().next_index(), next);
    assert_eq!(scene.morph().source(), &source);
    assert_eq!(scene.morph().target(), &target);

    // And the original morph still finishes on schedule
    assert!(scene.frame(1.5, None).morph_completed);
    assert_eq!(scene.morph().current_index(), 1);
}

#[test]
fn test_endpoints_stay_put_during_morph() {
    let mut scene = scene();
    scene.trigger_morph(0.0);

    let source = scene.morph().source().clone();
    let target = scene.morph().target().clone();

    for step in 0..10 {
        scene.frame(step as f64 * 0.1, None);
        assert_eq!(scene.morph().source(), &source);
        assert_eq!(scene.morph().target(), &target);
    }
}

#[test]
fn test_full_cycle_visits_every_surface_in_order() {
    let mut scene = scene();
    let mut visited = vec![scene.status().title];

    for i in 0..4 {
        let start = i as f64 * 2.0;
        scene.trigger_morph(start);
        scene.frame(start + 1.5, None);
        visited.push(scene.status().title);
    }

    assert_eq!(
        visited,
        [
            "Breather Surface",
            "Klein Bottle",
            "Super-Torus",
            "Dini's Surface",
            "Breather Surface"
        ]
    );
}
