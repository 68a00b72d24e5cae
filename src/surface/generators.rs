//! Closed-form parametrizations.
//!
//! Each function takes normalized lattice coordinates `(u, v) ∈ [0, 1]²`, maps them
//! onto the surface's own parameter domain and returns the point. Scale constants
//! here only shape the aspect ratio; the cache rescales every surface to the same
//! size afterwards.

use glam::DVec3;
use std::f64::consts::{PI, TAU};

/// Breather denominators below this magnitude collapse the point to the origin.
pub const BREATHER_SINGULARITY_EPS: f64 = 1e-3;

/// Sine-Gordon breather, shape parameter a = 0.4.
///
/// Domain u ∈ [-7, 7], v ∈ [-15, 15]. Output swaps y and z so the wave stands
/// upright on screen.
pub fn breather(u: f64, v: f64) -> DVec3 {
    const A: f64 = 0.4;

    let u = (u - 0.5) * 14.0;
    let v = (v - 0.5) * 30.0;

    let w = (1.0 - A * A).sqrt();
    let cosh_au = (A * u).cosh();
    let sinh_au = (A * u).sinh();
    let sin_wv = (w * v).sin();
    let cos_wv = (w * v).cos();

    // den >= A(1 - A²) = 0.336 for A = 0.4, so the fallback only guards other A
    let den = A * ((1.0 - A * A) * cosh_au * cosh_au + A * A * sin_wv * sin_wv);
    if den.abs() < BREATHER_SINGULARITY_EPS {
        return DVec3::ZERO;
    }

    let x = -u + (2.0 * (1.0 - A * A) * cosh_au * sinh_au) / den;
    let y = (2.0 * w * cosh_au * (-w * v.cos() * cos_wv - v.sin() * sin_wv)) / den;
    let z = (2.0 * w * cosh_au * (-w * v.sin() * cos_wv + v.cos() * sin_wv)) / den;

    DVec3::new(x, z, y)
}

/// Figure-8 Klein bottle immersion, tube offset r = 3, z stretched ×3.
pub fn klein_bottle(u: f64, v: f64) -> DVec3 {
    const R: f64 = 3.0;

    let u = u * TAU;
    let v = v * TAU;

    let (sin_u, cos_u) = u.sin_cos();
    let (sin_u2, cos_u2) = (u / 2.0).sin_cos();
    let sin_v = v.sin();
    let sin_2v = (2.0 * v).sin();

    let radial = R + cos_u2 * sin_v - sin_u2 * sin_2v;
    let x = radial * cos_u;
    let y = radial * sin_u;
    let z = sin_u2 * sin_v + cos_u2 * sin_2v;

    DVec3::new(x, y, z * 3.0)
}

/// Gielis superformula with a = b = 1.
fn superformula(angle: f64, m: f64, n1: f64, n2: f64, n3: f64) -> f64 {
    let t1 = (m * angle / 4.0).cos().abs();
    let t2 = (m * angle / 4.0).sin().abs();
    (t1.powf(n2) + t2.powf(n3)).powf(-1.0 / n1)
}

/// Torus (major radius 8) whose tube radius 3 is modulated by the superformula
/// (m = 6, n1 = 20, n2 = n3 = 10) around the tube.
pub fn super_torus(u: f64, v: f64) -> DVec3 {
    const MAJOR: f64 = 8.0;
    const MINOR: f64 = 3.0;

    let u = u * TAU;
    let v = v * TAU;

    let r = MINOR * superformula(v, 6.0, 20.0, 10.0, 10.0);
    let ring = MAJOR + r * v.cos();

    let x = ring * u.cos();
    let y = ring * u.sin();
    let z = r * v.sin();

    DVec3::new(x, z, y)
}

/// Dini's surface: a pseudosphere twisted along its axis.
///
/// v starts at 0.01 because ln(tan(v/2)) diverges at 0.
pub fn dini(u: f64, v: f64) -> DVec3 {
    const A: f64 = 1.0;
    const B: f64 = 0.2;

    let u = u * 4.0 * PI;
    let v = 0.01 + v * 2.0;

    let x = A * u.cos() * v.sin();
    let y = A * u.sin() * v.sin();
    let z = A * (v.cos() + (v / 2.0).tan().ln()) + B * u;

    DVec3::new(x * 3.0, z * 2.0 - 10.0, y * 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_klein_bottle_seam_closes() {
        // u = 0 and u = 1 meet after the figure-8 half twist: same point at v = 0
        assert_close(klein_bottle(0.0, 0.0), klein_bottle(1.0, 0.0));
        assert_close(klein_bottle(0.0, 0.0), DVec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_super_torus_ring_radius() {
        // At v = 0 the superformula is 1, so the outer ring sits at 8 + 3
        let p = super_torus(0.0, 0.0);
        assert_close(p, DVec3::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn test_superformula_unit_at_zero() {
        assert!((superformula(0.0, 6.0, 20.0, 10.0, 10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dini_finite_over_domain() {
        for i in 0..=20 {
            for j in 0..=20 {
                let p = dini(i as f64 / 20.0, j as f64 / 20.0);
                assert!(p.is_finite(), "non-finite at ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_dini_twist_raises_height() {
        // b·u term: walking u across the domain at fixed v climbs by 2·b·4π
        let start = dini(0.0, 0.5);
        let end = dini(1.0, 0.5);
        assert!((end.y - start.y - 2.0 * 0.2 * 4.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_breather_center_axis_swap() {
        // At u = v = 0 (grid center) sinh = 0 and sin(wv) = 0, so x = 0 and the
        // natural y lands in output z
        let p = breather(0.5, 0.5);
        let a: f64 = 0.4;
        let w = (1.0 - a * a).sqrt();
        let den = a * (1.0 - a * a);
        assert!(p.x.abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!((p.z - (-2.0 * w * w / den)).abs() < 1e-9);
    }

    #[test]
    fn test_breather_finite_over_domain() {
        for i in 0..=30 {
            for j in 0..=30 {
                let p = breather(i as f64 / 30.0, j as f64 / 30.0);
                assert!(p.is_finite());
            }
        }
    }
}
