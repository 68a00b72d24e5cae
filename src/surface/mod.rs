//! Parametric surfaces evaluated over a shared (u, v) lattice.
//!
//! Every surface samples the same R×R grid, so vertex `i` of one cached point set
//! corresponds to vertex `i` of any other. That correspondence is what makes
//! per-vertex morphing possible.

mod cache;
mod generators;

use glam::DVec3;

pub use cache::{GeometryCache, PointSet};
pub use generators::{breather, dini, klein_bottle, super_torus, BREATHER_SINGULARITY_EPS};

/// Square parameter lattice of `resolution × resolution` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    resolution: usize,
}

impl Grid {
    /// `resolution` must be at least 2; see `GeometryConfig::validate`.
    pub fn new(resolution: usize) -> Self {
        debug_assert!(resolution >= 2);
        Self { resolution }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn vertex_count(&self) -> usize {
        self.resolution * self.resolution
    }

    /// Normalized lattice coordinates of vertex `index`, both in [0, 1].
    ///
    /// `u` walks along a row, `v` advances once per row.
    pub fn uv(&self, index: usize) -> (f64, f64) {
        let last = (self.resolution - 1) as f64;
        let u = (index % self.resolution) as f64 / last;
        let v = (index / self.resolution) as f64 / last;
        (u, v)
    }

    /// Line-list indices connecting each vertex to its right and lower neighbour.
    pub fn line_indices(&self) -> Vec<u32> {
        let res = self.resolution;
        let mut indices = Vec::with_capacity(4 * res * (res - 1));

        for row in 0..res {
            for col in 0..res {
                let a = (row * res + col) as u32;
                if col < res - 1 {
                    indices.extend_from_slice(&[a, a + 1]);
                }
                if row < res - 1 {
                    indices.extend_from_slice(&[a, a + res as u32]);
                }
            }
        }

        indices
    }
}

/// A named parametric surface.
#[derive(Clone, Copy)]
pub struct Surface {
    pub name: &'static str,
    pub description: &'static str,
    eval: fn(f64, f64) -> DVec3,
}

impl Surface {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        eval: fn(f64, f64) -> DVec3,
    ) -> Self {
        Self {
            name,
            description,
            eval,
        }
    }

    /// Point at normalized lattice coordinates.
    pub fn at(&self, u: f64, v: f64) -> DVec3 {
        (self.eval)(u, v)
    }

    /// Point for lattice vertex `index` of `grid`.
    pub fn generate(&self, grid: &Grid, index: usize) -> DVec3 {
        let (u, v) = grid.uv(index);
        self.at(u, v)
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface").field("name", &self.name).finish()
    }
}

/// The four surfaces, in morph order.
pub const CATALOG: [Surface; 4] = [
    Surface::new(
        "Breather Surface",
        "A rhythmic standing wave surface derived from the sine-Gordon equation.",
        breather,
    ),
    Surface::new(
        "Klein Bottle",
        "A non-orientable surface where inside and outside are indistinguishable.",
        klein_bottle,
    ),
    Surface::new(
        "Super-Torus",
        "A toroidal topology deformed by 'superformula' parameters.",
        super_torus,
    ),
    Surface::new(
        "Dini's Surface",
        "A surface of constant negative curvature, obtained by twisting a pseudosphere.",
        dini,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uv_covers_lattice_exactly_once() {
        let grid = Grid::new(90);
        let last = 89.0;

        let mut seen = HashSet::new();
        for i in 0..grid.vertex_count() {
            let (u, v) = grid.uv(i);
            assert!((0.0..=1.0).contains(&u));
            assert!((0.0..=1.0).contains(&v));

            // Recover integer lattice coordinates; they must be exact steps of 1/(R-1)
            let col = (u * last).round();
            let row = (v * last).round();
            assert!((u - col / last).abs() < 1e-12);
            assert!((v - row / last).abs() < 1e-12);
            assert!(seen.insert((col as usize, row as usize)));
        }
        assert_eq!(seen.len(), 90 * 90);
    }

    #[test]
    fn test_uv_endpoints() {
        let grid = Grid::new(90);
        assert_eq!(grid.uv(0), (0.0, 0.0));
        assert_eq!(grid.uv(89), (1.0, 0.0));
        assert_eq!(grid.uv(90), (0.0, 1.0 / 89.0));
        assert_eq!(grid.uv(90 * 90 - 1), (1.0, 1.0));
    }

    #[test]
    fn test_line_indices() {
        let grid = Grid::new(4);
        let indices = grid.line_indices();

        // 4 rows × 3 horizontal + 4 columns × 3 vertical segments, 2 indices each
        assert_eq!(indices.len(), 2 * (4 * 3 + 4 * 3));
        assert!(indices.iter().all(|&i| (i as usize) < grid.vertex_count()));
        assert_eq!(&indices[..4], &[0, 1, 0, 4]);
    }

    #[test]
    fn test_catalog_order() {
        let names: Vec<_> = CATALOG.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            ["Breather Surface", "Klein Bottle", "Super-Torus", "Dini's Surface"]
        );
    }
}
