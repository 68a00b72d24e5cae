//! Normalized point sets, one per surface, built once at startup.

use glam::{DVec3, Vec3};

use super::{Grid, Surface};
use crate::error::GeometryError;
use crate::params::{GeometryConfig, MAX_GRID_RESOLUTION};

/// One surface sampled over the grid, centered and rescaled.
///
/// Stored as flat `[x0, y0, z0, x1, ...]` so it can be handed straight to a vertex
/// buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    positions: Vec<f32>,
}

impl PointSet {
    /// Flat xyz components, length = vertex count × 3
    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn point(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.points().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(p), max.max(p)),
        )
    }
}

/// Immutable cache of every catalog surface, all sharing one grid.
#[derive(Debug)]
pub struct GeometryCache {
    grid: Grid,
    surfaces: Vec<Surface>,
    point_sets: Vec<PointSet>,
}

impl GeometryCache {
    /// Evaluate and normalize every surface.
    ///
    /// Fails on an empty catalog, a grid outside 2..=`MAX_GRID_RESOLUTION`, any
    /// non-finite generated point, or a surface whose largest extent collapses to
    /// (near) zero.
    pub fn build(surfaces: &[Surface], config: &GeometryConfig) -> Result<Self, GeometryError> {
        if !(2..=MAX_GRID_RESOLUTION).contains(&config.grid_resolution) {
            return Err(GeometryError::InvalidGrid(config.grid_resolution));
        }
        if surfaces.is_empty() {
            return Err(GeometryError::EmptyCatalog);
        }

        let grid = Grid::new(config.grid_resolution);
        let point_sets = surfaces
            .iter()
            .map(|surface| normalize(surface, &grid, config))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Geometry cache: {} surfaces × {} vertices",
            point_sets.len(),
            grid.vertex_count()
        );

        Ok(Self {
            grid,
            surfaces: surfaces.to_vec(),
            point_sets,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of cached surfaces
    pub fn len(&self) -> usize {
        self.point_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_sets.is_empty()
    }

    pub fn surface(&self, index: usize) -> &Surface {
        &self.surfaces[index]
    }

    pub fn point_set(&self, index: usize) -> &PointSet {
        &self.point_sets[index]
    }

    pub fn vertex_count(&self) -> usize {
        self.grid.vertex_count()
    }
}

/// Sample one surface and map it into a `target_size` box centered at the origin.
fn normalize(
    surface: &Surface,
    grid: &Grid,
    config: &GeometryConfig,
) -> Result<PointSet, GeometryError> {
    let count = grid.vertex_count();
    let mut raw = Vec::with_capacity(count);
    let mut min = DVec3::splat(f64::INFINITY);
    let mut max = DVec3::splat(f64::NEG_INFINITY);

    for index in 0..count {
        let p = surface.generate(grid, index);
        if !p.is_finite() {
            return Err(GeometryError::NonFinitePoint {
                surface: surface.name.to_string(),
                index,
            });
        }
        min = min.min(p);
        max = max.max(p);
        raw.push(p);
    }

    let center = (min + max) * 0.5;
    let extent = (max - min).max_element();
    if extent <= config.min_extent {
        return Err(GeometryError::DegenerateExtent {
            surface: surface.name.to_string(),
            extent,
        });
    }
    let scale = config.target_size as f64 / extent;

    log::debug!(
        "{}: center {:?}, extent {:.3}, scale {:.4}",
        surface.name,
        center,
        extent,
        scale
    );

    let mut positions = Vec::with_capacity(count * 3);
    for p in raw {
        let q = ((p - center) * scale).as_vec3();
        positions.extend_from_slice(&q.to_array());
    }

    Ok(PointSet { positions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CATALOG;

    const TOLERANCE: f32 = 1e-3;

    fn build_default() -> GeometryCache {
        GeometryCache::build(&CATALOG, &GeometryConfig::default()).unwrap()
    }

    #[test]
    fn test_every_surface_fills_target_size() {
        let cache = build_default();
        assert_eq!(cache.len(), 4);

        for i in 0..cache.len() {
            let (min, max) = cache.point_set(i).bounds();
            let largest = (max - min).max_element();
            assert!(
                (largest - 50.0).abs() < TOLERANCE,
                "{}: largest dimension {}",
                cache.surface(i).name,
                largest
            );
        }
    }

    #[test]
    fn test_every_surface_centered() {
        let cache = build_default();

        for i in 0..cache.len() {
            let (min, max) = cache.point_set(i).bounds();
            let center = (min + max) * 0.5;
            assert!(
                center.abs().max_element() < TOLERANCE,
                "{}: center {:?}",
                cache.surface(i).name,
                center
            );
        }
    }

    #[test]
    fn test_point_sets_share_vertex_count() {
        let cache = build_default();
        for i in 0..cache.len() {
            assert_eq!(cache.point_set(i).len(), 90 * 90);
            assert_eq!(cache.point_set(i).as_slice().len(), 90 * 90 * 3);
        }
    }

    #[test]
    fn test_degenerate_surface_rejected() {
        let flat = Surface::new("Point", "Collapses everywhere", |_, _| DVec3::ONE);
        let err = GeometryCache::build(&[flat], &GeometryConfig::default()).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateExtent { .. }));
    }

    #[test]
    fn test_non_finite_surface_rejected() {
        let broken = Surface::new("Broken", "Divides by zero", |u, _| {
            DVec3::new(1.0 / (u - 0.0), 0.0, 0.0)
        });
        let err = GeometryCache::build(&[broken], &GeometryConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GeometryError::NonFinitePoint {
                surface: "Broken".to_string(),
                index: 0
            }
        );
    }

    #[test]
    fn test_empty_catalog_and_out_of_range_grid() {
        assert_eq!(
            GeometryCache::build(&[], &GeometryConfig::default()).unwrap_err(),
            GeometryError::EmptyCatalog
        );

        let config = GeometryConfig {
            grid_resolution: 1,
            ..Default::default()
        };
        assert_eq!(
            GeometryCache::build(&CATALOG, &config).unwrap_err(),
            GeometryError::InvalidGrid(1)
        );

        let config = GeometryConfig {
            grid_resolution: MAX_GRID_RESOLUTION + 1,
            ..Default::default()
        };
        assert_eq!(
            GeometryCache::build(&CATALOG, &config).unwrap_err(),
            GeometryError::InvalidGrid(MAX_GRID_RESOLUTION + 1)
        );
    }

    #[test]
    fn test_flat_but_nondegenerate_surface_is_accepted() {
        // A plane has zero thickness on one axis; only the largest extent matters
        let plane = Surface::new("Plane", "z = 0", |u, v| DVec3::new(u * 4.0, v * 2.0, 0.0));
        let cache = GeometryCache::build(&[plane], &GeometryConfig::default()).unwrap();
        let (min, max) = cache.point_set(0).bounds();
        assert!((max.x - min.x - 50.0).abs() < TOLERANCE);
        assert!((max.y - min.y - 25.0).abs() < TOLERANCE);
        assert_eq!(max.z - min.z, 0.0);
    }
}
