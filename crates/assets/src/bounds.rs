use cubeworks_common::BoundingSphere;
use glam::Vec3;

use crate::AssetError;

/// Running per-axis extents of the vertex positions seen so far.
///
/// Reuse across meshes is allowed only through [`BoundsAccumulator::finish`]
/// or an explicit [`BoundsAccumulator::reset`].
#[derive(Debug, Clone, Copy)]
pub struct BoundsAccumulator {
    min: Vec3,
    max: Vec3,
    count: usize,
}

impl Default for BoundsAccumulator {
    fn default() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
            count: 0,
        }
    }
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, position: Vec3) {
        self.min = self.min.min(position);
        self.max = self.max.max(position);
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Sphere around the axis-aligned box of every registered position.
    pub fn sphere(&self) -> Result<BoundingSphere, AssetError> {
        if self.count == 0 {
            return Err(AssetError::EmptyVertexSet);
        }
        let extent = self.max - self.min;
        Ok(BoundingSphere::new(self.min + extent / 2.0, extent.length() / 2.0))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Computes the sphere and resets, ready for the next mesh.
    pub fn finish(&mut self) -> Result<BoundingSphere, AssetError> {
        let sphere = self.sphere();
        self.reset();
        sphere
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube_corners() -> Vec<Vec3> {
        let mut v = Vec::new();
        for x in [-0.5, 0.5] {
            for y in [-0.5, 0.5] {
                for z in [-0.5, 0.5] {
                    v.push(Vec3::new(x, y, z));
                }
            }
        }
        v
    }

    #[test]
    fn unit_cube_sphere() {
        let mut acc = BoundsAccumulator::new();
        for p in unit_cube_corners() {
            acc.register(p);
        }
        let s = acc.finish().unwrap();
        assert!(s.center.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!((s.radius - 3.0f32.sqrt() / 2.0).abs() < 1e-6);
    }

    #[test]
    fn empty_set_is_an_error() {
        let acc = BoundsAccumulator::new();
        assert!(matches!(acc.sphere(), Err(AssetError::EmptyVertexSet)));
    }

    #[test]
    fn single_point_has_zero_radius() {
        let mut acc = BoundsAccumulator::new();
        acc.register(Vec3::new(2.0, -1.0, 3.0));
        let s = acc.sphere().unwrap();
        assert_eq!(s.center, Vec3::new(2.0, -1.0, 3.0));
        assert_eq!(s.radius, 0.0);
    }

    #[test]
    fn all_negative_positions() {
        // Max must start below every float, not at the smallest positive one.
        let mut acc = BoundsAccumulator::new();
        acc.register(Vec3::new(-3.0, -3.0, -3.0));
        acc.register(Vec3::new(-1.0, -1.0, -1.0));
        let s = acc.sphere().unwrap();
        assert_eq!(s.center, Vec3::splat(-2.0));
    }

    #[test]
    fn finish_resets_between_meshes() {
        let mut acc = BoundsAccumulator::new();
        acc.register(Vec3::splat(100.0));
        acc.register(Vec3::splat(-100.0));
        acc.finish().unwrap();
        assert_eq!(acc.count(), 0);

        acc.register(Vec3::ZERO);
        acc.register(Vec3::new(2.0, 0.0, 0.0));
        let s = acc.finish().unwrap();
        assert_eq!(s.center, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(s.radius, 1.0);
    }

    #[test]
    fn finish_resets_even_when_empty() {
        let mut acc = BoundsAccumulator::new();
        assert!(acc.finish().is_err());
        acc.register(Vec3::ONE);
        assert!(acc.finish().is_ok());
    }
}
