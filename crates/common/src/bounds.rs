use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::Transform;

/// Sphere enclosing a mesh, in the mesh's own coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Moves the sphere into world space for culling.
    ///
    /// The center is offset by the transform's location and the radius is
    /// multiplied by the largest scale axis. Rotation is ignored, so the
    /// result is conservative for rotated or non-uniformly scaled objects
    /// whose mesh is not centered on its origin.
    pub fn placed(&self, transform: &Transform) -> Self {
        Self {
            center: self.center + transform.location,
            radius: self.radius * transform.max_scale(),
        }
    }
}
