use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{Frustum, FrustumError};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Far distance used for culling; replaces `far` when the frustum is built.
    pub screen_depth: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, -5.0),
            target: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees: 45.0,
            near: 0.5,
            far: 1000.0,
            screen_depth: 1000.0,
        }
    }
}

impl RenderView {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_lh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn frustum(&self, aspect: f32) -> Result<Frustum, FrustumError> {
        Frustum::new(
            self.screen_depth,
            self.projection_matrix(aspect),
            self.view_matrix(),
        )
    }
}
