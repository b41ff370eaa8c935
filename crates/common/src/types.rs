use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an object in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, used in logs and reports.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Euler rotation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotation {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Quaternion applying roll (Z), then pitch (X), then yaw (Y).
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Resets any angle that reached a full turn back to zero.
    pub fn wrapped(self) -> Self {
        let wrap = |a: f32| if a >= 360.0 || a <= -360.0 { 0.0 } else { a };
        Self {
            pitch: wrap(self.pitch),
            yaw: wrap(self.yaw),
            roll: wrap(self.roll),
        }
    }
}

/// Spatial transform: location, rotation, non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Rotation,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Rotation::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_location(location: Vec3) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// World matrix: scale, then rotation, then translation.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation.to_quat(), self.location)
    }

    /// Largest of the three scale factors.
    pub fn max_scale(&self) -> f32 {
        self.scale.x.max(self.scale.y).max(self.scale.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_uniqueness() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.location, Vec3::ZERO);
        assert_eq!(t.rotation, Rotation::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert!(t.matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn matrix_applies_scale_before_translation() {
        let t = Transform {
            location: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::new(2.0, 2.0, 2.0),
            ..Transform::default()
        };
        let p = t.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn yaw_is_degrees_about_y() {
        let t = Transform {
            rotation: Rotation::new(0.0, 90.0, 0.0),
            ..Transform::default()
        };
        // Rotating +Z by 90 degrees of yaw lands on +X.
        let p = t.matrix().transform_point3(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::X, 1e-5), "got {p:?}");
    }

    #[test]
    fn max_scale_picks_largest_axis() {
        let t = Transform {
            scale: Vec3::new(1.0, 4.0, 2.0),
            ..Transform::default()
        };
        assert_eq!(t.max_scale(), 4.0);
    }

    #[test]
    fn wrapped_resets_full_turns() {
        let r = Rotation::new(360.0, -361.0, 45.0).wrapped();
        assert_eq!(r, Rotation::new(0.0, 0.0, 45.0));
    }
}
