use cubeworks_common::{BoundingSphere, Transform};
use glam::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrustumError {
    /// The far distance does not lie beyond the near depth implied by the
    /// projection, or one of them is not finite.
    #[error("screen depth {screen_depth} must exceed the projection's near depth {z_minimum}")]
    DegenerateDepth { screen_depth: f32, z_minimum: f32 },
    #[error("{0:?} plane has a zero-length normal")]
    DegeneratePlane(PlaneSide),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    Near,
    Far,
    Left,
    Right,
    Top,
    Bottom,
}

impl PlaneSide {
    pub const ALL: [PlaneSide; 6] = [
        PlaneSide::Near,
        PlaneSide::Far,
        PlaneSide::Left,
        PlaneSide::Right,
        PlaneSide::Top,
        PlaneSide::Bottom,
    ];
}

/// A plane with a unit normal; positive distance is on the normal's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    fn normalized(side: PlaneSide, v: Vec4) -> Result<Self, FrustumError> {
        let normal = v.truncate();
        let len = normal.length();
        if !len.is_finite() || len <= f32::EPSILON {
            return Err(FrustumError::DegeneratePlane(side));
        }
        Ok(Self {
            normal: normal / len,
            d: v.w / len,
        })
    }

    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }
}

/// Six inward-facing clipping planes of a camera.
///
/// Built from a left-handed, zero-to-one depth projection. The projection's
/// far plane is replaced by `screen_depth` before the planes are extracted.
/// A frustum goes stale as soon as the view or projection changes; callers
/// rebuild it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    pub fn new(screen_depth: f32, projection: Mat4, view: Mat4) -> Result<Self, FrustumError> {
        let z_minimum = -projection.w_axis.z / projection.z_axis.z;
        if !z_minimum.is_finite() || !screen_depth.is_finite() || screen_depth <= z_minimum {
            return Err(FrustumError::DegenerateDepth {
                screen_depth,
                z_minimum,
            });
        }
        let r = screen_depth / (screen_depth - z_minimum);

        let mut projection = projection;
        projection.z_axis.z = r;
        projection.w_axis.z = -r * z_minimum;

        let clip = projection * view;
        let (x, y, z, w) = (clip.row(0), clip.row(1), clip.row(2), clip.row(3));

        let plane = |side| {
            let v = match side {
                PlaneSide::Near => w + z,
                PlaneSide::Far => w - z,
                PlaneSide::Left => w + x,
                PlaneSide::Right => w - x,
                PlaneSide::Top => w - y,
                PlaneSide::Bottom => w + y,
            };
            Plane::normalized(side, v)
        };

        Ok(Self {
            planes: [
                plane(PlaneSide::Near)?,
                plane(PlaneSide::Far)?,
                plane(PlaneSide::Left)?,
                plane(PlaneSide::Right)?,
                plane(PlaneSide::Top)?,
                plane(PlaneSide::Bottom)?,
            ],
        })
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    pub fn plane(&self, side: PlaneSide) -> Plane {
        self.planes[side as usize]
    }

    /// True when the point is on or inside every plane.
    pub fn check_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.distance(point) >= 0.0)
    }

    /// True unless the sphere lies entirely outside some plane.
    ///
    /// May keep a sphere that sits outside near a frustum edge; never
    /// rejects one that overlaps the frustum.
    pub fn check_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes.iter().all(|p| p.distance(center) >= -radius)
    }

    /// Axis-aligned cube given its centre and half the edge length.
    pub fn check_cube(&self, center: Vec3, half_size: f32) -> bool {
        self.check_rectangle(center, Vec3::splat(half_size))
    }

    /// Axis-aligned box given its centre and per-axis half extents.
    ///
    /// Rejected only when all eight corners are outside the same plane.
    pub fn check_rectangle(&self, center: Vec3, half_extents: Vec3) -> bool {
        let corners = box_corners(center, half_extents);
        !self
            .planes
            .iter()
            .any(|p| corners.iter().all(|c| p.distance(*c) < 0.0))
    }

    /// Tests an object's mesh sphere placed with the object's transform.
    ///
    /// The radius is scaled by the largest axis of a non-uniform scale.
    pub fn check_object(&self, bounds: &BoundingSphere, transform: &Transform) -> bool {
        let world = bounds.placed(transform);
        self.check_sphere(world.center, world.radius)
    }
}

fn box_corners(c: Vec3, h: Vec3) -> [Vec3; 8] {
    [
        c + Vec3::new(-h.x, -h.y, -h.z),
        c + Vec3::new(h.x, -h.y, -h.z),
        c + Vec3::new(-h.x, h.y, -h.z),
        c + Vec3::new(h.x, h.y, -h.z),
        c + Vec3::new(-h.x, -h.y, h.z),
        c + Vec3::new(h.x, -h.y, h.z),
        c + Vec3::new(-h.x, h.y, h.z),
        c + Vec3::new(h.x, h.y, h.z),
    ]
}
