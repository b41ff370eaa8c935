use cubeworks_assets::MeshId;
use cubeworks_common::ObjectId;
use cubeworks_kernel::SceneSnapshot;
use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::Frustum;

/// One draw call's worth of data for a visible object.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub id: ObjectId,
    pub mesh: MeshId,
    pub world: Mat4,
    /// RGB tint; alpha is 1 when tinting is enabled and 0 otherwise.
    pub tint: [f32; 4],
    pub index_count: usize,
    pub selected: bool,
}

/// Per-frame totals reported back for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStats {
    pub rendered: usize,
    pub culled: usize,
    /// Objects without a mesh, or whose mesh is not loaded in the renderer.
    pub skipped: usize,
}

/// Culls a snapshot against a frustum and hands survivors to a draw callback.
#[derive(Debug, Clone, Copy)]
pub struct DrawPass<'a> {
    frustum: &'a Frustum,
}

impl<'a> DrawPass<'a> {
    pub fn new(frustum: &'a Frustum) -> Self {
        Self { frustum }
    }

    /// Walks the snapshot in order. Objects whose mesh fails `is_resident`
    /// are skipped without counting as culled.
    pub fn run(
        &self,
        scene: &SceneSnapshot,
        is_resident: impl Fn(MeshId) -> bool,
        mut draw: impl FnMut(DrawItem),
    ) -> DrawStats {
        let mut stats = DrawStats::default();
        for object in &scene.objects {
            let Some(mesh) = object.mesh.as_ref().filter(|m| is_resident(m.id)) else {
                stats.skipped += 1;
                continue;
            };
            if !self.frustum.check_object(&mesh.bounds, &object.transform) {
                stats.culled += 1;
                continue;
            }
            let [r, g, b] = object.tint;
            draw(DrawItem {
                id: object.id,
                mesh: mesh.id,
                world: object.transform.matrix(),
                tint: [r, g, b, if object.use_tint { 1.0 } else { 0.0 }],
                index_count: mesh.index_count(),
                selected: object.selected,
            });
            stats.rendered += 1;
        }
        stats
    }
}
