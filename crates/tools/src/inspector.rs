use cubeworks_common::ObjectId;
use cubeworks_kernel::{LoopStats, SceneSnapshot};
use cubeworks_render::DrawStats;
use serde::Serialize;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against scene snapshots for debugging and
/// the diagnostics overlay.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of a snapshot and the counters that led to it.
    pub fn summary(scene: &SceneSnapshot, draw: DrawStats, game: LoopStats) -> SceneSummary {
        let selected = scene.selected();
        SceneSummary {
            frame: scene.frame,
            object_count: scene.objects.len(),
            drawable_count: scene.objects.iter().filter(|o| o.is_drawable()).count(),
            selected: selected.map(|o| o.id),
            selected_name: selected.map(|o| o.name.clone()),
            rendered: draw.rendered,
            culled: draw.culled,
            fixed_ticks: game.fixed_ticks,
            idle_skips: game.idle_skips,
        }
    }

    pub fn inspect_object(scene: &SceneSnapshot, id: ObjectId) -> Option<ObjectInfo> {
        scene.objects.iter().find(|o| o.id == id).map(|o| {
            let t = &o.transform;
            ObjectInfo {
                id,
                name: o.name.clone(),
                mesh: o.mesh.as_ref().map(|m| m.name.clone()),
                location: t.location.to_array(),
                rotation: [t.rotation.pitch, t.rotation.yaw, t.rotation.roll],
                scale: t.scale.to_array(),
                tint: o.use_tint.then_some(o.tint),
                selected: o.selected,
            }
        })
    }

    /// All object ids in scene order.
    pub fn list_objects(scene: &SceneSnapshot) -> Vec<ObjectId> {
        scene.objects.iter().map(|o| o.id).collect()
    }
}

/// Summary of a frame for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub object_count: usize,
    pub drawable_count: usize,
    pub selected: Option<ObjectId>,
    pub selected_name: Option<String>,
    pub rendered: usize,
    pub culled: usize,
    pub fixed_ticks: u64,
    pub idle_skips: u64,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} objects={} drawable={} rendered={} culled={} fixed_ticks={} idle={} selected={}",
            self.frame,
            self.object_count,
            self.drawable_count,
            self.rendered,
            self.culled,
            self.fixed_ticks,
            self.idle_skips,
            self.selected_name.as_deref().unwrap_or("-"),
        )
    }
}

/// Detailed info about a single object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub name: String,
    pub mesh: Option<String>,
    pub location: [f32; 3],
    /// Pitch, yaw, roll in degrees.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    /// Present only when tinting is enabled.
    pub tint: Option<[f32; 3]>,
    pub selected: bool,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Object [{}] {} mesh={} pos=({:.2}, {:.2}, {:.2}) rot=({:.1}, {:.1}, {:.1}) scale=({:.2}, {:.2}, {:.2})",
            self.id.short(),
            self.name,
            self.mesh.as_deref().unwrap_or("-"),
            self.location[0],
            self.location[1],
            self.location[2],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
            self.scale[0],
            self.scale[1],
            self.scale[2],
        )?;
        if self.selected {
            write!(f, " [selected]")?;
        }
        Ok(())
    }
}
