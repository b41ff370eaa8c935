use cubeworks_assets::{Mesh, MeshId};
use cubeworks_kernel::SceneSnapshot;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::{DrawItem, DrawPass, DrawStats, Frustum, FrustumError, PlaneSide, RenderView};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("mesh {0} is not loaded")]
    MeshNotLoaded(MeshId),
    #[error(transparent)]
    Frustum(#[from] FrustumError),
}

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A renderer reads scene snapshots and never mutates the scene. It owns
/// whatever per-mesh resources it needs, keyed by [`MeshId`], and rebuilds
/// its frustum whenever the view or the surface size changes.
pub trait Renderer {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError>;
    fn set_view(&mut self, view: RenderView) -> Result<(), RenderError>;
    fn load_mesh(&mut self, mesh: &Mesh) -> Result<(), RenderError>;
    fn unload_mesh(&mut self, id: MeshId) -> Result<(), RenderError>;
    fn set_vsync(&mut self, enabled: bool);
    fn set_fxaa(&mut self, enabled: bool);
    /// Culls and draws one frame, returning its totals.
    fn draw(&mut self, scene: &SceneSnapshot) -> DrawStats;
    /// Totals of the most recent frame.
    fn stats(&self) -> DrawStats;
}

/// What the headless backend keeps per loaded mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshResource {
    pub name: String,
    pub vertex_count: usize,
    pub index_count: usize,
}

/// Renderer without a GPU: runs the draw pass and records the draw list.
#[derive(Debug)]
pub struct HeadlessRenderer {
    width: u32,
    height: u32,
    view: RenderView,
    frustum: Frustum,
    resources: BTreeMap<MeshId, MeshResource>,
    vsync: bool,
    fxaa: bool,
    frames: u64,
    last_frame: u64,
    last_stats: DrawStats,
    draw_list: Vec<DrawItem>,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32, view: RenderView) -> Result<Self, RenderError> {
        let frustum = view.frustum(aspect(width, height))?;
        tracing::info!(width, height, "headless renderer ready");
        Ok(Self {
            width,
            height,
            view,
            frustum,
            resources: BTreeMap::new(),
            vsync: true,
            fxaa: true,
            frames: 0,
            last_frame: 0,
            last_stats: DrawStats::default(),
            draw_list: Vec::new(),
        })
    }

    fn rebuild_frustum(&mut self) -> Result<(), RenderError> {
        self.frustum = self.view.frustum(aspect(self.width, self.height))?;
        tracing::debug!(width = self.width, height = self.height, "rebuilt frustum");
        Ok(())
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn view(&self) -> &RenderView {
        &self.view
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_loaded(&self, id: MeshId) -> bool {
        self.resources.contains_key(&id)
    }

    pub fn resources(&self) -> impl Iterator<Item = (&MeshId, &MeshResource)> {
        self.resources.iter()
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    pub fn fxaa(&self) -> bool {
        self.fxaa
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Items submitted in the most recent frame, in scene order.
    pub fn draw_list(&self) -> &[DrawItem] {
        &self.draw_list
    }

    /// Human-readable description of the last frame.
    pub fn frame_report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} (scene frame {}) ===",
            self.frames, self.last_frame
        );
        let _ = writeln!(
            out,
            "Surface: {}x{} vsync={} fxaa={}",
            self.width, self.height, self.vsync, self.fxaa
        );
        let v = &self.view;
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} depth={:.0}",
            v.eye.x, v.eye.y, v.eye.z, v.target.x, v.target.y, v.target.z, v.fov_degrees,
            v.screen_depth
        );
        for side in PlaneSide::ALL {
            let p = self.frustum.plane(side);
            let _ = writeln!(
                out,
                "  {:<6} n=({:+.3}, {:+.3}, {:+.3}) d={:+.3}",
                format!("{side:?}"),
                p.normal.x,
                p.normal.y,
                p.normal.z,
                p.d
            );
        }
        let s = self.last_stats;
        let _ = writeln!(
            out,
            "Rendered: {} Culled: {} Skipped: {}",
            s.rendered, s.culled, s.skipped
        );
        for item in &self.draw_list {
            let p = item.world.w_axis;
            let mesh = self
                .resources
                .get(&item.mesh)
                .map_or("?", |r| r.name.as_str());
            let _ = writeln!(
                out,
                "  [{}] {:<8} pos=({:.2}, {:.2}, {:.2}) tint=({:.2}, {:.2}, {:.2}, {:.0}){}",
                item.id.short(),
                mesh,
                p.x,
                p.y,
                p.z,
                item.tint[0],
                item.tint[1],
                item.tint[2],
                item.tint[3],
                if item.selected { " *" } else { "" }
            );
        }
        out
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

impl Renderer for HeadlessRenderer {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            // Minimised window; keep the previous surface.
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.rebuild_frustum()
    }

    fn set_view(&mut self, view: RenderView) -> Result<(), RenderError> {
        let previous = std::mem::replace(&mut self.view, view);
        if let Err(e) = self.rebuild_frustum() {
            self.view = previous;
            return Err(e);
        }
        Ok(())
    }

    fn load_mesh(&mut self, mesh: &Mesh) -> Result<(), RenderError> {
        if self.resources.contains_key(&mesh.id) {
            tracing::debug!(name = %mesh.name, "mesh already loaded");
            return Ok(());
        }
        self.resources.insert(
            mesh.id,
            MeshResource {
                name: mesh.name.clone(),
                vertex_count: mesh.vertex_count(),
                index_count: mesh.index_count(),
            },
        );
        tracing::debug!(name = %mesh.name, id = %mesh.id, "loaded mesh");
        Ok(())
    }

    fn unload_mesh(&mut self, id: MeshId) -> Result<(), RenderError> {
        self.resources
            .remove(&id)
            .map(|_| ())
            .ok_or(RenderError::MeshNotLoaded(id))
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.vsync = enabled;
    }

    fn set_fxaa(&mut self, enabled: bool) {
        self.fxaa = enabled;
    }

    fn draw(&mut self, scene: &SceneSnapshot) -> DrawStats {
        let _span = tracing::info_span!("draw_frame", frame = scene.frame).entered();
        let mut list = std::mem::take(&mut self.draw_list);
        list.clear();
        let resources = &self.resources;
        let stats = DrawPass::new(&self.frustum).run(
            scene,
            |id| resources.contains_key(&id),
            |item| list.push(item),
        );
        self.draw_list = list;
        self.frames += 1;
        self.last_frame = scene.frame;
        self.last_stats = stats;
        tracing::trace!(
            frame = scene.frame,
            rendered = stats.rendered,
            culled = stats.culled,
            "drew frame"
        );
        stats
    }

    fn stats(&self) -> DrawStats {
        self.last_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeworks_assets::{BoundsAccumulator, primitives};
    use cubeworks_kernel::ObjectBody;
    use glam::Vec3;
    use std::sync::{Arc, Mutex};

    struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

    impl tracing::Subscriber for SpanNames {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            let mut names = self.0.lock().unwrap();
            names.push(span.metadata().name());
            tracing::span::Id::from_u64(names.len() as u64)
        }

        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
        fn event(&self, _: &tracing::Event<'_>) {}
        fn enter(&self, _: &tracing::span::Id) {}
        fn exit(&self, _: &tracing::span::Id) {}
    }

    fn cube() -> Arc<Mesh> {
        Arc::new(Mesh::build("Cube", primitives::placeholder(), &mut BoundsAccumulator::new()).unwrap())
    }

    fn scene(mesh: &Arc<Mesh>) -> SceneSnapshot {
        let mut visible = ObjectBody::new("visible");
        visible.mesh = Some(Arc::clone(mesh));
        let mut hidden = ObjectBody::new("hidden");
        hidden.mesh = Some(Arc::clone(mesh));
        hidden.transform.location = Vec3::new(0.0, 0.0, -500.0);
        SceneSnapshot {
            frame: 3,
            objects: vec![visible, hidden],
        }
    }

    #[test]
    fn draws_only_loaded_meshes() {
        let mesh = cube();
        let mut r = HeadlessRenderer::new(800, 600, RenderView::default()).unwrap();
        let stats = r.draw(&scene(&mesh));
        assert_eq!(stats.rendered, 0);
        assert_eq!(stats.skipped, 2);

        r.load_mesh(&mesh).unwrap();
        let stats = r.draw(&scene(&mesh));
        assert_eq!(stats.rendered, 1);
        assert_eq!(stats.culled, 1);
        assert_eq!(r.stats(), stats);
        assert_eq!(r.draw_list().len(), 1);
        assert_eq!(r.frames_drawn(), 2);
    }

    #[test]
    fn unload_removes_resource() {
        let mesh = cube();
        let mut r = HeadlessRenderer::new(800, 600, RenderView::default()).unwrap();
        r.load_mesh(&mesh).unwrap();
        r.load_mesh(&mesh).unwrap();
        assert_eq!(r.resources().count(), 1);
        r.unload_mesh(mesh.id).unwrap();
        assert!(!r.is_loaded(mesh.id));
        assert!(matches!(
            r.unload_mesh(mesh.id),
            Err(RenderError::MeshNotLoaded(_))
        ));
    }

    #[test]
    fn resize_rebuilds_frustum() {
        let mut r = HeadlessRenderer::new(800, 600, RenderView::default()).unwrap();
        let before = r.frustum().clone();
        r.resize(1920, 600).unwrap();
        assert_ne!(r.frustum(), &before);
        assert_eq!(r.size(), (1920, 600));

        let wide = r.frustum().clone();
        r.resize(0, 0).unwrap();
        assert_eq!(r.frustum(), &wide);
        assert_eq!(r.size(), (1920, 600));
    }

    #[test]
    fn bad_view_is_rejected_and_previous_kept() {
        let mut r = HeadlessRenderer::new(800, 600, RenderView::default()).unwrap();
        let bad = RenderView {
            screen_depth: 0.1,
            ..RenderView::default()
        };
        assert!(matches!(r.set_view(bad), Err(RenderError::Frustum(_))));
        assert_eq!(r.view(), &RenderView::default());
    }

    #[test]
    fn toggles_and_report() {
        let mesh = cube();
        let mut r = HeadlessRenderer::new(640, 480, RenderView::default()).unwrap();
        r.set_vsync(false);
        r.set_fxaa(false);
        assert!(!r.vsync());
        assert!(!r.fxaa());
        r.load_mesh(&mesh).unwrap();
        r.draw(&scene(&mesh));

        let report = r.frame_report();
        assert!(report.contains("scene frame 3"));
        assert!(report.contains("vsync=false fxaa=false"));
        assert!(report.contains("Rendered: 1 Culled: 1"));
        assert!(report.contains("Cube"));
    }

    #[test]
    fn each_frame_is_drawn_inside_a_span() {
        let mesh = cube();
        let mut r = HeadlessRenderer::new(800, 600, RenderView::default()).unwrap();
        r.load_mesh(&mesh).unwrap();
        let names = Arc::new(Mutex::new(Vec::new()));
        tracing::subscriber::with_default(SpanNames(Arc::clone(&names)), || {
            r.draw(&scene(&mesh));
            r.draw(&scene(&mesh));
        });
        assert_eq!(*names.lock().unwrap(), ["draw_frame", "draw_frame"]);
    }
}
