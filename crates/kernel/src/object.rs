use cubeworks_assets::Mesh;
use cubeworks_common::{ObjectId, Transform};
use glam::Vec3;
use std::fmt;
use std::sync::Arc;

use crate::{NullScript, Script};

pub const DEFAULT_TINT: [f32; 3] = [1.0, 1.0, 1.0];

/// Everything about an object except its behaviour.
///
/// This is the part scripts may mutate and the part copied into snapshots.
#[derive(Debug, Clone)]
pub struct ObjectBody {
    pub id: ObjectId,
    pub name: String,
    pub transform: Transform,
    pub tint: [f32; 3],
    pub use_tint: bool,
    /// Objects without a mesh are never drawn.
    pub mesh: Option<Arc<Mesh>>,
    pub selected: bool,
}

impl ObjectBody {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            transform: Transform::default(),
            tint: DEFAULT_TINT,
            use_tint: false,
            mesh: None,
            selected: false,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.mesh.is_some()
    }
}

/// A scene object: a body plus the script driving it.
pub struct Object {
    pub body: ObjectBody,
    pub(crate) script: Box<dyn Script>,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            body: ObjectBody::new(name),
            script: Box::new(NullScript),
        }
    }

    pub fn with_script(mut self, script: impl Script + 'static) -> Self {
        self.script = Box::new(script);
        self
    }

    pub fn with_mesh(mut self, mesh: Arc<Mesh>) -> Self {
        self.body.mesh = Some(mesh);
        self
    }

    pub fn at(mut self, location: Vec3) -> Self {
        self.body.transform.location = location;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.body.transform.scale = scale;
        self
    }

    /// Sets the tint colour without enabling it.
    pub fn with_tint(mut self, tint: [f32; 3]) -> Self {
        self.body.tint = tint;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.body.selected = selected;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.body.id
    }

    pub fn script_name(&self) -> &str {
        self.script.name()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("body", &self.body)
            .field("script", &self.script.name())
            .finish()
    }
}
