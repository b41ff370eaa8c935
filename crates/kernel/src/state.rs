use cubeworks_common::ObjectId;

use crate::{Object, ObjectBody, SceneCommand};

/// The whole mutable scene: objects in insertion order.
#[derive(Debug, Default)]
pub struct GameState {
    objects: Vec<Object>,
}

/// A frame-consistent copy of every object body, handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    /// Loop call that produced this snapshot.
    pub frame: u64,
    pub objects: Vec<ObjectBody>,
}

impl SceneSnapshot {
    pub fn selected(&self) -> Option<&ObjectBody> {
        self.objects.iter().find(|o| o.selected)
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: Object) -> ObjectId {
        let id = object.id();
        self.objects.push(object);
        id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub(crate) fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn selected(&self) -> Option<&Object> {
        self.objects.iter().find(|o| o.body.selected)
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn snapshot(&self, frame: u64) -> SceneSnapshot {
        SceneSnapshot {
            frame,
            objects: self.objects.iter().map(|o| o.body.clone()).collect(),
        }
    }

    /// Applies one queued command. Commands naming a missing object are ignored.
    pub fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::Select(id) => {
                if self.get(id).is_none() {
                    tracing::debug!(id = %id.short(), "select: no such object");
                    return;
                }
                for o in &mut self.objects {
                    o.body.selected = o.id() == id;
                }
                tracing::info!(id = %id.short(), "selected object");
            }
            SceneCommand::SelectNext => {
                if let Some(id) = self.next_drawable_after_selection() {
                    self.apply(SceneCommand::Select(id));
                }
            }
            SceneCommand::ClearSelection => {
                for o in &mut self.objects {
                    o.body.selected = false;
                }
            }
            SceneCommand::Despawn(id) => {
                self.objects.retain(|o| o.id() != id);
            }
            SceneCommand::SetTint(id, tint) => {
                if let Some(o) = self.get_mut(id) {
                    o.body.tint = tint;
                    o.body.use_tint = true;
                }
            }
        }
    }

    fn next_drawable_after_selection(&self) -> Option<ObjectId> {
        let n = self.objects.len();
        let start = self
            .objects
            .iter()
            .position(|o| o.body.selected)
            .map_or(0, |i| i + 1);
        (0..n)
            .map(|k| &self.objects[(start + k) % n])
            .find(|o| o.body.is_drawable())
            .map(Object::id)
    }
}
