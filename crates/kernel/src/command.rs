use cubeworks_common::ObjectId;
use serde::{Deserialize, Serialize};

/// A scene-wide change requested by a script.
///
/// Scripts only hold their own object mutably, so anything touching another
/// object is queued and applied by the game loop between phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneCommand {
    /// Select one object and deselect every other.
    Select(ObjectId),
    /// Move the selection to the next drawable object, wrapping around.
    SelectNext,
    ClearSelection,
    Despawn(ObjectId),
    /// Set an object's tint colour and enable tinting.
    SetTint(ObjectId, [f32; 3]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_compare_by_value() {
        let id = ObjectId::new();
        assert_eq!(SceneCommand::Select(id), SceneCommand::Select(id));
        assert_ne!(SceneCommand::Select(id), SceneCommand::Despawn(id));
    }
}
