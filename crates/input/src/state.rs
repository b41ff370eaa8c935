use glam::IVec2;

use crate::{InputEvent, KEY_TABLE_LEN, Key, KeyBindings};

/// Persistent input state, updated once per game-loop call.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: InputEvent,
    previous_keys: Option<[bool; KEY_TABLE_LEN]>,
    bindings: KeyBindings,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Folds a freshly captured snapshot into the persistent state.
    pub fn fold(&mut self, mut snapshot: InputEvent) {
        self.previous_keys = Some(self.current.keys);

        if snapshot.is_dirty {
            if snapshot.mouse_position == IVec2::ZERO {
                snapshot.mouse_position = self.current.mouse_position;
            }
            snapshot.mouse_delta = snapshot.mouse_position - self.current.mouse_position;
            self.current = snapshot;
        } else {
            self.current.mouse_delta = IVec2::ZERO;
            self.current.scroll_delta = 0.0;
            self.current.is_dirty = false;
        }
    }

    /// Whether the key bound to `action` is held. Unbound actions are never down.
    pub fn is_down(&self, action: &str) -> bool {
        self.bindings
            .key_for(action)
            .is_some_and(|k| self.current.is_key_down(k))
    }

    /// Whether the key bound to `action` went down in the latest fold.
    pub fn was_pressed(&self, action: &str) -> bool {
        let Some(key) = self.bindings.key_for(action) else {
            return false;
        };
        let before = self.previous_keys.is_some_and(|keys| keys[key.code()]);
        self.current.is_key_down(key) && !before
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.current.is_key_down(key)
    }

    pub fn mouse_position(&self) -> IVec2 {
        self.current.mouse_position
    }

    pub fn mouse_delta(&self) -> IVec2 {
        self.current.mouse_delta
    }

    pub fn scroll_delta(&self) -> f32 {
        self.current.scroll_delta
    }

    pub fn is_dirty(&self) -> bool {
        self.current.is_dirty
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InputState {
        InputState::new(KeyBindings::default_layout())
    }

    #[test]
    fn zero_position_keeps_previous() {
        let mut s = state();
        s.fold(InputEvent::idle().with_mouse_position(50, 50));
        assert_eq!(s.mouse_position(), IVec2::new(50, 50));

        let mut e = InputEvent::idle().with_key(Key::W);
        e.mouse_position = IVec2::ZERO;
        s.fold(e);
        assert_eq!(s.mouse_position(), IVec2::new(50, 50));
        assert_eq!(s.mouse_delta(), IVec2::ZERO);
    }

    #[test]
    fn dirty_snapshot_computes_delta() {
        let mut s = state();
        s.fold(InputEvent::idle().with_mouse_position(10, 10));
        s.fold(InputEvent::idle().with_mouse_position(15, 7));
        assert_eq!(s.mouse_delta(), IVec2::new(5, -3));
        assert!(s.is_dirty());
    }

    #[test]
    fn clean_snapshot_zeroes_deltas_only() {
        let mut s = state();
        s.fold(InputEvent::idle().with_mouse_position(10, 10));
        s.fold(
            InputEvent::idle()
                .with_mouse_position(20, 30)
                .with_scroll(1.5)
                .with_key(Key::W),
        );
        assert_eq!(s.mouse_delta(), IVec2::new(10, 20));

        s.fold(InputEvent::idle());
        assert_eq!(s.mouse_delta(), IVec2::ZERO);
        assert_eq!(s.scroll_delta(), 0.0);
        assert!(!s.is_dirty());
        assert_eq!(s.mouse_position(), IVec2::new(20, 30));
        assert!(s.is_down("MoveForward"));
    }

    #[test]
    fn clean_snapshot_contents_are_ignored() {
        let mut s = state();
        let mut e = InputEvent::idle();
        e.keys[Key::W.code()] = true;
        e.mouse_position = IVec2::new(99, 99);
        s.fold(e);
        assert!(!s.is_down("MoveForward"));
        assert_eq!(s.mouse_position(), IVec2::ZERO);
    }

    #[test]
    fn unbound_action_is_never_down() {
        let mut s = InputState::new(KeyBindings::new());
        s.fold(InputEvent::idle().with_key(Key::Space));
        assert!(!s.is_down("Jump"));
        assert!(!s.was_pressed("Jump"));
        assert!(s.is_key_down(Key::Space));
    }

    #[test]
    fn was_pressed_fires_on_edge_only() {
        let mut s = state();
        s.fold(InputEvent::idle().with_key(Key::Space));
        assert!(s.was_pressed("Jump"));

        // Still held, no new edge.
        s.fold(InputEvent::idle());
        assert!(s.is_down("Jump"));
        assert!(!s.was_pressed("Jump"));

        let mut release = InputEvent::idle();
        release.set_key(Key::Space, false);
        s.fold(release);
        assert!(!s.is_down("Jump"));

        s.fold(InputEvent::idle().with_key(Key::Space));
        assert!(s.was_pressed("Jump"));
    }
}
