use glam::IVec2;

use crate::{KEY_TABLE_LEN, Key};

/// One capture of user input, produced by the window once per poll.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    /// Absolute cursor position in window pixels. `(0, 0)` means not captured.
    pub mouse_position: IVec2,
    pub mouse_delta: IVec2,
    pub scroll_delta: f32,
    pub keys: [bool; KEY_TABLE_LEN],
    /// Whether anything changed since the previous capture.
    pub is_dirty: bool,
}

impl Default for InputEvent {
    fn default() -> Self {
        Self {
            mouse_position: IVec2::ZERO,
            mouse_delta: IVec2::ZERO,
            scroll_delta: 0.0,
            keys: [false; KEY_TABLE_LEN],
            is_dirty: false,
        }
    }
}

impl InputEvent {
    /// A snapshot with nothing new in it.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys[key.code()]
    }

    /// Sets a key's state and marks the snapshot dirty.
    pub fn set_key(&mut self, key: Key, down: bool) {
        self.keys[key.code()] = down;
        self.is_dirty = true;
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.set_key(key, true);
        self
    }

    pub fn with_mouse_position(mut self, x: i32, y: i32) -> Self {
        self.mouse_position = IVec2::new(x, y);
        self.is_dirty = true;
        self
    }

    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = delta;
        self.is_dirty = true;
        self
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.iter().copied().filter(|k| self.keys[k.code()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_clean() {
        let e = InputEvent::default();
        assert!(!e.is_dirty);
        assert_eq!(e.pressed_keys().count(), 0);
    }

    #[test]
    fn builders_mark_dirty() {
        let e = InputEvent::idle().with_key(Key::Space);
        assert!(e.is_dirty);
        assert!(e.is_key_down(Key::Space));
        assert!(!e.is_key_down(Key::W));

        let m = InputEvent::idle().with_mouse_position(10, 20);
        assert!(m.is_dirty);
        assert_eq!(m.mouse_position, IVec2::new(10, 20));
    }

    #[test]
    fn pressed_keys_lists_down_keys() {
        let e = InputEvent::idle().with_key(Key::A).with_key(Key::MouseLeft);
        let keys: Vec<_> = e.pressed_keys().collect();
        assert_eq!(keys, vec![Key::A, Key::MouseLeft]);
    }
}
