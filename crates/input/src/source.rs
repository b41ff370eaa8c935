use std::collections::BTreeMap;

use crate::{InputEvent, Key};

/// Anything that can hand the game loop one snapshot per poll.
pub trait InputSource {
    fn poll(&mut self) -> InputEvent;
}

/// Replays a fixed plan of key presses, one frame per poll.
///
/// A pressed key is held for exactly one frame and released on the next,
/// both frames producing a dirty snapshot. Frames with no change are idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frame: u64,
    held: Vec<Key>,
    presses: BTreeMap<u64, Vec<Key>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_at(mut self, frame: u64, key: Key) -> Self {
        self.presses.entry(frame).or_default().push(key);
        self
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputEvent {
        let mut event = InputEvent::idle();
        for key in self.held.drain(..) {
            event.set_key(key, false);
        }
        if let Some(keys) = self.presses.remove(&self.frame) {
            for key in keys {
                event.set_key(key, true);
                self.held.push(key);
            }
        }
        self.frame += 1;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_held_for_one_frame() {
        let mut src = ScriptedInput::new().press_at(1, Key::Space);

        let f0 = src.poll();
        assert!(!f0.is_dirty);

        let f1 = src.poll();
        assert!(f1.is_dirty);
        assert!(f1.is_key_down(Key::Space));

        let f2 = src.poll();
        assert!(f2.is_dirty);
        assert!(!f2.is_key_down(Key::Space));

        assert!(!src.poll().is_dirty);
        assert_eq!(src.frame(), 4);
    }

    #[test]
    fn several_keys_in_one_frame() {
        let mut src = ScriptedInput::new()
            .press_at(0, Key::W)
            .press_at(0, Key::MouseLeft);
        let f0 = src.poll();
        assert!(f0.is_key_down(Key::W));
        assert!(f0.is_key_down(Key::MouseLeft));
    }
}
