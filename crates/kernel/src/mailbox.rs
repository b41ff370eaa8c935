use std::sync::{Arc, Mutex, MutexGuard};

use crate::SceneSnapshot;

/// Single-slot hand-off of scene snapshots from the game thread to the
/// render thread. A newer snapshot replaces one that was never taken.
#[derive(Debug, Clone, Default)]
pub struct FrameMailbox {
    slot: Arc<Mutex<Option<SceneSnapshot>>>,
}

impl FrameMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `snapshot`, returning the unread one it replaced.
    pub fn publish(&self, snapshot: SceneSnapshot) -> Option<SceneSnapshot> {
        self.lock().replace(snapshot)
    }

    pub fn take_latest(&self) -> Option<SceneSnapshot> {
        self.lock().take()
    }

    pub fn has_pending(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<SceneSnapshot>> {
        // A panicking writer leaves either the old or the new whole snapshot.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}
