//! Developer tooling: read-only scene inspection and frame diagnostics.
//!
//! # Invariants
//! - Tools only read snapshots and counters; they never touch the live scene.

mod inspector;

pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};
