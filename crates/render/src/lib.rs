//! Rendering boundary: view frustum, cull-then-draw pass, renderer trait.
//!
//! # Invariants
//! - Renderers read [`SceneSnapshot`](cubeworks_kernel::SceneSnapshot)s and
//!   never mutate the scene.
//! - Frustum planes are unit-normal and point inward; a frustum is rebuilt
//!   by the renderer whenever the view or projection changes.
//! - Culling never rejects a volume that is partially inside the frustum.
//! - GPU-side resources live in the renderer's own table keyed by mesh id.
//!
//! # Backends
//! Only a headless backend ships here. It runs the full draw pass and
//! reports what would have been submitted, so the trait can be driven from
//! the CLI and from tests without a window.

mod camera;
mod draw;
mod frustum;
mod renderer;

pub use camera::RenderView;
pub use draw::{DrawItem, DrawPass, DrawStats};
pub use frustum::{Frustum, FrustumError, Plane, PlaneSide};
pub use renderer::{HeadlessRenderer, MeshResource, RenderError, Renderer};
