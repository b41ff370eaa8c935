//! Shared value types for the cubeworks engine.
//!
//! # Invariants
//! - Rotation angles are stored in degrees and converted to radians only when
//!   a matrix or quaternion is built.
//! - Bounding spheres are object-space and never carry a negative radius.

mod bounds;
mod types;

pub use bounds::BoundingSphere;
pub use types::{ObjectId, Rotation, Transform};
