//! Meshes and the table that owns them.
//!
//! Meshes are immutable once registered and shared by every object that
//! references them. The renderer keeps its own resources keyed by [`MeshId`];
//! nothing backend-specific is stored on a [`Mesh`].
//!
//! # Invariants
//! - Every registered mesh has at least one vertex and a finite bounding sphere.
//! - A [`BoundsAccumulator`] is reset after each mesh so extents never leak
//!   from one mesh into the next.
//! - A mesh that fails to load is replaced by the placeholder cube under the
//!   requested name.

mod bounds;
mod loader;
mod mesh;
pub mod primitives;
mod table;

pub use bounds::BoundsAccumulator;
pub use loader::{MeshData, MeshLoader, ProceduralLoader};
pub use mesh::{Mesh, MeshId, Vertex};
pub use table::{ManifestEntry, MeshManifest, MeshTable};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bounding sphere requested for an empty vertex set")]
    EmptyVertexSet,
    #[error("mesh not found: {0}")]
    MeshNotFound(String),
    #[error("mesh already registered: {0}")]
    DuplicateMesh(String),
    #[error("mesh load error: {0}")]
    Load(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
