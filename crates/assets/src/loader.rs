use std::path::Path;

use crate::{AssetError, Vertex, primitives};

/// Raw geometry handed over by a loader, before bounds and identity are computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Turns a file reference into raw geometry.
pub trait MeshLoader {
    fn load(&self, path: &Path) -> Result<MeshData, AssetError>;
}

/// Resolves model paths to built-in primitives by file stem
/// (`cube`, `plane`, `sphere`, `capsule`, case-insensitive).
///
/// The path is never opened, so the demo runs without any model files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralLoader;

impl MeshLoader for ProceduralLoader {
    fn load(&self, path: &Path) -> Result<MeshData, AssetError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| AssetError::Load(format!("no file stem in {}", path.display())))?;

        match stem.as_str() {
            "cube" => Ok(primitives::placeholder()),
            "plane" => Ok(primitives::plane(1.0)),
            "sphere" => Ok(primitives::uv_sphere(0.5, 24, 16)),
            "capsule" => Ok(primitives::capsule(0.5, 1.0, 24, 8)),
            other => Err(AssetError::Load(format!("no procedural mesh named {other}"))),
        }
    }
}
