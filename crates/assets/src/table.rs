use cubeworks_common::BoundingSphere;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::{AssetError, BoundsAccumulator, Mesh, MeshData, MeshId, MeshLoader, primitives};

/// Named meshes, shared read-only with every object that draws them.
#[derive(Debug, Default)]
pub struct MeshTable {
    meshes: BTreeMap<String, Arc<Mesh>>,
    bounds: BoundsAccumulator,
}

impl MeshTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers raw geometry under a unique name.
    pub fn register(&mut self, name: &str, data: MeshData) -> Result<Arc<Mesh>, AssetError> {
        if self.meshes.contains_key(name) {
            return Err(AssetError::DuplicateMesh(name.to_string()));
        }
        let mesh = Arc::new(Mesh::build(name, data, &mut self.bounds)?);
        tracing::info!(
            name,
            id = %mesh.id,
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            radius = mesh.bounds.radius,
            "registered mesh"
        );
        self.meshes.insert(name.to_string(), Arc::clone(&mesh));
        Ok(mesh)
    }

    /// Loads a mesh through `loader`, falling back to the placeholder cube
    /// when loading fails or the geometry is unusable.
    pub fn load(
        &mut self,
        name: &str,
        path: &Path,
        loader: &dyn MeshLoader,
    ) -> Result<Arc<Mesh>, AssetError> {
        if self.meshes.contains_key(name) {
            return Err(AssetError::DuplicateMesh(name.to_string()));
        }
        let loaded = loader
            .load(path)
            .and_then(|data| self.register(name, data));
        match loaded {
            Ok(mesh) => Ok(mesh),
            Err(e) => {
                tracing::warn!(name, path = %path.display(), error = %e, "using placeholder mesh");
                self.register(name, primitives::placeholder())
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<Arc<Mesh>, AssetError> {
        self.meshes
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::MeshNotFound(name.to_string()))
    }

    pub fn by_id(&self, id: MeshId) -> Option<Arc<Mesh>> {
        self.meshes.values().find(|m| m.id == id).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Mesh>> {
        self.meshes.values()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn manifest(&self) -> MeshManifest {
        MeshManifest {
            meshes: self
                .meshes
                .values()
                .map(|m| ManifestEntry {
                    name: m.name.clone(),
                    id: m.id,
                    vertex_count: m.vertex_count(),
                    index_count: m.index_count(),
                    bounds: m.bounds,
                })
                .collect(),
        }
    }
}

/// Summary of a mesh table, written as JSON for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshManifest {
    pub meshes: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub id: MeshId,
    pub vertex_count: usize,
    pub index_count: usize,
    pub bounds: BoundingSphere,
}

impl MeshManifest {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}
