use cubeworks_common::BoundingSphere;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::{AssetError, BoundsAccumulator, MeshData};

/// Content-addressed mesh identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshId(pub u64);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// An immutable triangle mesh with its object-space bounding sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub id: MeshId,
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds: BoundingSphere,
}

impl Mesh {
    /// Builds a mesh, feeding every vertex position through `bounds`.
    ///
    /// The accumulator is reset before returning, on success and on failure.
    pub fn build(
        name: &str,
        data: MeshData,
        bounds: &mut BoundsAccumulator,
    ) -> Result<Self, AssetError> {
        for v in &data.vertices {
            bounds.register(v.position);
        }
        let sphere = bounds.finish()?;
        if !sphere.center.is_finite() || !sphere.radius.is_finite() {
            return Err(AssetError::Load(format!("{name}: non-finite vertex positions")));
        }
        if let Some(bad) = data.indices.iter().find(|i| **i as usize >= data.vertices.len()) {
            return Err(AssetError::Load(format!(
                "{name}: index {bad} out of range for {} vertices",
                data.vertices.len()
            )));
        }

        Ok(Self {
            id: content_hash(name, &data),
            name: name.to_string(),
            vertices: data.vertices,
            indices: data.indices,
            bounds: sphere,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

fn content_hash(name: &str, data: &MeshData) -> MeshId {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    for v in &data.vertices {
        for c in v.position.to_array() {
            hasher.update(c.to_le_bytes());
        }
    }
    for i in &data.indices {
        hasher.update(i.to_le_bytes());
    }
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    MeshId(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            vertices: vec![
                Vertex::new(Vec3::ZERO, Vec3::Z, Vec2::ZERO),
                Vertex::new(Vec3::X, Vec3::Z, Vec2::X),
                Vertex::new(Vec3::Y, Vec3::Z, Vec2::Y),
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn build_computes_bounds() {
        let mut acc = BoundsAccumulator::new();
        let mesh = Mesh::build("tri", triangle(), &mut acc).unwrap();
        assert_eq!(mesh.bounds.center, Vec3::new(0.5, 0.5, 0.0));
        assert!((mesh.bounds.radius - 2.0f32.sqrt() / 2.0).abs() < 1e-6);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(acc.count(), 0);
    }

    #[test]
    fn id_is_content_addressed() {
        let mut acc = BoundsAccumulator::new();
        let a = Mesh::build("tri", triangle(), &mut acc).unwrap();
        let b = Mesh::build("tri", triangle(), &mut acc).unwrap();
        let c = Mesh::build("other", triangle(), &mut acc).unwrap();
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let mut acc = BoundsAccumulator::new();
        let err = Mesh::build("empty", MeshData::default(), &mut acc).unwrap_err();
        assert!(matches!(err, AssetError::EmptyVertexSet));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut data = triangle();
        data.indices.push(7);
        let mut acc = BoundsAccumulator::new();
        assert!(matches!(
            Mesh::build("bad", data, &mut acc),
            Err(AssetError::Load(_))
        ));
        assert_eq!(acc.count(), 0);
    }

    #[test]
    fn mesh_id_displays_as_hex() {
        assert_eq!(MeshId(255).to_string(), "00000000000000ff");
    }
}
