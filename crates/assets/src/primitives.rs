//! Procedural meshes used when no model files are available.

use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::{MeshData, Vertex};

/// Axis-aligned cube centred at the origin with the given edge length.
///
/// 24 vertices (4 per face, so each face keeps its own normal) and 36 indices.
pub fn cube(size: f32) -> MeshData {
    // (normal, u axis, v axis) per face
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::Y, Vec3::X, Vec3::Z),         // top
        (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z), // bottom
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),     // left
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),     // right
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),     // front
        (Vec3::Z, Vec3::NEG_X, Vec3::Y),     // back
    ];
    let h = size / 2.0;

    let mut data = MeshData::default();
    for (normal, u, v) in FACES {
        let base = data.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = (normal + u * su + v * sv) * h;
            let tex = Vec2::new((su + 1.0) / 2.0, 1.0 - (sv + 1.0) / 2.0);
            data.vertices.push(Vertex::new(position, normal, tex));
        }
        data.indices
            .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }
    data
}

/// Unit cube resting on the XZ plane (y from 0 to 1), registered in place of
/// any mesh that fails to load.
pub fn placeholder() -> MeshData {
    let mut data = cube(1.0);
    for v in &mut data.vertices {
        v.position.y += 0.5;
    }
    data
}

/// Square on the XZ plane facing +Y.
pub fn plane(size: f32) -> MeshData {
    let h = size / 2.0;
    let corners = [
        (Vec3::new(-h, 0.0, -h), Vec2::new(0.0, 1.0)),
        (Vec3::new(h, 0.0, -h), Vec2::new(1.0, 1.0)),
        (Vec3::new(h, 0.0, h), Vec2::new(1.0, 0.0)),
        (Vec3::new(-h, 0.0, h), Vec2::new(0.0, 0.0)),
    ];
    MeshData {
        vertices: corners
            .into_iter()
            .map(|(p, t)| Vertex::new(p, Vec3::Y, t))
            .collect(),
        indices: vec![0, 2, 1, 0, 3, 2],
    }
}

/// Latitude/longitude sphere centred at the origin.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let latitudes: Vec<(f32, f32)> = (0..=rings)
        .map(|r| (PI * r as f32 / rings as f32, 0.0))
        .collect();
    lathe(radius, segments, &latitudes)
}

/// Capsule along the Y axis: a cylinder of `height` capped by two hemispheres.
pub fn capsule(radius: f32, height: f32, segments: u32, cap_rings: u32) -> MeshData {
    let segments = segments.max(3);
    let cap_rings = cap_rings.max(1);
    let half = height / 2.0;
    let top = (0..=cap_rings).map(|r| (FRAC_PI_2 * r as f32 / cap_rings as f32, half));
    let bottom =
        (0..=cap_rings).map(|r| (FRAC_PI_2 + FRAC_PI_2 * r as f32 / cap_rings as f32, -half));
    let latitudes: Vec<(f32, f32)> = top.chain(bottom).collect();
    lathe(radius, segments, &latitudes)
}

/// Sweeps rows of `(polar angle, y offset)` around the Y axis and stitches
/// consecutive rows into quads.
fn lathe(radius: f32, segments: u32, latitudes: &[(f32, f32)]) -> MeshData {
    let mut data = MeshData::default();
    let row_len = segments + 1;
    let rows = latitudes.len() as u32;

    for (row, (phi, offset)) in latitudes.iter().enumerate() {
        for s in 0..=segments {
            let theta = TAU * s as f32 / segments as f32;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            let position = normal * radius + Vec3::new(0.0, *offset, 0.0);
            let tex = Vec2::new(
                s as f32 / segments as f32,
                row as f32 / (rows - 1).max(1) as f32,
            );
            data.vertices.push(Vertex::new(position, normal, tex));
        }
    }

    for row in 0..rows.saturating_sub(1) {
        for s in 0..segments {
            let a = row * row_len + s;
            let b = a + row_len;
            data.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    data
}
