use cubeworks_assets::{MeshLoader, MeshTable};
use cubeworks_kernel::{GameState, Object};
use glam::Vec3;
use std::path::PathBuf;

use crate::scripts::{EditorScript, PlayerScript};

const MODEL_DIR: &str = "Assets/Models";
const MODELS: [&str; 4] = ["Cube", "Capsule", "Plane", "Sphere"];

const GRID_COLUMNS: i32 = 11;
const GRID_ROWS: i32 = 10;

fn rgb(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r, g, b].map(|c| f32::from(c) / 255.0)
}

/// Loads the demo models into `meshes`. Missing files fall back to the placeholder.
pub fn load_models(meshes: &mut MeshTable, loader: &dyn MeshLoader) -> anyhow::Result<()> {
    for name in MODELS {
        let path = PathBuf::from(MODEL_DIR).join(format!("{name}.glb"));
        meshes.load(name, &path, loader)?;
    }
    Ok(())
}

/// The demo layout: the player capsule, two marker cubes, a floor of cubes,
/// and the editor object.
pub fn build_demo_scene(meshes: &MeshTable) -> anyhow::Result<GameState> {
    let cube = meshes.get("Cube")?;
    let capsule = meshes.get("Capsule")?;

    let mut state = GameState::new();
    state.push(PlayerScript::spawn(capsule));

    let mut left = Object::new("Cube")
        .with_mesh(cube.clone())
        .at(Vec3::new(-1.0, 0.0, 0.0))
        .with_tint(rgb(172, 209, 126));
    left.body.use_tint = true;
    state.push(left);

    let mut right = Object::new("Cube")
        .with_mesh(cube.clone())
        .at(Vec3::new(1.0, 0.0, 0.0))
        .with_tint(rgb(152, 46, 59));
    right.body.use_tint = true;
    state.push(right);

    for x in 0..GRID_COLUMNS {
        for y in 0..GRID_ROWS {
            let mut tile = Object::new("Cube")
                .with_mesh(cube.clone())
                .at(Vec3::new((x - 5) as f32, -1.0, (y - 1) as f32))
                .with_tint(rgb(0, 130, 54));
            tile.body.use_tint = true;
            state.push(tile);
        }
    }

    state.push(EditorScript::spawn());
    tracing::info!(objects = state.len(), "demo scene built");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeworks_assets::ProceduralLoader;

    fn scene() -> (MeshTable, GameState) {
        let mut meshes = MeshTable::new();
        load_models(&mut meshes, &ProceduralLoader).unwrap();
        let state = build_demo_scene(&meshes).unwrap();
        (meshes, state)
    }

    #[test]
    fn loads_all_models() {
        let (meshes, _) = scene();
        assert_eq!(meshes.len(), 4);
        for name in MODELS {
            assert!(meshes.get(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn layout_counts() {
        let (_, state) = scene();
        // player + two markers + floor + editor
        assert_eq!(state.len(), 1 + 2 + 110 + 1);
        let drawable = state.objects().iter().filter(|o| o.body.is_drawable()).count();
        assert_eq!(drawable, 113);
    }

    #[test]
    fn player_first_and_selected() {
        let (_, state) = scene();
        let first = &state.objects()[0];
        assert_eq!(first.body.name, "Player");
        assert_eq!(state.selected().map(Object::id), Some(first.id()));
        assert_eq!(state.objects().last().map(Object::script_name), Some("EditorScript"));
    }

    #[test]
    fn floor_spans_grid() {
        let (_, state) = scene();
        let floor: Vec<Vec3> = state
            .objects()
            .iter()
            .map(|o| o.body.transform.location)
            .filter(|l| l.y == -1.0)
            .collect();
        assert_eq!(floor.len(), 110);
        assert!(floor.contains(&Vec3::new(-5.0, -1.0, -1.0)));
        assert!(floor.contains(&Vec3::new(5.0, -1.0, 8.0)));
    }

    #[test]
    fn marker_tints_are_normalized() {
        let (_, state) = scene();
        let left = &state.objects()[1].body;
        assert!(left.use_tint);
        assert!((left.tint[0] - 172.0 / 255.0).abs() < 1e-6);
    }
}
