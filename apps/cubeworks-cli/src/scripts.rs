use cubeworks_assets::Mesh;
use cubeworks_kernel::{Object, ObjectBody, SceneCommand, Script, ScriptContext};
use std::sync::Arc;

const JUMP_VELOCITY: f32 = 10.0;
const GRAVITY: f32 = 30.0;
const ROTATION_SPEED: f32 = 300.0;
const MOVE_SPEED: f32 = 3.0;

/// Player capsule: jumps, walks on the XZ plane, and spins about its pitch axis.
#[derive(Debug, Clone)]
pub struct PlayerScript {
    velocity: f32,
    rotation_direction: f32,
}

impl Default for PlayerScript {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            rotation_direction: 1.0,
        }
    }
}

impl PlayerScript {
    /// The player object: tinted blue capsule at the origin, selected.
    pub fn spawn(mesh: Arc<Mesh>) -> Object {
        tracing::info!("player script created");
        let mut player = Object::new("Player")
            .with_mesh(mesh)
            .with_tint([0.2, 0.4, 1.0])
            .with_script(Self::default())
            .selected(true);
        player.body.use_tint = true;
        player
    }

    fn is_jumping(&self, body: &ObjectBody) -> bool {
        body.transform.location.y > 0.0 || self.velocity > 0.0
    }
}

impl Script for PlayerScript {
    fn fixed_update(&mut self, _ctx: &mut ScriptContext<'_>) {}

    fn update(&mut self, ctx: &mut ScriptContext<'_>, dt: f32) {
        if ctx.input.was_pressed("Jump") && !self.is_jumping(ctx.body) {
            self.velocity = JUMP_VELOCITY;
        }
        if ctx.input.was_pressed("ReverseRotation") {
            self.rotation_direction = -self.rotation_direction;
        }

        let transform = &mut ctx.body.transform;
        if transform.location.y > 0.0 || self.velocity > 0.0 {
            self.velocity -= GRAVITY * dt;
            transform.location.y += self.velocity * dt;
            if transform.location.y < 0.0 {
                transform.location.y = 0.0;
                self.velocity = 0.0;
            }
        }

        let step = MOVE_SPEED * dt;
        if ctx.input.is_down("MoveForward") {
            transform.location.z += step;
        }
        if ctx.input.is_down("MoveBackward") {
            transform.location.z -= step;
        }
        if ctx.input.is_down("MoveLeft") {
            transform.location.x -= step;
        }
        if ctx.input.is_down("MoveRight") {
            transform.location.x += step;
        }

        transform.rotation.pitch += ROTATION_SPEED * dt * self.rotation_direction;
        transform.rotation = transform.rotation.wrapped();
    }

    fn name(&self) -> &str {
        "PlayerScript"
    }
}

/// Editor helper: cycles the selection on `PickObject`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorScript;

impl EditorScript {
    pub fn spawn() -> Object {
        tracing::info!("editor script created");
        Object::new("Editor").with_script(Self)
    }
}

impl Script for EditorScript {
    fn fixed_update(&mut self, _ctx: &mut ScriptContext<'_>) {}

    fn update(&mut self, ctx: &mut ScriptContext<'_>, _dt: f32) {
        if ctx.input.was_pressed("PickObject") {
            ctx.issue(SceneCommand::SelectNext);
        }
    }

    fn name(&self) -> &str {
        "EditorScript"
    }
}
