use cubeworks_input::InputState;

use crate::{ObjectBody, SceneCommand};

/// What a script sees while one of its hooks runs.
pub struct ScriptContext<'a> {
    /// The object the script is attached to.
    pub body: &'a mut ObjectBody,
    pub input: &'a InputState,
    commands: &'a mut Vec<SceneCommand>,
}

impl<'a> ScriptContext<'a> {
    pub fn new(
        body: &'a mut ObjectBody,
        input: &'a InputState,
        commands: &'a mut Vec<SceneCommand>,
    ) -> Self {
        Self {
            body,
            input,
            commands,
        }
    }

    /// Queues a scene-wide change, applied after the current phase.
    pub fn issue(&mut self, command: SceneCommand) {
        self.commands.push(command);
    }
}

/// Per-object behaviour driven by the game loop.
pub trait Script: Send {
    /// Runs zero or more times per loop call, once per elapsed fixed tick.
    fn fixed_update(&mut self, ctx: &mut ScriptContext<'_>);

    /// Runs once per loop call with the real elapsed time in seconds.
    fn update(&mut self, ctx: &mut ScriptContext<'_>, dt: f32);

    fn name(&self) -> &str;
}

/// Script for objects with no behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScript;

impl Script for NullScript {
    fn fixed_update(&mut self, _ctx: &mut ScriptContext<'_>) {}

    fn update(&mut self, _ctx: &mut ScriptContext<'_>, _dt: f32) {}

    fn name(&self) -> &str {
        "<NULL>"
    }
}
