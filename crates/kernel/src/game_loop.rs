use cubeworks_input::{InputEvent, InputState};
use serde::{Deserialize, Serialize};

use crate::{GameState, Object, SceneCommand, SceneSnapshot, ScriptContext};

/// Fixed-step rate used unless configured otherwise.
pub const DEFAULT_TICK_HZ: f64 = 60.0;

#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("fixed tick rate must be positive and finite, got {0}")]
    InvalidTickRate(f64),
}

/// Counters accumulated over the lifetime of a loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopStats {
    /// Calls to [`GameLoop::update`], idle ones included.
    pub calls: u64,
    pub idle_skips: u64,
    /// Calls skipped because `dt` was negative or not finite.
    pub rejected_deltas: u64,
    pub fixed_ticks: u64,
    pub variable_updates: u64,
    pub commands_applied: u64,
}

/// Drives scripts at a fixed tick rate and once per frame.
#[derive(Debug)]
pub struct GameLoop {
    state: GameState,
    input: InputState,
    accumulator: f64,
    fixed_step: f64,
    commands: Vec<SceneCommand>,
    stats: LoopStats,
}

impl GameLoop {
    pub fn new(state: GameState, input: InputState) -> Self {
        Self {
            state,
            input,
            accumulator: 0.0,
            fixed_step: 1.0 / DEFAULT_TICK_HZ,
            commands: Vec::new(),
            stats: LoopStats::default(),
        }
    }

    pub fn with_tick_rate(mut self, hz: f64) -> Result<Self, KernelError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(KernelError::InvalidTickRate(hz));
        }
        self.fixed_step = 1.0 / hz;
        Ok(self)
    }

    /// Advances the scene by `dt` seconds of wall-clock time.
    ///
    /// Fixed-update hooks run once per whole fixed step in the accumulator,
    /// then `snapshot` is folded into the input state, then every
    /// variable-update hook runs once with `dt`. A clean snapshot with
    /// `dt == 0` returns immediately. A negative or non-finite `dt` skips the
    /// whole call so the accumulator never leaves the finite range.
    pub fn update(&mut self, snapshot: InputEvent, dt: f32) -> &GameState {
        self.stats.calls += 1;
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(dt, "rejected frame delta, skipping frame");
            self.stats.rejected_deltas += 1;
            return &self.state;
        }
        if !snapshot.is_dirty && dt == 0.0 {
            self.stats.idle_skips += 1;
            return &self.state;
        }
        let _span = tracing::info_span!("game_loop_update", dt).entered();

        self.accumulator += f64::from(dt);
        let mut ticks = 0u32;
        while self.accumulator >= self.fixed_step {
            for Object { body, script } in self.state.objects_mut() {
                let mut ctx = ScriptContext::new(body, &self.input, &mut self.commands);
                script.fixed_update(&mut ctx);
            }
            self.accumulator -= self.fixed_step;
            ticks += 1;
        }
        if ticks > 1 {
            tracing::trace!(ticks, "fixed-step catch-up");
        }
        self.stats.fixed_ticks += u64::from(ticks);
        self.apply_commands();

        self.input.fold(snapshot);

        for Object { body, script } in self.state.objects_mut() {
            let mut ctx = ScriptContext::new(body, &self.input, &mut self.commands);
            script.update(&mut ctx, dt);
        }
        self.stats.variable_updates += 1;
        self.apply_commands();

        &self.state
    }

    fn apply_commands(&mut self) {
        for command in std::mem::take(&mut self.commands) {
            tracing::debug!(?command, "applying scene command");
            self.state.apply(command);
            self.stats.commands_applied += 1;
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Unconsumed time, always below one fixed step after an update.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Copy of the scene tagged with the number of calls so far.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.state.snapshot(self.stats.calls)
    }
}
