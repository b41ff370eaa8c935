//! Game kernel: the scene object list, scripts, and the loop that drives them.
//!
//! # Invariants
//! - Every fixed-update hook of a call runs before the input snapshot is
//!   folded, which runs before any variable-update hook.
//! - Hooks run in scene insertion order.
//! - A call with a clean snapshot and `dt == 0` does no work at all.
//! - Scripts mutate only their own object directly; scene-wide changes go
//!   through [`SceneCommand`]s applied between phases.
//! - The renderer only ever sees whole [`SceneSnapshot`]s.

mod clock;
mod command;
mod game_loop;
mod mailbox;
mod object;
mod script;
mod state;

pub use clock::FrameClock;
pub use command::SceneCommand;
pub use game_loop::{GameLoop, KernelError, LoopStats};
pub use mailbox::FrameMailbox;
pub use object::{DEFAULT_TINT, Object, ObjectBody};
pub use script::{NullScript, Script, ScriptContext};
pub use state::{GameState, SceneSnapshot};
