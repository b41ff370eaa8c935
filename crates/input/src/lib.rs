//! Input: raw snapshots from the window folded into a persistent state that
//! scripts query by action name.
//!
//! # Invariants
//! - Scripts never read raw key codes; they ask for actions through [`KeyBindings`].
//! - Deltas in [`InputState`] are zero whenever the last folded snapshot was not dirty.
//! - A snapshot reporting mouse position (0, 0) means "position not captured",
//!   never a move to the origin.

mod bindings;
mod event;
mod key;
mod source;
mod state;

pub use bindings::{InputError, KeyBindings};
pub use event::InputEvent;
pub use key::{KEY_TABLE_LEN, Key, UnknownKey};
pub use source::{InputSource, ScriptedInput};
pub use state::InputState;
