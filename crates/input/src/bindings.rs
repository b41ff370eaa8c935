use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use crate::Key;

/// Errors raised while loading key bindings.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Action name to key mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBindings {
    actions: BTreeMap<String, Key>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings used when no file is configured.
    pub fn default_layout() -> Self {
        let mut b = Self::new();
        for (action, key) in [
            ("Quit", Key::Escape),
            ("ToggleDemoUI", Key::GraveAccent),
            ("Jump", Key::Space),
            ("ReverseRotation", Key::R),
            ("MoveForward", Key::W),
            ("MoveBackward", Key::S),
            ("MoveLeft", Key::A),
            ("MoveRight", Key::D),
            ("PickObject", Key::MouseLeft),
        ] {
            b.bind(action, key);
        }
        b
    }

    /// Parses `Action Key` lines.
    ///
    /// Blank lines and lines starting with `#` are skipped, as are lines with
    /// fewer than two tokens. Tokens after the second are ignored. A later
    /// line for the same action replaces the earlier one. Unknown key names
    /// are logged and skipped.
    pub fn parse(text: &str) -> Self {
        let mut bindings = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let (Some(action), Some(key_name)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            match key_name.parse::<Key>() {
                Ok(key) => bindings.bind(action, key),
                Err(e) => tracing::warn!(action, "{e}"),
            }
        }
        bindings
    }

    /// Reads a bindings file. A missing file yields an empty table.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let bindings = Self::parse(&text);
                tracing::info!(path = %path.display(), count = bindings.len(), "loaded key bindings");
                Ok(bindings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "key bindings file not found");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn bind(&mut self, action: &str, key: Key) {
        self.actions.insert(action.to_string(), key);
    }

    pub fn key_for(&self, action: &str) -> Option<Key> {
        self.actions.get(action).copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Key)> {
        self.actions.iter().map(|(a, k)| (a.as_str(), *k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_skips_comments_blanks_and_short_lines() {
        let text = "\
# movement
  MoveForward   W
MoveBackward S extra tokens

Jump
ReverseRotation R
";
        let b = KeyBindings::parse(text);
        assert_eq!(b.len(), 3);
        assert_eq!(b.key_for("MoveForward"), Some(Key::W));
        assert_eq!(b.key_for("MoveBackward"), Some(Key::S));
        assert_eq!(b.key_for("ReverseRotation"), Some(Key::R));
        assert_eq!(b.key_for("Jump"), None);
    }

    #[test]
    fn parse_skips_unknown_keys() {
        let b = KeyBindings::parse("Quit Escape\nFly Hyper\nToggle Tilde\n");
        assert_eq!(b.len(), 2);
        assert_eq!(b.key_for("Fly"), None);
        assert_eq!(b.key_for("Toggle"), Some(Key::GraveAccent));
    }

    #[test]
    fn later_lines_override() {
        let b = KeyBindings::parse("Jump Space\nJump J\n");
        assert_eq!(b.key_for("Jump"), Some(Key::J));
    }

    #[test]
    fn load_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "PickObject MouseLeft").unwrap();
        writeln!(f, "Quit Escape").unwrap();
        let b = KeyBindings::load(f.path()).unwrap();
        assert_eq!(b.key_for("PickObject"), Some(Key::MouseLeft));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let b = KeyBindings::load(&dir.path().join("KeyBindings.kvl")).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn default_layout_binds_player_actions() {
        let b = KeyBindings::default_layout();
        for action in ["Jump", "MoveForward", "MoveBackward", "MoveLeft", "MoveRight", "PickObject"] {
            assert!(b.key_for(action).is_some(), "{action} unbound");
        }
    }
}
