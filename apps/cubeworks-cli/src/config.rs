use anyhow::Context;
use cubeworks_input::KeyBindings;
use cubeworks_render::RenderView;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Host settings read from a JSON file. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub fixed_tick_hz: f64,
    /// Longest frame delta fed to the game loop, in seconds.
    pub max_frame_delta: f32,
    pub screen_depth: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub vsync: bool,
    pub fxaa: bool,
    /// Key bindings file; the built-in layout is used when unset.
    pub key_bindings: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let view = RenderView::default();
        Self {
            window_width: 1280,
            window_height: 720,
            fixed_tick_hz: 60.0,
            max_frame_delta: 0.1,
            screen_depth: view.screen_depth,
            eye: view.eye,
            target: view.target,
            fov_degrees: view.fov_degrees,
            near: view.near,
            far: view.far,
            vsync: true,
            fxaa: true,
            key_bindings: None,
        }
    }
}

impl EngineConfig {
    /// Reads the config file, or returns defaults when it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn render_view(&self) -> RenderView {
        RenderView {
            eye: self.eye,
            target: self.target,
            fov_degrees: self.fov_degrees,
            near: self.near,
            far: self.far,
            screen_depth: self.screen_depth,
        }
    }

    pub fn bindings(&self) -> anyhow::Result<KeyBindings> {
        match &self.key_bindings {
            Some(path) => Ok(KeyBindings::load(path)?),
            None => Ok(KeyBindings::default_layout()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeworks_input::Key;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("cubeworks.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.render_view(), RenderView::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "screen_depth": 250.0, "eye": [1.0, 2.0, 3.0], "vsync": false }}"#).unwrap();
        let config = EngineConfig::load(f.path()).unwrap();
        assert_eq!(config.screen_depth, 250.0);
        assert_eq!(config.eye, Vec3::new(1.0, 2.0, 3.0));
        assert!(!config.vsync);
        assert_eq!(config.fixed_tick_hz, 60.0);
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "not json").unwrap();
        assert!(EngineConfig::load(f.path()).is_err());
    }

    #[test]
    fn bindings_from_file_or_builtin() {
        let builtin = EngineConfig::default().bindings().unwrap();
        assert_eq!(builtin.key_for("Jump"), Some(Key::Space));

        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "Jump J").unwrap();
        let config = EngineConfig {
            key_bindings: Some(f.path().to_path_buf()),
            ..EngineConfig::default()
        };
        let loaded = config.bindings().unwrap();
        assert_eq!(loaded.key_for("Jump"), Some(Key::J));
        assert_eq!(loaded.len(), 1);
    }
}
