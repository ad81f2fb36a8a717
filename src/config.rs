use sdl2::keyboard::Scancode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::input::Button;

/// Runtime settings, read from an optional TOML file.
///
/// ```toml
/// title = "My Game"
/// width = 320
/// height = 180
/// scale = 4
/// content_dir = "content"
///
/// [keys]
/// confirm = "Return"
/// cancel = "Backspace"
/// ```
///
/// Every field is optional; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: String,
    /// Internal resolution, in sheet pixels.
    pub width: u32,
    pub height: u32,
    /// Integer window scale applied to the internal resolution.
    pub scale: u32,
    /// Directory sheets are loaded from.
    pub content_dir: PathBuf,
    pub keys: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "sprig".to_string(),
            width: 320,
            height: 180,
            scale: 3,
            content_dir: PathBuf::from("content"),
            keys: KeyBindings::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "internal resolution {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.scale == 0 {
            return Err(Error::InvalidConfig("scale must be at least 1".to_string()));
        }
        if self.scaled(self.width).is_none() || self.scaled(self.height).is_none() {
            return Err(Error::InvalidConfig(format!(
                "{}x{} at scale {} exceeds the largest window size",
                self.width, self.height, self.scale
            )));
        }
        self.keys.resolve()?;
        Ok(())
    }

    /// Window size in screen pixels. Saturates on configs that fail [`validate`](Self::validate).
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.scaled(self.width).unwrap_or(u32::MAX),
            self.scaled(self.height).unwrap_or(u32::MAX),
        )
    }

    fn scaled(&self, extent: u32) -> Option<u32> {
        extent.checked_mul(self.scale).filter(|&px| px <= i32::MAX as u32)
    }
}

/// SDL scancode names for each logical button (case-insensitive, e.g. "Z", "Up").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub confirm: String,
    pub cancel: String,
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            confirm: "Z".to_string(),
            cancel: "X".to_string(),
            up: "Up".to_string(),
            down: "Down".to_string(),
            left: "Left".to_string(),
            right: "Right".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn name(&self, button: Button) -> &str {
        match button {
            Button::Confirm => &self.confirm,
            Button::Cancel => &self.cancel,
            Button::Up => &self.up,
            Button::Down => &self.down,
            Button::Left => &self.left,
            Button::Right => &self.right,
        }
    }

    /// Look every name up as an SDL scancode.
    pub fn resolve(&self) -> Result<KeyMap> {
        let mut scancodes = [Scancode::Z; 6];
        for button in Button::ALL {
            let name = self.name(button);
            scancodes[button.index()] = Scancode::from_name(name).ok_or_else(|| {
                Error::InvalidConfig(format!("unknown key `{name}` bound to {button:?}"))
            })?;
        }
        Ok(KeyMap { scancodes })
    }
}

/// Resolved physical key for each logical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    scancodes: [Scancode; 6],
}

impl KeyMap {
    pub fn scancode(&self, button: Button) -> Scancode {
        self.scancodes[button.index()]
    }
}
