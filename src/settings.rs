//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blocktris/settings.toml (or platform equivalent)

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
    /// Gameplay settings
    pub gameplay: GameplaySettings,
}

/// Key names bound to one action: a bare string or a list in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keys {
    One(String),
    Many(Vec<String>),
}

impl Keys {
    fn of(names: &[&str]) -> Self {
        match names {
            [name] => Keys::One(name.to_string()),
            _ => Keys::Many(names.iter().map(|n| n.to_string()).collect()),
        }
    }

    pub fn names(&self) -> &[String] {
        match self {
            Keys::One(name) => std::slice::from_ref(name),
            Keys::Many(names) => names,
        }
    }
}

/// Key bindings (stored as key names for easy editing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Keys,
    pub move_right: Keys,
    pub soft_drop: Keys,
    pub hard_drop: Keys,
    pub rotate: Keys,
    pub start: Keys,
    pub quit: Keys,
}

/// Visual settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Ghost piece visibility
    pub show_ghost: bool,
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

/// Gameplay settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Fixed randomizer seed for a reproducible piece sequence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: Keys::of(&["Left"]),
            move_right: Keys::of(&["Right"]),
            soft_drop: Keys::of(&["Down"]),
            hard_drop: Keys::of(&["Space"]),
            rotate: Keys::of(&["Up", "z", "x"]),
            start: Keys::of(&["Enter"]),
            quit: Keys::of(&["q", "Esc"]),
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            block_style: "solid".to_string(),
        }
    }
}

impl Settings {
    /// Location of settings.toml in the platform config directory
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "blocktris", "blocktris")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Parse settings, ignoring a malformed file
    fn from_toml(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed settings file: {}", e);
            Self::default()
        })
    }

    /// Write settings to the config file, creating its directory
    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path().ok_or("Could not determine settings path")?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;
        fs::write(&path, contents)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}

impl VisualSettings {
    /// Get the block and ghost characters based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", ".."),
            "round" => ("()", ".."),
            _ => ("██", "░░"), // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed = Settings::from_toml(&text);
        assert_eq!(parsed.keys.rotate.names(), ["Up", "z", "x"]);
        assert_eq!(parsed.keys.start, Keys::One("Enter".to_string()));
        assert!(parsed.visual.show_ghost);
        assert_eq!(parsed.gameplay.seed, None);
    }

    #[test]
    fn test_seed() {
        let parsed = Settings::from_toml("[gameplay]\nseed = 1234\n");
        assert_eq!(parsed.gameplay.seed, Some(1234));
    }

    #[test]
    fn test_single_key_or_list() {
        let parsed = Settings::from_toml(
            r#"
            [keys]
            hard_drop = "Enter"
            rotate = ["w", "k"]
            "#,
        );
        assert_eq!(parsed.keys.hard_drop.names(), ["Enter"]);
        assert_eq!(parsed.keys.rotate.names(), ["w", "k"]);
        // Unspecified entries keep their defaults
        assert_eq!(parsed.keys.move_left.names(), ["Left"]);
    }

    #[test]
    fn test_malformed_falls_back_to_defaults() {
        let parsed = Settings::from_toml("keys = 12");
        assert_eq!(parsed.keys.soft_drop.names(), ["Down"]);
    }

    #[test]
    fn test_block_chars() {
        let mut visual = VisualSettings::default();
        assert_eq!(visual.block_chars(), ("██", "░░"));
        visual.block_style = "bracket".to_string();
        assert_eq!(visual.block_chars(), ("[]", ".."));
    }
}
