//! Keyboard input mapping
//!
//! Terminal key repeat drives held keys, so each press maps straight to one
//! command with no auto-shift timing of our own.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Action),
    /// Start a session, or restart after game over
    Start,
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub start: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c.to_ascii_lowercase()),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Unknown key name in settings: {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(settings.keys.move_left.names()),
            move_right: Self::parse_keys(settings.keys.move_right.names()),
            soft_drop: Self::parse_keys(settings.keys.soft_drop.names()),
            hard_drop: Self::parse_keys(settings.keys.hard_drop.names()),
            rotate: Self::parse_keys(settings.keys.rotate.names()),
            start: Self::parse_keys(settings.keys.start.names()),
            quit: Self::parse_keys(settings.keys.quit.names()),
        }
    }
}

/// Maps key presses to commands
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key press event
    pub fn key_down(&self, key: KeyEvent) -> Option<Command> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        let b = &self.bindings;

        if b.quit.contains(&code) {
            Some(Command::Quit)
        } else if b.start.contains(&code) {
            Some(Command::Start)
        } else if b.move_left.contains(&code) {
            Some(Command::Play(Action::MoveLeft))
        } else if b.move_right.contains(&code) {
            Some(Command::Play(Action::MoveRight))
        } else if b.soft_drop.contains(&code) {
            Some(Command::Play(Action::SoftDrop))
        } else if b.hard_drop.contains(&code) {
            Some(Command::Play(Action::HardDrop))
        } else if b.rotate.contains(&code) {
            Some(Command::Play(Action::Rotate))
        } else {
            None
        }
    }
}
