//! Player preferences
//!
//! Persisted separately from the leaderboard as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Difficulty;

/// Failure reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Gravity adjustment range and step (per-tick units)
pub const GRAVITY_RANGE: (f32, f32) = (0.2, 1.5);
pub const GRAVITY_STEP: f32 = 0.1;
/// Jump impulse adjustment range and step (negative = up)
pub const JUMP_RANGE: (f32, f32) = (-12.0, -5.0);
pub const JUMP_STEP: f32 = 0.5;

/// Rows on the settings screen, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsItem {
    Gravity,
    JumpImpulse,
    Difficulty,
    ShowFps,
    ShowHitboxes,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 5] = [
        SettingsItem::Gravity,
        SettingsItem::JumpImpulse,
        SettingsItem::Difficulty,
        SettingsItem::ShowFps,
        SettingsItem::ShowHitboxes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsItem::Gravity => "Gravity",
            SettingsItem::JumpImpulse => "Jump Force",
            SettingsItem::Difficulty => "Difficulty",
            SettingsItem::ShowFps => "Show FPS",
            SettingsItem::ShowHitboxes => "Show Hitboxes",
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded on the leaderboard
    pub player_name: String,
    pub difficulty: Difficulty,

    // === Physics overrides ===
    pub gravity: f32,
    pub jump_impulse: f32,

    // === HUD ===
    pub show_fps: bool,
    /// Draw collision rectangles (debug)
    pub show_hitboxes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let difficulty = Difficulty::default();
        Self {
            player_name: "Player".to_string(),
            difficulty,
            gravity: difficulty.gravity(),
            jump_impulse: difficulty.jump_impulse(),
            show_fps: true,
            show_hitboxes: false,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty (applies preset physics)
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_difficulty(difficulty);
        settings
    }

    /// Select a difficulty and reset physics to its preset
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.gravity = difficulty.gravity();
        self.jump_impulse = difficulty.jump_impulse();
    }

    /// Nudge one settings row. `direction` is +1 or -1.
    pub fn adjust(&mut self, item: SettingsItem, direction: i32) {
        let dir = direction.signum() as f32;
        match item {
            SettingsItem::Gravity => {
                self.gravity = (self.gravity + dir * GRAVITY_STEP)
                    .clamp(GRAVITY_RANGE.0, GRAVITY_RANGE.1);
            }
            SettingsItem::JumpImpulse => {
                self.jump_impulse =
                    (self.jump_impulse + dir * JUMP_STEP).clamp(JUMP_RANGE.0, JUMP_RANGE.1);
            }
            SettingsItem::Difficulty => {
                self.apply_difficulty(self.difficulty.cycle(direction.signum()));
            }
            SettingsItem::ShowFps => self.show_fps = !self.show_fps,
            SettingsItem::ShowHitboxes => self.show_hitboxes = !self.show_hitboxes,
        }
    }

    /// Set the leaderboard name, squashed to one whitespace-free token
    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = sanitize_name(name);
    }

    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let mut settings: Settings = serde_json::from_str(&json)?;
                settings.player_name = sanitize_name(&settings.player_name);
                settings.clamp_physics();
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Pull hand-edited physics values back into the Settings screen ranges
    fn clamp_physics(&mut self) {
        self.gravity = self.gravity.clamp(GRAVITY_RANGE.0, GRAVITY_RANGE.1);
        self.jump_impulse = self.jump_impulse.clamp(JUMP_RANGE.0, JUMP_RANGE.1);
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// Leaderboard names are single tokens; whitespace becomes `_`
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "Player".to_string()
    } else {
        cleaned
    }
}
