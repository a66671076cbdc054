//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so the difficulty curve can be
//! tweaked from a JSON file without a rebuild. Missing fields fall back to the
//! defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure reading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Per-tick gravity for this preset
    pub fn gravity(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.4,
            Difficulty::Normal => 0.5,
            Difficulty::Hard => 0.6,
        }
    }

    /// Jump velocity for this preset (negative = up)
    pub fn jump_impulse(&self) -> f32 {
        match self {
            Difficulty::Easy => -7.5,
            Difficulty::Normal => -8.5,
            Difficulty::Hard => -9.5,
        }
    }

    /// Starting scroll speed, px/tick
    pub fn scroll_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 2.5,
            Difficulty::Normal => 3.0,
            Difficulty::Hard => 3.5,
        }
    }

    /// Next preset, wrapping (`step` is +1 or -1)
    pub fn cycle(&self, step: i32) -> Self {
        let idx = Self::ALL.iter().position(|d| d == self).unwrap_or(1) as i32;
        let n = Self::ALL.len() as i32;
        Self::ALL[(idx + step).rem_euclid(n) as usize]
    }
}

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bird ===
    /// Per-tick gravity used when no preset applies
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Ceiling contact ends the run (otherwise it just clamps)
    pub ceiling_kills: bool,

    // === Scrolling ===
    pub base_scroll_speed: f32,
    /// Scroll speed gained per level
    pub speed_per_level: f32,
    /// Pipes passed per level-up
    pub level_every: u32,

    // === Spawning ===
    /// Seconds between spawns at level 0
    pub spawn_interval_base: f32,
    /// Seconds shaved off the interval per level
    pub spawn_interval_decay: f32,
    /// Interval floor
    pub spawn_interval_min: f32,
    /// Minimum horizontal spacing between consecutive pipes
    pub pipe_pitch: f32,

    // === Pipe geometry ===
    pub pipe_width: f32,
    pub gap_height: f32,
    pub gap_min_y: f32,
    pub gap_max_y: f32,

    // === Scoring ===
    /// Base points for a pass (scaled by combo multiplier)
    pub pass_score: u64,
    /// Chance a new pipe carries a coin
    pub coin_chance: f64,
    /// Coins credited per pickup
    pub coin_value: u64,
    /// Score bonus per pickup
    pub coin_score: u64,
    /// Seconds a combo survives
    pub combo_window: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: -8.5,
            ceiling_kills: false,

            base_scroll_speed: 3.0,
            speed_per_level: 0.2,
            level_every: 5,

            spawn_interval_base: 3.0,
            spawn_interval_decay: 0.1,
            spawn_interval_min: 1.5,
            pipe_pitch: PIPE_PITCH,

            pipe_width: PIPE_WIDTH,
            gap_height: PIPE_GAP_HEIGHT,
            gap_min_y: PIPE_GAP_MIN_Y,
            gap_max_y: PIPE_GAP_MAX_Y,

            pass_score: 1,
            coin_chance: 0.3,
            coin_value: 10,
            coin_score: 5,
            combo_window: COMBO_WINDOW,
        }
    }
}

impl Tuning {
    /// Override gravity, jump and scroll speed with a difficulty preset
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.gravity = difficulty.gravity();
        self.jump_impulse = difficulty.jump_impulse();
        self.base_scroll_speed = difficulty.scroll_speed();
        self
    }

    /// Spawn interval at `level`, never below the floor
    pub fn spawn_interval(&self, level: u32) -> f32 {
        (self.spawn_interval_base - level as f32 * self.spawn_interval_decay)
            .max(self.spawn_interval_min)
    }

    /// Repair values that would break the simulation's invariants
    pub fn validate(mut self) -> Self {
        if self.gap_min_y > self.gap_max_y {
            std::mem::swap(&mut self.gap_min_y, &mut self.gap_max_y);
        }
        // Keep both barriers non-degenerate
        let half_gap = self.gap_height / 2.0;
        self.gap_min_y = self.gap_min_y.max(half_gap + 1.0);
        self.gap_max_y = self.gap_max_y.min(GROUND_LINE - half_gap - 1.0);
        if self.gap_max_y < self.gap_min_y {
            let mid = GROUND_LINE / 2.0;
            self.gap_min_y = mid;
            self.gap_max_y = mid;
        }
        if self.spawn_interval_min > self.spawn_interval_base {
            self.spawn_interval_min = self.spawn_interval_base;
        }
        self.spawn_interval_min = self.spawn_interval_min.max(crate::consts::SIM_DT);
        self.coin_chance = self.coin_chance.clamp(0.0, 1.0);
        self.level_every = self.level_every.max(1);
        self.pipe_width = self.pipe_width.max(1.0);
        self
    }

    /// Parse tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validate())
    }

    /// Load tuning from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let tuning = Self::from_json(&json)?;
                log::info!("Loaded tuning from {}", path.display());
                Ok(tuning)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load tuning, logging and falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default tuning");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_interval_decays_to_floor() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_interval(1) - 2.9).abs() < 1e-5);
        assert!((tuning.spawn_interval(10) - 2.0).abs() < 1e-5);
        assert_eq!(tuning.spawn_interval(15), 1.5);
        assert_eq!(tuning.spawn_interval(200), 1.5);
    }

    #[test]
    fn test_difficulty_presets_override() {
        let hard = Tuning::default().with_difficulty(Difficulty::Hard);
        assert_eq!(hard.gravity, 0.6);
        assert_eq!(hard.jump_impulse, -9.5);
        assert_eq!(hard.base_scroll_speed, 3.5);
        // Untouched fields keep their values
        assert_eq!(hard.gap_height, PIPE_GAP_HEIGHT);
    }

    #[test]
    fn test_difficulty_cycle_wraps() {
        assert_eq!(Difficulty::Easy.cycle(-1), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.cycle(1), Difficulty::Easy);
        assert_eq!(Difficulty::Normal.cycle(1), Difficulty::Hard);
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_default_gap_band_keeps_barriers() {
        let tuning = Tuning::default();
        let half = tuning.gap_height / 2.0;
        assert!(tuning.gap_min_y - half > 0.0);
        assert!(tuning.gap_max_y + half < GROUND_LINE);
        assert_eq!(tuning.clone().validate(), tuning);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.7, "level_every": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.7);
        assert_eq!(tuning.level_every, 3);
        assert_eq!(tuning.jump_impulse, -8.5);
    }

    #[test]
    fn test_validate_repairs_inverted_bands() {
        let tuning = Tuning {
            gap_min_y: 400.0,
            gap_max_y: 200.0,
            spawn_interval_min: 5.0,
            level_every: 0,
            ..Default::default()
        }
        .validate();
        assert!(tuning.gap_min_y <= tuning.gap_max_y);
        assert_eq!(tuning.spawn_interval_min, tuning.spawn_interval_base);
        assert_eq!(tuning.level_every, 1);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("flappy_arcade_no_such_tuning.json");
        let _ = fs::remove_file(&path);
        assert_eq!(Tuning::load(&path).unwrap(), Tuning::default());
    }
}
