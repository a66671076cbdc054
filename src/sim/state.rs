//! Game state and core simulation types
//!
//! [`GameState`] is the single simulation context: it owns the bird, the pipe
//! stream and all score/progress counters. Everything the renderer or the app
//! shell needs is readable from here.

use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::pipes::PipeStream;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen; physics can be live-tuned
    Paused,
    /// Run ended
    GameOver,
    Leaderboard,
    Settings,
    Help,
    Credits,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "Menu",
            GamePhase::Playing => "Playing",
            GamePhase::Paused => "Paused",
            GamePhase::GameOver => "GameOver",
            GamePhase::Leaderboard => "Leaderboard",
            GamePhase::Settings => "Settings",
            GamePhase::Help => "Help",
            GamePhase::Credits => "Credits",
        }
    }
}

/// Something that happened during input handling or a tick.
///
/// Consumers (audio, particles, screen shake, persistence) drain these once
/// per frame; the simulation never waits on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    /// One or more pipes cleared this tick
    Passed {
        count: u32,
        points: u64,
        multiplier: u32,
    },
    CoinCollected {
        count: u32,
    },
    LevelUp {
        level: u32,
    },
    /// First time this run the session best was beaten
    NewHighScore {
        score: u64,
    },
    GameOver {
        score: u64,
        level: u32,
        play_time_secs: u32,
    },
    /// Preferences edited and should be persisted
    SettingsChanged,
    QuitRequested,
}

/// Read-only summary for HUD rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub coins: u64,
    pub combo: u32,
    pub multiplier: u32,
    pub scroll_speed: f32,
    pub elapsed: f32,
    pub alive: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; each run derives its own from this
    pub seed: u64,
    /// Runs started this session
    pub runs: u32,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: PipeStream,

    // === Score / progress ===
    pub score: u64,
    /// Best score seen this session (seeded from the leaderboard)
    pub high_score: u64,
    pub coins: u64,
    /// Starts at 1
    pub level: u32,
    /// Total pipes cleared this run
    pub pipes_passed: u32,
    /// px/tick
    pub scroll_speed: f32,
    /// Seconds of Playing time this run
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// A run is in progress (Continue is allowed)
    pub run_active: bool,
    /// NewHighScore already emitted this run
    pub beat_high_score: bool,

    // === Configuration ===
    /// Base balance; difficulty and settings are layered on top per run
    pub tuning: Tuning,
    pub settings: Settings,

    // === Menu cursors ===
    pub menu_cursor: usize,
    pub settings_cursor: usize,
    pub pause_cursor: usize,

    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state sitting on the main menu
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let tuning = tuning.validate();
        let run_tuning = Self::layer_tuning(&tuning, &settings);
        Self {
            seed,
            runs: 0,
            phase: GamePhase::Menu,
            bird: Bird::new(run_tuning.gravity, run_tuning.jump_impulse),
            scroll_speed: run_tuning.base_scroll_speed,
            pipes: PipeStream::new(seed, run_tuning),
            score: 0,
            high_score: 0,
            coins: 0,
            level: 1,
            pipes_passed: 0,
            elapsed: 0.0,
            time_ticks: 0,
            run_active: false,
            beat_high_score: false,
            tuning,
            settings,
            menu_cursor: 0,
            settings_cursor: 0,
            pause_cursor: 0,
            events: Vec::new(),
        }
    }

    fn layer_tuning(base: &Tuning, settings: &Settings) -> Tuning {
        let mut tuning = base.clone().with_difficulty(settings.difficulty);
        tuning.gravity = settings.gravity;
        tuning.jump_impulse = settings.jump_impulse;
        tuning
    }

    /// Balance for the next run: base tuning, then the difficulty preset,
    /// then the player's gravity/jump overrides
    pub fn run_tuning(&self) -> Tuning {
        Self::layer_tuning(&self.tuning, &self.settings)
    }

    /// Seed for the run about to start
    pub fn run_seed(&self) -> u64 {
        self.seed.wrapping_add(self.runs as u64)
    }

    /// Change phase, logging transitions
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Whole seconds played this run
    pub fn play_time_secs(&self) -> u32 {
        self.elapsed.max(0.0) as u32
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            coins: self.coins,
            combo: self.bird.combo.count,
            multiplier: self.bird.multiplier(),
            scroll_speed: self.scroll_speed,
            elapsed: self.elapsed,
            alive: self.bird.alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Difficulty;

    #[test]
    fn test_new_state_on_menu() {
        let state = GameState::new(7, Tuning::default(), Settings::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.level, 1);
        assert!(!state.run_active);
        assert!(state.pipes.is_empty());
        assert_eq!(state.hud().multiplier, 1);
    }

    #[test]
    fn test_run_tuning_layers_settings() {
        let mut settings = Settings::from_difficulty(Difficulty::Easy);
        settings.gravity = 0.9;
        let state = GameState::new(1, Tuning::default(), settings);
        let tuning = state.run_tuning();
        assert_eq!(tuning.gravity, 0.9);
        assert_eq!(tuning.jump_impulse, -7.5);
        assert_eq!(tuning.base_scroll_speed, 2.5);
        assert_eq!(state.bird.gravity, 0.9);
        assert_eq!(state.scroll_speed, 2.5);
    }

    #[test]
    fn test_events_drain_once() {
        let mut state = GameState::new(1, Tuning::default(), Settings::default());
        state.emit(GameEvent::Jumped);
        state.emit(GameEvent::LevelUp { level: 2 });
        assert_eq!(state.pending_events().len(), 2);
        assert_eq!(state.drain_events().len(), 2);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_run_seed_advances() {
        let mut state = GameState::new(100, Tuning::default(), Settings::default());
        assert_eq!(state.run_seed(), 100);
        state.runs = 3;
        assert_eq!(state.run_seed(), 103);
    }
}
