//! App shell
//!
//! Owns the simulation, the fixed-step clock and the persisted data, and
//! runs one host frame at a time: input once, then as many ticks as the
//! clock releases, then event handling. Persistence failures are logged and
//! otherwise ignored so a read-only disk never stops a run.

use std::path::{Path, PathBuf};

use crate::highscores::{Leaderboard, LeaderboardEntry};
use crate::input::InputFrame;
use crate::scheduler::FixedTimestep;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, HudSnapshot, handle_input, tick};
use crate::tuning::Tuning;

/// A game session
pub struct Game {
    pub state: GameState,
    clock: FixedTimestep,
    leaderboard: Leaderboard,
    leaderboard_path: Option<PathBuf>,
    settings_path: Option<PathBuf>,
    /// Rank earned by the most recent finished run
    last_rank: Option<usize>,
    quit: bool,
}

impl Game {
    /// In-memory session with nothing persisted
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, tuning, settings),
            clock: FixedTimestep::default(),
            leaderboard: Leaderboard::new(),
            leaderboard_path: None,
            settings_path: None,
            last_rank: None,
            quit: false,
        }
    }

    /// Session backed by settings and leaderboard files. Unreadable files
    /// fall back to defaults.
    pub fn with_files(
        seed: u64,
        tuning: Tuning,
        settings_path: impl Into<PathBuf>,
        leaderboard_path: impl Into<PathBuf>,
    ) -> Self {
        let settings_path = settings_path.into();
        let leaderboard_path = leaderboard_path.into();

        let settings = Settings::load(&settings_path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        });
        let leaderboard = Leaderboard::load(&leaderboard_path).unwrap_or_else(|e| {
            log::warn!("{e}; starting with an empty leaderboard");
            Leaderboard::new()
        });

        let mut game = Self::new(seed, tuning, settings);
        game.state.high_score = leaderboard.top_score().unwrap_or(0);
        game.leaderboard = leaderboard;
        game.settings_path = Some(settings_path);
        game.leaderboard_path = Some(leaderboard_path);
        game
    }

    /// Run one host frame. Returns the events raised, for feedback
    /// consumers (audio, particles) that live outside the core.
    pub fn frame(&mut self, wall_dt: f32, input: &InputFrame) -> Vec<GameEvent> {
        handle_input(&mut self.state, input);

        let state = &mut self.state;
        self.clock.tick(wall_dt, |dt| tick(state, dt));

        let events = self.state.drain_events();
        for event in &events {
            self.on_event(event);
        }
        events
    }

    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::GameOver {
                score,
                level,
                play_time_secs,
            } => {
                let entry = LeaderboardEntry::new(
                    &self.state.settings.player_name,
                    score,
                    level,
                    play_time_secs,
                );
                self.last_rank = self.leaderboard.insert(entry);
                match self.last_rank {
                    Some(rank) => log::info!("Leaderboard rank #{rank} with {score}"),
                    None => log::info!("Score {score} did not place"),
                }
                self.save_leaderboard();
            }
            GameEvent::SettingsChanged => self.save_settings(),
            GameEvent::QuitRequested => self.quit = true,
            _ => {}
        }
    }

    fn save_leaderboard(&self) {
        if let Some(path) = &self.leaderboard_path {
            if let Err(e) = self.leaderboard.save(path) {
                log::warn!("Could not save leaderboard to {}: {e}", path.display());
            }
        }
    }

    fn save_settings(&self) {
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.state.settings.save(path) {
                log::warn!("Could not save settings to {}: {e}", path.display());
            }
        }
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn leaderboard_path(&self) -> Option<&Path> {
        self.leaderboard_path.as_deref()
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Interpolation fraction between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    pub fn total_ticks(&self) -> u64 {
        self.clock.total_steps()
    }

    pub fn hud(&self) -> HudSnapshot {
        self.state.hud()
    }
}
