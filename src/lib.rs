//! Flappy Arcade - a side-scrolling gap-runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, scoring, game phases)
//! - `scheduler`: Fixed-timestep accumulator driving `sim`
//! - `input`: Edge-triggered action input
//! - `highscores`: Persisted top-10 leaderboard
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `game`: App shell tying the above together

pub mod game;
pub mod highscores;
pub mod input;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{Leaderboard, LeaderboardEntry};
pub use input::{Action, EdgeDetector, InputFrame, InputSource};
pub use scheduler::FixedTimestep;
pub use settings::Settings;
pub use tuning::{Difficulty, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; physics constants are per-tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest wall-clock frame the scheduler will absorb (spiral-of-death guard)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 60.0;
    /// Top of the ground band; nothing flies below it
    pub const GROUND_LINE: f32 = PLAY_HEIGHT - GROUND_HEIGHT;

    /// Bird defaults
    pub const BIRD_START_X: f32 = PLAY_WIDTH / 4.0;
    pub const BIRD_START_Y: f32 = PLAY_HEIGHT / 2.0;
    pub const BIRD_RADIUS: f32 = 15.0;
    /// Hit-box shrink so grazing a pipe corner isn't fatal
    pub const HITBOX_MARGIN: f32 = 3.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_GAP_HEIGHT: f32 = 160.0;
    pub const PIPE_GAP_MIN_Y: f32 = 150.0;
    pub const PIPE_GAP_MAX_Y: f32 = GROUND_LINE - 100.0;
    /// Horizontal spacing between seeded pipes
    pub const PIPE_PITCH: f32 = 300.0;
    /// Pipes seeded at the start of each run
    pub const INITIAL_PIPES: usize = 3;

    /// Coin half-extent (square pickup)
    pub const COIN_HALF_SIZE: f32 = 12.0;

    /// Seconds a combo survives without another pass
    pub const COMBO_WINDOW: f32 = 2.0;

    /// Leaderboard entries retained
    pub const LEADERBOARD_CAPACITY: usize = 10;
}
