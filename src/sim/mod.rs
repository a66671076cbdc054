//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies

pub mod bird;
pub mod collision;
pub mod flow;
pub mod pipes;
pub mod state;
pub mod tick;

pub use bird::{Bird, Combo};
pub use collision::Rect;
pub use flow::{MenuItem, PauseItem, handle_input};
pub use pipes::{Coin, Pipe, PipeStream};
pub use state::{GameEvent, GamePhase, GameState, HudSnapshot};
pub use tick::{game_over, start_run, tick};
