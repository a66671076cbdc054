//! Phase transitions driven by edge-triggered input
//!
//! Called once per host frame, before that frame's ticks. Only `pressed`
//! flags cause transitions; `held` is used solely for live-tuning while
//! paused.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::start_run;
use crate::input::{Action, InputFrame};
use crate::settings::{GRAVITY_RANGE, JUMP_RANGE, SettingsItem};

/// Gravity change per frame of a held arrow on the pause screen
pub const LIVE_GRAVITY_STEP: f32 = 0.01;
/// Jump impulse change per frame of a held arrow on the pause screen
pub const LIVE_JUMP_STEP: f32 = 0.05;
/// Floaty physics for players who want an easier time
pub const ASSIST_GRAVITY: f32 = 0.35;
pub const ASSIST_JUMP_IMPULSE: f32 = -6.0;

/// Main menu rows, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    NewGame,
    Continue,
    Leaderboard,
    Settings,
    Help,
    Credits,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 7] = [
        MenuItem::NewGame,
        MenuItem::Continue,
        MenuItem::Leaderboard,
        MenuItem::Settings,
        MenuItem::Help,
        MenuItem::Credits,
        MenuItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NewGame => "NEW GAME",
            MenuItem::Continue => "CONTINUE",
            MenuItem::Leaderboard => "LEADERBOARD",
            MenuItem::Settings => "SETTINGS",
            MenuItem::Help => "HELP",
            MenuItem::Credits => "CREDITS",
            MenuItem::Quit => "QUIT",
        }
    }
}

/// Pause screen rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseItem {
    /// Hold Left/Right to tune
    Gravity,
    /// Hold Left/Right to tune
    JumpImpulse,
    Assist,
    /// Back to the player's configured physics
    Restore,
    QuitToMenu,
}

impl PauseItem {
    pub const ALL: [PauseItem; 5] = [
        PauseItem::Gravity,
        PauseItem::JumpImpulse,
        PauseItem::Assist,
        PauseItem::Restore,
        PauseItem::QuitToMenu,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PauseItem::Gravity => "Gravity",
            PauseItem::JumpImpulse => "Jump Force",
            PauseItem::Assist => "Assist Mode",
            PauseItem::Restore => "Restore Defaults",
            PauseItem::QuitToMenu => "Quit to Menu",
        }
    }
}

/// Step a wrapping cursor by Up/Down presses
fn move_cursor(cursor: &mut usize, len: usize, input: &InputFrame) {
    if input.pressed(Action::Up) {
        *cursor = (*cursor + len - 1) % len;
    }
    if input.pressed(Action::Down) {
        *cursor = (*cursor + 1) % len;
    }
}

/// -1, 0 or +1 from a pair of flags
fn axis(left: bool, right: bool) -> i32 {
    right as i32 - left as i32
}

/// Handle one frame of input for the current phase
pub fn handle_input(state: &mut GameState, input: &InputFrame) {
    match state.phase {
        GamePhase::Menu => handle_menu(state, input),
        GamePhase::Playing => handle_playing(state, input),
        GamePhase::Paused => handle_paused(state, input),
        GamePhase::GameOver => {
            if input.any_pressed(&[Action::Confirm, Action::Jump]) {
                start_run(state);
            } else if input.pressed(Action::Pause) {
                state.set_phase(GamePhase::Menu);
            }
        }
        GamePhase::Leaderboard | GamePhase::Help | GamePhase::Credits => {
            if input.any_pressed(&[Action::Pause, Action::Jump, Action::Confirm]) {
                state.set_phase(GamePhase::Menu);
            }
        }
        GamePhase::Settings => handle_settings(state, input),
    }
}

fn handle_menu(state: &mut GameState, input: &InputFrame) {
    move_cursor(&mut state.menu_cursor, MenuItem::ALL.len(), input);

    if !input.any_pressed(&[Action::Confirm, Action::Jump]) {
        return;
    }
    match MenuItem::ALL[state.menu_cursor % MenuItem::ALL.len()] {
        MenuItem::NewGame => start_run(state),
        MenuItem::Continue => {
            if state.run_active {
                state.set_phase(GamePhase::Playing);
            }
        }
        MenuItem::Leaderboard => state.set_phase(GamePhase::Leaderboard),
        MenuItem::Settings => {
            state.settings_cursor = 0;
            state.set_phase(GamePhase::Settings);
        }
        MenuItem::Help => state.set_phase(GamePhase::Help),
        MenuItem::Credits => state.set_phase(GamePhase::Credits),
        MenuItem::Quit => state.emit(GameEvent::QuitRequested),
    }
}

fn handle_playing(state: &mut GameState, input: &InputFrame) {
    if input.pressed(Action::Restart) {
        start_run(state);
        return;
    }
    if input.pressed(Action::Pause) {
        state.set_phase(GamePhase::Paused);
        return;
    }
    if input.any_pressed(&[Action::Jump, Action::Up]) && state.bird.alive {
        state.bird.jump();
        state.emit(GameEvent::Jumped);
    }
}

fn handle_paused(state: &mut GameState, input: &InputFrame) {
    if input.pressed(Action::Restart) {
        start_run(state);
        return;
    }
    if input.any_pressed(&[Action::Pause, Action::Jump]) {
        state.set_phase(GamePhase::Playing);
        return;
    }

    move_cursor(&mut state.pause_cursor, PauseItem::ALL.len(), input);
    let item = PauseItem::ALL[state.pause_cursor % PauseItem::ALL.len()];

    // Live tuning follows the held level, not the press edge
    let dir = axis(input.held(Action::Left), input.held(Action::Right)) as f32;
    let bird = &mut state.bird;
    match item {
        PauseItem::Gravity if dir != 0.0 => {
            bird.gravity =
                (bird.gravity + dir * LIVE_GRAVITY_STEP).clamp(GRAVITY_RANGE.0, GRAVITY_RANGE.1);
        }
        // Right means a stronger (more negative) jump
        PauseItem::JumpImpulse if dir != 0.0 => {
            bird.jump_impulse =
                (bird.jump_impulse - dir * LIVE_JUMP_STEP).clamp(JUMP_RANGE.0, JUMP_RANGE.1);
        }
        _ => {}
    }

    if !input.pressed(Action::Confirm) {
        return;
    }
    match item {
        PauseItem::Assist => {
            state.bird.gravity = ASSIST_GRAVITY;
            state.bird.jump_impulse = ASSIST_JUMP_IMPULSE;
            log::info!("Assist physics enabled");
        }
        PauseItem::Restore => {
            state.bird.gravity = state.settings.gravity;
            state.bird.jump_impulse = state.settings.jump_impulse;
            log::info!("Physics restored");
        }
        PauseItem::QuitToMenu => state.set_phase(GamePhase::Menu),
        PauseItem::Gravity | PauseItem::JumpImpulse => {}
    }
}

fn handle_settings(state: &mut GameState, input: &InputFrame) {
    if input.pressed(Action::Pause) {
        // Carry edited physics into a run resumed via Continue
        state.bird.gravity = state.settings.gravity;
        state.bird.jump_impulse = state.settings.jump_impulse;
        state.emit(GameEvent::SettingsChanged);
        state.set_phase(GamePhase::Menu);
        return;
    }

    move_cursor(&mut state.settings_cursor, SettingsItem::ALL.len(), input);
    let dir = axis(input.pressed(Action::Left), input.pressed(Action::Right));
    if dir != 0 {
        let item = SettingsItem::ALL[state.settings_cursor % SettingsItem::ALL.len()];
        state.settings.adjust(item, dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::tuning::{Difficulty, Tuning};

    fn state() -> GameState {
        GameState::new(11, Tuning::default(), Settings::default())
    }

    fn press(state: &mut GameState, actions: &[Action]) {
        handle_input(state, &InputFrame::with_pressed(actions));
    }

    fn select_menu(state: &mut GameState, item: MenuItem) {
        state.menu_cursor = MenuItem::ALL.iter().position(|&m| m == item).unwrap_or(0);
        press(state, &[Action::Confirm]);
    }

    #[test]
    fn test_menu_cursor_wraps() {
        let mut s = state();
        press(&mut s, &[Action::Up]);
        assert_eq!(s.menu_cursor, 6);
        press(&mut s, &[Action::Down]);
        assert_eq!(s.menu_cursor, 0);
    }

    #[test]
    fn test_new_game_from_menu() {
        let mut s = state();
        press(&mut s, &[Action::Jump]);
        assert_eq!(s.phase, GamePhase::Playing);
        assert!(s.run_active);
    }

    #[test]
    fn test_continue_requires_live_run() {
        let mut s = state();
        select_menu(&mut s, MenuItem::Continue);
        assert_eq!(s.phase, GamePhase::Menu);

        select_menu(&mut s, MenuItem::NewGame);
        press(&mut s, &[Action::Pause]);
        s.pause_cursor = 4;
        press(&mut s, &[Action::Confirm]);
        assert_eq!(s.phase, GamePhase::Menu);

        select_menu(&mut s, MenuItem::Continue);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_requests_exit() {
        let mut s = state();
        select_menu(&mut s, MenuItem::Quit);
        assert_eq!(s.drain_events(), vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_info_screens_return_to_menu() {
        for item in [MenuItem::Leaderboard, MenuItem::Help, MenuItem::Credits] {
            let mut s = state();
            select_menu(&mut s, item);
            assert_ne!(s.phase, GamePhase::Menu);
            press(&mut s, &[Action::Pause]);
            assert_eq!(s.phase, GamePhase::Menu);
        }
    }

    #[test]
    fn test_jump_only_on_press() {
        let mut s = state();
        select_menu(&mut s, MenuItem::NewGame);
        s.drain_events();

        press(&mut s, &[Action::Jump]);
        assert_eq!(s.bird.vel, s.bird.jump_impulse);

        s.bird.vel = 3.0;
        handle_input(&mut s, &InputFrame::with_held(&[Action::Jump]));
        assert_eq!(s.bird.vel, 3.0);
        assert_eq!(s.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_pause_toggle() {
        let mut s = state();
        select_menu(&mut s, MenuItem::NewGame);
        press(&mut s, &[Action::Pause]);
        assert_eq!(s.phase, GamePhase::Paused);
        press(&mut s, &[Action::Pause]);
        assert_eq!(s.phase, GamePhase::Playing);
        press(&mut s, &[Action::Pause]);
        press(&mut s, &[Action::Jump]);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_from_playing_and_paused() {
        let mut s = state();
        select_menu(&mut s, MenuItem::NewGame);
        s.score = 9;
        press(&mut s, &[Action::Restart]);
        assert_eq!(s.score, 0);
        assert_eq!(s.runs, 2);

        press(&mut s, &[Action::Pause]);
        press(&mut s, &[Action::Restart]);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.runs, 3);
    }

    #[test]
    fn test_paused_live_tuning_uses_held() {
        let mut s = state();
        select_menu(&mut s, MenuItem::NewGame);
        press(&mut s, &[Action::Pause]);
        let g = s.bird.gravity;

        for _ in 0..10 {
            handle_input(&mut s, &InputFrame::with_held(&[Action::Right]));
        }
        assert!((s.bird.gravity - (g + 0.1)).abs() < 1e-4);

        press(&mut s, &[Action::Down]);
        let j = s.bird.jump_impulse;
        handle_input(&mut s, &InputFrame::with_held(&[Action::Right]));
        assert!(s.bird.jump_impulse < j);
        // Settings are untouched
        assert_eq!(s.settings.gravity, g);
    }

    #[test]
    fn test_assist_and_restore() {
        let mut s = state();
        select_menu(&mut s, MenuItem::NewGame);
        press(&mut s, &[Action::Pause]);
        s.pause_cursor = 2;
        press(&mut s, &[Action::Confirm]);
        assert_eq!(s.bird.gravity, ASSIST_GRAVITY);
        assert_eq!(s.bird.jump_impulse, ASSIST_JUMP_IMPULSE);

        s.pause_cursor = 3;
        press(&mut s, &[Action::Confirm]);
        assert_eq!(s.bird.gravity, s.settings.gravity);
        assert_eq!(s.bird.jump_impulse, s.settings.jump_impulse);
        assert_eq!(s.phase, GamePhase::Paused);
    }

    #[test]
    fn test_game_over_transitions() {
        let mut s = state();
        select_menu(&mut s, MenuItem::NewGame);
        crate::sim::tick::game_over(&mut s);
        assert_eq!(s.phase, GamePhase::GameOver);
        press(&mut s, &[Action::Confirm]);
        assert_eq!(s.phase, GamePhase::Playing);

        crate::sim::tick::game_over(&mut s);
        press(&mut s, &[Action::Pause]);
        assert_eq!(s.phase, GamePhase::Menu);
        assert!(!s.run_active);
    }

    #[test]
    fn test_settings_screen_edits_and_saves() {
        let mut s = state();
        select_menu(&mut s, MenuItem::Settings);
        assert_eq!(s.phase, GamePhase::Settings);

        // Difficulty row
        press(&mut s, &[Action::Down]);
        press(&mut s, &[Action::Down]);
        press(&mut s, &[Action::Right]);
        assert_eq!(s.settings.difficulty, Difficulty::Hard);

        // Held arrows don't repeat here
        handle_input(&mut s, &InputFrame::with_held(&[Action::Right]));
        assert_eq!(s.settings.difficulty, Difficulty::Hard);

        press(&mut s, &[Action::Pause]);
        assert_eq!(s.phase, GamePhase::Menu);
        assert_eq!(s.drain_events(), vec![GameEvent::SettingsChanged]);
        assert_eq!(s.bird.gravity, 0.6);

        select_menu(&mut s, MenuItem::NewGame);
        assert_eq!(s.scroll_speed, 3.5);
    }
}
