//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run deterministically. Physics run in
//! per-tick units; `dt` only feeds time budgets (combo window, spawn timer,
//! elapsed time).

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::PLAY_WIDTH;

/// Reset the bird, pipes and counters and enter Playing
pub fn start_run(state: &mut GameState) {
    let tuning = state.run_tuning();
    let seed = state.run_seed();
    state.runs += 1;

    state.bird.gravity = tuning.gravity;
    state.bird.jump_impulse = tuning.jump_impulse;
    state.bird.reset();

    state.pipes.set_tuning(tuning.clone());
    state.pipes.reseed(seed);
    state.pipes.initialize(PLAY_WIDTH);

    state.score = 0;
    state.coins = 0;
    state.level = 1;
    state.pipes_passed = 0;
    state.scroll_speed = tuning.base_scroll_speed;
    state.elapsed = 0.0;
    state.time_ticks = 0;
    state.run_active = true;
    state.beat_high_score = false;
    state.pause_cursor = 0;

    log::info!(
        "Run {} started (seed {seed}, {})",
        state.runs,
        state.settings.difficulty.as_str()
    );
    state.set_phase(GamePhase::Playing);
}

/// End the run: kill the bird and raise `GameOver`
pub fn game_over(state: &mut GameState) {
    if !state.run_active {
        return;
    }
    state.bird.kill();
    state.run_active = false;
    let play_time_secs = state.play_time_secs();
    log::info!(
        "Game over: score {} level {} in {}s",
        state.score,
        state.level,
        play_time_secs
    );
    state.emit(GameEvent::GameOver {
        score: state.score,
        level: state.level,
        play_time_secs,
    });
    state.set_phase(GamePhase::GameOver);
}

/// Advance the game state by one fixed timestep.
/// Does nothing outside of Playing.
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    // Bird
    state.bird.update();
    state.bird.tick_combo(dt);

    // Ground is always fatal, the ceiling only if configured
    let ceiling_kills = state.pipes.tuning().ceiling_kills;
    if state.bird.on_ground() || (ceiling_kills && state.bird.on_ceiling()) {
        game_over(state);
        return;
    }

    // Pipes
    state.pipes.update(dt, state.scroll_speed, state.level);

    let hitbox = state.bird.collision_box();
    if state.pipes.check_collision(&hitbox) {
        game_over(state);
        return;
    }

    // Coins
    let coins = state.pipes.collect_coins(&hitbox);
    if coins > 0 {
        let tuning = state.pipes.tuning();
        state.coins += coins as u64 * tuning.coin_value;
        state.score += coins as u64 * tuning.coin_score;
        state.emit(GameEvent::CoinCollected { count: coins });
    }

    // Passes
    let passed = state.pipes.check_passed(state.bird.x);
    if passed > 0 {
        score_passes(state, passed);
    }

    if state.score > state.high_score {
        if !state.beat_high_score && state.high_score > 0 {
            state.emit(GameEvent::NewHighScore { score: state.score });
        }
        state.beat_high_score = true;
        state.high_score = state.score;
    }
}

/// Award a tick's passes. The multiplier in effect before this tick's combo
/// step applies to all of them, and the combo advances once.
fn score_passes(state: &mut GameState, passed: u32) {
    let (pass_score, combo_window, level_every, speed_per_level) = {
        let t = state.pipes.tuning();
        (t.pass_score, t.combo_window, t.level_every, t.speed_per_level)
    };

    let multiplier = state.bird.multiplier();
    let points = passed as u64 * pass_score * multiplier as u64;
    state.score += points;
    state.bird.add_combo(combo_window);
    state.emit(GameEvent::Passed {
        count: passed,
        points,
        multiplier,
    });

    for _ in 0..passed {
        state.pipes_passed += 1;
        if state.pipes_passed % level_every == 0 {
            state.level += 1;
            state.scroll_speed += speed_per_level;
            log::info!(
                "Level {} (speed {:.1})",
                state.level,
                state.scroll_speed
            );
            state.emit(GameEvent::LevelUp { level: state.level });
        }
    }
}
