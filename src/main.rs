//! Flappy Arcade entry point
//!
//! Headless native runner: an autopilot plays through the menus and runs at
//! a simulated 144 Hz host frame rate, exercising the same fixed-step loop a
//! windowed frontend would drive.
//!
//! Usage: `flappy-arcade [seed] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_arcade::consts::*;
    use flappy_arcade::sim::{GameEvent, GamePhase, GameState};
    use flappy_arcade::{Action, EdgeDetector, Game, InputSource, Tuning};

    const HOST_HZ: f32 = 144.0;
    const SETTINGS_FILE: &str = "settings.json";
    const LEADERBOARD_FILE: &str = "leaderboard.dat";
    const TUNING_FILE: &str = "tuning.json";

    /// Reads the simulation and holds whatever a decent player would
    struct Autopilot<'a> {
        state: &'a GameState,
        frame: u64,
    }

    impl Autopilot<'_> {
        /// Flap when about to sink below the next gap's center
        fn wants_flap(&self) -> bool {
            let bird = &self.state.bird;
            let target = self
                .state
                .pipes
                .next_ahead(bird.x - bird.radius)
                .map(|p| p.gap_y + p.gap_height / 6.0)
                .unwrap_or(GROUND_LINE / 2.0);
            bird.vel >= 0.0 && bird.y + bird.vel > target
        }
    }

    impl InputSource for Autopilot<'_> {
        fn is_down(&self, action: Action) -> bool {
            match (self.state.phase, action) {
                (GamePhase::Playing, Action::Jump) => self.wants_flap(),
                // Tap Confirm on alternating frames so each tap is a fresh edge
                (GamePhase::Menu | GamePhase::GameOver, Action::Confirm) => self.frame % 2 == 0,
                _ => false,
            }
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis() as u64);
        let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

        let tuning = Tuning::load_or_default(std::path::Path::new(TUNING_FILE));
        let mut game = Game::with_files(seed, tuning, SETTINGS_FILE, LEADERBOARD_FILE);
        let mut edges = EdgeDetector::new();

        log::info!("Flappy Arcade (headless) seed {seed}, {seconds}s at {HOST_HZ} Hz");

        let dt = 1.0 / HOST_HZ;
        let frames = (seconds.max(0.0) * HOST_HZ) as u64;
        let mut runs = 0u32;
        let mut best = 0u64;
        let mut jumps = 0u64;

        for frame in 0..frames {
            let input = edges.sample(&Autopilot {
                state: &game.state,
                frame,
            });
            for event in game.frame(dt, &input) {
                match event {
                    GameEvent::GameOver { score, .. } => {
                        runs += 1;
                        best = best.max(score);
                    }
                    GameEvent::Jumped => jumps += 1,
                    _ => {}
                }
            }
            if game.should_quit() {
                break;
            }
        }

        // Count an unfinished run too
        if game.state.run_active {
            best = best.max(game.state.score);
        }

        let hud = game.hud();
        log::info!(
            "Finished: {runs} runs, best {best}, {jumps} flaps, {} ticks",
            game.total_ticks()
        );
        log::info!(
            "Last run: score {} level {} coins {} ({})",
            hud.score,
            hud.level,
            hud.coins,
            hud.phase.as_str()
        );
        for (i, entry) in game.leaderboard().entries.iter().enumerate() {
            log::info!(
                "#{:<2} {:<12} {:>5}  L{:<2} {}",
                i + 1,
                entry.name,
                entry.score,
                entry.level,
                flappy_arcade::highscores::format_play_time(entry.play_time_secs)
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No wasm frontend; the library is the deliverable there
}
