//! Scrolling pipe stream
//!
//! Pipes are kept in spawn order, which is also left-to-right order since
//! they all scroll at the same speed. New pipes are appended at the back and
//! off-screen pipes are evicted from the front.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// A coin floating in the middle of a pipe's gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub y: f32,
    pub collected: bool,
}

/// A top/bottom barrier pair with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Unique for the lifetime of a stream, never reused
    pub id: u32,
    /// Left (leading) edge
    pub x: f32,
    pub width: f32,
    /// Vertical center of the gap
    pub gap_y: f32,
    pub gap_height: f32,
    /// Set once when the bird clears the trailing edge
    pub passed: bool,
    pub coin: Option<Coin>,
}

impl Pipe {
    /// Right (trailing) edge
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_y - self.gap_height / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + self.gap_height / 2.0
    }

    /// Barrier from the top of the screen down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(Vec2::new(self.x, 0.0), Vec2::new(self.trailing_edge(), self.gap_top()))
    }

    /// Barrier from the gap down to the ground
    pub fn bottom_rect(&self, ground_line: f32) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.gap_bottom()),
            Vec2::new(self.trailing_edge(), ground_line),
        )
    }

    /// Pickup area of the coin, if this pipe has one still uncollected
    pub fn coin_rect(&self) -> Option<Rect> {
        match self.coin {
            Some(coin) if !coin.collected => Some(Rect::from_center_half_extents(
                Vec2::new(self.x + self.width / 2.0, coin.y),
                Vec2::splat(COIN_HALF_SIZE),
            )),
            _ => None,
        }
    }

    pub fn is_off_screen(&self, left_bound: f32) -> bool {
        self.trailing_edge() < left_bound
    }
}

/// Ordered collection of live pipes plus the spawner that feeds it
#[derive(Debug, Clone)]
pub struct PipeStream {
    pipes: VecDeque<Pipe>,
    rng: Pcg32,
    next_id: u32,
    /// Seconds since the last spawn
    spawn_timer: f32,
    play_width: f32,
    ground_line: f32,
    tuning: Tuning,
}

impl PipeStream {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            pipes: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            spawn_timer: 0.0,
            play_width: PLAY_WIDTH,
            ground_line: GROUND_LINE,
            tuning: tuning.validate(),
        }
    }

    /// Clear the stream and seed the opening pipes just past the right edge
    pub fn initialize(&mut self, play_width: f32) {
        self.pipes.clear();
        self.spawn_timer = 0.0;
        self.play_width = play_width;
        for i in 0..INITIAL_PIPES {
            let x = play_width + i as f32 * self.tuning.pipe_pitch;
            self.spawn_at(x);
        }
    }

    /// Reseed the gap/coin RNG (new run)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning.validate();
    }

    /// Scroll, spawn and evict. `scroll_speed` is px/tick, `dt` feeds the
    /// spawn timer in seconds.
    ///
    /// A spawn is due once the timer strictly exceeds the interval. It is
    /// held back while the newest pipe is still closer than one pitch to the
    /// right edge, so new pipes always enter at the edge and the queue stays
    /// bounded whatever the interval, speed and pitch.
    pub fn update(&mut self, dt: f32, scroll_speed: f32, level: u32) {
        for pipe in self.pipes.iter_mut() {
            pipe.x -= scroll_speed;
        }

        self.spawn_timer += dt;
        let has_room = self
            .pipes
            .back()
            .is_none_or(|last| last.x + self.tuning.pipe_pitch <= self.play_width);
        if self.spawn_timer > self.tuning.spawn_interval(level) && has_room {
            self.spawn_timer = 0.0;
            self.spawn_at(self.play_width);
        }

        while self.pipes.front().is_some_and(|p| p.is_off_screen(0.0)) {
            if let Some(pipe) = self.pipes.pop_front() {
                log::debug!("Evicted pipe {}", pipe.id);
            }
        }
    }

    /// Append a pipe at `x` with a random gap and maybe a coin
    pub fn spawn_at(&mut self, x: f32) -> u32 {
        let (lo, hi) = (self.tuning.gap_min_y, self.tuning.gap_max_y);
        let gap_y = if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        };
        let coin = self
            .rng
            .random_bool(self.tuning.coin_chance)
            .then_some(Coin {
                y: gap_y,
                collected: false,
            });

        let id = self.next_id;
        self.next_id += 1;
        self.pipes.push_back(Pipe {
            id,
            x,
            width: self.tuning.pipe_width,
            gap_y,
            gap_height: self.tuning.gap_height,
            passed: false,
            coin,
        });
        log::debug!("Spawned pipe {id} at x={x:.0} gap_y={gap_y:.0}");
        id
    }

    /// Does the hit-box touch any barrier?
    pub fn check_collision(&self, hitbox: &Rect) -> bool {
        self.pipes.iter().any(|p| {
            hitbox.intersects(&p.top_rect()) || hitbox.intersects(&p.bottom_rect(self.ground_line))
        })
    }

    /// Collect every uncollected coin the hit-box touches; returns how many
    pub fn collect_coins(&mut self, hitbox: &Rect) -> u32 {
        let mut collected = 0;
        for pipe in self.pipes.iter_mut() {
            if !pipe.coin_rect().is_some_and(|r| hitbox.intersects(&r)) {
                continue;
            }
            if let Some(coin) = pipe.coin.as_mut() {
                coin.collected = true;
                collected += 1;
            }
        }
        collected
    }

    /// Mark pipes whose trailing edge is behind `bird_x` as passed; returns
    /// how many were newly passed.
    pub fn check_passed(&mut self, bird_x: f32) -> u32 {
        let mut count = 0;
        for pipe in self.pipes.iter_mut() {
            if !pipe.passed && pipe.trailing_edge() < bird_x {
                pipe.passed = true;
                count += 1;
            }
        }
        count
    }

    /// Visit every pipe mutably
    pub fn for_each_mut(&mut self, f: impl FnMut(&mut Pipe)) {
        self.pipes.iter_mut().for_each(f);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Pipe> {
        self.pipes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Pipe> {
        self.pipes.get_mut(index)
    }

    /// First pipe whose trailing edge is still ahead of `x`
    pub fn next_ahead(&self, x: f32) -> Option<&Pipe> {
        self.pipes.iter().find(|p| p.trailing_edge() >= x)
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn clear(&mut self) {
        self.pipes.clear();
        self.spawn_timer = 0.0;
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn ground_line(&self) -> f32 {
        self.ground_line
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
