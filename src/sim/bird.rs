//! The player-controlled bird
//!
//! Physics run in per-tick units: gravity is added to velocity once per
//! fixed step and a jump *sets* velocity rather than adding to it. The
//! combo streak lives here too since it is reset with the bird.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Consecutive-pass streak and the score multiplier it grants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    /// Passes in the current streak
    pub count: u32,
    /// Seconds left before the streak lapses
    pub window: f32,
    /// Score multiplier, `1 + count / 3`
    pub multiplier: u32,
}

impl Default for Combo {
    fn default() -> Self {
        Self {
            count: 0,
            window: 0.0,
            multiplier: 1,
        }
    }
}

impl Combo {
    /// Extend the streak and refill the window
    pub fn add(&mut self, window: f32) {
        self.count += 1;
        self.window = window;
        self.multiplier = 1 + self.count / 3;
    }

    /// Burn down the window; a lapse snaps the multiplier back to 1
    pub fn tick(&mut self, dt: f32) {
        if self.window > 0.0 {
            self.window -= dt;
            if self.window <= 0.0 {
                *self = Self::default();
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.window > 0.0
    }
}

/// The bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Fixed horizontal position
    pub x: f32,
    /// Vertical position (center)
    pub y: f32,
    /// Vertical speed, px/tick (+ is down)
    pub vel: f32,
    /// Added to `vel` every tick
    pub gravity: f32,
    /// Velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    pub radius: f32,
    pub alive: bool,
    pub combo: Combo,
    /// Nose tilt in degrees, cosmetic only
    pub rotation: f32,
    /// Lowest y the bird's center may reach
    ground_line: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new(0.5, -8.5)
    }
}

impl Bird {
    pub fn new(gravity: f32, jump_impulse: f32) -> Self {
        Self {
            x: BIRD_START_X,
            y: BIRD_START_Y,
            vel: 0.0,
            gravity,
            jump_impulse,
            radius: BIRD_RADIUS,
            alive: true,
            combo: Combo::default(),
            rotation: 0.0,
            ground_line: GROUND_LINE,
        }
    }

    /// Back to the start of a run. Physics constants are kept.
    pub fn reset(&mut self) {
        self.x = BIRD_START_X;
        self.y = BIRD_START_Y;
        self.vel = 0.0;
        self.alive = true;
        self.combo = Combo::default();
        self.rotation = 0.0;
    }

    /// Integrate one tick
    pub fn update(&mut self) {
        if !self.alive {
            return;
        }

        self.vel += self.gravity;
        self.y += self.vel;
        self.rotation = (self.vel * 3.0).clamp(-30.0, 30.0);

        let top = self.radius;
        let bottom = self.ground_line - self.radius;
        if self.y <= top {
            self.y = top;
            self.vel = 0.0;
        } else if self.y >= bottom {
            self.y = bottom;
            self.vel = 0.0;
        }
    }

    /// Flap. Overrides current velocity, even mid-climb.
    pub fn jump(&mut self) {
        if self.alive {
            self.vel = self.jump_impulse;
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn add_combo(&mut self, window: f32) {
        if self.alive {
            self.combo.add(window);
        }
    }

    pub fn tick_combo(&mut self, dt: f32) {
        if self.alive {
            self.combo.tick(dt);
        }
    }

    pub fn multiplier(&self) -> u32 {
        self.combo.multiplier
    }

    pub fn on_ground(&self) -> bool {
        self.y >= self.ground_line - self.radius
    }

    pub fn on_ceiling(&self) -> bool {
        self.y <= self.radius
    }

    pub fn ground_line(&self) -> f32 {
        self.ground_line
    }

    /// Hit-box used against pipes and coins (smaller than the drawn body)
    pub fn collision_box(&self) -> Rect {
        let half = (self.radius - HITBOX_MARGIN).max(1.0);
        Rect::from_center_half_extents(Vec2::new(self.x, self.y), Vec2::splat(half))
    }
}
