//! Action input
//!
//! The simulation never sees raw keys. A backend implements [`InputSource`]
//! to report which logical actions are held, and an [`EdgeDetector`] turns
//! one sample per frame into an [`InputFrame`] of pressed-this-frame and
//! currently-held flags.

use serde::{Deserialize, Serialize};

/// Logical actions the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Jump,
    /// Pause toggle, doubles as "back"
    Pause,
    Confirm,
    Up,
    Down,
    Left,
    Right,
    Restart,
}

impl Action {
    pub const COUNT: usize = 8;

    pub const ALL: [Action; Action::COUNT] = [
        Action::Jump,
        Action::Pause,
        Action::Confirm,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Restart,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Anything that can report whether an action is currently held
pub trait InputSource {
    fn is_down(&self, action: Action) -> bool;
}

/// Input for one host frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pressed: [bool; Action::COUNT],
    held: [bool; Action::COUNT],
}

impl InputFrame {
    /// Became true this frame
    #[inline]
    pub fn pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// Currently held (includes the press frame)
    #[inline]
    pub fn held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Either of several actions pressed this frame
    pub fn any_pressed(&self, actions: &[Action]) -> bool {
        actions.iter().any(|&a| self.pressed(a))
    }

    /// A frame with just these actions freshly pressed (and held)
    pub fn with_pressed(actions: &[Action]) -> Self {
        let mut frame = Self::default();
        for &a in actions {
            frame.pressed[a.index()] = true;
            frame.held[a.index()] = true;
        }
        frame
    }

    /// A frame with these actions held but not freshly pressed
    pub fn with_held(actions: &[Action]) -> Self {
        let mut frame = Self::default();
        for &a in actions {
            frame.held[a.index()] = true;
        }
        frame
    }
}

/// Debounces level samples into edge-triggered presses
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    prev: [bool; Action::COUNT],
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the source once; call exactly once per host frame
    pub fn sample(&mut self, source: &impl InputSource) -> InputFrame {
        let mut frame = InputFrame::default();
        for action in Action::ALL {
            let i = action.index();
            let down = source.is_down(action);
            frame.held[i] = down;
            // Edge detection - only trigger on press, not hold
            frame.pressed[i] = down && !self.prev[i];
            self.prev[i] = down;
        }
        frame
    }

    /// Forget previous state (e.g. after focus loss)
    pub fn reset(&mut self) {
        self.prev = [false; Action::COUNT];
    }
}

/// An [`InputSource`] backed by a fixed set of held actions
#[derive(Debug, Clone, Default)]
pub struct HeldActions(pub Vec<Action>);

impl InputSource for HeldActions {
    fn is_down(&self, action: Action) -> bool {
        self.0.contains(&action)
    }
}
