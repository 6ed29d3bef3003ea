/// The spread navigator: a small state machine for flip transitions
///
/// Tracks which spread is current and whether a flip animation is in
/// flight. A flip is two-phase: the page content swaps mid-animation
/// (after `FLIP_DURATION`), and input re-enables a beat later (after
/// `SETTLE_DELAY`). Swapping immediately would visually jump before the
/// animation plays; re-enabling immediately would let flips stack
/// mid-flight.
///
/// The navigator itself is time-free — the application schedules the two
/// deadlines and calls `advance()` / `settle()` when they fire, so the
/// whole machine is testable without a clock.

use std::time::Duration;

/// How long the flip animation runs before the page content swaps
pub const FLIP_DURATION: Duration = Duration::from_millis(300);
/// Pause after the swap before navigation input re-enables
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Which way the current flip is turning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Navigator machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resting; navigation input is live
    Idle,
    /// Flip in flight; all navigation input is dropped
    Transitioning(Direction),
}

/// Tracks the current spread and the flip transition state.
///
/// `current_spread` ranges over `[0, max_spread]` inclusive. The
/// boundaries (front and back cover) are ordinary resting values, not
/// separate states — they just disable the corresponding request.
#[derive(Debug, Clone)]
pub struct Navigator {
    current_spread: usize,
    max_spread: usize,
    phase: Phase,
}

impl Navigator {
    /// Start at the front cover of a book with `max_spread` spreads
    pub fn new(max_spread: usize) -> Self {
        Navigator {
            current_spread: 0,
            max_spread,
            phase: Phase::Idle,
        }
    }

    pub fn current_spread(&self) -> usize {
        self.current_spread
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning(_))
    }

    /// Whether a backward flip could start right now
    pub fn can_go_prev(&self) -> bool {
        self.phase == Phase::Idle && self.current_spread > 0
    }

    /// Whether a forward flip could start right now
    pub fn can_go_next(&self) -> bool {
        self.phase == Phase::Idle && self.current_spread < self.max_spread
    }

    /// Request a flip back toward the front cover.
    ///
    /// Returns `true` if the transition started; the caller then schedules
    /// the flip deadline. Requests while transitioning or at the front
    /// cover are dropped, not queued.
    pub fn request_prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.phase = Phase::Transitioning(Direction::Backward);
        true
    }

    /// Request a flip forward toward the back cover.
    pub fn request_next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.phase = Phase::Transitioning(Direction::Forward);
        true
    }

    /// Mid-animation content swap: move one spread in the transition
    /// direction. Ignored in `Idle` so a stale timer can never move the
    /// book.
    pub fn advance(&mut self) {
        match self.phase {
            Phase::Transitioning(Direction::Forward) => {
                self.current_spread = (self.current_spread + 1).min(self.max_spread);
            }
            Phase::Transitioning(Direction::Backward) => {
                self.current_spread = self.current_spread.saturating_sub(1);
            }
            Phase::Idle => {}
        }
    }

    /// End of the settle delay: navigation input goes live again
    pub fn settle(&mut self) {
        self.phase = Phase::Idle;
    }
}
