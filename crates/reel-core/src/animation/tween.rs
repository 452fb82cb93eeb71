#![forbid(unsafe_code)]

//! Scalar tween: drive a value from `from` to `to` over a fixed duration.
//!
//! A [`Tween`] is an explicit state machine owned by whoever animates with
//! it. It is advanced by [`Tween::step`] from the owner's frame clock and
//! cancelled by [`Tween::cancel`]; nothing else can reach it.
//!
//! # States
//!
//! ```text
//!   Idle ──start──▶ Running ──step (elapsed ≥ duration)──▶ Completed
//!                      │
//!                      └──cancel──▶ Cancelled
//! ```
//!
//! `start` is legal from every state and restarts the tween.
//!
//! # Invariants
//!
//! 1. `current()` is `from` at elapsed 0 and exactly `to` on completion.
//! 2. `step` yields [`TweenStep::Finished`] exactly once per run.
//! 3. Cancelling keeps the last interpolated value; it never jumps to `to`.
//! 4. `step` on a non-running tween returns `None` and changes nothing.
//!
//! # Failure Modes
//!
//! - Zero duration: clamped to 1ns, so the first step completes.

use std::fmt;
use std::time::Duration;

use super::{EasingFn, ease_out_cubic};

/// Lifecycle of a [`Tween`].
#[derive(Clone, Copy)]
pub enum TweenState {
    /// Never started.
    Idle,
    /// Interpolating.
    Running {
        from: f64,
        to: f64,
        elapsed: Duration,
        duration: Duration,
        easing: EasingFn,
    },
    /// Stopped early at `at`.
    Cancelled { at: f64 },
    /// Reached the target.
    Completed { at: f64 },
}

impl fmt::Debug for TweenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Running {
                from,
                to,
                elapsed,
                duration,
                ..
            } => f
                .debug_struct("Running")
                .field("from", from)
                .field("to", to)
                .field("elapsed", elapsed)
                .field("duration", duration)
                .finish_non_exhaustive(),
            Self::Cancelled { at } => f.debug_struct("Cancelled").field("at", at).finish(),
            Self::Completed { at } => f.debug_struct("Completed").field("at", at).finish(),
        }
    }
}

/// Outcome of advancing a running tween by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenStep {
    /// Still running; the interpolated value for this frame.
    Moved(f64),
    /// Finished this frame; the final value (equal to the target).
    Finished(f64),
}

impl TweenStep {
    /// The value carried by the step.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Moved(v) | Self::Finished(v) => v,
        }
    }
}

/// Owned scalar interpolation.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use reel_core::animation::{Tween, TweenStep, ease_out_cubic};
///
/// let mut tween = Tween::new();
/// tween.start(0.0, 10.0, Duration::from_secs(1), ease_out_cubic);
/// let step = tween.step(Duration::from_millis(500));
/// assert_eq!(step, Some(TweenStep::Moved(8.75)));
/// let last = tween.step(Duration::from_millis(500));
/// assert_eq!(last, Some(TweenStep::Finished(10.0)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    state: TweenState,
}

impl Default for Tween {
    fn default() -> Self {
        Self::new()
    }
}

impl Tween {
    /// Create an idle tween.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TweenState::Idle,
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> TweenState {
        self.state
    }

    /// Whether the tween is interpolating.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, TweenState::Running { .. })
    }

    /// Target of the running tween.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        match self.state {
            TweenState::Running { to, .. } => Some(to),
            _ => None,
        }
    }

    /// Interpolated value, or the value the tween stopped at.
    #[must_use]
    pub fn current(&self) -> Option<f64> {
        match self.state {
            TweenState::Idle => None,
            TweenState::Running {
                from,
                to,
                elapsed,
                duration,
                easing,
            } => {
                let t = elapsed.as_secs_f64() / duration.as_secs_f64();
                Some(from + (to - from) * easing(t))
            }
            TweenState::Cancelled { at } | TweenState::Completed { at } => Some(at),
        }
    }

    /// Start (or restart) a run from `from` to `to`.
    pub fn start(&mut self, from: f64, to: f64, duration: Duration, easing: EasingFn) {
        self.state = TweenState::Running {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: duration.max(Duration::from_nanos(1)),
            easing,
        };
    }

    /// Start a run with the default ease-out cubic curve.
    pub fn start_ease_out(&mut self, from: f64, to: f64, duration: Duration) {
        self.start(from, to, duration, ease_out_cubic);
    }

    /// Stop a running tween where it is. Returns the value it stopped at,
    /// or `None` if nothing was running.
    pub fn cancel(&mut self) -> Option<f64> {
        if !self.is_running() {
            return None;
        }
        let at = self.current()?;
        self.state = TweenState::Cancelled { at };
        Some(at)
    }

    /// Advance a running tween by `dt`.
    pub fn step(&mut self, dt: Duration) -> Option<TweenStep> {
        let TweenState::Running {
            from,
            to,
            elapsed,
            duration,
            easing,
        } = self.state
        else {
            return None;
        };

        let elapsed = elapsed.saturating_add(dt);
        if elapsed >= duration {
            self.state = TweenState::Completed { at: to };
            return Some(TweenStep::Finished(to));
        }

        self.state = TweenState::Running {
            from,
            to,
            elapsed,
            duration,
            easing,
        };
        self.current().map(TweenStep::Moved)
    }
}
