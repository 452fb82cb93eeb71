#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! Animations are plain owned values advanced by the caller's frame clock.
//! There is no global registry: whoever owns an animation steps it, and
//! cancelling it is a method call on the value.
//!
//! - [`EasingFn`] curves map normalized time to normalized progress;
//!   [`ease_out_cubic`] is the one animated jumps use.
//! - [`Tween`]: a scalar interpolation from one value to another over a fixed
//!   duration, with explicit idle/running/cancelled/completed states.

pub mod tween;

pub use tween::{Tween, TweenState, TweenStep};

/// Maps normalized time `t ∈ [0, 1]` to normalized progress.
pub type EasingFn = fn(f64) -> f64;

/// Cubic deceleration. Used for animated jumps.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
