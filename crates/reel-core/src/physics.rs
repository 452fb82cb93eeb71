#![forbid(unsafe_code)]

//! Continuous scroll position with drag, inertia, boundary rejection, and
//! snap-to-index convergence.
//!
//! [`ScrollPhysics`] owns a single scalar position measured in data-index
//! units. Integer positions correspond exactly to a centered record. The
//! engine knows nothing about the data behind those indices; it only moves
//! the position and reports every meaningful change to a
//! [`PositionListener`].
//!
//! # Frame model
//!
//! The owner calls [`ScrollPhysics::tick`] once per frame. Input handlers
//! ([`begin_drag`](ScrollPhysics::begin_drag), [`drag`](ScrollPhysics::drag),
//! [`end_drag`](ScrollPhysics::end_drag)) run to completion between ticks.
//! Outside of a drag, each tick applies exactly one of three rules, in
//! priority order:
//!
//! 1. **Boundary correction**: an out-of-bounds position eases back toward
//!    the nearest bound and lands on it exactly once within
//!    [`SETTLE_TOLERANCE`]. Velocity is discarded.
//! 2. **Inertial coast**: `position += velocity * dt`, then
//!    `velocity *= damping`. Damping is applied per tick, so coast distance
//!    depends on frame rate.
//! 3. **Snap**: velocity is zeroed and the position eases toward the nearest
//!    integer, landing on it once it is at or within [`SETTLE_TOLERANCE`].
//!
//! # Invariants
//!
//! 1. While dragging, the position moves by exactly the sum of drag deltas.
//! 2. `begin_drag()` always zeroes velocity.
//! 3. An out-of-bounds position never moves further out after a drag ends.
//! 4. Easing uses a factor clamped to `[0, 1]`, so corrections never
//!    overshoot their target.
//! 5. A listener is notified synchronously for every write that moves the
//!    position by more than [`POSITION_EPSILON`]; smaller writes still land
//!    but stay silent.
//!
//! # Failure Modes
//!
//! - Non-positive `dt`: easing factor is 0 and coast distance is 0; the tick
//!   is effectively a no-op apart from velocity decay.
//! - Out-of-range construction parameters are clamped (see
//!   [`PhysicsConfig::sanitized`]).

use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// Position changes at or below this magnitude do not notify listeners.
pub const POSITION_EPSILON: f64 = 1e-4;

/// Distance below which boundary correction and snapping land exactly.
pub const SETTLE_TOLERANCE: f64 = 0.01;

/// Speed (index units per second) below which inertia hands over to snapping.
const COAST_STOP_VELOCITY: f64 = 0.01;

/// Damping is kept strictly inside (0, 1).
const MIN_DAMPING: f64 = 1e-6;
const MAX_DAMPING: f64 = 1.0 - 1e-6;

/// Minimum snap speed to prevent a correction that never converges.
const MIN_SNAP_SPEED: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for [`ScrollPhysics`]. Fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Per-tick velocity retention during inertial coast, in (0, 1).
    /// Practical range 0.85–0.99.
    pub damping: f64,
    /// Rate of the exponential ease used for boundary correction and
    /// snapping. The per-tick factor is `snap_speed * dt`, clamped to 1.
    pub snap_speed: f64,
    /// Release velocities below this magnitude are discarded (dead zone).
    pub min_fling_velocity: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            damping: 0.95,
            snap_speed: 10.0,
            min_fling_velocity: 1.0,
        }
    }
}

impl PhysicsConfig {
    /// Clamp every parameter into its legal range.
    ///
    /// Non-finite values fall back to the defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        Self {
            damping: finite_or(self.damping, defaults.damping).clamp(MIN_DAMPING, MAX_DAMPING),
            snap_speed: finite_or(self.snap_speed, defaults.snap_speed).max(MIN_SNAP_SPEED),
            min_fling_velocity: finite_or(self.min_fling_velocity, defaults.min_fling_velocity)
                .max(0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Notification seam
// ---------------------------------------------------------------------------

/// Payload delivered to a [`PositionListener`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    /// Position after the write.
    pub position: f64,
    /// Engine velocity at the moment of the write.
    pub velocity: f64,
}

/// Receives position-changed notifications from [`ScrollPhysics`].
///
/// Listeners are passed into each mutating call rather than stored, so a
/// listener can never call back into the engine that is notifying it.
pub trait PositionListener {
    /// Called synchronously after the position moved by more than
    /// [`POSITION_EPSILON`].
    fn position_changed(&mut self, update: PositionUpdate);
}

impl<F: FnMut(PositionUpdate)> PositionListener for F {
    fn position_changed(&mut self, update: PositionUpdate) {
        self(update);
    }
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl PositionListener for NoopListener {
    fn position_changed(&mut self, _update: PositionUpdate) {}
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Single-axis scroll engine over a continuous index coordinate.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use reel_core::physics::{NoopListener, PhysicsConfig, ScrollPhysics};
///
/// let mut physics = ScrollPhysics::new(PhysicsConfig::default());
/// physics.set_bounds(0.0, 9.0);
/// physics.begin_drag();
/// physics.drag(2.4, &mut NoopListener);
/// physics.end_drag(0.0);
///
/// for _ in 0..120 {
///     physics.tick(Duration::from_millis(16), &mut NoopListener);
/// }
/// assert_eq!(physics.position(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScrollPhysics {
    config: PhysicsConfig,
    position: f64,
    velocity: f64,
    dragging: bool,
    min: f64,
    max: f64,
}

impl ScrollPhysics {
    /// Create an engine at position 0 with bounds `[0, 0]`.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config: config.sanitized(),
            position: 0.0,
            velocity: 0.0,
            dragging: false,
            min: 0.0,
            max: 0.0,
        }
    }

    /// Create an engine with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PhysicsConfig::default())
    }

    /// Effective (sanitized) configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Current position in index units.
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity in index units per second.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current `(min, max)` bounds.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Whether the position lies outside the bounds.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        self.position < self.min || self.position > self.max
    }

    /// Whether the engine has settled: not dragging, no velocity, exactly on
    /// an integer inside the bounds.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        !self.dragging
            && self.velocity == 0.0
            && !self.is_out_of_bounds()
            && self.position == self.position.round()
    }

    /// Set the bounds. The current position is left untouched; an
    /// out-of-bounds position is corrected by subsequent ticks.
    pub fn set_bounds(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    /// Start a drag. Any fling velocity is discarded.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.velocity = 0.0;
    }

    /// Move the position by `delta` index units. Ignored unless dragging.
    pub fn drag(&mut self, delta: f64, listener: &mut impl PositionListener) {
        if !self.dragging {
            return;
        }
        self.write(self.position + delta, listener);
    }

    /// Finish a drag, carrying `fling_velocity` into inertial coast.
    ///
    /// Velocities inside the dead zone (`|v| < min_fling_velocity`) are
    /// zeroed so a noisy release does not drift.
    pub fn end_drag(&mut self, fling_velocity: f64) {
        self.dragging = false;
        self.velocity = if fling_velocity.abs() < self.config.min_fling_velocity {
            0.0
        } else {
            fling_velocity
        };

        #[cfg(feature = "tracing")]
        debug!(
            position = self.position,
            requested = fling_velocity,
            velocity = self.velocity,
            "drag released"
        );
    }

    /// Stop all motion: end any drag and zero velocity. Position is kept.
    pub fn halt(&mut self) {
        self.dragging = false;
        self.velocity = 0.0;
    }

    /// Write the position directly (driven animations, immediate jumps).
    pub fn set_position(&mut self, position: f64, listener: &mut impl PositionListener) {
        self.write(position, listener);
    }

    /// Advance one frame. Returns `true` while the engine is still moving.
    pub fn tick(&mut self, dt: Duration, listener: &mut impl PositionListener) -> bool {
        if self.dragging {
            return true;
        }

        let dt = dt.as_secs_f64();

        if self.is_out_of_bounds() {
            self.velocity = 0.0;
            let target = if self.position < self.min {
                self.min
            } else {
                self.max
            };

            #[cfg(feature = "tracing")]
            trace!(position = self.position, target, "boundary correction");

            self.ease_to_bound(target, dt, listener);
        } else if self.velocity.abs() > COAST_STOP_VELOCITY {
            // Listeners observe the velocity that produced this step.
            self.write(self.position + self.velocity * dt, listener);
            self.velocity *= self.config.damping;
        } else {
            self.velocity = 0.0;
            let target = self.position.round();
            if self.position != target {
                self.ease_to_index(target, dt, listener);

                #[cfg(feature = "tracing")]
                if self.position == target {
                    debug!(index = target, "snapped to index");
                }
            }
        }

        !self.is_at_rest()
    }

    /// Ease toward a bound, then land on it once within tolerance.
    fn ease_to_bound(&mut self, bound: f64, dt: f64, listener: &mut impl PositionListener) {
        let next = lerp(self.position, bound, self.ease_factor(dt));
        self.write(next, listener);
        if (self.position - bound).abs() < SETTLE_TOLERANCE {
            self.write(bound, listener);
        }
    }

    /// Ease toward an integer index; at or inside tolerance, land on it.
    fn ease_to_index(&mut self, target: f64, dt: f64, listener: &mut impl PositionListener) {
        if (self.position - target).abs() > SETTLE_TOLERANCE {
            let next = lerp(self.position, target, self.ease_factor(dt));
            self.write(next, listener);
        } else {
            self.write(target, listener);
        }
    }

    #[inline]
    fn ease_factor(&self, dt: f64) -> f64 {
        (self.config.snap_speed * dt).clamp(0.0, 1.0)
    }

    fn write(&mut self, value: f64, listener: &mut impl PositionListener) {
        let moved = (value - self.position).abs() > POSITION_EPSILON;
        self.position = value;
        if moved {
            listener.position_changed(PositionUpdate {
                position: self.position,
                velocity: self.velocity,
            });
        }
    }
}

impl Default for ScrollPhysics {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Linear interpolation with the factor clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    from + (to - from) * t
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
