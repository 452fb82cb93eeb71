#![forbid(unsafe_code)]

//! Virtualized carousel: a fixed window of slots over an arbitrary data list.
//!
//! [`Carousel`] couples a [`ScrollPhysics`] engine to a [`VisibleWindow`].
//! The physics owns a continuous position over the data-index axis; the
//! carousel listens to its position notifications and decides, per
//! notification, whether slots only need to be re-placed or whether their
//! content must be rebound.
//!
//! # Content refresh
//!
//! Each notification computes `new_center = round(position)`. The
//! notification is *high speed* when an animated jump is in flight or the
//! notified velocity exceeds `window.velocity_threshold`.
//!
//! - High speed and the center moved: content is marked dirty, nothing is
//!   rebound.
//! - Otherwise, if the center moved or content is dirty: the center is
//!   updated and every slot is rebound (one *reload*).
//!
//! Placement runs on every notification: slots interpolate between their
//! rest transforms by the fractional part `position - new_center`.
//!
//! # Invariants
//!
//! 1. The window always has `2 * radius + 1` slots; slot `i` shows data index
//!    `center_index + i - radius` after a reload, or is hidden.
//! 2. Physics is never ticked while an animated jump runs.
//! 3. The position-change handler never touches physics; it is a separate
//!    field borrowed disjointly from the engine.
//! 4. With fewer than `window.min_scrollable_len` records the carousel is
//!    display-only: drags and ticks are ignored, jumps are immediate.
//!
//! # Failure Modes
//!
//! - Out-of-range `scroll_to_index`: clamped to `[0, len - 1]`.
//! - Out-of-range `update_record`: ignored.
//! - Empty data list: every slot hidden; jumps and updates are no-ops.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use reel_core::animation::{Tween, TweenStep};
use reel_core::physics::{NoopListener, PositionListener, PositionUpdate, ScrollPhysics};
use reel_core::velocity::VelocitySampler;

use crate::config::{CarouselConfig, ConfigError};
use crate::record::{DataList, Record};
use crate::slot::{Slot, SlotLayout, VisibleWindow};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Per-frame summary of the carousel, for logs and harness output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameSnapshot {
    pub position: f64,
    pub velocity: f64,
    pub center_index: i64,
    pub dirty: bool,
    pub animating_jump: bool,
    pub reload_count: u64,
    /// Record id bound to each slot, `None` for hidden slots.
    pub slot_ids: Vec<Option<i64>>,
}

// ---------------------------------------------------------------------------
// Window state (position listener)
// ---------------------------------------------------------------------------

/// Everything the position handler mutates. Kept apart from the physics
/// engine so `physics.tick(dt, &mut self.view)` borrows disjoint fields.
#[derive(Debug, Clone)]
struct WindowState {
    data: DataList,
    window: VisibleWindow,
    layout: SlotLayout,
    center: i64,
    dirty: bool,
    animating_jump: bool,
    velocity_threshold: f64,
    reloads: u64,
}

impl WindowState {
    fn reload(&mut self) {
        self.window.bind_all(self.center, &self.data);
        self.dirty = false;
        self.reloads += 1;
    }

    fn place(&mut self, position: f64, center: i64) {
        self.window.place(position - center as f64, &self.layout);
    }

    fn is_high_speed(&self, velocity: f64) -> bool {
        self.animating_jump || velocity.abs() > self.velocity_threshold
    }
}

impl PositionListener for WindowState {
    fn position_changed(&mut self, update: PositionUpdate) {
        let new_center = update.position.round() as i64;

        if self.is_high_speed(update.velocity) {
            if new_center != self.center && !self.dirty {
                self.dirty = true;

                #[cfg(feature = "tracing")]
                trace!(
                    center = self.center,
                    pending = new_center,
                    velocity = update.velocity,
                    "content reload deferred"
                );
            }
        } else if new_center != self.center || self.dirty {
            #[cfg(feature = "tracing")]
            debug!(
                from = self.center,
                to = new_center,
                deferred = self.dirty,
                "content reload"
            );

            self.center = new_center;
            self.reload();
        }

        self.place(update.position, new_center);
    }
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// Scrollable, virtualized carousel over a [`DataList`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use reel_widgets::{Carousel, CarouselConfig, DataList, SlotLayout};
///
/// let mut carousel = Carousel::new(CarouselConfig::default(), SlotLayout::default())?;
/// carousel.set_data(DataList::sample(1000));
///
/// carousel.scroll_to_index(3, false);
/// assert_eq!(carousel.center_index(), 3);
/// let bound: Vec<i64> = carousel.slots().iter().map(|s| s.data_index).collect();
/// assert_eq!(bound, vec![0, 1, 2, 3, 4, 5, 6]);
///
/// carousel.scroll_to_index(40, true);
/// while carousel.tick(Duration::from_millis(16)) {}
/// assert_eq!(carousel.center_index(), 40);
/// # Ok::<(), reel_widgets::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    physics: ScrollPhysics,
    sampler: VelocitySampler,
    jump: Tween,
    enabled: bool,
    view: WindowState,
}

impl Carousel {
    /// Build a carousel with an empty data list.
    ///
    /// Fails if the config does not validate or `layout` does not have one
    /// rest transform per slot.
    pub fn new(config: CarouselConfig, layout: SlotLayout) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let expected = config.slot_count();
        if layout.len() != expected {
            return Err(ConfigError::SlotCount {
                expected,
                actual: layout.len(),
            });
        }

        let mut carousel = Self {
            physics: ScrollPhysics::new(config.to_physics_config()),
            sampler: VelocitySampler::new(config.input.velocity_samples),
            jump: Tween::new(),
            enabled: false,
            view: WindowState {
                data: DataList::new(),
                window: VisibleWindow::new(config.window.radius),
                layout,
                center: 0,
                dirty: false,
                animating_jump: false,
                velocity_threshold: config.window.velocity_threshold,
                reloads: 0,
            },
            config,
        };
        carousel.view.reload();
        carousel.view.place(0.0, 0);
        Ok(carousel)
    }

    // -----------------------------------------------------------------------
    // Data boundary
    // -----------------------------------------------------------------------

    /// Replace the data list and recenter without animation.
    ///
    /// Lists shorter than `window.min_scrollable_len` disable interaction and
    /// center on their middle record.
    pub fn set_data(&mut self, data: impl Into<DataList>) {
        self.cancel_jump();
        self.physics.halt();
        self.sampler.clear();

        self.view.data = data.into();
        let len = self.view.data.len();
        self.enabled = len >= self.config.window.min_scrollable_len;
        let max = self.view.data.last_index().unwrap_or(0);
        self.physics.set_bounds(0.0, max as f64);

        #[cfg(feature = "tracing")]
        debug!(len, enabled = self.enabled, "data replaced");

        let start = if !self.enabled && len > 0 {
            (len as i64 - 1) / 2
        } else {
            0
        };
        if len == 0 {
            self.jump_immediate(0);
        } else {
            self.scroll_to_index(start, false);
        }
    }

    /// Replace the record at `index`, rebinding its slot if visible.
    ///
    /// Out-of-range indices are ignored. Returns whether a record changed.
    pub fn update_record(&mut self, index: i64, record: Record) -> bool {
        if self.view.data.replace(index, record).is_none() {
            return false;
        }
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        let rebound = self
            .view
            .window
            .rebind(self.view.center, index, &self.view.data);

        #[cfg(feature = "tracing")]
        debug!(index, slot = ?rebound, "record updated");

        true
    }

    // -----------------------------------------------------------------------
    // Drag pipeline
    // -----------------------------------------------------------------------

    /// Pointer down. Cancels any animated jump.
    pub fn on_begin_drag(&mut self) {
        if !self.enabled {
            return;
        }
        if self.cancel_jump() {
            // Catch up on content deferred by the interrupted jump.
            let position = self.physics.position();
            self.view.position_changed(PositionUpdate {
                position,
                velocity: 0.0,
            });
        }
        self.sampler.clear();
        self.physics.begin_drag();

        #[cfg(feature = "tracing")]
        debug!(position = self.physics.position(), "drag started");
    }

    /// One frame of drag: `raw_delta` pointer units over `dt`.
    ///
    /// Moving content toward the start of the axis (negative delta)
    /// advances the position.
    pub fn on_drag(&mut self, raw_delta: f64, dt: Duration) {
        if !self.enabled || !self.physics.is_dragging() {
            return;
        }
        let delta = -raw_delta / self.config.input.pixel_per_unit;
        self.physics.drag(delta, &mut self.view);
        self.sampler.record(delta, dt);
    }

    /// Pointer up: release with the mean sampled speed.
    pub fn on_end_drag(&mut self) {
        if !self.enabled || !self.physics.is_dragging() {
            return;
        }
        let velocity = self
            .sampler
            .release_velocity(self.config.input.max_fling_velocity);
        self.sampler.clear();
        self.physics.end_drag(velocity);
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Advance one frame. Returns `true` while anything is still moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.enabled {
            return false;
        }
        match self.jump.step(dt) {
            Some(TweenStep::Moved(value)) => {
                self.physics.set_position(value, &mut self.view);
                true
            }
            Some(TweenStep::Finished(value)) => {
                self.view.animating_jump = false;
                self.physics.set_position(value, &mut NoopListener);
                self.view.position_changed(PositionUpdate {
                    position: value,
                    velocity: 0.0,
                });

                #[cfg(feature = "tracing")]
                debug!(index = value, center = self.view.center, "jump complete");

                !self.physics.is_at_rest()
            }
            None => self.physics.tick(dt, &mut self.view),
        }
    }

    // -----------------------------------------------------------------------
    // Jumps
    // -----------------------------------------------------------------------

    /// Move to `index`, clamped into the list.
    ///
    /// Immediate jumps rebind and place in this call. Animated jumps tween
    /// the position with an ease-out curve over `window.jump_duration_secs`;
    /// content reloads are deferred for the whole flight when the implied
    /// speed exceeds `window.velocity_threshold`. A disabled carousel always
    /// jumps immediately. No-op on an empty list.
    pub fn scroll_to_index(&mut self, index: i64, animated: bool) {
        let Some(last) = self.view.data.last_index() else {
            return;
        };
        let index = index.clamp(0, last);

        self.cancel_jump();
        self.physics.halt();
        self.sampler.clear();

        if !animated || !self.enabled {
            self.jump_immediate(index);
            return;
        }

        let from = self.physics.position();
        let to = index as f64;
        let duration = self.config.jump_duration();
        let implied_speed = (to - from).abs() / duration.as_secs_f64();
        self.view.animating_jump = implied_speed > self.config.window.velocity_threshold;
        self.jump.start_ease_out(from, to, duration);

        #[cfg(feature = "tracing")]
        debug!(
            from,
            to,
            implied_speed,
            deferred = self.view.animating_jump,
            "jump started"
        );
    }

    /// Select the record with `record.id`, jumping to it animated.
    ///
    /// Returns the index jumped to, or `None` when the id is unknown or
    /// already centered.
    pub fn on_record_clicked(&mut self, record: &Record) -> Option<i64> {
        let index = self.view.data.position_of_id(record.id)?;
        if index == self.view.center {
            return None;
        }
        self.scroll_to_index(index, true);
        Some(index)
    }

    /// Click on slot `slot`. Hidden slots ignore clicks.
    pub fn on_slot_clicked(&mut self, slot: usize) -> Option<i64> {
        let record = self.view.window.slot(slot)?.record.clone()?;
        self.on_record_clicked(&record)
    }

    fn jump_immediate(&mut self, index: i64) {
        self.view.center = index;
        self.view.dirty = false;
        self.view.animating_jump = false;
        self.physics.set_position(index as f64, &mut self.view);
        self.view.reload();
        self.view.place(self.physics.position(), index);
    }

    /// Cancel an in-flight animated jump. Returns whether one was running.
    fn cancel_jump(&mut self) -> bool {
        let cancelled = self.jump.cancel();
        self.view.animating_jump = false;

        #[cfg(feature = "tracing")]
        if let Some(at) = cancelled {
            debug!(at, "jump cancelled");
        }

        cancelled.is_some()
    }

    // -----------------------------------------------------------------------
    // Render boundary
    // -----------------------------------------------------------------------

    /// Slots, first to last.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        self.view.window.slots()
    }

    /// Data index bound to the center slot.
    #[inline]
    #[must_use]
    pub fn center_index(&self) -> i64 {
        self.view.center
    }

    /// Continuous scroll position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.physics.position()
    }

    /// Physics velocity (index units / s).
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.physics.velocity()
    }

    /// Whether a content reload is pending.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.view.dirty
    }

    /// Whether a fast animated jump is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating_jump(&self) -> bool {
        self.view.animating_jump
    }

    /// Target of the running jump tween, if any.
    #[must_use]
    pub fn jump_target(&self) -> Option<f64> {
        self.jump.target()
    }

    /// Whether the list is long enough to scroll.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.physics.is_dragging()
    }

    /// The data list.
    #[must_use]
    pub fn data(&self) -> &DataList {
        &self.view.data
    }

    /// Number of full content reloads so far.
    #[inline]
    #[must_use]
    pub fn reload_count(&self) -> u64 {
        self.view.reloads
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Rest layout of the slots.
    #[must_use]
    pub fn layout(&self) -> &SlotLayout {
        &self.view.layout
    }

    /// Summary of the current frame.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            position: self.physics.position(),
            velocity: self.physics.velocity(),
            center_index: self.view.center,
            dirty: self.view.dirty,
            animating_jump: self.view.animating_jump,
            reload_count: self.view.reloads,
            slot_ids: self
                .slots()
                .iter()
                .map(|s| s.record.as_ref().map(|r| r.id))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
