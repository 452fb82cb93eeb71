#![forbid(unsafe_code)]

//! Core: scroll physics, fling sampling, and tween animation.
//!
//! # Role in Reel
//! `reel-core` is the motion layer. It owns a single continuous scroll
//! position over a data-index axis and knows nothing about the records
//! behind those indices. The carousel controller (`reel-widgets`) drives it
//! with drag input and reacts to its position notifications.
//!
//! # Primary responsibilities
//! - **ScrollPhysics**: drag, inertial coast, boundary rejection, and
//!   snap-to-index, advanced once per frame.
//! - **PositionListener**: synchronous position-changed notification seam.
//! - **VelocitySampler**: bounded drag-speed history for release velocity.
//! - **Animation**: easing curves and the owned [`Tween`](animation::Tween)
//!   used for animated jumps.
//!
//! # How it fits in the system
//! Everything here is single-threaded and frame-driven: the owner calls
//! `tick` once per frame and input handlers between frames. No clocks are
//! read internally; every method takes the frame's elapsed `Duration`.

pub mod animation;
pub mod logging;
pub mod physics;
pub mod velocity;

pub use physics::{
    NoopListener, PhysicsConfig, PositionListener, PositionUpdate, ScrollPhysics,
};
pub use velocity::VelocitySampler;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
