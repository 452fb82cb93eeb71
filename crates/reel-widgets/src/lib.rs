#![forbid(unsafe_code)]

//! Virtualized carousel widget for Reel.
//!
//! A [`Carousel`] shows a fixed window of `2 * radius + 1` slots over a data
//! list of any length. Slots are recycled: as the scroll position moves,
//! slot content is rebound to new records and slot transforms are
//! interpolated between their rest placements. Motion comes from
//! [`reel_core::ScrollPhysics`].
//!
//! - [`carousel`]: the controller and its per-frame snapshot.
//! - [`slot`]: rest layouts, slots, and the visible window.
//! - [`record`]: records and the index-addressed data list.
//! - [`geometry`]: vectors and slot transforms.
//! - [`config`]: validated configuration, loadable from TOML/JSON with the
//!   `config` feature.

pub mod carousel;
pub mod config;
pub mod geometry;
pub mod record;
pub mod slot;

pub use carousel::{Carousel, FrameSnapshot};
pub use config::{CarouselConfig, ConfigError, InputSection, PhysicsSection, WindowSection};
pub use geometry::{SlotTransform, Vec2};
pub use record::{DataList, Record};
pub use slot::{Slot, SlotLayout, VisibleWindow};
