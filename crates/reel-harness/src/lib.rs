#![forbid(unsafe_code)]

//! Headless driver for the Reel carousel.
//!
//! Two entry points share one setup path ([`build_carousel`]):
//! - `console`: line-oriented commands from stdin or a script file.
//! - `simulate`: a deterministic drag and release, printed frame by frame.

pub mod cli;
pub mod console;
pub mod error;
pub mod simulate;

use std::path::Path;
use std::time::Duration;

use reel_widgets::{Carousel, CarouselConfig, DataList, FrameSnapshot, SlotLayout, Vec2};

use crate::error::{HarnessError, Result};

pub use cli::{run, run_from_env};

/// Horizontal distance between slot centers in the generated layout.
pub const SLOT_SPACING: f64 = 120.0;
/// Size of the center slot in the generated layout.
pub const SLOT_SIZE: Vec2 = Vec2::new(100.0, 140.0);
/// Scale applied per step away from the center slot.
pub const SLOT_FALLOFF: f64 = 0.85;

/// Load a config from `path` (`.json` as JSON, anything else as TOML), or
/// the defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<CarouselConfig> {
    let Some(path) = path else {
        return Ok(CarouselConfig::default());
    };
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        CarouselConfig::from_json_file(path)?
    } else {
        CarouselConfig::from_toml_file(path)?
    };
    Ok(config)
}

/// Build a carousel over `records` sample records with a generated layout.
pub fn build_carousel(config: CarouselConfig, records: usize) -> Result<Carousel> {
    let layout = SlotLayout::linear(config.window.radius, SLOT_SPACING, SLOT_SIZE, SLOT_FALLOFF);
    let mut carousel = Carousel::new(config, layout)?;
    carousel.set_data(DataList::sample(records));
    Ok(carousel)
}

/// Frame duration for `fps` frames per second.
pub fn frame_duration(fps: u32) -> Result<Duration> {
    if fps == 0 {
        return Err(HarnessError::invalid("fps must be > 0"));
    }
    Ok(Duration::from_secs(1) / fps)
}

/// One-line human-readable rendering of a snapshot.
#[must_use]
pub fn format_snapshot(snapshot: &FrameSnapshot) -> String {
    let slots: Vec<String> = snapshot
        .slot_ids
        .iter()
        .map(|id| id.map_or_else(|| "-".to_string(), |id| id.to_string()))
        .collect();
    format!(
        "pos={:>9.4} vel={:>8.4} center={} dirty={} jump={} reloads={} slots=[{}]",
        snapshot.position,
        snapshot.velocity,
        snapshot.center_index,
        snapshot.dirty,
        snapshot.animating_jump,
        snapshot.reload_count,
        slots.join(" ")
    )
}
