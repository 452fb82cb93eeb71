#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! [`CarouselConfig`] groups every tunable of the carousel into one struct
//! with three sections (`physics`, `input`, `window`). With the `config`
//! feature it can be loaded from TOML or JSON; loaders parse and then run
//! [`CarouselConfig::validate`], so a loaded config is always usable.
//!
//! # Defaults
//!
//! Every field defaults to the tuning the carousel shipped with:
//! damping 0.95, snap speed 10, fling range 1..=20 index units per second,
//! 100 pointer units per index, a seven-slot window, and a one second
//! animated jump.
//!
//! # Example (TOML)
//!
//! ```toml
//! [physics]
//! damping = 0.9
//!
//! [window]
//! velocity_threshold = 8.0
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use reel_core::physics::PhysicsConfig;

// ---------------------------------------------------------------------------
// Top-level CarouselConfig
// ---------------------------------------------------------------------------

/// Complete carousel configuration. Fixed once the carousel is built.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Scroll physics tuning.
    pub physics: PhysicsSection,
    /// Pointer input conversion and release-velocity sampling.
    pub input: InputSection,
    /// Visible window and jump behavior.
    pub window: WindowSection,
}

impl CarouselConfig {
    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk and validate.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Return `self` if valid, otherwise every violation.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let p = &self.physics;
        let i = &self.input;
        let w = &self.window;

        if !(p.damping > 0.0 && p.damping < 1.0) {
            errors.push(format!(
                "physics.damping must be in (0, 1), got {}",
                p.damping
            ));
        }
        if !(p.snap_speed > 0.0 && p.snap_speed.is_finite()) {
            errors.push(format!(
                "physics.snap_speed must be > 0, got {}",
                p.snap_speed
            ));
        }
        if !(p.min_fling_velocity >= 0.0 && p.min_fling_velocity.is_finite()) {
            errors.push(format!(
                "physics.min_fling_velocity must be >= 0, got {}",
                p.min_fling_velocity
            ));
        }

        if !(i.max_fling_velocity >= p.min_fling_velocity && i.max_fling_velocity.is_finite()) {
            errors.push(format!(
                "input.max_fling_velocity must be >= physics.min_fling_velocity ({}), got {}",
                p.min_fling_velocity, i.max_fling_velocity
            ));
        }
        if !(i.pixel_per_unit > 0.0 && i.pixel_per_unit.is_finite()) {
            errors.push(format!(
                "input.pixel_per_unit must be > 0, got {}",
                i.pixel_per_unit
            ));
        }
        if i.velocity_samples == 0 {
            errors.push("input.velocity_samples must be > 0".into());
        }

        if w.radius == 0 {
            errors.push("window.radius must be > 0".into());
        }
        if w.min_scrollable_len == 0 {
            errors.push("window.min_scrollable_len must be > 0".into());
        }
        if !(w.velocity_threshold >= 0.0) {
            errors.push(format!(
                "window.velocity_threshold must be >= 0, got {}",
                w.velocity_threshold
            ));
        }
        if !(w.jump_duration_secs > 0.0 && w.jump_duration_secs.is_finite()) {
            errors.push(format!(
                "window.jump_duration_secs must be > 0, got {}",
                w.jump_duration_secs
            ));
        }

        errors
    }

    /// Number of slots in the visible window (`2 * radius + 1`).
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.window.radius * 2 + 1
    }

    /// Physics parameters as the engine takes them.
    #[must_use]
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig {
            damping: self.physics.damping,
            snap_speed: self.physics.snap_speed,
            min_fling_velocity: self.physics.min_fling_velocity,
        }
    }

    /// Animated jump duration.
    #[must_use]
    pub fn jump_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.window.jump_duration_secs).unwrap_or(Duration::from_secs(1))
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Scroll physics tuning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsSection {
    /// Per-tick velocity retention while coasting, in (0, 1).
    pub damping: f64,
    /// Ease rate for boundary correction and snapping.
    pub snap_speed: f64,
    /// Release velocities below this are dropped (index units / s).
    pub min_fling_velocity: f64,
}

impl Default for PhysicsSection {
    fn default() -> Self {
        let d = PhysicsConfig::default();
        Self {
            damping: d.damping,
            snap_speed: d.snap_speed,
            min_fling_velocity: d.min_fling_velocity,
        }
    }
}

/// Pointer input conversion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputSection {
    /// Release velocity clamp (index units / s).
    pub max_fling_velocity: f64,
    /// Pointer units per data index.
    pub pixel_per_unit: f64,
    /// Drag speed samples kept for the release average.
    pub velocity_samples: usize,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            max_fling_velocity: 20.0,
            pixel_per_unit: 100.0,
            velocity_samples: reel_core::velocity::DEFAULT_SAMPLE_CAPACITY,
        }
    }
}

/// Window size and jump behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowSection {
    /// Slots on each side of the center slot.
    pub radius: usize,
    /// Above this speed (index units / s) content reloads are deferred.
    pub velocity_threshold: f64,
    /// Duration of an animated jump, in seconds.
    pub jump_duration_secs: f64,
    /// Lists shorter than this are display-only and centered.
    pub min_scrollable_len: usize,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            radius: 3,
            velocity_threshold: 5.0,
            jump_duration_secs: 1.0,
            min_scrollable_len: 6,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration or building a carousel.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
    /// The slot layout does not match the window size.
    SlotCount { expected: usize, actual: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
            Self::SlotCount { expected, actual } => {
                write!(f, "slot layout has {actual} slots, window needs {expected}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) | Self::SlotCount { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
