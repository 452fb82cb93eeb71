#![forbid(unsafe_code)]

//! Geometric primitives for slot placement.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D vector in render-layer units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Both components zero.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Both components one.
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same value on both axes.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v)
    }

    /// Component-wise linear interpolation; `t` is clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Placement of one slot: anchored position, size, and scale.
///
/// Anchors are relative to the carousel's center, matching a centered
/// anchor/pivot in the render layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotTransform {
    /// Anchored position of the slot's center.
    pub anchor: Vec2,
    /// Size of the slot.
    pub size: Vec2,
    /// Scale applied on top of `size`.
    pub scale: Vec2,
}

impl Default for SlotTransform {
    fn default() -> Self {
        Self {
            anchor: Vec2::ZERO,
            size: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl SlotTransform {
    /// Create a transform.
    #[inline]
    pub const fn new(anchor: Vec2, size: Vec2, scale: Vec2) -> Self {
        Self {
            anchor,
            size,
            scale,
        }
    }

    /// Interpolate every component toward `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            anchor: self.anchor.lerp(other.anchor, t),
            size: self.size.lerp(other.size, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}
