#![forbid(unsafe_code)]

//! The visible window: a fixed ring of slots over the data list.
//!
//! A window of radius `r` has `2r + 1` slots. Slot `i` is bound to data
//! index `center + (i - r)`. Slots whose index falls outside the list are
//! hidden. Content binding ([`VisibleWindow::bind_all`],
//! [`VisibleWindow::rebind`]) and placement ([`VisibleWindow::place`]) are
//! separate so the controller can move slots every frame while deferring
//! the more expensive content refresh.

use crate::geometry::{SlotTransform, Vec2};
use crate::record::{DataList, Record};

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Rest transforms of every slot, supplied by the render layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    rest: Vec<SlotTransform>,
}

impl SlotLayout {
    /// Wrap explicit rest transforms, ordered from first to last slot.
    #[must_use]
    pub fn new(rest: Vec<SlotTransform>) -> Self {
        Self { rest }
    }

    /// Symmetric horizontal layout: slots `spacing` apart along x, the center
    /// slot at full `size`, and each step outward scaled down by `falloff`.
    #[must_use]
    pub fn linear(radius: usize, spacing: f64, size: Vec2, falloff: f64) -> Self {
        let count = radius * 2 + 1;
        let rest = (0..count)
            .map(|i| {
                let offset = i as f64 - radius as f64;
                let scale = falloff.powi(offset.abs() as i32);
                SlotTransform::new(Vec2::new(offset * spacing, 0.0), size, Vec2::splat(scale))
            })
            .collect();
        Self { rest }
    }

    /// Number of slots described.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len()
    }

    /// Whether the layout is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Rest transform of slot `i`.
    #[must_use]
    pub fn rest(&self, i: usize) -> Option<&SlotTransform> {
        self.rest.get(i)
    }

    /// Placement of slot `i` for a signed fractional offset in (-1, 1).
    ///
    /// Negative fractions slide toward the next slot, positive toward the
    /// previous one; neighbors are clamped at both ends.
    #[must_use]
    pub fn interpolate(&self, i: usize, fraction: f64) -> SlotTransform {
        let Some(own) = self.rest.get(i) else {
            return SlotTransform::default();
        };
        let last = self.rest.len() - 1;
        let (neighbor, t) = if fraction < 0.0 {
            ((i + 1).min(last), -fraction)
        } else {
            (i.saturating_sub(1), fraction)
        };
        own.lerp(&self.rest[neighbor], t)
    }
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self::linear(3, 120.0, Vec2::new(100.0, 140.0), 0.85)
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// One recycled view in the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Data index this slot is bound to (may be out of range).
    pub data_index: i64,
    /// Bound record; `None` when the slot is hidden.
    pub record: Option<Record>,
    /// Current placement.
    pub transform: SlotTransform,
    /// Increments every time content is (re)bound.
    pub generation: u64,
}

impl Slot {
    fn new(data_index: i64) -> Self {
        Self {
            data_index,
            record: None,
            transform: SlotTransform::default(),
            generation: 0,
        }
    }

    /// Whether the slot shows a record.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.record.is_some()
    }

    fn bind(&mut self, data_index: i64, data: &DataList) {
        self.data_index = data_index;
        self.record = data.get(data_index).cloned();
        self.generation += 1;
    }
}

/// Fixed-size ring of slots around a center index.
#[derive(Debug, Clone)]
pub struct VisibleWindow {
    radius: usize,
    slots: Vec<Slot>,
}

impl VisibleWindow {
    /// Window with `2 * radius + 1` hidden slots.
    #[must_use]
    pub fn new(radius: usize) -> Self {
        let slots = (0..radius * 2 + 1)
            .map(|i| Slot::new(i as i64 - radius as i64))
            .collect();
        Self { radius, slots }
    }

    /// Slots on each side of the center.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a window has at least one slot.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots, first to last.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot `i`.
    #[must_use]
    pub fn slot(&self, i: usize) -> Option<&Slot> {
        self.slots.get(i)
    }

    /// Data index slot `i` maps to for `center`.
    #[inline]
    #[must_use]
    pub fn index_for(&self, center: i64, i: usize) -> i64 {
        center + i as i64 - self.radius as i64
    }

    /// Slot showing data index `index` for `center`, if any.
    #[must_use]
    pub fn slot_for_index(&self, center: i64, index: i64) -> Option<usize> {
        let i = index - center + self.radius as i64;
        (0..self.slots.len() as i64).contains(&i).then_some(i as usize)
    }

    /// Rebind every slot's content around `center`.
    pub fn bind_all(&mut self, center: i64, data: &DataList) {
        for i in 0..self.slots.len() {
            let index = self.index_for(center, i);
            self.slots[i].bind(index, data);
        }
    }

    /// Rebind only the slot showing `index`. Returns the slot rebound.
    pub fn rebind(&mut self, center: i64, index: i64, data: &DataList) -> Option<usize> {
        let i = self.slot_for_index(center, index)?;
        self.slots[i].bind(index, data);
        Some(i)
    }

    /// Move every slot for a fractional offset from its rest layout.
    pub fn place(&mut self, fraction: f64, layout: &SlotLayout) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.transform = layout.interpolate(i, fraction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SlotLayout {
        SlotLayout::linear(3, 100.0, Vec2::splat(50.0), 0.5)
    }

    #[test]
    fn linear_layout_is_symmetric() {
        let l = layout();
        assert_eq!(l.len(), 7);
        assert_eq!(l.rest(3).unwrap().anchor.x, 0.0);
        assert_eq!(l.rest(0).unwrap().anchor.x, -300.0);
        assert_eq!(l.rest(6).unwrap().anchor.x, 300.0);
        assert_eq!(l.rest(1).unwrap().scale, l.rest(5).unwrap().scale);
        assert_eq!(l.rest(3).unwrap().scale, Vec2::ONE);
        assert_eq!(l.rest(4).unwrap().scale, Vec2::splat(0.5));
    }

    #[test]
    fn interpolate_at_zero_is_rest() {
        let l = layout();
        for i in 0..7 {
            assert_eq!(l.interpolate(i, 0.0), *l.rest(i).unwrap());
        }
    }

    #[test]
    fn negative_fraction_slides_toward_next() {
        let l = layout();
        let t = l.interpolate(3, -0.5);
        assert_eq!(t.anchor.x, 50.0);
        // Last slot clamps onto itself.
        assert_eq!(l.interpolate(6, -0.5), *l.rest(6).unwrap());
    }

    #[test]
    fn positive_fraction_slides_toward_previous() {
        let l = layout();
        let t = l.interpolate(3, 0.25);
        assert_eq!(t.anchor.x, -25.0);
        assert_eq!(l.interpolate(0, 0.5), *l.rest(0).unwrap());
    }

    #[test]
    fn interpolate_out_of_range_slot_is_default() {
        assert_eq!(layout().interpolate(9, 0.0), SlotTransform::default());
    }

    #[test]
    fn window_maps_slots_around_center() {
        let w = VisibleWindow::new(3);
        assert_eq!(w.len(), 7);
        assert_eq!(w.index_for(10, 0), 7);
        assert_eq!(w.index_for(10, 6), 13);
        assert_eq!(w.slot_for_index(10, 13), Some(6));
        assert_eq!(w.slot_for_index(10, 14), None);
        assert_eq!(w.slot_for_index(10, 6), None);
    }

    #[test]
    fn bind_all_hides_out_of_range() {
        let data = DataList::sample(4);
        let mut w = VisibleWindow::new(3);
        w.bind_all(0, &data);
        let visible: Vec<bool> = w.slots().iter().map(Slot::is_visible).collect();
        assert_eq!(visible, vec![false, false, false, true, true, true, true]);
        assert_eq!(w.slot(3).unwrap().record.as_ref().unwrap().id, 0);
    }

    #[test]
    fn rebind_touches_one_slot() {
        let data = DataList::sample(10);
        let mut w = VisibleWindow::new(3);
        w.bind_all(5, &data);
        let before: Vec<u64> = w.slots().iter().map(|s| s.generation).collect();
        assert_eq!(w.rebind(5, 4, &data), Some(2));
        let after: Vec<u64> = w.slots().iter().map(|s| s.generation).collect();
        for i in 0..7 {
            let expected = if i == 2 { before[i] + 1 } else { before[i] };
            assert_eq!(after[i], expected);
        }
        assert_eq!(w.rebind(5, 9, &data), None);
    }

    #[test]
    fn place_applies_layout() {
        let l = layout();
        let mut w = VisibleWindow::new(3);
        w.place(-0.5, &l);
        assert_eq!(w.slot(3).unwrap().transform.anchor.x, 50.0);
    }
}
