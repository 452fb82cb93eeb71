//! Property-based invariant tests for Carousel.
//!
//! 1. After any gesture sequence settles, the window matches the position
//! 2. Immediate jumps clamp any index into the list
//! 3. Record updates rebind at most one slot and never reload
//! 4. Short lists never move

use std::time::Duration;

use proptest::prelude::*;
use reel_widgets::{Carousel, CarouselConfig, DataList, Record, SlotLayout};

const MS_16: Duration = Duration::from_millis(16);

fn carousel(len: usize) -> Carousel {
    let mut c = Carousel::new(CarouselConfig::default(), SlotLayout::default()).unwrap();
    c.set_data(DataList::sample(len));
    c
}

fn settle(c: &mut Carousel) {
    for _ in 0..5_000 {
        if !c.tick(MS_16) {
            return;
        }
    }
}

#[derive(Debug, Clone)]
enum Gesture {
    Swipe { px: f64, frames: usize },
    Ticks(usize),
    Jump { index: i64, animated: bool },
    Click(usize),
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (-400.0f64..400.0, 1usize..12).prop_map(|(px, frames)| Gesture::Swipe { px, frames }),
        (0usize..40).prop_map(Gesture::Ticks),
        (-50i64..1_100, any::<bool>()).prop_map(|(index, animated)| Gesture::Jump { index, animated }),
        (0usize..7).prop_map(Gesture::Click),
    ]
}

fn apply(c: &mut Carousel, g: &Gesture) {
    match *g {
        Gesture::Swipe { px, frames } => {
            c.on_begin_drag();
            for _ in 0..frames {
                c.on_drag(px, MS_16);
            }
            c.on_end_drag();
        }
        Gesture::Ticks(n) => {
            for _ in 0..n {
                c.tick(MS_16);
            }
        }
        Gesture::Jump { index, animated } => c.scroll_to_index(index, animated),
        Gesture::Click(slot) => {
            c.on_slot_clicked(slot);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Settled window consistency
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn settled_window_matches_position(
        len in 6usize..300,
        gestures in prop::collection::vec(gesture(), 1..12),
    ) {
        let mut c = carousel(len);
        for g in &gestures {
            apply(&mut c, g);
        }
        settle(&mut c);

        let last = len as i64 - 1;
        prop_assert_eq!(c.position(), c.position().round());
        prop_assert!(c.position() >= 0.0 && c.position() <= last as f64);
        prop_assert_eq!(c.center_index(), c.position() as i64);
        prop_assert!(!c.is_dirty());
        prop_assert!(!c.is_animating_jump());
        for (i, slot) in c.slots().iter().enumerate() {
            let index = c.center_index() + i as i64 - 3;
            prop_assert_eq!(slot.data_index, index);
            prop_assert_eq!(slot.is_visible(), (0..=last).contains(&index));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Jump clamping
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn immediate_jump_clamps(len in 1usize..500, index in any::<i64>()) {
        let mut c = carousel(len);
        c.scroll_to_index(index, false);
        let expected = index.clamp(0, len as i64 - 1);
        prop_assert_eq!(c.center_index(), expected);
        prop_assert_eq!(c.position(), expected as f64);
        prop_assert!(c.slots()[3].is_visible());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Single-slot rebinds
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn update_rebinds_at_most_one_slot(
        center in 0i64..100,
        index in -10i64..110,
    ) {
        let mut c = carousel(100);
        c.scroll_to_index(center, false);
        let before: Vec<u64> = c.slots().iter().map(|s| s.generation).collect();
        let reloads = c.reload_count();

        let changed = c.update_record(index, Record::new(index, "edited"));
        prop_assert_eq!(changed, (0..100).contains(&index));

        let bumped = c
            .slots()
            .iter()
            .zip(&before)
            .filter(|(s, g)| s.generation != **g)
            .count();
        let in_window = changed && (index - center).abs() <= 3;
        prop_assert_eq!(bumped, usize::from(in_window));
        prop_assert_eq!(c.reload_count(), reloads);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Display-only lists
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn short_lists_stay_centered(
        len in 1usize..6,
        gestures in prop::collection::vec(gesture(), 1..8),
    ) {
        let mut c = carousel(len);
        let center = (len as i64 - 1) / 2;
        for g in &gestures {
            if matches!(g, Gesture::Jump { .. } | Gesture::Click(_)) {
                continue;
            }
            apply(&mut c, g);
        }
        prop_assert!(!c.is_enabled());
        prop_assert_eq!(c.center_index(), center);
        prop_assert_eq!(c.position(), center as f64);
    }
}
