#![forbid(unsafe_code)]

//! End-to-end carousel scenarios driven the way an input loop would:
//! pointer frames, release, then ticks until rest.

use std::time::Duration;

use reel_widgets::{Carousel, CarouselConfig, DataList, Record, SlotLayout, Vec2};

const MS_16: Duration = Duration::from_millis(16);

fn carousel(config: CarouselConfig, len: usize) -> Carousel {
    let layout = SlotLayout::linear(config.window.radius, 120.0, Vec2::new(100.0, 140.0), 0.85);
    let mut c = Carousel::new(config, layout).expect("valid config");
    c.set_data(DataList::sample(len));
    c
}

fn run_until_rest(c: &mut Carousel) -> usize {
    let mut frames = 0;
    while c.tick(MS_16) {
        frames += 1;
        assert!(frames < 5_000, "carousel never came to rest");
    }
    frames
}

fn assert_window_consistent(c: &Carousel) {
    let radius = c.config().window.radius as i64;
    for (i, slot) in c.slots().iter().enumerate() {
        let expected = c.center_index() + i as i64 - radius;
        assert_eq!(slot.data_index, expected, "slot {i} bound to wrong index");
        assert_eq!(
            slot.record.as_ref(),
            c.data().get(expected),
            "slot {i} shows stale content"
        );
    }
}

#[test]
fn swipe_browse_and_jump_back() {
    let mut c = carousel(CarouselConfig::default(), 1000);

    // Swipe left in ten quick frames.
    c.on_begin_drag();
    for _ in 0..10 {
        c.on_drag(-25.0, MS_16);
    }
    c.on_end_drag();
    assert!(c.velocity() > 0.0);

    run_until_rest(&mut c);
    let landed = c.center_index();
    assert!(landed > 2, "fling should carry past the drag distance");
    assert_eq!(c.position(), landed as f64);
    assert!(!c.is_dirty());
    assert_window_consistent(&c);

    // Tap the leftmost visible record to come back a few entries.
    let target = c.slots()[0].record.clone().expect("slot 0 visible");
    assert_eq!(c.on_record_clicked(&target), Some(landed - 3));
    run_until_rest(&mut c);
    assert_eq!(c.center_index(), landed - 3);
    assert_window_consistent(&c);
}

#[test]
fn long_jump_reloads_once() {
    let mut c = carousel(CarouselConfig::default(), 1000);
    let before = c.reload_count();
    c.scroll_to_index(750, true);
    let frames = run_until_rest(&mut c);
    assert!(frames >= 60, "one second jump at 60fps, got {frames} frames");
    assert_eq!(c.reload_count(), before + 1);
    assert_eq!(c.center_index(), 750);
    assert_window_consistent(&c);
}

#[test]
fn interrupting_a_jump_with_a_drag_keeps_content_fresh() {
    let mut c = carousel(CarouselConfig::default(), 1000);
    c.scroll_to_index(400, true);
    for _ in 0..20 {
        c.tick(MS_16);
    }
    c.on_begin_drag();
    assert_window_consistent(&c);
    c.on_drag(10.0, MS_16);
    c.on_end_drag();
    run_until_rest(&mut c);
    assert_window_consistent(&c);
    assert!(c.center_index() > 0 && c.center_index() < 400);
}

#[test]
fn custom_radius_and_threshold() {
    let mut config = CarouselConfig::default();
    config.window.radius = 2;
    config.window.velocity_threshold = 100.0;
    let mut c = carousel(config, 100);
    assert_eq!(c.slots().len(), 5);

    // A 50-entry jump in one second stays under the threshold, so content
    // follows the tween instead of being deferred.
    c.scroll_to_index(50, true);
    assert!(!c.is_animating_jump());
    let before = c.reload_count();
    run_until_rest(&mut c);
    assert!(c.reload_count() > before + 1, "content should reload in flight");
    assert_eq!(c.center_index(), 50);
    assert_window_consistent(&c);
}

#[test]
fn overscroll_at_end_bounces_back() {
    let mut c = carousel(CarouselConfig::default(), 20);
    c.scroll_to_index(19, false);
    c.on_begin_drag();
    for _ in 0..5 {
        c.on_drag(-60.0, MS_16);
    }
    assert!(c.position() > 19.0);
    c.on_end_drag();
    run_until_rest(&mut c);
    assert_eq!(c.position(), 19.0);
    assert_eq!(c.center_index(), 19);
    assert_window_consistent(&c);
}

#[test]
fn replacing_data_mid_fling() {
    let mut c = carousel(CarouselConfig::default(), 1000);
    c.on_begin_drag();
    c.on_drag(-300.0, MS_16);
    c.on_end_drag();
    c.tick(MS_16);
    c.set_data(DataList::sample(3));
    assert!(!c.is_enabled());
    assert_eq!(c.center_index(), 1);
    assert!(!c.tick(MS_16));
    assert_window_consistent(&c);
}

#[test]
fn updates_are_visible_without_reload() {
    let mut c = carousel(CarouselConfig::default(), 1000);
    c.scroll_to_index(10, false);
    let reloads = c.reload_count();
    for index in 7..=13 {
        assert!(c.update_record(index, Record::new(index, format!("Edited {index}"))));
    }
    assert_eq!(c.reload_count(), reloads);
    assert!(
        c.slots()
            .iter()
            .all(|s| s.record.as_ref().is_some_and(|r| r.display_name.starts_with("Edited")))
    );
}

#[test]
fn snapshot_tracks_motion() {
    let mut c = carousel(CarouselConfig::default(), 1000);
    c.scroll_to_index(300, true);
    c.tick(MS_16);
    let mid = c.snapshot();
    assert!(mid.animating_jump);
    assert!(mid.dirty);
    assert_eq!(mid.center_index, 0);
    run_until_rest(&mut c);
    let end = c.snapshot();
    assert!(!end.animating_jump);
    assert_eq!(end.center_index, 300);
    assert_eq!(end.slot_ids.len(), 7);
    assert_eq!(end.slot_ids[3], Some(300));
}
