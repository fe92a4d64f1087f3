use glam::Vec2;
use imstack_core::{LayoutError, LayoutOptions, Orientation, Rect};
use imstack_layout::{LayoutConfig, StackLayout, DUMMY_RECT};

const HEADER: i32 = 1;
const BODY: i32 = 2;
const ROW: i32 = 3;
const LABEL: i32 = 4;
const FIELD: i32 = 5;

/// A small form: a fixed-height header, and a body row with a label and a
/// field that takes the rest of the width.
fn declare_form(layout: &mut StackLayout) -> Vec<Rect> {
    let mut answers = Vec::new();
    layout.begin();
    answers.push(
        layout
            .get_rect(HEADER, Vec2::new(80.0, 12.0), Some(&LayoutOptions::new().height(50.0)), Some("header"))
            .unwrap(),
    );
    layout
        .begin_layout_group(
            BODY,
            Orientation::Vertical,
            Some(&LayoutOptions::new().expand_width().expand_height()),
            None,
        )
        .unwrap();
    answers.push(layout.current_group_rect());
    layout
        .begin_layout_group(ROW, Orientation::Horizontal, Some(&LayoutOptions::new().expand_width()), None)
        .unwrap();
    answers.push(layout.get_rect(LABEL, Vec2::new(40.0, 16.0), None, Some("label")).unwrap());
    answers.push(
        layout
            .get_rect(FIELD, Vec2::new(0.0, 20.0), Some(&LayoutOptions::new().expand_width()), Some("field"))
            .unwrap(),
    );
    layout.end_layout_group().unwrap();
    layout.end_layout_group().unwrap();
    layout.layout().unwrap();
    answers
}

fn engine() -> StackLayout {
    StackLayout::new(0, Vec2::new(100.0, 200.0))
}

#[test]
fn test_first_frame_answers_dummy_then_real_rect() {
    let mut layout = engine();
    let first = layout.get_rect(HEADER, Vec2::ZERO, Some(&LayoutOptions::new().height(50.0)), None).unwrap();
    assert_eq!(first, DUMMY_RECT);
    assert_eq!(first.width, 1.0);
    assert_eq!(first.height, 1.0);
    layout.layout().unwrap();

    let second = layout.get_rect(HEADER, Vec2::ZERO, Some(&LayoutOptions::new().height(50.0)), None).unwrap();
    assert_eq!(second, Rect::new(0.0, 0.0, 0.0, 50.0));
}

#[test]
fn test_fixed_and_stretched_siblings() {
    let mut layout = engine();
    for _ in 0..2 {
        layout.get_rect(1, Vec2::ZERO, Some(&LayoutOptions::new().height(50.0)), None).unwrap();
        layout.get_rect(2, Vec2::ZERO, Some(&LayoutOptions::new().expand_height()), None).unwrap();
        layout.layout().unwrap();
    }
    assert_eq!(layout.find_rect(&[1]).map(|r| (r.y, r.height)), Some((0.0, 50.0)));
    assert_eq!(layout.find_rect(&[2]).map(|r| (r.y, r.height)), Some((50.0, 150.0)));
}

#[test]
fn test_form_resolves_on_second_frame() {
    let mut layout = engine();
    let first = declare_form(&mut layout);
    assert!(first.iter().all(|rect| *rect == DUMMY_RECT));

    let second = declare_form(&mut layout);
    assert_eq!(second[0], Rect::new(0.0, 0.0, 80.0, 50.0));
    assert_eq!(second[1], Rect::new(0.0, 50.0, 100.0, 150.0));
    assert_eq!(second[2], Rect::new(0.0, 50.0, 40.0, 16.0));
    assert_eq!(second[3], Rect::new(40.0, 50.0, 60.0, 20.0));
}

#[test]
fn test_answers_are_stable_across_frames() {
    let mut layout = engine();
    declare_form(&mut layout);
    let settled = declare_form(&mut layout);
    for _ in 0..5 {
        assert_eq!(declare_form(&mut layout), settled);
    }
    assert_eq!(layout.frame(), 7);
}

#[test]
fn test_pools_stop_allocating_once_warm() {
    let mut layout = engine();
    declare_form(&mut layout);
    declare_form(&mut layout);
    let warm = layout.pool_stats();
    assert_eq!(warm.entries.allocated, 6);
    assert_eq!(warm.groups.allocated, 4);

    for _ in 0..10 {
        declare_form(&mut layout);
        let stats = layout.pool_stats();
        assert_eq!(stats.entries.allocated, warm.entries.allocated);
        assert_eq!(stats.groups.allocated, warm.groups.allocated);
    }
    assert!(layout.pool_stats().entries.reused >= 30);
}

#[test]
fn test_unbalanced_group_leaves_read_tree_intact() {
    let mut layout = engine();
    declare_form(&mut layout);
    declare_form(&mut layout);
    let before = layout.snapshot();

    layout.begin();
    layout.begin_layout_group(BODY, Orientation::Vertical, None, None).unwrap();
    let err = layout.layout().unwrap_err();
    assert!(err.is_usage_error());
    assert_eq!(layout.snapshot(), before);

    let err = layout.get_rect(HEADER, Vec2::ZERO, None, None).unwrap_err();
    assert!(matches!(err, LayoutError::Poisoned(_)));
    assert_eq!(err.root_cause(), &LayoutError::UnbalancedGroups { open: 1 });

    layout.reset();
    let answers = declare_form(&mut layout);
    assert_eq!(answers[0], Rect::new(0.0, 0.0, 80.0, 50.0));
}

#[test]
fn test_end_without_begin_is_reported() {
    let mut layout = engine();
    assert_eq!(layout.end_layout_group(), Err(LayoutError::StackUnderflow));
    layout.reset();
    assert!(!layout.is_poisoned());
    declare_form(&mut layout);
}

#[test]
fn test_root_resize_reaches_answers_one_frame_later() {
    let mut layout = engine();
    declare_form(&mut layout);
    declare_form(&mut layout);

    layout.set_root_size(Vec2::new(300.0, 400.0));
    let lagging = declare_form(&mut layout);
    assert_eq!(lagging[1].size(), Vec2::new(100.0, 150.0));

    let resized = declare_form(&mut layout);
    assert_eq!(resized[1], Rect::new(0.0, 50.0, 300.0, 350.0));
    assert_eq!(resized[3].width, 260.0);
    assert_eq!(layout.read_root().rect().size(), Vec2::new(300.0, 400.0));
}

#[test]
fn test_horizontal_root_from_config() {
    let config = LayoutConfig::new()
        .with_root_id(99)
        .with_root_orientation(Orientation::Horizontal)
        .with_root_size(Vec2::new(90.0, 30.0))
        .with_pool_capacity(8, 8);
    let mut layout = StackLayout::with_config(config);
    for _ in 0..2 {
        layout.get_rect(1, Vec2::ZERO, Some(&LayoutOptions::new().horizontal_stretch(1)), None).unwrap();
        layout.get_rect(2, Vec2::ZERO, Some(&LayoutOptions::new().horizontal_stretch(2)), None).unwrap();
        layout.layout().unwrap();
    }
    assert_eq!(layout.read_root().id(), 99);
    assert_eq!(layout.find_rect(&[1]), Some(Rect::new(0.0, 0.0, 30.0, 0.0)));
    assert_eq!(layout.find_rect(&[2]), Some(Rect::new(30.0, 0.0, 60.0, 0.0)));
}
