//! Sizing scenario tests
//!
//! These tests verify end-to-end track resolution:
//! - Flexible tracks split leftover space by factor
//! - Intrinsic tracks follow item measurement, including across axes
//! - Overflow keeps minimums instead of erroring
//! - Direction only mirrors pixel offsets
//! - Identical inputs give bit-identical geometry

use crate::support::{assert_near, assert_rect, FlowItem, TestItem};
use gridkit_core::{
    Axis, AxisConstraint, Direction, GridConstraints, GridSpec, ItemPlacement, Rect, TrackSize,
};
use gridkit_layout::{compute_layout, GridItem};

#[test]
fn test_equal_flex_columns_share_space_evenly() {
    let spec = GridSpec::new(vec![TrackSize::flex(1.0); 3], vec![TrackSize::px(40.0)]);
    let layout = compute_layout(&spec, &[], GridConstraints::tight(300.0, 40.0)).unwrap();
    for index in 0..3 {
        assert_near(layout.info.tracks(Axis::Horizontal)[index].base_size, 100.0);
    }
}

#[test]
fn test_mixed_flex_factors_allocate_proportionally() {
    let spec = GridSpec::new(
        vec![TrackSize::flex(1.0), TrackSize::flex(2.0), TrackSize::flex(3.0)],
        vec![TrackSize::px(40.0)],
    );
    let layout = compute_layout(&spec, &[], GridConstraints::tight(120.0, 40.0)).unwrap();
    let columns = layout.info.tracks(Axis::Horizontal);
    assert_near(columns[0].base_size, 20.0);
    assert_near(columns[1].base_size, 40.0);
    assert_near(columns[2].base_size, 60.0);
    assert_near(layout.content_size.width, 120.0);
}

#[test]
fn test_intrinsic_column_takes_largest_item_minimum() {
    let spec = GridSpec::new(vec![TrackSize::Content], vec![TrackSize::Content]);
    let a = TestItem::fixed(5.0, 10.0);
    let b = TestItem::fixed(8.0, 10.0);
    let c = TestItem::fixed(3.0, 10.0);
    let items = [GridItem::auto(&a), GridItem::auto(&b), GridItem::auto(&c)];

    let layout = compute_layout(&spec, &items, GridConstraints::UNBOUNDED).unwrap();
    assert_near(layout.content_size.width, 8.0);
    // Each item stacks into its own content-sized row.
    assert_near(layout.content_size.height, 30.0);
}

#[test]
fn test_row_height_follows_resolved_column_width() {
    // 1200 square pixels of content reflowed into a 200px column: the
    // row must measure against the sized column, not the natural width.
    let spec = GridSpec::new(vec![TrackSize::px(200.0)], vec![TrackSize::Content]);
    let paragraph = FlowItem::new(1200.0, 300.0);
    let items = [GridItem::auto(&paragraph)];

    let constraints = GridConstraints::new(
        AxisConstraint::tight(200.0),
        AxisConstraint::UNBOUNDED,
    );
    let layout = compute_layout(&spec, &items, constraints).unwrap();
    assert_rect(layout.item_rects[0], Rect::new(0.0, 0.0, 200.0, 6.0));
}

#[test]
fn test_overflow_keeps_minimums() {
    let spec = GridSpec::new(
        vec![TrackSize::px(60.0), TrackSize::px(70.0)],
        vec![TrackSize::px(40.0)],
    );
    let layout = compute_layout(&spec, &[], GridConstraints::tight(100.0, 40.0)).unwrap();
    // 130px of track against 100px of space: the grid overflows, the
    // host clips or scrolls.
    assert_near(layout.content_size.width, 130.0);
}

#[test]
fn test_rtl_mirrors_item_offsets() {
    let spec = GridSpec::new(
        vec![TrackSize::px(30.0), TrackSize::px(70.0)],
        vec![TrackSize::px(40.0)],
    )
    .with_direction(Direction::Rtl);
    let a = TestItem::square(10.0);
    let b = TestItem::square(10.0);
    let items = [GridItem::auto(&a), GridItem::auto(&b)];

    let layout = compute_layout(&spec, &items, GridConstraints::UNBOUNDED).unwrap();
    // Logical column order is unchanged; only x coordinates flip.
    assert_rect(layout.item_rects[0], Rect::new(70.0, 0.0, 30.0, 40.0));
    assert_rect(layout.item_rects[1], Rect::new(0.0, 0.0, 70.0, 40.0));
}

#[test]
fn test_shrinkable_content_grows_up_to_its_limit() {
    let spec = GridSpec::new(
        vec![TrackSize::Content, TrackSize::Content],
        vec![TrackSize::px(40.0)],
    );
    let narrow = TestItem::shrinkable(10.0, 20.0, 10.0);
    let wide = TestItem::shrinkable(10.0, 80.0, 10.0);
    let items = [
        GridItem::new(&narrow, ItemPlacement::at(0, 0)),
        GridItem::new(&wide, ItemPlacement::at(1, 0)),
    ];

    let layout = compute_layout(&spec, &items, GridConstraints::tight(200.0, 40.0)).unwrap();
    let columns = layout.info.tracks(Axis::Horizontal);
    assert_near(columns[0].base_size, 20.0);
    assert_near(columns[1].base_size, 80.0);
}

#[test]
fn test_mixed_template_end_to_end() {
    // One of each sizing rule across a 400px axis: the fixed and
    // fractional columns resolve first, content commits its measurement,
    // and flex absorbs the rest.
    let spec = GridSpec::new(
        vec![
            TrackSize::px(100.0),
            TrackSize::fraction(0.25),
            TrackSize::Content,
            TrackSize::flex(1.0),
        ],
        vec![TrackSize::px(50.0)],
    );
    let a = TestItem::square(10.0);
    let b = TestItem::square(10.0);
    let c = TestItem::fixed(60.0, 20.0);
    let d = TestItem::square(10.0);
    let items = [
        GridItem::auto(&a),
        GridItem::auto(&b),
        GridItem::auto(&c),
        GridItem::auto(&d),
    ];

    let layout = compute_layout(&spec, &items, GridConstraints::tight(400.0, 50.0)).unwrap();
    assert_rect(layout.item_rects[0], Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_rect(layout.item_rects[1], Rect::new(100.0, 0.0, 100.0, 50.0));
    assert_rect(layout.item_rects[2], Rect::new(200.0, 0.0, 60.0, 50.0));
    assert_rect(layout.item_rects[3], Rect::new(260.0, 0.0, 140.0, 50.0));
    assert_near(layout.content_size.width, 400.0);
}

#[test]
fn test_layout_is_deterministic_bit_for_bit() {
    let spec = GridSpec::new(
        vec![TrackSize::Content, TrackSize::flex(1.0), TrackSize::fraction(0.2)],
        vec![TrackSize::Content],
    );
    let a = TestItem::shrinkable(12.5, 77.25, 33.3);
    let b = TestItem::square(19.75);
    let items = [GridItem::auto(&a), GridItem::auto(&b)];
    let constraints = GridConstraints::tight(500.0, 120.0);

    let first = compute_layout(&spec, &items, constraints).unwrap();
    let second = compute_layout(&spec, &items, constraints).unwrap();

    for (lhs, rhs) in first.item_rects.iter().zip(second.item_rects.iter()) {
        assert_eq!(lhs.x.to_bits(), rhs.x.to_bits());
        assert_eq!(lhs.y.to_bits(), rhs.y.to_bits());
        assert_eq!(lhs.width.to_bits(), rhs.width.to_bits());
        assert_eq!(lhs.height.to_bits(), rhs.height.to_bits());
    }
    assert_eq!(
        first.content_size.width.to_bits(),
        second.content_size.width.to_bits()
    );
}
