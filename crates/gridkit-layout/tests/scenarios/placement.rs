//! Placement scenario tests
//!
//! These tests verify that auto-placement:
//! - Respects explicit coordinates and fills around them
//! - Keeps sparse flow-axis ordering monotonic
//! - Backfills holes under dense packing
//! - Fails fast on invalid configuration

use crate::support::{assert_rect, TestItem};
use gridkit_core::{
    AutoFlow, GridArea, GridConstraints, GridError, GridSpec, ItemPlacement, Rect, TrackSize,
};
use gridkit_layout::{compute_layout, GridItem};

/// A 10px single-track grid whose implicit tracks are also 10px.
fn ten_px_grid() -> GridSpec {
    GridSpec::new(vec![TrackSize::px(10.0)], vec![TrackSize::px(10.0)])
        .with_auto_tracks(TrackSize::px(10.0), TrackSize::px(10.0))
}

#[test]
fn test_auto_item_flows_around_explicit_item() {
    let first = TestItem::square(4.0);
    let second = TestItem::square(4.0);
    let items = [
        GridItem::auto(&first),
        GridItem::new(&second, ItemPlacement::at(1, 0)),
    ];

    let layout = compute_layout(&ten_px_grid(), &items, GridConstraints::UNBOUNDED).unwrap();
    assert_rect(layout.item_rects[0], Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_rect(layout.item_rects[1], Rect::new(10.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_explicit_placement_beyond_template_grows_grid() {
    let lone = TestItem::square(4.0);
    let items = [GridItem::new(&lone, ItemPlacement::at(3, 0))];

    let layout = compute_layout(&ten_px_grid(), &items, GridConstraints::UNBOUNDED).unwrap();
    assert_rect(layout.item_rects[0], Rect::new(30.0, 0.0, 10.0, 10.0));
    assert_eq!(layout.content_size.width, 40.0);
}

#[test]
fn test_sparse_flow_axis_is_monotonic() {
    let spec = GridSpec::new(vec![TrackSize::px(10.0); 3], vec![TrackSize::px(10.0)])
        .with_auto_tracks(TrackSize::px(10.0), TrackSize::px(10.0));
    let item = TestItem::square(4.0);
    let items = [
        GridItem::new(&item, ItemPlacement::auto().with_column_span(2)),
        GridItem::new(&item, ItemPlacement::auto()),
        GridItem::new(&item, ItemPlacement::auto().with_column_span(3)),
        GridItem::new(&item, ItemPlacement::auto()),
        GridItem::new(&item, ItemPlacement::auto().with_column_span(2)),
    ];

    let layout = compute_layout(&spec, &items, GridConstraints::UNBOUNDED).unwrap();
    let mut previous = (0, 0);
    for area in &layout.areas {
        let start = (area.row_start, area.column_start);
        assert!(
            start >= previous,
            "sparse placement went backwards: {:?} after {:?}",
            start,
            previous
        );
        previous = start;
    }
}

#[test]
fn test_dense_packing_backfills_hole() {
    // The blocker leaves only column 0 of row 0 free; the span-2 item A
    // must skip to row 1, and dense packing pulls B back into the hole.
    let spec = GridSpec::new(vec![TrackSize::px(10.0); 2], vec![TrackSize::px(10.0)])
        .with_auto_tracks(TrackSize::px(10.0), TrackSize::px(10.0))
        .with_flow(AutoFlow::RowDense);
    let item = TestItem::square(4.0);
    let items = [
        GridItem::new(&item, ItemPlacement::at(1, 0)),
        GridItem::new(&item, ItemPlacement::auto().with_column_span(2)),
        GridItem::new(&item, ItemPlacement::auto()),
    ];

    let layout = compute_layout(&spec, &items, GridConstraints::UNBOUNDED).unwrap();
    let a = layout.areas[1];
    let b = layout.areas[2];
    assert_eq!(a.row_start, 1);
    assert!(
        b.row_start <= a.row_start,
        "dense packing must backfill: B at row {}, A at row {}",
        b.row_start,
        a.row_start
    );
    assert_eq!(b, GridArea::new(0, 1, 0, 1));
}

#[test]
fn test_column_flow_fills_down_first() {
    let spec = GridSpec::new(vec![TrackSize::px(10.0); 2], vec![TrackSize::px(10.0); 2])
        .with_flow(AutoFlow::Column);
    let item = TestItem::square(4.0);
    let items = [
        GridItem::auto(&item),
        GridItem::auto(&item),
        GridItem::auto(&item),
    ];

    let layout = compute_layout(&spec, &items, GridConstraints::UNBOUNDED).unwrap();
    assert_eq!(layout.areas[0], GridArea::new(0, 1, 0, 1));
    assert_eq!(layout.areas[1], GridArea::new(0, 1, 1, 2));
    assert_eq!(layout.areas[2], GridArea::new(1, 2, 0, 1));
}

#[test]
fn test_one_axis_explicit_items_scan_the_free_axis() {
    let spec = GridSpec::new(vec![TrackSize::px(10.0); 2], vec![TrackSize::px(10.0)])
        .with_auto_tracks(TrackSize::px(10.0), TrackSize::px(10.0));
    let item = TestItem::square(4.0);
    let items = [
        GridItem::new(&item, ItemPlacement::in_column(0)),
        GridItem::new(&item, ItemPlacement::in_column(0)),
    ];

    let layout = compute_layout(&spec, &items, GridConstraints::UNBOUNDED).unwrap();
    assert_eq!(layout.areas[0], GridArea::new(0, 1, 0, 1));
    assert_eq!(layout.areas[1], GridArea::new(0, 1, 1, 2));
}

#[test]
fn test_invalid_configuration_fails_fast() {
    let item = TestItem::square(4.0);

    let zero_span = [GridItem::new(
        &item,
        ItemPlacement::auto().with_column_span(0),
    )];
    let result = compute_layout(&ten_px_grid(), &zero_span, GridConstraints::UNBOUNDED);
    assert_eq!(result.err(), Some(GridError::InvalidSpan(0)));

    let negative_start = [GridItem::new(&item, ItemPlacement::at(-1, 0))];
    let result = compute_layout(&ten_px_grid(), &negative_start, GridConstraints::UNBOUNDED);
    assert_eq!(result.err(), Some(GridError::InvalidStart(-1)));

    let bad_template = GridSpec::new(vec![TrackSize::px(-5.0)], vec![TrackSize::px(10.0)]);
    let result = compute_layout(&bad_template, &[], GridConstraints::UNBOUNDED);
    assert!(matches!(result, Err(GridError::InvalidTrackSize(_))));
}
