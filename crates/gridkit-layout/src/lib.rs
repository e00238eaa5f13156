//! # GridKit Layout
//!
//! Grid layout engine for the GridKit toolkit.
//! Implements auto-placement and track sizing as a pure computation.
//!
//! ## Design Goals
//!
//! 1. **Auto-placement**: Cursor-driven placement with sparse and dense packing
//! 2. **Track sizing**: Four-phase base size and growth limit resolution
//! 3. **Flexible tracks**: Leftover space split proportionally to flex factors
//! 4. **Content measurement**: Sizes come from host callbacks, never from rendering
//! 5. **Determinism**: Identical inputs produce bit-identical output

pub mod placement;
pub mod sizing_info;
pub mod track_sizing;

pub use placement::{place_items, OccupancyGrid, Placement};
pub use sizing_info::GridSizingInfo;
pub use track_sizing::{build_tracks, size_tracks, GridTrack, PlacedItem};

use gridkit_core::{
    Axis, GridArea, GridConstraints, GridError, GridSpec, ItemMeasure, ItemPlacement, Rect, Size,
};
use tracing::debug;

/// An item submitted for layout: its measurement capability plus the
/// placement the host requested for it.
#[derive(Clone, Copy)]
pub struct GridItem<'a> {
    pub measure: &'a dyn ItemMeasure,
    pub placement: ItemPlacement,
}

impl<'a> GridItem<'a> {
    pub fn new(measure: &'a dyn ItemMeasure, placement: ItemPlacement) -> Self {
        Self { measure, placement }
    }

    /// An item with no explicit placement on either axis.
    pub fn auto(measure: &'a dyn ItemMeasure) -> Self {
        Self::new(measure, ItemPlacement::auto())
    }
}

/// The result of a layout pass.
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Resolved area per item, in input order.
    pub areas: Vec<GridArea>,
    /// Pixel rect per item, in input order.
    pub item_rects: Vec<Rect>,
    /// Resolved tracks and offsets for further geometry queries.
    pub info: GridSizingInfo,
    /// Total size of the grid content.
    pub content_size: Size,
}

/// Lay out `items` in the grid described by `spec` under `constraints`.
///
/// Placement runs first and fixes every item's area; column tracks are
/// then sized against the width constraint, and row tracks against the
/// height constraint with the resolved column sizes feeding item
/// measurement. Fails fast on invalid input without placing anything.
///
/// # Example
///
/// ```
/// use gridkit_core::{Axis, GridConstraints, GridSpec, ItemMeasure, TrackSize};
/// use gridkit_layout::{compute_layout, GridItem};
///
/// struct Label(f32);
///
/// impl ItemMeasure for Label {
///     fn min_content_size(&self, _axis: Axis, _cross_size: f32) -> f32 {
///         self.0
///     }
///     fn max_content_size(&self, _axis: Axis, _cross_size: f32) -> f32 {
///         self.0
///     }
/// }
///
/// let spec = GridSpec::new(
///     vec![TrackSize::px(100.0), TrackSize::flex(1.0)],
///     vec![TrackSize::px(40.0)],
/// );
/// let sidebar = Label(80.0);
/// let body = Label(50.0);
/// let items = [GridItem::auto(&sidebar), GridItem::auto(&body)];
///
/// let layout = compute_layout(&spec, &items, GridConstraints::tight(400.0, 40.0))?;
/// assert_eq!(layout.item_rects[0].width, 100.0);
/// assert_eq!(layout.item_rects[1].width, 300.0);
/// # Ok::<(), gridkit_core::GridError>(())
/// ```
pub fn compute_layout(
    spec: &GridSpec,
    items: &[GridItem<'_>],
    constraints: GridConstraints,
) -> Result<GridLayout, GridError> {
    constraints.validate()?;

    let placements: Vec<ItemPlacement> = items.iter().map(|item| item.placement).collect();
    let placement = place_items(spec, &placements)?;

    let placed: Vec<PlacedItem<'_>> = items
        .iter()
        .zip(placement.areas.iter())
        .map(|(item, &area)| PlacedItem {
            measure: item.measure,
            area,
        })
        .collect();

    let mut columns = build_tracks(
        spec.template(Axis::Horizontal),
        spec.auto_track(Axis::Horizontal),
        placement.column_count,
    );
    size_tracks(&mut columns, Axis::Horizontal, constraints.width, &placed, None);

    let mut rows = build_tracks(
        spec.template(Axis::Vertical),
        spec.auto_track(Axis::Vertical),
        placement.row_count,
    );
    size_tracks(
        &mut rows,
        Axis::Vertical,
        constraints.height,
        &placed,
        Some(&columns),
    );

    let info = GridSizingInfo::new(columns, rows);
    let item_rects: Vec<Rect> = placement
        .areas
        .iter()
        .map(|area| info.area_rect(area, spec.direction))
        .collect();
    let content_size = info.content_size();

    debug!(
        items = items.len(),
        columns = info.track_count(Axis::Horizontal),
        rows = info.track_count(Axis::Vertical),
        width = content_size.width,
        height = content_size.height,
        "grid layout complete"
    );

    Ok(GridLayout {
        areas: placement.areas,
        item_rects,
        info,
        content_size,
    })
}
