//! # Grid Sizing Info
//!
//! Resolved track lists for both axes plus prefix-sum offsets, answering
//! geometry queries without re-walking the tracks.
//!
//! ## Overview
//!
//! Offsets are computed once at construction: `offsets[i]` is the distance
//! from the content origin to the start of track `i`, and the final entry
//! is the total content size of the axis. An area's extent is then an
//! offset difference, and a pixel rect follows from the two axes plus the
//! writing direction.

use gridkit_core::{Axis, Direction, GridArea, Rect, Size};

use crate::track_sizing::GridTrack;

/// Resolved sizes and offsets for a laid-out grid.
#[derive(Debug, Clone)]
pub struct GridSizingInfo {
    columns: Vec<GridTrack>,
    rows: Vec<GridTrack>,
    column_offsets: Vec<f32>,
    row_offsets: Vec<f32>,
}

impl GridSizingInfo {
    /// Capture resolved tracks and precompute their offsets.
    pub fn new(columns: Vec<GridTrack>, rows: Vec<GridTrack>) -> Self {
        let column_offsets = prefix_offsets(&columns);
        let row_offsets = prefix_offsets(&rows);
        Self {
            columns,
            rows,
            column_offsets,
            row_offsets,
        }
    }

    pub fn tracks(&self, axis: Axis) -> &[GridTrack] {
        match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        }
    }

    pub fn track_count(&self, axis: Axis) -> usize {
        self.tracks(axis).len()
    }

    /// Offsets for one axis; `len` is one more than the track count and
    /// the final entry is the axis's content size.
    pub fn offsets(&self, axis: Axis) -> &[f32] {
        match axis {
            Axis::Horizontal => &self.column_offsets,
            Axis::Vertical => &self.row_offsets,
        }
    }

    /// Distance from the content origin to the start of track `index`.
    pub fn track_offset(&self, axis: Axis, index: usize) -> f32 {
        self.offsets(axis)[index]
    }

    /// Extent of an area along one axis, as an offset difference.
    pub fn span_size(&self, axis: Axis, area: &GridArea) -> f32 {
        let offsets = self.offsets(axis);
        offsets[area.end(axis)] - offsets[area.start(axis)]
    }

    /// Top-left corner of an area in left-to-right coordinates.
    pub fn area_origin(&self, area: &GridArea) -> (f32, f32) {
        (
            self.column_offsets[area.column_start],
            self.row_offsets[area.row_start],
        )
    }

    /// Pixel rect of an area. Under `Direction::Rtl` the horizontal
    /// coordinate is mirrored across the content width; track order and
    /// sizes are unaffected.
    pub fn area_rect(&self, area: &GridArea, direction: Direction) -> Rect {
        let (x, y) = self.area_origin(area);
        let width = self.span_size(Axis::Horizontal, area);
        let height = self.span_size(Axis::Vertical, area);
        let x = match direction {
            Direction::Ltr => x,
            Direction::Rtl => self.content_size().width - x - width,
        };
        Rect::new(x, y, width, height)
    }

    /// Sum of base sizes along one axis; the content's minimum extent.
    pub fn min_total(&self, axis: Axis) -> f32 {
        self.tracks(axis).iter().map(|track| track.base_size).sum()
    }

    /// Sum of growth limits along one axis; the content's preferred extent.
    pub fn max_total(&self, axis: Axis) -> f32 {
        self.tracks(axis)
            .iter()
            .map(|track| track.growth_limit)
            .sum()
    }

    /// Total resolved size of the grid content.
    pub fn content_size(&self) -> Size {
        Size::new(
            *self.column_offsets.last().unwrap_or(&0.0),
            *self.row_offsets.last().unwrap_or(&0.0),
        )
    }
}

fn prefix_offsets(tracks: &[GridTrack]) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(tracks.len() + 1);
    let mut position = 0.0;
    offsets.push(position);
    for track in tracks {
        position += track.base_size;
        offsets.push(position);
    }
    offsets
}

// ==================== Tests ====================
