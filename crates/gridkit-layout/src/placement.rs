//! # Grid Item Placement
//!
//! Resolves every item to a definite [`GridArea`] before any sizing runs.
//!
//! ## Overview
//!
//! Items are processed in three passes:
//! - items explicit on both axes are committed verbatim,
//! - items explicit on one axis scan the free axis for the first gap that
//!   fits their span,
//! - fully-auto items walk a cursor across the grid in flow order.
//!
//! The grid grows implicit tracks on demand, both when an explicit
//! placement lands beyond the template and when the flow axis runs out of
//! room. Occupancy is tracked per cell and discarded once placement
//! finishes; overlap between explicitly placed items is allowed.

use gridkit_core::{AutoFlow, GridArea, GridError, GridSpec, ItemPlacement};
use tracing::{debug, trace};

// ==================== Occupancy ====================

/// Cell occupancy map, row-major, grown on demand.
///
/// Cells outside the stored extent are free; [`OccupancyGrid::mark`] grows
/// storage to cover the marked area.
#[derive(Debug, Default)]
pub struct OccupancyGrid {
    cells: Vec<Vec<bool>>,
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Number of rows with any recorded occupancy.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether every cell in the given rectangle is free.
    pub fn is_free(&self, column: usize, row: usize, column_span: usize, row_span: usize) -> bool {
        (0..row_span).all(|dr| {
            (0..column_span).all(|dc| {
                let r = row + dr;
                let c = column + dc;
                r >= self.cells.len() || c >= self.cells[r].len() || !self.cells[r][c]
            })
        })
    }

    /// Mark every cell of `area` as occupied.
    pub fn mark(&mut self, area: &GridArea) {
        while self.cells.len() < area.row_end {
            self.cells.push(Vec::new());
        }
        for row in area.row_start..area.row_end {
            let cells = &mut self.cells[row];
            if cells.len() < area.column_end {
                cells.resize(area.column_end, false);
            }
            for cell in &mut cells[area.column_start..area.column_end] {
                *cell = true;
            }
        }
    }
}

// ==================== Placement Result ====================

/// Fully resolved placement for an item set.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// One resolved area per item, in input order.
    pub areas: Vec<GridArea>,
    /// Total column count: explicit template plus implicit tracks.
    pub column_count: usize,
    /// Total row count: explicit template plus implicit tracks.
    pub row_count: usize,
}

// ==================== Placement Engine ====================

struct PlacementEngine {
    columns: usize,
    rows: usize,
    flow: AutoFlow,
    /// Cursor for fully-auto items: (column, row).
    cursor: (usize, usize),
    /// Scan start for explicit-column items walking down rows.
    row_scan: usize,
    /// Scan start for explicit-row items walking across columns.
    column_scan: usize,
    occupancy: OccupancyGrid,
}

impl PlacementEngine {
    fn new(spec: &GridSpec) -> Self {
        Self {
            columns: spec.columns.len().max(1),
            rows: spec.rows.len().max(1),
            flow: spec.flow,
            cursor: (0, 0),
            row_scan: 0,
            column_scan: 0,
            occupancy: OccupancyGrid::new(),
        }
    }

    /// Grow the grid extent to cover at least the given line counts.
    fn grow_to(&mut self, columns: usize, rows: usize) {
        if columns > self.columns {
            self.columns = columns;
        }
        if rows > self.rows {
            self.rows = rows;
        }
    }

    /// First free cell for a fully-auto item, starting at the cursor and
    /// walking in flow order. The cross extent of the flow axis is fixed;
    /// the flow axis extends past the occupied region, so the walk always
    /// terminates.
    fn find_next_cell(&self, column_span: usize, row_span: usize) -> (usize, usize) {
        let (mut column, mut row) = self.cursor;

        if self.flow.is_row() {
            loop {
                if column + column_span <= self.columns
                    && self.occupancy.is_free(column, row, column_span, row_span)
                {
                    return (column, row);
                }
                column += 1;
                if column + column_span > self.columns {
                    column = 0;
                    row += 1;
                }
            }
        } else {
            loop {
                if row + row_span <= self.rows
                    && self.occupancy.is_free(column, row, column_span, row_span)
                {
                    return (column, row);
                }
                row += 1;
                if row + row_span > self.rows {
                    row = 0;
                    column += 1;
                }
            }
        }
    }

    /// First row at which a fixed column range is free.
    fn find_row_at(&self, column: usize, column_span: usize, row_span: usize, from: usize) -> usize {
        let mut row = from;
        while !self.occupancy.is_free(column, row, column_span, row_span) {
            row += 1;
        }
        row
    }

    /// First column at which a fixed row range is free.
    fn find_column_at(&self, row: usize, column_span: usize, row_span: usize, from: usize) -> usize {
        let mut column = from;
        while !self.occupancy.is_free(column, row, column_span, row_span) {
            column += 1;
        }
        column
    }

    fn commit(&mut self, area: GridArea) {
        self.grow_to(area.column_end, area.row_end);
        self.occupancy.mark(&area);
    }
}

/// Resolve every item to a [`GridArea`].
///
/// Pure: identical inputs give identical output, and nothing is retained
/// between calls. Hosts that track placement invalidation call this once
/// per item-set or placement change and cache the result across sizing
/// passes.
///
/// All configuration is validated before any placement happens; an invalid
/// spec or item yields an error and no partial result.
pub fn place_items(spec: &GridSpec, placements: &[ItemPlacement]) -> Result<Placement, GridError> {
    spec.validate()?;
    for placement in placements {
        placement.validate()?;
    }

    let mut engine = PlacementEngine::new(spec);
    let mut areas: Vec<Option<GridArea>> = vec![None; placements.len()];
    let dense = spec.flow.is_dense();

    debug!(
        items = placements.len(),
        columns = engine.columns,
        rows = engine.rows,
        row_flow = spec.flow.is_row(),
        dense,
        "place_items: starting"
    );

    // 1. Items explicit on both axes, committed verbatim. These may
    //    overlap each other.
    for (index, placement) in placements.iter().enumerate() {
        let (column, row) = match (placement.column_start, placement.row_start) {
            (Some(column), Some(row)) => (column as usize, row as usize),
            _ => continue,
        };
        let area = GridArea::new(
            column,
            column + placement.column_span as usize,
            row,
            row + placement.row_span as usize,
        );
        engine.commit(area);
        areas[index] = Some(area);
        trace!(item = index, ?area, "placed explicit item");
    }

    // 2. Items explicit on one axis scan the free axis for a fitting gap.
    //    Sparse packing scans from the persistent per-axis cursor; dense
    //    packing rescans from the origin for every item.
    for (index, placement) in placements.iter().enumerate() {
        match (placement.column_start, placement.row_start) {
            (Some(column), None) => {
                let column = column as usize;
                let column_span = placement.column_span as usize;
                let row_span = placement.row_span as usize;
                let from = if dense { 0 } else { engine.row_scan };
                let row = engine.find_row_at(column, column_span, row_span, from);
                if !dense {
                    engine.row_scan = row;
                }
                let area = GridArea::new(column, column + column_span, row, row + row_span);
                engine.commit(area);
                areas[index] = Some(area);
                trace!(item = index, ?area, "placed explicit-column item");
            }
            (None, Some(row)) => {
                let row = row as usize;
                let column_span = placement.column_span as usize;
                let row_span = placement.row_span as usize;
                let from = if dense { 0 } else { engine.column_scan };
                let column = engine.find_column_at(row, column_span, row_span, from);
                if !dense {
                    engine.column_scan = column;
                }
                let area = GridArea::new(column, column + column_span, row, row + row_span);
                engine.commit(area);
                areas[index] = Some(area);
                trace!(item = index, ?area, "placed explicit-row item");
            }
            _ => {}
        }
    }

    // 3. Fully-auto items in input order. Sparse: the cursor only ever
    //    advances, so start lines along the flow axis are non-decreasing.
    //    Dense: the cursor rewinds to the origin per item so later items
    //    can backfill holes.
    for (index, placement) in placements.iter().enumerate() {
        if !placement.is_fully_auto() {
            continue;
        }
        let column_span = placement.column_span as usize;
        let row_span = placement.row_span as usize;

        // The flow axis's cross extent must at least fit the span or the
        // cursor could never find room.
        if spec.flow.is_row() {
            engine.columns = engine.columns.max(column_span);
        } else {
            engine.rows = engine.rows.max(row_span);
        }

        if dense {
            engine.cursor = (0, 0);
        }
        let (column, row) = engine.find_next_cell(column_span, row_span);
        let area = GridArea::new(column, column + column_span, row, row + row_span);
        engine.commit(area);
        engine.cursor = if spec.flow.is_row() {
            (column + column_span, row)
        } else {
            (column, row + row_span)
        };
        areas[index] = Some(area);
        trace!(item = index, ?area, "auto-placed item");
    }

    let areas: Vec<GridArea> = areas.into_iter().flatten().collect();
    debug_assert_eq!(areas.len(), placements.len(), "every item gets an area");

    debug!(
        columns = engine.columns,
        rows = engine.rows,
        "place_items: done"
    );

    Ok(Placement {
        areas,
        column_count: engine.columns,
        row_count: engine.rows,
    })
}

// ==================== Tests ====================
