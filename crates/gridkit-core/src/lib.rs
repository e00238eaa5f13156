//! # GridKit Core
//!
//! Shared vocabulary for the GridKit two-dimensional layout engine.
//!
//! ## Design Goals
//!
//! 1. **Host decoupling**: items are measured through the [`ItemMeasure`]
//!    trait; no UI-tree types leak into the engine
//! 2. **Closed sizing model**: track sizing rules are a four-variant enum
//!    matched exhaustively, never extended by the host
//! 3. **Eager validation**: configuration errors are caught before any
//!    placement or sizing work starts
//! 4. **Plain geometry**: sizes are `f32` pixels, `f32::INFINITY` means
//!    unbounded

use std::ops::Range;

use thiserror::Error;

/// Errors that can occur while configuring or running a grid layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid span {0}: spans must be at least 1")]
    InvalidSpan(u32),

    #[error("Invalid start line {0}: explicit lines must be non-negative")]
    InvalidStart(i32),

    #[error("Invalid track size: {0}")]
    InvalidTrackSize(String),

    #[error("Invalid constraints: {0}")]
    InvalidConstraints(String),
}

// ==================== Geometry ====================

/// A layout axis.
///
/// Column tracks are sized along the horizontal axis, row tracks along the
/// vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Get the cross axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A two-dimensional size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// The extent along one axis.
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// A rectangle in pixels, positioned from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// ==================== Constraints ====================

/// Size bounds for one axis of a layout pass.
///
/// `max` is `f32::INFINITY` when the axis is unbounded. Track sizing
/// resolves against `max`; `min` is carried for the host's final box
/// clamping and never forces tracks to grow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConstraint {
    pub min: f32,
    pub max: f32,
}

impl AxisConstraint {
    /// No bounds at all.
    pub const UNBOUNDED: AxisConstraint = AxisConstraint {
        min: 0.0,
        max: f32::INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Exactly `size` on this axis.
    pub fn tight(size: f32) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    /// At most `max`, no minimum.
    pub fn loose(max: f32) -> Self {
        Self { min: 0.0, max }
    }

    /// Whether the axis has a definite maximum to resolve against.
    pub fn is_definite(&self) -> bool {
        self.max.is_finite()
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.min.is_nan() || self.max.is_nan() {
            return Err(GridError::InvalidConstraints(
                "bounds must not be NaN".to_string(),
            ));
        }
        if self.min < 0.0 || !self.min.is_finite() {
            return Err(GridError::InvalidConstraints(format!(
                "minimum must be finite and non-negative, got {}",
                self.min
            )));
        }
        if self.max < self.min {
            return Err(GridError::InvalidConstraints(format!(
                "maximum {} is below minimum {}",
                self.max, self.min
            )));
        }
        Ok(())
    }
}

impl Default for AxisConstraint {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Per-pass size bounds for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridConstraints {
    pub width: AxisConstraint,
    pub height: AxisConstraint,
}

impl GridConstraints {
    /// No bounds on either axis.
    pub const UNBOUNDED: GridConstraints = GridConstraints {
        width: AxisConstraint::UNBOUNDED,
        height: AxisConstraint::UNBOUNDED,
    };

    pub fn new(width: AxisConstraint, height: AxisConstraint) -> Self {
        Self { width, height }
    }

    /// Exactly `width` by `height`.
    pub fn tight(width: f32, height: f32) -> Self {
        Self {
            width: AxisConstraint::tight(width),
            height: AxisConstraint::tight(height),
        }
    }

    /// At most `width` by `height`, no minimums.
    pub fn loose(width: f32, height: f32) -> Self {
        Self {
            width: AxisConstraint::loose(width),
            height: AxisConstraint::loose(height),
        }
    }

    /// The bounds along one axis.
    pub fn axis(&self, axis: Axis) -> AxisConstraint {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        self.width.validate()?;
        self.height.validate()
    }
}

// ==================== Item Measurement ====================

/// Host capability reporting an item's content size along an axis.
///
/// `cross_size` is the resolved size of the opposite axis, or
/// `f32::INFINITY` when it has not been resolved yet. Implementations must
/// return non-negative sizes with `min <= max` for any input; violations
/// indicate a host bug and trip debug assertions inside the engine.
pub trait ItemMeasure {
    /// Smallest size the item can occupy along `axis`.
    fn min_content_size(&self, axis: Axis, cross_size: f32) -> f32;

    /// Size the item occupies along `axis` when given unlimited room.
    fn max_content_size(&self, axis: Axis, cross_size: f32) -> f32;
}

// ==================== Track Sizing ====================

/// A grid track sizing rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackSize {
    /// Fixed length in pixels.
    Px(f32),
    /// Fraction of the axis's definite available size, in `(0, 1]`.
    Fraction(f32),
    /// Flexible track fed from leftover space in proportion to its factor.
    Flex(f32),
    /// Sized from the content of the items occupying the track.
    Content,
}

impl Default for TrackSize {
    fn default() -> Self {
        TrackSize::Content
    }
}

impl TrackSize {
    /// Create a fixed pixel size.
    pub fn px(value: f32) -> Self {
        TrackSize::Px(value)
    }

    /// Create a fractional size.
    pub fn fraction(value: f32) -> Self {
        TrackSize::Fraction(value)
    }

    /// Create a flexible size.
    pub fn flex(factor: f32) -> Self {
        TrackSize::Flex(factor)
    }

    /// Whether the rule resolves to a definite size before items are
    /// consulted. A fraction is fixed only against a definite axis.
    pub fn is_fixed(&self, constraint: AxisConstraint) -> bool {
        match self {
            TrackSize::Px(_) => true,
            TrackSize::Fraction(_) => constraint.is_definite(),
            TrackSize::Flex(_) | TrackSize::Content => false,
        }
    }

    /// Whether the rule needs content measurement (or deferred resolution)
    /// under the given constraint.
    pub fn is_intrinsic(&self, constraint: AxisConstraint) -> bool {
        match self {
            TrackSize::Content => true,
            TrackSize::Fraction(_) => !constraint.is_definite(),
            TrackSize::Px(_) | TrackSize::Flex(_) => false,
        }
    }

    /// Whether the rule takes part in flexible expansion.
    pub fn is_flexible(&self) -> bool {
        matches!(self, TrackSize::Flex(_))
    }

    /// The flexible weight, or 0 for non-flexible rules.
    pub fn flex_factor(&self) -> f32 {
        match self {
            TrackSize::Flex(factor) => *factor,
            _ => 0.0,
        }
    }

    /// Minimum space the rule demands, measured over `items`.
    ///
    /// `axis_max` is the definite available size of the axis, or
    /// `f32::INFINITY` when unbounded. Each item is paired with its
    /// cross-axis size (`f32::INFINITY` while unresolved). Only `Content`
    /// consults the items; a fraction against an unbounded axis resolves
    /// to 0, and flexible tracks contribute nothing until expansion.
    pub fn min_contribution<'a, I>(&self, axis: Axis, axis_max: f32, items: I) -> f32
    where
        I: IntoIterator<Item = (&'a dyn ItemMeasure, f32)>,
    {
        match self {
            TrackSize::Px(size) => *size,
            TrackSize::Fraction(fraction) => {
                if axis_max.is_finite() {
                    fraction * axis_max
                } else {
                    0.0
                }
            }
            TrackSize::Flex(_) => 0.0,
            TrackSize::Content => items
                .into_iter()
                .map(|(item, cross)| item.min_content_size(axis, cross))
                .fold(0.0, f32::max),
        }
    }

    /// Maximum space the rule asks for, measured over `items`.
    ///
    /// Same contract as [`TrackSize::min_contribution`], using each item's
    /// maximum content size. For every rule and input,
    /// `min_contribution <= max_contribution`.
    pub fn max_contribution<'a, I>(&self, axis: Axis, axis_max: f32, items: I) -> f32
    where
        I: IntoIterator<Item = (&'a dyn ItemMeasure, f32)>,
    {
        match self {
            TrackSize::Px(size) => *size,
            TrackSize::Fraction(fraction) => {
                if axis_max.is_finite() {
                    fraction * axis_max
                } else {
                    0.0
                }
            }
            TrackSize::Flex(_) => 0.0,
            TrackSize::Content => items
                .into_iter()
                .map(|(item, cross)| item.max_content_size(axis, cross))
                .fold(0.0, f32::max),
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        match self {
            TrackSize::Px(size) => {
                if !size.is_finite() || *size < 0.0 {
                    return Err(GridError::InvalidTrackSize(format!(
                        "fixed size must be finite and non-negative, got {}",
                        size
                    )));
                }
            }
            TrackSize::Fraction(fraction) => {
                if !fraction.is_finite() || *fraction <= 0.0 || *fraction > 1.0 {
                    return Err(GridError::InvalidTrackSize(format!(
                        "fraction must be within (0, 1], got {}",
                        fraction
                    )));
                }
            }
            TrackSize::Flex(factor) => {
                if !factor.is_finite() || *factor <= 0.0 {
                    return Err(GridError::InvalidTrackSize(format!(
                        "flex factor must be positive and finite, got {}",
                        factor
                    )));
                }
            }
            TrackSize::Content => {}
        }
        Ok(())
    }
}

// ==================== Placement Types ====================

/// Automatic placement mode for items without explicit coordinates.
///
/// The flow axis picks which axis fills first; dense variants revisit
/// earlier holes instead of only advancing the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoFlow {
    #[default]
    Row,
    Column,
    RowDense,
    ColumnDense,
}

impl AutoFlow {
    /// Check if this is a row-based flow.
    pub fn is_row(self) -> bool {
        matches!(self, AutoFlow::Row | AutoFlow::RowDense)
    }

    /// Check if this uses dense packing.
    pub fn is_dense(self) -> bool {
        matches!(self, AutoFlow::RowDense | AutoFlow::ColumnDense)
    }
}

/// Reading direction. Placement is always computed in logical column
/// order; `Rtl` mirrors horizontal pixel offsets when rects are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Requested placement for one grid item.
///
/// Explicit starts are 0-based track indices; `None` requests
/// auto-placement on that axis. Spans default to 1 and must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPlacement {
    pub column_start: Option<i32>,
    pub row_start: Option<i32>,
    pub column_span: u32,
    pub row_span: u32,
}

impl Default for ItemPlacement {
    fn default() -> Self {
        Self::auto()
    }
}

impl ItemPlacement {
    /// Auto-placed on both axes with span 1.
    pub fn auto() -> Self {
        Self {
            column_start: None,
            row_start: None,
            column_span: 1,
            row_span: 1,
        }
    }

    /// Explicitly placed on both axes.
    pub fn at(column: i32, row: i32) -> Self {
        Self {
            column_start: Some(column),
            row_start: Some(row),
            ..Self::auto()
        }
    }

    /// Explicit column, auto row.
    pub fn in_column(column: i32) -> Self {
        Self {
            column_start: Some(column),
            ..Self::auto()
        }
    }

    /// Explicit row, auto column.
    pub fn in_row(row: i32) -> Self {
        Self {
            row_start: Some(row),
            ..Self::auto()
        }
    }

    pub fn with_column_span(mut self, span: u32) -> Self {
        self.column_span = span;
        self
    }

    pub fn with_row_span(mut self, span: u32) -> Self {
        self.row_span = span;
        self
    }

    /// Whether both axes are explicitly placed.
    pub fn is_fully_explicit(&self) -> bool {
        self.column_start.is_some() && self.row_start.is_some()
    }

    /// Whether neither axis is explicitly placed.
    pub fn is_fully_auto(&self) -> bool {
        self.column_start.is_none() && self.row_start.is_none()
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.column_span < 1 {
            return Err(GridError::InvalidSpan(self.column_span));
        }
        if self.row_span < 1 {
            return Err(GridError::InvalidSpan(self.row_span));
        }
        if let Some(start) = self.column_start {
            if start < 0 {
                return Err(GridError::InvalidStart(start));
            }
        }
        if let Some(start) = self.row_start {
            if start < 0 {
                return Err(GridError::InvalidStart(start));
            }
        }
        Ok(())
    }
}

/// A resolved rectangular region of grid cells.
///
/// Line indices are 0-based, ends are exclusive, and `end > start` holds on
/// both axes. Immutable once assigned by placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub column_start: usize,
    pub column_end: usize,
    pub row_start: usize,
    pub row_end: usize,
}

impl GridArea {
    pub fn new(column_start: usize, column_end: usize, row_start: usize, row_end: usize) -> Self {
        debug_assert!(column_end > column_start, "area must span >= 1 column");
        debug_assert!(row_end > row_start, "area must span >= 1 row");
        Self {
            column_start,
            column_end,
            row_start,
            row_end,
        }
    }

    pub fn column_span(&self) -> usize {
        self.column_end - self.column_start
    }

    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start
    }

    /// The start line on one axis.
    pub fn start(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.column_start,
            Axis::Vertical => self.row_start,
        }
    }

    /// The exclusive end line on one axis.
    pub fn end(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.column_end,
            Axis::Vertical => self.row_end,
        }
    }

    /// The number of tracks spanned on one axis.
    pub fn span(&self, axis: Axis) -> usize {
        self.end(axis) - self.start(axis)
    }

    /// The spanned track indices on one axis.
    pub fn tracks(&self, axis: Axis) -> Range<usize> {
        self.start(axis)..self.end(axis)
    }
}

// ==================== Grid Configuration ====================

/// Host-supplied grid configuration: explicit track templates, fallback
/// rules for implicit tracks, placement flow, and reading direction.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    /// Explicit column template.
    pub columns: Vec<TrackSize>,
    /// Explicit row template.
    pub rows: Vec<TrackSize>,
    /// Sizing rule for implicit columns created by placement.
    pub auto_columns: TrackSize,
    /// Sizing rule for implicit rows created by placement.
    pub auto_rows: TrackSize,
    /// Auto-placement mode.
    pub flow: AutoFlow,
    /// Reading direction.
    pub direction: Direction,
}

impl GridSpec {
    pub fn new(columns: Vec<TrackSize>, rows: Vec<TrackSize>) -> Self {
        Self {
            columns,
            rows,
            auto_columns: TrackSize::Content,
            auto_rows: TrackSize::Content,
            flow: AutoFlow::Row,
            direction: Direction::Ltr,
        }
    }

    pub fn with_auto_tracks(mut self, auto_columns: TrackSize, auto_rows: TrackSize) -> Self {
        self.auto_columns = auto_columns;
        self.auto_rows = auto_rows;
        self
    }

    pub fn with_flow(mut self, flow: AutoFlow) -> Self {
        self.flow = flow;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// The explicit template along one axis.
    pub fn template(&self, axis: Axis) -> &[TrackSize] {
        match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        }
    }

    /// The implicit-track fallback rule along one axis.
    pub fn auto_track(&self, axis: Axis) -> TrackSize {
        match axis {
            Axis::Horizontal => self.auto_columns,
            Axis::Vertical => self.auto_rows,
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        for track in self.columns.iter().chain(self.rows.iter()) {
            track.validate()?;
        }
        self.auto_columns.validate()?;
        self.auto_rows.validate()
    }
}

// ==================== Tests ====================
