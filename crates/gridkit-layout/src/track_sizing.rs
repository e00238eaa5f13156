//! # Track Sizing
//!
//! Resolves the pixel size of every track along one axis.
//!
//! ## Overview
//!
//! Each track carries a base size (its committed size) and a growth limit
//! (how far the base may still grow). Sizing runs four phases per axis:
//!
//! 1. Initialize base sizes and growth limits from each track's sizing
//!    rule classified against the axis constraint.
//! 2. Resolve intrinsic tracks from item measurements, smallest spans
//!    first so single-track contributions land before multi-track
//!    contributions add space on top.
//! 3. Maximize: hand definite free space to tracks up to their growth
//!    limits; on an unbounded axis, inflate straight to the limits.
//! 4. Expand flexible tracks into whatever space is left, proportionally
//!    to their flex factors.
//!
//! Free space is always shared through one waterfall distribution: capped
//! tracks absorb their share first, unbounded tracks split the rest.
//!
//! ## References
//!
//! - [CSS Grid Layout Module Level 1, §11 Grid Sizing](https://www.w3.org/TR/css-grid-1/#layout-algorithm)

use std::collections::BTreeMap;
use std::ops::Range;

use gridkit_core::{Axis, AxisConstraint, GridArea, ItemMeasure, TrackSize};
use smallvec::SmallVec;
use tracing::{debug, trace};

// ==================== Grid Track ====================

/// One row or column slot being resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTrack {
    /// The sizing rule the track was declared with.
    pub sizing: TrackSize,
    /// Committed size; the final value used for layout.
    pub base_size: f32,
    /// Upper bound the base size may grow to. `f32::INFINITY` while the
    /// track is intrinsic and not yet frozen.
    pub growth_limit: f32,
}

impl GridTrack {
    pub fn new(sizing: TrackSize) -> Self {
        Self {
            sizing,
            base_size: 0.0,
            growth_limit: 0.0,
        }
    }

    /// Whether the growth limit is still the "not yet frozen" sentinel.
    pub fn is_unlimited(&self) -> bool {
        self.growth_limit.is_infinite()
    }

    /// The growth limit as a comparable value: an unfrozen limit counts
    /// as the current base size.
    fn effective_limit(&self) -> f32 {
        if self.is_unlimited() {
            self.base_size
        } else {
            self.growth_limit
        }
    }

    /// Add to the base size, dragging the growth limit along so the
    /// limit never falls below the base.
    fn raise_base(&mut self, amount: f32) {
        debug_assert!(amount >= 0.0, "track sizes never decrease");
        self.base_size += amount.max(0.0);
        if self.growth_limit < self.base_size {
            self.growth_limit = self.base_size;
        }
    }
}

/// Build the track list for one axis: the explicit template followed by
/// implicit fallback tracks up to `count`.
pub fn build_tracks(template: &[TrackSize], fallback: TrackSize, count: usize) -> Vec<GridTrack> {
    let mut tracks: Vec<GridTrack> = template.iter().map(|&sizing| GridTrack::new(sizing)).collect();
    while tracks.len() < count {
        tracks.push(GridTrack::new(fallback));
    }
    tracks
}

/// An item as seen by the sizing engine: its resolved area plus the
/// measurement capability of its content.
#[derive(Clone, Copy)]
pub struct PlacedItem<'a> {
    pub measure: &'a dyn ItemMeasure,
    pub area: GridArea,
}

// ==================== Free-Space Distribution ====================

#[derive(Debug, Clone, Copy, PartialEq)]
enum SizeTarget {
    Base,
    Limit,
}

/// Waterfall distribution of `pool` across the candidate tracks.
///
/// Candidates are visited in ascending order of remaining capacity
/// (ties by index), so capped tracks absorb their fair share first and
/// unbounded tracks split whatever is left evenly. Every track receives
/// `min(pool / remaining, capacity)`; amounts are never negative, so
/// sizes never shrink. Pool that no candidate can absorb stays
/// unassigned and the spanning content simply overflows.
fn distribute(pool: f32, tracks: &mut [GridTrack], candidates: &[usize], target: SizeTarget) {
    if pool <= 0.0 || candidates.is_empty() {
        return;
    }

    let mut order: SmallVec<[(f32, usize); 8]> = candidates
        .iter()
        .map(|&index| {
            let track = &tracks[index];
            let capacity = if track.is_unlimited() {
                f32::INFINITY
            } else {
                match target {
                    SizeTarget::Base => (track.growth_limit - track.base_size).max(0.0),
                    // A frozen limit cannot be pushed further.
                    SizeTarget::Limit => 0.0,
                }
            };
            (capacity, index)
        })
        .collect();
    order.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut pool = pool;
    let mut remaining = order.len();
    for &(capacity, index) in order.iter() {
        let share = pool / remaining as f32;
        let give = share.min(capacity);
        let track = &mut tracks[index];
        match target {
            SizeTarget::Base => track.raise_base(give),
            SizeTarget::Limit => {
                track.growth_limit = track.effective_limit() + give;
            }
        }
        pool -= give;
        remaining -= 1;
    }
}

/// Sum of base sizes across a track range.
pub(crate) fn span_base_size(tracks: &[GridTrack], range: Range<usize>) -> f32 {
    tracks[range].iter().map(|track| track.base_size).sum()
}

// ==================== Sizing Algorithm ====================

/// Resolve base sizes and growth limits for one axis.
///
/// `items` carry their placed areas; every area must lie within the track
/// list. `cross_tracks` is the other axis's resolved track list when that
/// axis has already been sized, letting content measurement see definite
/// cross sizes; pass `None` for the first axis.
pub fn size_tracks(
    tracks: &mut [GridTrack],
    axis: Axis,
    constraint: AxisConstraint,
    items: &[PlacedItem<'_>],
    cross_tracks: Option<&[GridTrack]>,
) {
    debug!(
        ?axis,
        tracks = tracks.len(),
        items = items.len(),
        definite = constraint.is_definite(),
        "size_tracks: starting"
    );

    // 1. Initialize from the sizing rule classification.
    for track in tracks.iter_mut() {
        if track.sizing.is_fixed(constraint) {
            let size = track.sizing.min_contribution(axis, constraint.max, []);
            track.base_size = size;
            track.growth_limit = size;
        } else if track.sizing.is_flexible() {
            track.base_size = 0.0;
            track.growth_limit = 0.0;
        } else {
            track.base_size = 0.0;
            track.growth_limit = f32::INFINITY;
        }
    }

    // 2. Resolve intrinsic tracks from item contributions, in ascending
    //    span order, bucketed by start line within each span group.
    resolve_intrinsic_sizes(tracks, axis, constraint, items, cross_tracks);
    trace!(
        base_total = span_base_size(tracks, 0..tracks.len()),
        "intrinsic sizes resolved"
    );

    // 3. Maximize into the remaining definite space, or inflate straight
    //    to the growth limits when the axis is unbounded.
    let base_total: f32 = tracks.iter().map(|track| track.base_size).sum();
    if constraint.is_definite() {
        let free_space = constraint.max - base_total;
        if free_space > 0.0 {
            let candidates: SmallVec<[usize; 8]> = (0..tracks.len())
                .filter(|&index| !tracks[index].sizing.is_fixed(constraint))
                .collect();
            distribute(free_space, tracks, &candidates, SizeTarget::Base);
        }
        // Negative free space: overflow. Tracks keep their minimums.
    } else {
        for track in tracks.iter_mut() {
            if !track.sizing.is_fixed(constraint) {
                track.base_size = track.growth_limit;
            }
        }
    }

    // 4. Expand flexible tracks into the leftover space.
    expand_flexible_tracks(tracks, constraint);

    debug_assert!(
        tracks.iter().all(|track| track.growth_limit >= track.base_size),
        "growth limit fell below base size"
    );
    debug!(
        base_total = span_base_size(tracks, 0..tracks.len()),
        "size_tracks: done"
    );
}

/// Phase 2: measure items over intrinsic tracks and distribute the
/// shortfalls. Buckets that span a flexible track are skipped entirely;
/// flexible tracks are only ever sized in phase 4.
fn resolve_intrinsic_sizes(
    tracks: &mut [GridTrack],
    axis: Axis,
    constraint: AxisConstraint,
    items: &[PlacedItem<'_>],
    cross_tracks: Option<&[GridTrack]>,
) {
    // Group items by (span, start line). BTreeMap iteration gives the
    // required ascending span order with start-line tie breaking.
    let mut buckets: BTreeMap<(usize, usize), SmallVec<[usize; 4]>> = BTreeMap::new();
    for (item_index, item) in items.iter().enumerate() {
        let range = item.area.tracks(axis);
        let touches_intrinsic = range
            .clone()
            .any(|track| tracks[track].sizing.is_intrinsic(constraint));
        if !touches_intrinsic {
            continue;
        }
        if range.clone().any(|track| tracks[track].sizing.is_flexible()) {
            continue;
        }
        buckets
            .entry((range.len(), range.start))
            .or_default()
            .push(item_index);
    }

    for (&(span, start), bucket) in &buckets {
        let range = start..start + span;

        // The track whose sizing rule answers the contribution query:
        // prefer a content-sized track over a deferred fraction.
        let query = range
            .clone()
            .find(|&track| matches!(tracks[track].sizing, TrackSize::Content))
            .or_else(|| {
                range
                    .clone()
                    .find(|&track| tracks[track].sizing.is_intrinsic(constraint))
            });
        let Some(query) = query else {
            continue;
        };
        let sizing = tracks[query].sizing;

        let measured: SmallVec<[(&dyn ItemMeasure, f32); 4]> = bucket
            .iter()
            .map(|&item_index| {
                let item = &items[item_index];
                let cross = match cross_tracks {
                    Some(cross_tracks) => {
                        span_base_size(cross_tracks, item.area.tracks(axis.cross()))
                    }
                    None => f32::INFINITY,
                };
                (item.measure, cross)
            })
            .collect();

        let min_contribution = sizing.min_contribution(axis, constraint.max, measured.iter().copied());
        let max_contribution = sizing.max_contribution(axis, constraint.max, measured.iter().copied());
        debug_assert!(min_contribution >= 0.0, "negative min contribution");
        debug_assert!(
            min_contribution <= max_contribution,
            "item measurement returned min > max"
        );
        let max_contribution = max_contribution.max(min_contribution);

        trace!(
            span,
            start,
            items = bucket.len(),
            min_contribution,
            max_contribution,
            "sizing bucket"
        );

        let candidates: SmallVec<[usize; 8]> = range.clone().collect();

        let base_sum: f32 = range.clone().map(|track| tracks[track].base_size).sum();
        let min_shortfall = min_contribution - base_sum;
        if min_shortfall > 0.0 {
            distribute(min_shortfall, tracks, &candidates, SizeTarget::Base);
        }

        let limit_sum: f32 = range.clone().map(|track| tracks[track].effective_limit()).sum();
        let max_shortfall = max_contribution - limit_sum;
        if max_shortfall > 0.0 {
            distribute(max_shortfall, tracks, &candidates, SizeTarget::Limit);
        }
    }

    // Freeze whatever is still unlimited; only intrinsic tracks can be.
    for track in tracks.iter_mut() {
        if track.is_unlimited() {
            track.growth_limit = track.base_size;
        }
    }
}

/// Phase 4: split the leftover space across flexible tracks by factor.
/// Without a definite bound there is nothing to split, and flexible
/// tracks stay at zero.
fn expand_flexible_tracks(tracks: &mut [GridTrack], constraint: AxisConstraint) {
    let flex_total: f32 = tracks.iter().map(|track| track.sizing.flex_factor()).sum();
    if flex_total <= 0.0 || !constraint.is_definite() {
        return;
    }

    let non_flex_total: f32 = tracks
        .iter()
        .filter(|track| !track.sizing.is_flexible())
        .map(|track| track.base_size)
        .sum();
    let leftover = (constraint.max - non_flex_total).max(0.0);
    let flex_unit = leftover / flex_total;
    trace!(leftover, flex_unit, "expanding flexible tracks");

    for track in tracks.iter_mut() {
        if track.sizing.is_flexible() {
            track.base_size = flex_unit * track.sizing.flex_factor();
            if track.growth_limit < track.base_size {
                track.growth_limit = track.base_size;
            }
        }
    }
}

// ==================== Tests ====================
