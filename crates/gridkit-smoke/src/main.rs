//! GridKit Smoke Harness
//!
//! This harness exercises the layout engine with a dashboard-style grid
//! mixing all four track sizing rules and every placement style, then
//! logs the resolved tracks and item rects. It exists to catch gross
//! regressions quickly and to eyeball geometry under different viewports.

use gridkit_core::{
    Axis, Direction, GridConstraints, GridSpec, ItemMeasure, ItemPlacement, TrackSize,
};
use gridkit_layout::{compute_layout, GridItem};
use tracing::{error, info};

/// A demo widget with fixed content sizes.
struct Widget {
    label: &'static str,
    width: f32,
    height: f32,
}

impl Widget {
    fn new(label: &'static str, width: f32, height: f32) -> Self {
        Self {
            label,
            width,
            height,
        }
    }
}

impl ItemMeasure for Widget {
    fn min_content_size(&self, axis: Axis, _cross_size: f32) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    fn max_content_size(&self, axis: Axis, cross_size: f32) -> f32 {
        self.min_content_size(axis, cross_size)
    }
}

/// Parse command line arguments
struct Args {
    width: f32,
    height: f32,
    rtl: bool,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut width = 1100.0f32;
        let mut height = 640.0f32;
        let mut rtl = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => {
                    if let Some(val) = args.next() {
                        width = val.parse().unwrap_or(1100.0);
                    }
                }
                "--height" => {
                    if let Some(val) = args.next() {
                        height = val.parse().unwrap_or(640.0);
                    }
                }
                "--rtl" => {
                    rtl = true;
                }
                _ => {}
            }
        }

        Self { width, height, rtl }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!(
        width = args.width,
        height = args.height,
        rtl = args.rtl,
        "Starting GridKit Smoke Harness"
    );

    // Dashboard template: fixed sidebar, fractional nav, content-sized
    // gauge column, flexible main area; fixed header row, flexible body,
    // content-sized status row.
    let mut spec = GridSpec::new(
        vec![
            TrackSize::px(220.0),
            TrackSize::fraction(0.15),
            TrackSize::Content,
            TrackSize::flex(1.0),
        ],
        vec![TrackSize::px(64.0), TrackSize::flex(1.0), TrackSize::Content],
    )
    .with_auto_tracks(TrackSize::Content, TrackSize::Content);
    if args.rtl {
        spec = spec.with_direction(Direction::Rtl);
    }

    let header = Widget::new("header", 400.0, 48.0);
    let sidebar = Widget::new("sidebar", 180.0, 300.0);
    let gauge = Widget::new("gauge", 96.0, 96.0);
    let chart = Widget::new("chart", 320.0, 240.0);
    let status = Widget::new("status", 260.0, 24.0);
    let overflow_card = Widget::new("overflow-card", 140.0, 90.0);

    let items = [
        // Header banner across the full explicit width.
        GridItem::new(&header, ItemPlacement::at(0, 0).with_column_span(4)),
        // Sidebar pinned to the first column, auto row.
        GridItem::new(&sidebar, ItemPlacement::in_column(0)),
        // Gauge pinned to the body row, auto column.
        GridItem::new(&gauge, ItemPlacement::in_row(1)),
        // Fully-auto items flow into the remaining cells.
        GridItem::auto(&chart),
        GridItem::auto(&status),
        // Lands past the explicit rows and forces an implicit track.
        GridItem::new(&overflow_card, ItemPlacement::at(3, 3)),
    ];
    let labels = [
        header.label,
        sidebar.label,
        gauge.label,
        chart.label,
        status.label,
        overflow_card.label,
    ];

    let constraints = GridConstraints::loose(args.width, args.height);
    let layout = match compute_layout(&spec, &items, constraints) {
        Ok(layout) => layout,
        Err(e) => {
            error!(?e, "Layout failed");
            std::process::exit(1);
        }
    };

    for axis in [Axis::Horizontal, Axis::Vertical] {
        for (index, track) in layout.info.tracks(axis).iter().enumerate() {
            info!(
                ?axis,
                index,
                sizing = ?track.sizing,
                base_size = track.base_size,
                growth_limit = track.growth_limit,
                offset = layout.info.track_offset(axis, index),
                "resolved track"
            );
        }
    }

    for ((label, area), rect) in labels
        .iter()
        .zip(layout.areas.iter())
        .zip(layout.item_rects.iter())
    {
        info!(
            label,
            columns = ?(area.column_start..area.column_end),
            rows = ?(area.row_start..area.row_end),
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "placed item"
        );
    }

    info!(
        content_width = layout.content_size.width,
        content_height = layout.content_size.height,
        "Smoke layout complete"
    );
}
