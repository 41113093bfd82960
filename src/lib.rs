//! chart2d: a 2D charting engine with multi-axis scaling, viewport clipping
//! and pluggable painters, drawing onto any [`Surface`].

pub mod axis;
pub mod axis_renderer;
pub mod chart;
pub mod clip;
pub mod config;
pub mod data_types;
pub mod error;
pub mod gutter_manager;
pub mod plot_types;
pub mod point_finder;
pub mod range_policy;
pub mod repaint;
pub mod scales;
pub mod surface;
pub mod sync;
pub mod theme;
pub mod trace;

pub use axis::Axis;
pub use chart::{Chart2D, PaintMode};
pub use config::ChartConfig;
pub use data_types::{
    AxisEdge, AxisId, Bounds, ChartEvent, Color, DecoratingPointFactory, DefaultPointFactory, Dimension,
    EventKind, ListenerId, PointFactory, PointId, Range, Stroke, TickSpacing, TraceId, TracePoint, TraceStyle,
};
pub use error::{ChartError, Result};
pub use gutter_manager::PlotArea;
pub use point_finder::{NearestPoint, PointFinder};
pub use range_policy::{FixedViewport, ForcedPoint, HighestValues, MinimumViewport, RangePolicy, Unbounded};
pub use repaint::{RepaintSink, RepaintTicker};
pub use surface::{DrawOp, PixelPoint, RecordingSurface, Surface};
pub use sync::lock_order_violations;
pub use theme::ChartTheme;
pub use trace::{ErrorBarPolicy, ErrorValue, InsertPolicy, Trace, TraceStorage};
