//! Axes: range resolution, normalization and pixel translation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::data_types::{AxisEdge, Dimension, Range, TickSpacing, TraceId};
use crate::gutter_manager::PlotArea;
use crate::range_policy::{RangePolicy, Unbounded};
use crate::scales::{self, ChartScale, Tick};
use crate::surface::Surface;
use crate::trace::data::TraceData;

pub(crate) const AXIS_LINE: i32 = 1;
pub(crate) const MAJOR_TICK: i32 = 6;
pub(crate) const MINOR_TICK: i32 = 3;
pub(crate) const LABEL_GAP: i32 = 3;

/// A tick with its label measured for the current pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabel {
    pub tick: Tick,
    /// Empty for minor ticks.
    pub text: String,
    pub width: i32,
    pub height: i32,
}

/// One axis of a chart.
///
/// An axis is created standalone and moved into a chart with
/// [`Chart2D::add_axis`](crate::Chart2D::add_axis), which fixes its edge and
/// therefore its dimension. The displayed range is re-resolved from the
/// traces at the start of every paint pass; the normalized coordinates of the
/// traces are only rewritten when [`Axis::is_dirty_scaling`] says so.
pub struct Axis {
    edge: AxisEdge,
    range_policy: Arc<dyn RangePolicy>,
    title: Option<String>,
    visible: bool,
    grid: bool,
    tick_spacing: TickSpacing,
    traces: BTreeSet<TraceId>,

    range: Range,
    scaled_range: Option<Range>,
    scaled_epochs: BTreeMap<TraceId, u64>,
    membership_changed: bool,

    labels: Vec<TickLabel>,
    max_label_width: i32,
    label_height: i32,
    title_extent: (i32, i32),
    pixels: PlotArea,
}

impl Axis {
    pub fn new() -> Self {
        Self::with_policy(Arc::new(Unbounded))
    }

    pub fn with_policy(range_policy: Arc<dyn RangePolicy>) -> Self {
        Self {
            edge: AxisEdge::Bottom,
            range_policy,
            title: None,
            visible: true,
            grid: false,
            tick_spacing: TickSpacing::Auto,
            traces: BTreeSet::new(),
            range: Range::default(),
            scaled_range: None,
            scaled_epochs: BTreeMap::new(),
            membership_changed: false,
            labels: Vec::new(),
            max_label_width: 0,
            label_height: 0,
            title_extent: (0, 0),
            pixels: PlotArea::default(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    // ---- Configuration ----

    pub fn edge(&self) -> AxisEdge {
        self.edge
    }

    pub(crate) fn set_edge(&mut self, edge: AxisEdge) {
        self.edge = edge;
    }

    pub fn dimension(&self) -> Dimension {
        self.edge.dimension()
    }

    pub fn range_policy(&self) -> &Arc<dyn RangePolicy> {
        &self.range_policy
    }

    pub fn set_range_policy(&mut self, policy: Arc<dyn RangePolicy>) {
        self.range_policy = policy;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// A hidden axis takes no space and is not painted but still scales its
    /// traces.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn has_grid(&self) -> bool {
        self.grid
    }

    pub fn set_grid(&mut self, grid: bool) {
        self.grid = grid;
    }

    pub fn tick_spacing(&self) -> TickSpacing {
        self.tick_spacing
    }

    pub fn set_tick_spacing(&mut self, spacing: TickSpacing) {
        self.tick_spacing = spacing;
    }

    // ---- Traces ----

    pub fn traces(&self) -> impl Iterator<Item = TraceId> + '_ {
        self.traces.iter().copied()
    }

    pub fn has_traces(&self) -> bool {
        !self.traces.is_empty()
    }

    pub(crate) fn add_trace(&mut self, id: TraceId) {
        if self.traces.insert(id) {
            self.membership_changed = true;
        }
    }

    pub(crate) fn remove_trace(&mut self, id: TraceId) {
        if self.traces.remove(&id) {
            self.scaled_epochs.remove(&id);
            self.membership_changed = true;
        }
    }

    // ---- Range and scaling ----

    /// Range displayed since the last resolution.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Applies the range policy to the data range of the visible traces.
    pub(crate) fn resolve_range(&mut self, data: Range) {
        let resolved = self.range_policy.resolve(data);
        if resolved != self.range {
            tracing::trace!(edge = ?self.edge, ?resolved, "axis range changed");
        }
        self.range = resolved;
    }

    /// Normalized position of `value` in the current range.
    pub fn normalize(&self, value: f64) -> f64 {
        scales::normalize(value, &self.range)
    }

    /// Whether the normalized coordinates of the traces are stale: the range
    /// changed since the last scaling, traces were added or removed, or one of
    /// `epochs` differs from the point epoch scaled last.
    pub fn is_dirty_scaling(&self, epochs: &BTreeMap<TraceId, u64>) -> bool {
        self.membership_changed
            || self.scaled_range != Some(self.range)
            || self
                .traces
                .iter()
                .any(|id| epochs.get(id) != self.scaled_epochs.get(id))
    }

    /// Writes the normalized coordinates of one trace.
    ///
    /// Skipped when neither the range nor the trace changed since the last
    /// call, unless `force` is set.
    pub(crate) fn scale_trace(&mut self, id: TraceId, data: &mut TraceData, force: bool) {
        let up_to_date = self.scaled_range == Some(self.range)
            && self.scaled_epochs.get(&id) == Some(&data.epoch);
        if up_to_date && !force {
            return;
        }
        let range = self.range;
        match self.dimension() {
            Dimension::X => {
                for point in data.points.iter_mut() {
                    point.scaled_x = scales::normalize(point.x, &range);
                }
            }
            Dimension::Y => {
                for point in data.points.iter_mut() {
                    point.scaled_y = scales::normalize(point.y, &range);
                }
            }
        }
        self.scaled_epochs.insert(id, data.epoch);
    }

    pub(crate) fn mark_scaled(&mut self) {
        self.scaled_range = Some(self.range);
        self.membership_changed = false;
    }

    // ---- Labels and geometry ----

    /// Computes the ticks of the current range and measures their labels and
    /// the title with the metrics of `surface`.
    pub fn init_paint_iteration(&mut self, surface: &dyn Surface) {
        let (major, minor) = self.tick_spacing.resolve(&self.range);
        self.labels = scales::ticks(&self.range, major, minor)
            .into_iter()
            .map(|tick| {
                if tick.major {
                    let text = scales::format_tick(tick.value);
                    let (width, height) = surface.text_extent(&text);
                    TickLabel {
                        tick,
                        text,
                        width,
                        height,
                    }
                } else {
                    TickLabel {
                        tick,
                        text: String::new(),
                        width: 0,
                        height: 0,
                    }
                }
            })
            .collect();
        self.max_label_width = self.labels.iter().map(|l| l.width).max().unwrap_or(0);
        self.label_height = self.labels.iter().map(|l| l.height).max().unwrap_or(0);
        self.title_extent = match &self.title {
            Some(title) if !title.is_empty() => surface.text_extent(title),
            _ => (0, 0),
        };
    }

    pub fn labels(&self) -> &[TickLabel] {
        &self.labels
    }

    pub fn max_label_width(&self) -> i32 {
        self.max_label_width
    }

    pub fn label_height(&self) -> i32 {
        self.label_height
    }

    pub(crate) fn title_extent(&self) -> (i32, i32) {
        self.title_extent
    }

    /// Horizontal space needed by a left or right axis, 0 when hidden.
    pub fn width(&self) -> i32 {
        if !self.visible {
            return 0;
        }
        let (title_width, _) = self.title_extent;
        let title = if title_width > 0 { title_width + LABEL_GAP } else { 0 };
        AXIS_LINE + MAJOR_TICK + LABEL_GAP + self.max_label_width + title
    }

    /// Vertical space needed by a bottom or top axis, 0 when hidden.
    pub fn height(&self) -> i32 {
        if !self.visible {
            return 0;
        }
        let (_, title_height) = self.title_extent;
        let title = if title_height > 0 { title_height + LABEL_GAP } else { 0 };
        AXIS_LINE + MAJOR_TICK + LABEL_GAP + self.label_height + title
    }

    /// Space across the edge the axis sits on.
    pub(crate) fn footprint(&self) -> i32 {
        match self.dimension() {
            Dimension::X => self.height(),
            Dimension::Y => self.width(),
        }
    }

    /// Pixel band of the axis. Along its dimension it spans the plot area.
    pub fn pixel_bounds(&self) -> PlotArea {
        self.pixels
    }

    pub(crate) fn set_pixel_bounds(&mut self, bounds: PlotArea) {
        self.pixels = bounds;
    }

    pub(crate) fn scale(&self) -> ChartScale {
        match self.dimension() {
            Dimension::X => ChartScale::new(self.range, self.pixels.left, self.pixels.right),
            Dimension::Y => ChartScale::new(self.range, self.pixels.bottom, self.pixels.top),
        }
    }

    pub fn translate_value_to_px(&self, value: f64) -> i32 {
        self.scale().map(value)
    }

    pub fn translate_px_to_value(&self, pixel: i32) -> f64 {
        self.scale().invert(pixel)
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Axis")
            .field("edge", &self.edge)
            .field("range_policy", &self.range_policy)
            .field("title", &self.title)
            .field("visible", &self.visible)
            .field("range", &self.range)
            .field("traces", &self.traces)
            .finish()
    }
}
