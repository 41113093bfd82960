//! The paint pass.
//!
//! A pass runs with the chart locked from start to end and visits the traces
//! one at a time:
//!
//! 1. every axis resolves its range from its visible traces and measures its
//!    tick labels,
//! 2. the gutters and the plot area are negotiated,
//! 3. axes whose scaling is dirty rewrite the normalized coordinates,
//! 4. grid and axes are drawn,
//! 5. traces are drawn in ascending z-index, clipped to the plot area.

use std::collections::BTreeMap;
use std::sync::atomic::Ordering;

use glam::DVec2;

use super::{Chart2D, ChartState};
use crate::axis::Axis;
use crate::axis_renderer::AxisRenderer;
use crate::clip::{self, ClippedSegment};
use crate::data_types::{AxisId, Dimension, Range, TraceId, TracePoint};
use crate::gutter_manager::{AxisFootprint, GutterManager, PlotArea};
use crate::plot_types::{ErrorBarPixels, PaintContext, Segment};
use crate::scales::ChartScale;
use crate::surface::{PixelPoint, Surface};
use crate::sync::{lock_chart, lock_trace};
use crate::trace::data::TraceData;
use crate::trace::ErrorBarPolicy;

/// Target of a paint pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaintMode {
    /// Rescale only what changed since the previous pass.
    #[default]
    Screen,
    /// Rescale every trace, e.g. when rendering to an off-screen image.
    Print,
}

impl Chart2D {
    pub fn paint(&self, surface: &mut dyn Surface) {
        self.paint_with(surface, PaintMode::Screen);
    }

    pub fn paint_with(&self, surface: &mut dyn Surface, mode: PaintMode) {
        let mut state = lock_chart(&self.shared);
        self.take_repaint_request();
        let (width, height) = surface.size();

        // 1. Ranges and labels
        resolve_ranges(&mut state);
        for axis in state.axes.values_mut() {
            axis.init_paint_iteration(&*surface);
        }

        // 2. Geometry
        let footprints: Vec<AxisFootprint> = state
            .edges
            .iter()
            .flatten()
            .filter_map(|id| state.axes.get(id).map(|axis| footprint(*id, axis)))
            .collect();
        let peer_x_start = state
            .x_start_peer
            .as_ref()
            .and_then(|peer| peer.upgrade())
            .map(|peer| peer.natural_x_start.load(Ordering::Acquire));
        let layout = GutterManager::calculate(width, height, &footprints, peer_x_start);
        self.shared
            .natural_x_start
            .store(layout.natural_x_start, Ordering::Release);
        for (id, band) in &layout.bands {
            if let Some(axis) = state.axes.get_mut(id) {
                axis.set_pixel_bounds(*band);
            }
        }
        let plot = layout.plot;
        state.plot_area = Some(plot);

        // 3. Scaling
        let rescaled = rescale(&mut state, mode == PaintMode::Print);
        tracing::debug!(?plot, rescaled, "paint pass");

        // 4. Background, grid and axes
        let theme = state.config.theme.clone();
        surface.set_color(theme.background);
        surface.fill_rect(PixelPoint::ZERO, width, height);
        for axis in state.axes.values() {
            AxisRenderer::paint_grid(axis, plot, &theme, surface);
        }
        for axis in state.axes.values() {
            AxisRenderer::paint_axis(axis, &theme, surface);
        }

        // 5. Traces
        let mut order: Vec<(i32, TraceId)> = state
            .traces
            .iter()
            .map(|(id, entry)| (lock_trace(&entry.trace.shared).z_index, *id))
            .collect();
        order.sort_unstable();
        let ctx = PaintContext { plot };
        for (_, id) in order {
            let Some(entry) = state.traces.get(&id) else {
                continue;
            };
            let (Some(x_axis), Some(y_axis)) = (state.axes.get(&entry.x_axis), state.axes.get(&entry.y_axis))
            else {
                continue;
            };
            let mut data = lock_trace(&entry.trace.shared);
            if data.visible {
                tracing::trace!(?id, points = data.points.len(), "painting trace");
                paint_trace(&mut data, x_axis, y_axis, &ctx, surface);
            }
        }
    }

    /// Resolves the axis ranges and rescales the traces without painting.
    ///
    /// With `force` every trace is rescaled even if nothing changed.
    pub fn update_scaling(&self, force: bool) {
        let mut state = lock_chart(&self.shared);
        resolve_ranges(&mut state);
        rescale(&mut state, force);
    }
}

fn footprint(id: AxisId, axis: &Axis) -> AxisFootprint {
    AxisFootprint {
        id,
        edge: axis.edge(),
        visible: axis.is_visible(),
        size: axis.footprint(),
        max_label_width: axis.max_label_width(),
        label_height: axis.label_height(),
    }
}

/// Each axis shows the union of the error-bar-aware bounds of its visible,
/// non-empty traces, or `[0, 0]` without any.
fn resolve_ranges(state: &mut ChartState) {
    let mut data_ranges: BTreeMap<AxisId, Range> = BTreeMap::new();
    for entry in state.traces.values() {
        let bounds = {
            let data = lock_trace(&entry.trace.shared);
            if !data.visible || !data.has_bounds() {
                continue;
            }
            data.bounds_with_error_bars()
        };
        for (axis, dimension) in [(entry.x_axis, Dimension::X), (entry.y_axis, Dimension::Y)] {
            let range = bounds.range(dimension);
            data_ranges
                .entry(axis)
                .and_modify(|r| *r = r.union(&range))
                .or_insert(range);
        }
    }
    for (id, axis) in state.axes.iter_mut() {
        axis.resolve_range(data_ranges.get(id).copied().unwrap_or_default());
    }
}

/// Rescales dirty axes; returns how many were rescaled.
fn rescale(state: &mut ChartState, force: bool) -> usize {
    let ChartState { axes, traces, .. } = state;
    let epochs: BTreeMap<TraceId, u64> = traces
        .iter()
        .map(|(id, entry)| (*id, lock_trace(&entry.trace.shared).epoch))
        .collect();
    let mut rescaled = 0;
    for axis in axes.values_mut() {
        if !force && !axis.is_dirty_scaling(&epochs) {
            continue;
        }
        let ids: Vec<TraceId> = axis.traces().collect();
        for id in ids {
            if let Some(entry) = traces.get(&id) {
                let mut data = lock_trace(&entry.trace.shared);
                axis.scale_trace(id, &mut data, force);
            }
        }
        axis.mark_scaled();
        rescaled += 1;
    }
    rescaled
}

fn paint_trace(data: &mut TraceData, x_axis: &Axis, y_axis: &Axis, ctx: &PaintContext, surface: &mut dyn Surface) {
    let TraceData {
        points,
        painters,
        error_bars,
        style,
        ..
    } = data;
    let plot = ctx.plot;
    let x_scale = ChartScale::new(x_axis.range(), plot.left, plot.right);
    let y_scale = ChartScale::new(y_axis.range(), plot.bottom, plot.top);
    let to_pixel = |p: DVec2| PixelPoint::new(x_scale.map_scaled(p.x), y_scale.map_scaled(p.y));

    surface.set_color(style.color);
    surface.set_stroke(&style.stroke);
    for painter in painters.iter_mut() {
        painter.start_paint(surface, ctx);
    }

    let mut decorated: Vec<(PixelPoint, &TracePoint)> = Vec::new();
    let mut previous: Option<DVec2> = None;
    for point in points.iter() {
        let current = DVec2::new(point.scaled_x, point.scaled_y);
        if point.is_discontinuity() || current.is_nan() {
            for painter in painters.iter_mut() {
                painter.discontinue(surface, ctx);
            }
            previous = None;
            continue;
        }

        // A point at infinity cannot be interpolated from, the run restarts.
        let clipped = match previous.filter(|p| p.is_finite()) {
            Some(previous) => clip::clip_segment(previous, current),
            None if clip::is_inside(current) => ClippedSegment::Visible {
                from: current,
                to: current,
                to_is_original: true,
            },
            None => ClippedSegment::Hidden,
        };
        if let ClippedSegment::Visible {
            from,
            to,
            to_is_original,
        } = clipped
        {
            let segment = Segment {
                from: to_pixel(from),
                to: to_pixel(to),
                target: to_is_original.then_some(point),
            };
            for painter in painters.iter_mut() {
                painter.paint_segment(&segment, surface, ctx);
            }
            if to_is_original {
                paint_error_bars(error_bars, point, segment.to, &x_scale, &y_scale, plot, surface);
                if !point.painters().is_empty() {
                    decorated.push((segment.to, point));
                }
            }
        }
        if !clip::is_inside(current) {
            for painter in painters.iter_mut() {
                painter.discontinue(surface, ctx);
            }
        }
        previous = Some(current);
    }

    for painter in painters.iter_mut() {
        painter.end_paint(surface, ctx);
    }
    for (at, point) in decorated {
        for painter in point.painters() {
            painter.paint(at, point, surface);
        }
    }
}

fn paint_error_bars(
    policies: &[ErrorBarPolicy],
    point: &TracePoint,
    center: PixelPoint,
    x_scale: &ChartScale,
    y_scale: &ChartScale,
    plot: PlotArea,
    surface: &mut dyn Surface,
) {
    // Bar ends are cut at the plot border.
    for policy in policies {
        let (left, right) = policy.x_extents(point.x());
        let (below, above) = policy.y_extents(point.y());
        let x_end = |extent: f64, value: f64| {
            (extent > 0.0).then(|| PixelPoint::new(x_scale.map(value).clamp(plot.left, plot.right), center.y))
        };
        let y_end = |extent: f64, value: f64| {
            (extent > 0.0).then(|| PixelPoint::new(center.x, y_scale.map(value).clamp(plot.top, plot.bottom)))
        };
        let bars = ErrorBarPixels {
            center,
            left: x_end(left, point.x() - left),
            right: x_end(right, point.x() + right),
            top: y_end(above, point.y() + above),
            bottom: y_end(below, point.y() - below),
        };
        for painter in policy.painters() {
            painter.paint(&bars, surface);
        }
    }
}
