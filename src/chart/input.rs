//! Pointer tracking: nearest-point search and point highlighting.

use glam::DVec2;

use super::{Chart2D, ChartState};
use crate::data_types::{PointId, TraceId};
use crate::point_finder::NearestPoint;
use crate::sync::{lock_chart, lock_trace};

impl Chart2D {
    /// Point of a visible trace nearest to the given pixel, measured in
    /// normalized coordinates with the configured metric.
    ///
    /// Uses the geometry of the last paint pass; `None` before the first pass
    /// or when no trace has a scaled point.
    pub fn find_nearest_point(&self, px: i32, py: i32) -> Option<NearestPoint> {
        let state = lock_chart(&self.shared);
        find_nearest(&state, px, py)
    }

    /// Moves the highlight to the point nearest the pointer.
    ///
    /// Does nothing unless point highlighting is enabled in the config. The
    /// highlighters of the trace are attached to the new point and removed
    /// from the previous one; a repaint is requested when the point changes.
    pub fn on_pointer_moved(&self, px: i32, py: i32) -> Option<NearestPoint> {
        let (nearest, changed) = {
            let mut state = lock_chart(&self.shared);
            if !state.config.point_highlighting {
                return None;
            }
            let nearest = find_nearest(&state, px, py);
            let key = nearest.map(|n| (n.trace, n.point));
            let changed = key != state.highlighted;
            if changed {
                clear_highlight(&mut state);
                if let Some((trace, point)) = key {
                    attach_highlight(&mut state, trace, point);
                }
            }
            (nearest, changed)
        };
        if changed {
            self.request_repaint();
        }
        nearest
    }

    pub fn highlighted_point(&self) -> Option<(TraceId, PointId)> {
        lock_chart(&self.shared).highlighted
    }
}

fn find_nearest(state: &ChartState, px: i32, py: i32) -> Option<NearestPoint> {
    let plot = state.plot_area?;
    if plot.width() <= 0 || plot.height() <= 0 {
        return None;
    }
    let target = DVec2::new(
        (px - plot.left) as f64 / plot.width() as f64,
        (plot.bottom - py) as f64 / plot.height() as f64,
    );
    let finder = state.config.point_finder;

    let mut best: Option<NearestPoint> = None;
    for (&id, entry) in &state.traces {
        let data = lock_trace(&entry.trace.shared);
        if !data.visible {
            continue;
        }
        let Some((index, distance)) = finder.nearest(&data.points, target) else {
            continue;
        };
        if best.as_ref().is_some_and(|b| b.distance <= distance) {
            continue;
        }
        let point = &data.points[index];
        best = Some(NearestPoint {
            trace: id,
            point: point.id(),
            x: point.x(),
            y: point.y(),
            distance,
        });
    }
    best
}

fn attach_highlight(state: &mut ChartState, trace: TraceId, point: PointId) {
    let Some(entry) = state.traces.get(&trace) else {
        return;
    };
    let mut data = lock_trace(&entry.trace.shared);
    let highlighters = data.highlighters.clone();
    if let Some(p) = data.point_mut(point) {
        for highlighter in highlighters {
            p.add_painter(highlighter);
        }
    }
    drop(data);
    state.highlighted = Some((trace, point));
}

/// Removes the highlighters of the highlighted trace from its point.
pub(crate) fn clear_highlight(state: &mut ChartState) {
    let Some((trace, point)) = state.highlighted.take() else {
        return;
    };
    let Some(entry) = state.traces.get(&trace) else {
        return;
    };
    let mut data = lock_trace(&entry.trace.shared);
    let highlighters = data.highlighters.clone();
    if let Some(p) = data.point_mut(point) {
        for highlighter in &highlighters {
            p.remove_painter(highlighter);
        }
    }
}
