//! Point container of a trace and the maintenance of its cached bounds.

use std::collections::VecDeque;
use std::sync::Arc;

use super::error_bars::{self, ErrorBarPolicy};
use super::storage::{InsertPolicy, TraceStorage};
use super::Trace;
use crate::data_types::{Bounds, Dimension, PointFactory, PointId, TracePoint, TraceStyle};
use crate::error::{ChartError, Result};
use crate::plot_types::{PointPainter, PolylinePainter, TracePainter};

/// Result of inserting a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Inserted {
    /// Id of the point now holding the new coordinates.
    pub id: PointId,
    pub bounds_changed: bool,
}

pub(crate) struct TraceData {
    pub name: String,
    pub storage: TraceStorage,
    pub points: VecDeque<TracePoint>,
    /// Extremes over all points without NaN coordinates; `None` if there is none.
    bounds: Option<Bounds>,
    pub visible: bool,
    pub z_index: i32,
    pub style: TraceStyle,
    pub painters: Vec<Box<dyn TracePainter>>,
    pub highlighters: Vec<Arc<dyn PointPainter>>,
    pub error_bars: Vec<ErrorBarPolicy>,
    pub computing: Vec<Trace>,
    /// Incremented on every point mutation, lets axes skip unchanged traces.
    pub epoch: u64,
    next_point_id: u64,
}

impl TraceData {
    pub fn new(name: String, storage: TraceStorage) -> Self {
        Self {
            name,
            storage,
            points: VecDeque::new(),
            bounds: None,
            visible: true,
            z_index: 0,
            style: TraceStyle::default(),
            painters: vec![Box::new(PolylinePainter::new())],
            highlighters: Vec::new(),
            error_bars: Vec::new(),
            computing: Vec::new(),
            epoch: 0,
            next_point_id: 0,
        }
    }

    /// Cached bounds, all zero for a trace without points.
    pub fn bounds(&self) -> Bounds {
        self.bounds.unwrap_or_default()
    }

    pub fn has_bounds(&self) -> bool {
        self.bounds.is_some()
    }

    pub fn bounds_with_error_bars(&self) -> Bounds {
        match self.bounds {
            Some(bounds) => {
                let points = self.points.iter().map(|p| (p.x, p.y));
                error_bars::extend_bounds(bounds, &self.error_bars, points)
            }
            None => Bounds::default(),
        }
    }

    fn position(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id() == id)
    }

    pub fn point(&self, id: PointId) -> Option<&TracePoint> {
        self.points.iter().find(|p| p.id() == id)
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut TracePoint> {
        self.points.iter_mut().find(|p| p.id() == id)
    }

    pub fn insert(&mut self, x: f64, y: f64, factory: &dyn PointFactory) -> Inserted {
        let before = self.bounds;
        let id = match self.storage.policy {
            InsertPolicy::ReplaceOnDuplicateX => match self.points.iter().position(|p| p.x == x) {
                Some(index) => {
                    let (old_x, old_y) = (self.points[index].x, self.points[index].y);
                    self.points[index].y = y;
                    self.on_changed(old_x, old_y, x, y);
                    self.points[index].id()
                }
                None => self.push(x, y, factory),
            },
            InsertPolicy::Bijective => {
                if let Some(index) = self.points.iter().position(|p| p.x == x) {
                    self.remove_at(index);
                }
                self.push(x, y, factory)
            }
            InsertPolicy::Append | InsertPolicy::SortedByX => self.push(x, y, factory),
        };
        self.epoch += 1;
        Inserted {
            id,
            bounds_changed: before != self.bounds,
        }
    }

    fn push(&mut self, x: f64, y: f64, factory: &dyn PointFactory) -> PointId {
        if let Some(capacity) = self.storage.capacity {
            while self.points.len() >= capacity {
                // Sorted storage keeps its lowest x at the front as well.
                self.remove_at(0);
            }
        }
        let id = PointId(self.next_point_id);
        self.next_point_id += 1;
        let point = factory.create(id, x, y);
        match self.storage.policy {
            InsertPolicy::SortedByX => self.insert_sorted(point),
            _ => self.points.push_back(point),
        }
        self.on_added(x, y);
        id
    }

    /// Points with a NaN x stay at the back of sorted storage.
    fn insert_sorted(&mut self, point: TracePoint) {
        if point.x.is_nan() {
            self.points.push_back(point);
        } else {
            let index = self.points.partition_point(|p| p.x <= point.x);
            self.points.insert(index, point);
        }
    }

    fn remove_at(&mut self, index: usize) -> Option<TracePoint> {
        let point = self.points.remove(index)?;
        self.on_removed(point.x, point.y);
        Some(point)
    }

    pub fn remove(&mut self, id: PointId) -> Result<(TracePoint, bool)> {
        let index = self.position(id).ok_or(ChartError::UnknownPoint(id))?;
        let before = self.bounds;
        let point = self.remove_at(index).ok_or(ChartError::UnknownPoint(id))?;
        self.epoch += 1;
        Ok((point, before != self.bounds))
    }

    /// Moves a point in place; returns whether the bounds changed.
    pub fn change(&mut self, id: PointId, x: f64, y: f64) -> Result<bool> {
        let index = self.position(id).ok_or(ChartError::UnknownPoint(id))?;
        let before = self.bounds;
        let (old_x, old_y) = (self.points[index].x, self.points[index].y);
        self.points[index].x = x;
        self.points[index].y = y;
        if self.storage.policy == InsertPolicy::SortedByX && old_x != x {
            if let Some(point) = self.points.remove(index) {
                self.insert_sorted(point);
            }
        }
        self.on_changed(old_x, old_y, x, y);
        self.epoch += 1;
        Ok(before != self.bounds)
    }

    /// Removes all points; returns whether the bounds changed.
    pub fn clear(&mut self) -> bool {
        let had_bounds = self.bounds.is_some();
        self.points.clear();
        self.bounds = None;
        self.epoch += 1;
        had_bounds
    }

    fn on_added(&mut self, x: f64, y: f64) {
        if x.is_nan() || y.is_nan() {
            return;
        }
        let b = self.bounds.get_or_insert(Bounds {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        });
        b.min_x = b.min_x.min(x);
        b.max_x = b.max_x.max(x);
        b.min_y = b.min_y.min(y);
        b.max_y = b.max_y.max(y);
    }

    fn on_removed(&mut self, x: f64, y: f64) {
        if x.is_nan() || y.is_nan() {
            return;
        }
        let Some(b) = self.bounds else {
            return;
        };
        // Ties count as extremal: another point may hold the same value, but
        // only a rescan can tell.
        if x >= b.max_x || x <= b.min_x {
            self.rescan(Dimension::X);
        }
        if y >= b.max_y || y <= b.min_y {
            self.rescan(Dimension::Y);
        }
    }

    fn on_changed(&mut self, old_x: f64, old_y: f64, x: f64, y: f64) {
        let old_gap = old_x.is_nan() || old_y.is_nan();
        let new_gap = x.is_nan() || y.is_nan();
        match (old_gap, new_gap) {
            (true, true) => {}
            (true, false) => self.on_added(x, y),
            (false, true) => self.on_removed(old_x, old_y),
            (false, false) => {
                self.on_changed_dimension(Dimension::X, old_x, x);
                self.on_changed_dimension(Dimension::Y, old_y, y);
            }
        }
    }

    fn on_changed_dimension(&mut self, dimension: Dimension, old: f64, new: f64) {
        let Some(b) = self.bounds else {
            return;
        };
        let range = b.range(dimension);
        let (min, max) = (range.min, range.max);
        if (old <= min && new > old) || (old >= max && new < old) {
            self.rescan(dimension);
        } else {
            self.set_extremes(dimension, min.min(new), max.max(new));
        }
    }

    fn rescan(&mut self, dimension: Dimension) {
        let values = self
            .points
            .iter()
            .filter(|p| !p.is_discontinuity())
            .map(|p| match dimension {
                Dimension::X => p.x,
                Dimension::Y => p.y,
            });
        let mut extremes: Option<(f64, f64)> = None;
        for v in values {
            extremes = Some(match extremes {
                None => (v, v),
                Some((min, max)) => (min.min(v), max.max(v)),
            });
        }
        match extremes {
            None => self.bounds = None,
            Some((min, max)) if self.bounds.is_some() => self.set_extremes(dimension, min, max),
            Some(_) => self.rescan_all(),
        }
    }

    fn set_extremes(&mut self, dimension: Dimension, min: f64, max: f64) {
        if let Some(b) = self.bounds.as_mut() {
            match dimension {
                Dimension::X => {
                    b.min_x = min;
                    b.max_x = max;
                }
                Dimension::Y => {
                    b.min_y = min;
                    b.max_y = max;
                }
            }
        }
    }

    fn rescan_all(&mut self) {
        self.bounds = None;
        let coordinates: Vec<(f64, f64)> = self.points.iter().map(|p| (p.x, p.y)).collect();
        for (x, y) in coordinates {
            self.on_added(x, y);
        }
    }
}
