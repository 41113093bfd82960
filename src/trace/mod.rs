//! Traces: ordered point series attached to at most one chart.

pub(crate) mod data;
pub mod error_bars;
pub mod storage;

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

pub use error_bars::{ErrorBarPolicy, ErrorValue};
pub use storage::{InsertPolicy, TraceStorage};

use crate::chart::{Chart2D, ChartShared};
use crate::data_types::{Bounds, ChartEvent, PointId, TraceId, TracePoint, TraceStyle};
use crate::data_types::{Color, Stroke};
use crate::error::{ChartError, Result};
use crate::plot_types::{PointPainter, TracePainter};
use crate::sync::{self, lock_trace};
use data::TraceData;

/// Serializes the cycle check and insertion of computing trace links, which
/// may span traces of different charts. Taken before any chart or trace lock.
static COMPUTING_LINKS: Mutex<()> = parking_lot::const_mutex(());

/// Chart back-reference of an attached trace.
#[derive(Clone)]
pub(crate) struct Attachment {
    pub chart: Weak<ChartShared>,
    pub id: TraceId,
}

pub(crate) struct TraceShared {
    /// Written only while the owning chart is locked; never held across
    /// another lock acquisition.
    pub(crate) owner: RwLock<Option<Attachment>>,
    pub(crate) data: Mutex<TraceData>,
}

/// Handle to a trace. Clones refer to the same trace.
///
/// Point mutations require the trace to be attached to a chart so the chart
/// can keep its axes consistent; they fail with
/// [`ChartError::TraceNotAttached`] otherwise. Style, painters and error bars
/// can be configured before the trace is added.
#[derive(Clone)]
pub struct Trace {
    pub(crate) shared: Arc<TraceShared>,
}

impl Trace {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(TraceData::new(name.into(), TraceStorage::unbounded()))
    }

    pub fn with_storage(name: impl Into<String>, storage: TraceStorage) -> Result<Self> {
        storage.validate()?;
        Ok(Self::from_data(TraceData::new(name.into(), storage)))
    }

    /// Trace that keeps at most `capacity` points, evicting the oldest.
    pub fn ring_buffer(name: impl Into<String>, capacity: usize) -> Result<Self> {
        Self::with_storage(name, TraceStorage::ring_buffer(capacity))
    }

    fn from_data(data: TraceData) -> Self {
        Self {
            shared: Arc::new(TraceShared {
                owner: RwLock::new(None),
                data: Mutex::new(data),
            }),
        }
    }

    pub fn ptr_eq(&self, other: &Trace) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    pub(crate) fn attachment(&self) -> Option<(Arc<ChartShared>, TraceId)> {
        let owner = self.shared.owner.read();
        let attachment = owner.as_ref()?;
        Some((attachment.chart.upgrade()?, attachment.id))
    }

    /// Id within the owning chart, `None` while detached.
    pub fn id(&self) -> Option<TraceId> {
        self.attachment().map(|(_, id)| id)
    }

    pub fn chart(&self) -> Option<Chart2D> {
        self.attachment().map(|(shared, _)| Chart2D::from_shared(shared))
    }

    pub fn is_attached(&self) -> bool {
        self.attachment().is_some()
    }

    // ---- Points ----

    pub fn add_point(&self, x: f64, y: f64) -> Result<PointId> {
        let (id, computing) = sync::with_chart_and_trace(self, |locked| {
            let factory = locked.chart.point_factory.clone();
            let inserted = locked.trace.insert(x, y, factory.as_ref());
            if inserted.bounds_changed {
                locked.events.push(ChartEvent::TraceBoundsChanged {
                    trace: locked.id,
                    bounds: locked.trace.bounds(),
                });
            }
            Ok((inserted.id, locked.trace.computing.clone()))
        })?;
        forward(&computing, &[(x, y)]);
        Ok(id)
    }

    /// Adds all points under a single lock acquisition.
    pub fn add_points(&self, points: impl IntoIterator<Item = (f64, f64)>) -> Result<Vec<PointId>> {
        let points: Vec<(f64, f64)> = points.into_iter().collect();
        let (ids, computing) = sync::with_chart_and_trace(self, |locked| {
            let factory = locked.chart.point_factory.clone();
            let mut bounds_changed = false;
            let ids = points
                .iter()
                .map(|&(x, y)| {
                    let inserted = locked.trace.insert(x, y, factory.as_ref());
                    bounds_changed |= inserted.bounds_changed;
                    inserted.id
                })
                .collect::<Vec<_>>();
            if bounds_changed {
                locked.events.push(ChartEvent::TraceBoundsChanged {
                    trace: locked.id,
                    bounds: locked.trace.bounds(),
                });
            }
            Ok((ids, locked.trace.computing.clone()))
        })?;
        forward(&computing, &points);
        Ok(ids)
    }

    /// Removes a point and returns its coordinates.
    pub fn remove_point(&self, id: PointId) -> Result<(f64, f64)> {
        sync::with_chart_and_trace(self, |locked| {
            let (point, bounds_changed) = locked.trace.remove(id)?;
            if locked.chart.highlighted == Some((locked.id, id)) {
                locked.chart.highlighted = None;
            }
            if bounds_changed {
                locked.events.push(ChartEvent::TraceBoundsChanged {
                    trace: locked.id,
                    bounds: locked.trace.bounds(),
                });
            }
            Ok((point.x(), point.y()))
        })
    }

    /// Moves an existing point to new coordinates.
    pub fn set_point(&self, id: PointId, x: f64, y: f64) -> Result<()> {
        sync::with_chart_and_trace(self, |locked| {
            if locked.trace.change(id, x, y)? {
                locked.events.push(ChartEvent::TraceBoundsChanged {
                    trace: locked.id,
                    bounds: locked.trace.bounds(),
                });
            }
            Ok(())
        })
    }

    pub fn remove_all_points(&self) -> Result<()> {
        sync::with_chart_and_trace(self, |locked| {
            if matches!(locked.chart.highlighted, Some((trace, _)) if trace == locked.id) {
                locked.chart.highlighted = None;
            }
            if locked.trace.clear() {
                locked.events.push(ChartEvent::TraceBoundsChanged {
                    trace: locked.id,
                    bounds: Bounds::default(),
                });
            }
            Ok(())
        })
    }

    // ---- Queries ----

    fn read<R>(&self, f: impl FnOnce(&TraceData) -> R) -> R {
        let data = lock_trace(&self.shared);
        f(&data)
    }

    /// Bounds over all points with finite coordinates; all zero when there is
    /// none.
    pub fn bounds(&self) -> Bounds {
        self.read(TraceData::bounds)
    }

    /// Bounds widened by the enabled error bars.
    pub fn bounds_with_error_bars(&self) -> Bounds {
        self.read(TraceData::bounds_with_error_bars)
    }

    pub fn min_x(&self) -> f64 {
        self.bounds().min_x
    }

    pub fn max_x(&self) -> f64 {
        self.bounds().max_x
    }

    pub fn min_y(&self) -> f64 {
        self.bounds().min_y
    }

    pub fn max_y(&self) -> f64 {
        self.bounds().max_y
    }

    pub fn len(&self) -> usize {
        self.read(|data| data.points.len())
    }

    pub fn is_empty(&self) -> bool {
        self.read(|data| data.points.is_empty())
    }

    /// Snapshot of the points in storage order.
    pub fn points(&self) -> Vec<TracePoint> {
        self.read(|data| data.points.iter().cloned().collect())
    }

    pub fn point(&self, id: PointId) -> Option<TracePoint> {
        self.read(|data| data.point(id).cloned())
    }

    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.read(|data| data.points.iter().map(|p| (p.x(), p.y())).collect())
    }

    pub fn storage(&self) -> TraceStorage {
        self.read(|data| data.storage)
    }

    // ---- Appearance ----

    pub fn name(&self) -> String {
        self.read(|data| data.name.clone())
    }

    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.configure(move |data| data.name = name);
    }

    fn configure(&self, f: impl FnOnce(&mut TraceData)) {
        sync::with_trace(self, |data, id, events| {
            f(data);
            if let Some(id) = id {
                events.push(ChartEvent::TraceStyleChanged(id));
            }
        });
    }

    pub fn is_visible(&self) -> bool {
        self.read(|data| data.visible)
    }

    /// Invisible traces are neither painted nor considered for axis ranges.
    pub fn set_visible(&self, visible: bool) {
        self.configure(|data| data.visible = visible);
    }

    pub fn z_index(&self) -> i32 {
        self.read(|data| data.z_index)
    }

    /// Traces are painted in ascending z-index.
    pub fn set_z_index(&self, z_index: i32) {
        self.configure(|data| data.z_index = z_index);
    }

    pub fn style(&self) -> TraceStyle {
        self.read(|data| data.style.clone())
    }

    pub fn set_style(&self, style: TraceStyle) {
        self.configure(|data| data.style = style);
    }

    pub fn set_color(&self, color: Color) {
        self.configure(|data| data.style.color = color);
    }

    pub fn set_stroke(&self, stroke: Stroke) {
        self.configure(|data| data.style.stroke = stroke);
    }

    /// Replaces all trace painters with `painter`.
    pub fn set_painter(&self, painter: Box<dyn TracePainter>) {
        self.configure(|data| data.painters = vec![painter]);
    }

    pub fn add_painter(&self, painter: Box<dyn TracePainter>) {
        self.configure(|data| data.painters.push(painter));
    }

    pub fn painter_count(&self) -> usize {
        self.read(|data| data.painters.len())
    }

    // ---- Highlighting ----

    /// Painter attached to the point nearest the pointer while point
    /// highlighting is enabled.
    pub fn add_point_highlighter(&self, highlighter: Arc<dyn PointPainter>) {
        self.configure(|data| data.highlighters.push(highlighter));
    }

    /// Removes a highlighter, also from any point currently carrying it.
    pub fn remove_point_highlighter(&self, highlighter: &Arc<dyn PointPainter>) -> bool {
        sync::with_trace(self, |data, _, _| {
            let before = data.highlighters.len();
            data.highlighters.retain(|h| !Arc::ptr_eq(h, highlighter));
            for point in data.points.iter_mut() {
                point.remove_painter(highlighter);
            }
            data.highlighters.len() != before
        })
    }

    pub fn point_highlighters(&self) -> Vec<Arc<dyn PointPainter>> {
        self.read(|data| data.highlighters.clone())
    }

    // ---- Error bars ----

    pub fn add_error_bar_policy(&self, policy: ErrorBarPolicy) {
        self.configure(|data| data.error_bars.push(policy));
    }

    pub fn clear_error_bar_policies(&self) {
        self.configure(|data| data.error_bars.clear());
    }

    pub fn error_bar_policies(&self) -> Vec<ErrorBarPolicy> {
        self.read(|data| data.error_bars.clone())
    }

    // ---- Computing traces ----

    /// Forwards every point subsequently added to this trace to `target`.
    ///
    /// Fails with [`ChartError::ComputingTraceCycle`] if `target` is this
    /// trace or already forwards (directly or transitively) into it.
    pub fn add_computing_trace(&self, target: &Trace) -> Result<()> {
        let _links = COMPUTING_LINKS.lock();
        if target.reaches(self) {
            return Err(ChartError::ComputingTraceCycle);
        }
        let target = target.clone();
        sync::with_trace(self, move |data, _, _| {
            if !data.computing.iter().any(|c| c.ptr_eq(&target)) {
                data.computing.push(target);
            }
        });
        Ok(())
    }

    pub fn remove_computing_trace(&self, target: &Trace) -> bool {
        sync::with_trace(self, |data, _, _| {
            let before = data.computing.len();
            data.computing.retain(|c| !c.ptr_eq(target));
            data.computing.len() != before
        })
    }

    pub fn computing_traces(&self) -> Vec<Trace> {
        self.read(|data| data.computing.clone())
    }

    /// Whether `other` is this trace or reachable through computing traces.
    fn reaches(&self, other: &Trace) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![self.clone()];
        while let Some(trace) = pending.pop() {
            if trace.ptr_eq(other) {
                return true;
            }
            if visited.insert(Arc::as_ptr(&trace.shared)) {
                pending.extend(trace.computing_traces());
            }
        }
        false
    }
}

/// Runs outside of all locks; a failing target does not stop the others.
fn forward(computing: &[Trace], points: &[(f64, f64)]) {
    for target in computing {
        if let Err(error) = target.add_points(points.iter().copied()) {
            tracing::warn!(%error, "computing trace rejected forwarded points");
        }
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = lock_trace(&self.shared);
        f.debug_struct("Trace")
            .field("name", &data.name)
            .field("points", &data.points.len())
            .field("bounds", &data.bounds())
            .finish()
    }
}
