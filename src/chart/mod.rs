//! Chart Model
//!
//! `Chart2D` is the single source of truth of a chart: it owns the axes, the
//! registry of attached traces and the paint configuration. All of it lives
//! behind one chart lock; every trace carries its own lock for its points.
//! Code that needs both always takes the chart lock first (see
//! [`crate::sync`]), which is what keeps concurrent producers and the paint
//! pass free of deadlocks.

pub mod input;
pub mod renderer;

pub use renderer::PaintMode;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::axis::Axis;
use crate::config::ChartConfig;
use crate::data_types::{
    AxisEdge, AxisId, ChartEvent, DefaultPointFactory, Dimension, EventKind, ListenerId, PointFactory,
    PointId, TraceId,
};
use crate::error::{ChartError, Result};
use crate::gutter_manager::PlotArea;
use crate::sync::lock_chart;
use crate::trace::{Attachment, Trace};

pub(crate) struct TraceEntry {
    pub trace: Trace,
    pub x_axis: AxisId,
    pub y_axis: AxisId,
}

pub(crate) struct ChartState {
    pub config: ChartConfig,
    pub axes: BTreeMap<AxisId, Axis>,
    /// Axis ids per edge (see `AxisEdge::index`), innermost first.
    pub edges: [Vec<AxisId>; 4],
    pub traces: BTreeMap<TraceId, TraceEntry>,
    pub point_factory: Arc<dyn PointFactory>,
    /// Plot rectangle of the last paint pass.
    pub plot_area: Option<PlotArea>,
    pub highlighted: Option<(TraceId, PointId)>,
    pub x_start_peer: Option<Weak<ChartShared>>,
    next_axis: usize,
    next_trace: u64,
}

impl ChartState {
    fn new(config: ChartConfig) -> Self {
        Self {
            config,
            axes: BTreeMap::new(),
            edges: Default::default(),
            traces: BTreeMap::new(),
            point_factory: Arc::new(DefaultPointFactory),
            plot_area: None,
            highlighted: None,
            x_start_peer: None,
            next_axis: 0,
            next_trace: 0,
        }
    }

    /// Whether `id` is registered and refers to `trace`.
    pub fn holds(&self, id: TraceId, trace: &Trace) -> bool {
        self.traces.get(&id).is_some_and(|entry| entry.trace.ptr_eq(trace))
    }

    fn insert_axis(&mut self, edge: AxisEdge, mut axis: Axis) -> AxisId {
        let id = AxisId(self.next_axis);
        self.next_axis += 1;
        axis.set_edge(edge);
        self.axes.insert(id, axis);
        self.edges[edge.index()].push(id);
        id
    }

    fn check_axis(&self, id: AxisId, expected: Dimension) -> Result<()> {
        let axis = self.axes.get(&id).ok_or(ChartError::UnknownAxis(id))?;
        if axis.dimension() != expected {
            return Err(ChartError::DimensionMismatch { axis: id, expected });
        }
        Ok(())
    }

    fn primary_axis(&self, edge: AxisEdge) -> Result<AxisId> {
        // Every edge keeps at least one axis.
        self.edges[edge.index()]
            .first()
            .copied()
            .ok_or(ChartError::LastAxisOnEdge(edge))
    }
}

type Callback = Arc<dyn Fn(&ChartEvent) + Send + Sync>;

#[derive(Clone)]
struct Listener {
    id: ListenerId,
    filter: Option<EventKind>,
    callback: Callback,
}

pub(crate) struct ChartShared {
    pub(crate) state: Mutex<ChartState>,
    listeners: RwLock<Vec<Listener>>,
    next_listener: AtomicU64,
    repaint_requested: AtomicBool,
    /// Left gutter of the last pass before peer synchronization.
    pub(crate) natural_x_start: AtomicI32,
}

impl ChartShared {
    pub(crate) fn request_repaint(&self) {
        self.repaint_requested.store(true, Ordering::Release);
    }

    /// Delivers events; must be called without holding any chart or trace
    /// lock.
    pub(crate) fn emit(&self, events: Vec<ChartEvent>) {
        if events.is_empty() {
            return;
        }
        let listeners = self.listeners.read().clone();
        for event in &events {
            for listener in &listeners {
                if listener.filter.map_or(true, |kind| kind == event.kind()) {
                    (listener.callback)(event);
                }
            }
        }
    }
}

/// A two-dimensional chart. Clones are handles to the same chart.
///
/// A new chart has one axis on every edge; the top and right ones are hidden.
#[derive(Clone)]
pub struct Chart2D {
    pub(crate) shared: Arc<ChartShared>,
}

impl Chart2D {
    pub fn new() -> Self {
        Self::with_config(ChartConfig::default())
    }

    pub fn with_config(config: ChartConfig) -> Self {
        let mut state = ChartState::new(config);
        state.insert_axis(AxisEdge::Bottom, Axis::new());
        state.insert_axis(AxisEdge::Left, Axis::new());
        state.insert_axis(AxisEdge::Top, Axis::new().hidden());
        state.insert_axis(AxisEdge::Right, Axis::new().hidden());
        Self {
            shared: Arc::new(ChartShared {
                state: Mutex::new(state),
                listeners: RwLock::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                repaint_requested: AtomicBool::new(true),
                natural_x_start: AtomicI32::new(0),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<ChartShared>) -> Self {
        Self { shared }
    }

    pub fn ptr_eq(&self, other: &Chart2D) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    fn commit(&self, events: Vec<ChartEvent>) {
        self.shared.request_repaint();
        self.shared.emit(events);
    }

    // ---- Configuration ----

    pub fn config(&self) -> ChartConfig {
        lock_chart(&self.shared).config.clone()
    }

    pub fn set_config(&self, config: ChartConfig) {
        {
            let mut state = lock_chart(&self.shared);
            if !config.point_highlighting {
                input::clear_highlight(&mut state);
            }
            state.config = config;
        }
        self.commit(vec![ChartEvent::ConfigChanged]);
    }

    pub fn min_paint_latency(&self) -> Duration {
        lock_chart(&self.shared).config.min_paint_latency()
    }

    /// Factory used for points added from now on.
    pub fn set_point_factory(&self, factory: Arc<dyn PointFactory>) {
        lock_chart(&self.shared).point_factory = factory;
    }

    // ---- Axes ----

    /// Adds `axis` on `edge`, outside the axes already there.
    pub fn add_axis(&self, edge: AxisEdge, axis: Axis) -> AxisId {
        let id = lock_chart(&self.shared).insert_axis(edge, axis);
        tracing::debug!(?id, ?edge, "axis added");
        self.commit(vec![ChartEvent::AxisAdded(id)]);
        id
    }

    /// Removes an axis without traces; the last axis of an edge stays.
    pub fn remove_axis(&self, id: AxisId) -> Result<Axis> {
        let axis = {
            let mut state = lock_chart(&self.shared);
            let axis = state.axes.get(&id).ok_or(ChartError::UnknownAxis(id))?;
            let edge = axis.edge();
            if axis.has_traces() {
                tracing::warn!(?id, "refusing to remove an axis with traces");
                return Err(ChartError::AxisInUse(id));
            }
            if state.edges[edge.index()].len() == 1 {
                return Err(ChartError::LastAxisOnEdge(edge));
            }
            state.edges[edge.index()].retain(|a| *a != id);
            state.axes.remove(&id).ok_or(ChartError::UnknownAxis(id))?
        };
        self.commit(vec![ChartEvent::AxisRemoved(id)]);
        Ok(axis)
    }

    /// Axes of an edge, innermost first.
    pub fn axes(&self, edge: AxisEdge) -> Vec<AxisId> {
        lock_chart(&self.shared).edges[edge.index()].clone()
    }

    pub fn axis_at(&self, edge: AxisEdge, index: usize) -> Option<AxisId> {
        lock_chart(&self.shared).edges[edge.index()].get(index).copied()
    }

    /// Runs `f` on an axis. `f` must not call back into the chart.
    pub fn with_axis<R>(&self, id: AxisId, f: impl FnOnce(&Axis) -> R) -> Result<R> {
        let state = lock_chart(&self.shared);
        let axis = state.axes.get(&id).ok_or(ChartError::UnknownAxis(id))?;
        Ok(f(axis))
    }

    /// Reconfigures an axis. `f` must not call back into the chart.
    pub fn with_axis_mut<R>(&self, id: AxisId, f: impl FnOnce(&mut Axis) -> R) -> Result<R> {
        let result = {
            let mut state = lock_chart(&self.shared);
            let axis = state.axes.get_mut(&id).ok_or(ChartError::UnknownAxis(id))?;
            f(axis)
        };
        self.commit(vec![ChartEvent::AxisChanged(id)]);
        Ok(result)
    }

    // ---- Traces ----

    /// Attaches `trace` to the innermost bottom and left axes.
    pub fn add_trace(&self, trace: &Trace) -> Result<TraceId> {
        let (x_axis, y_axis) = {
            let state = lock_chart(&self.shared);
            (
                state.primary_axis(AxisEdge::Bottom)?,
                state.primary_axis(AxisEdge::Left)?,
            )
        };
        self.add_trace_on(trace, x_axis, y_axis)
    }

    pub fn add_trace_on(&self, trace: &Trace, x_axis: AxisId, y_axis: AxisId) -> Result<TraceId> {
        let id = {
            let mut state = lock_chart(&self.shared);
            state.check_axis(x_axis, Dimension::X)?;
            state.check_axis(y_axis, Dimension::Y)?;

            let mut owner = trace.shared.owner.write();
            if owner.as_ref().is_some_and(|a| a.chart.strong_count() > 0) {
                tracing::warn!("trace is already attached to a chart");
                return Err(ChartError::TraceAlreadyAttached);
            }
            let id = TraceId(state.next_trace);
            state.next_trace += 1;
            *owner = Some(Attachment {
                chart: Arc::downgrade(&self.shared),
                id,
            });
            drop(owner);

            for axis_id in [x_axis, y_axis] {
                if let Some(axis) = state.axes.get_mut(&axis_id) {
                    axis.add_trace(id);
                }
            }
            state.traces.insert(
                id,
                TraceEntry {
                    trace: trace.clone(),
                    x_axis,
                    y_axis,
                },
            );
            id
        };
        tracing::debug!(?id, ?x_axis, ?y_axis, "trace added");
        self.commit(vec![ChartEvent::TraceAdded(id)]);
        Ok(id)
    }

    fn attached_id(&self, trace: &Trace) -> Option<TraceId> {
        let owner = trace.shared.owner.read();
        owner
            .as_ref()
            .filter(|a| std::ptr::eq(a.chart.as_ptr(), Arc::as_ptr(&self.shared)))
            .map(|a| a.id)
    }

    pub fn remove_trace(&self, trace: &Trace) -> Result<()> {
        let id = {
            let mut state = lock_chart(&self.shared);
            let id = self
                .attached_id(trace)
                .filter(|id| state.holds(*id, trace))
                .ok_or(ChartError::TraceNotAttached)?;
            detach(&mut state, id);
            id
        };
        tracing::debug!(?id, "trace removed");
        self.commit(vec![ChartEvent::TraceRemoved(id)]);
        Ok(())
    }

    /// Detaches every trace and returns them. A no-op on an empty chart.
    pub fn remove_all_traces(&self) -> Vec<Trace> {
        let (removed, events): (Vec<Trace>, Vec<ChartEvent>) = {
            let mut state = lock_chart(&self.shared);
            let ids: Vec<TraceId> = state.traces.keys().copied().collect();
            ids.into_iter()
                .filter_map(|id| detach(&mut state, id).map(|t| (t, ChartEvent::TraceRemoved(id))))
                .unzip()
        };
        if !removed.is_empty() {
            self.commit(events);
        }
        removed
    }

    /// Attached traces in the order they were added.
    pub fn traces(&self) -> Vec<Trace> {
        let state = lock_chart(&self.shared);
        state.traces.values().map(|entry| entry.trace.clone()).collect()
    }

    pub fn trace(&self, id: TraceId) -> Option<Trace> {
        let state = lock_chart(&self.shared);
        state.traces.get(&id).map(|entry| entry.trace.clone())
    }

    /// The x and y axis of `trace`, in that order; empty when the trace is
    /// not attached to this chart.
    pub fn find_axes_of_trace(&self, trace: &Trace) -> Vec<AxisId> {
        let state = lock_chart(&self.shared);
        state
            .traces
            .values()
            .find(|entry| entry.trace.ptr_eq(trace))
            .map(|entry| vec![entry.x_axis, entry.y_axis])
            .unwrap_or_default()
    }

    // ---- Repaint and geometry ----

    pub fn request_repaint(&self) {
        self.shared.request_repaint();
    }

    /// Returns and clears the pending repaint request.
    pub fn take_repaint_request(&self) -> bool {
        self.shared.repaint_requested.swap(false, Ordering::AcqRel)
    }

    /// Plot rectangle of the last paint pass.
    pub fn plot_area(&self) -> Option<PlotArea> {
        lock_chart(&self.shared).plot_area
    }

    /// Lines up the left edge of both charts' plot areas.
    ///
    /// Each pass publishes the chart's own left gutter and uses the larger of
    /// its own and the peer's; the peer catches up on its next pass.
    pub fn synchronize_x_start_with(&self, other: &Chart2D) {
        if self.ptr_eq(other) {
            return;
        }
        lock_chart(&self.shared).x_start_peer = Some(Arc::downgrade(&other.shared));
        lock_chart(&other.shared).x_start_peer = Some(Arc::downgrade(&self.shared));
        self.request_repaint();
        other.request_repaint();
    }

    pub fn unsynchronize_x_start(&self) {
        let peer = lock_chart(&self.shared).x_start_peer.take();
        if let Some(peer) = peer.and_then(|p| p.upgrade()) {
            let mut peer_state = lock_chart(&peer);
            let points_back = peer_state
                .x_start_peer
                .as_ref()
                .is_some_and(|p| std::ptr::eq(p.as_ptr(), Arc::as_ptr(&self.shared)));
            if points_back {
                peer_state.x_start_peer = None;
            }
            drop(peer_state);
            peer.request_repaint();
        }
        self.request_repaint();
    }

    // ---- Events ----

    pub fn subscribe(&self, kind: EventKind, callback: impl Fn(&ChartEvent) + Send + Sync + 'static) -> ListenerId {
        self.add_listener(Some(kind), Arc::new(callback))
    }

    pub fn subscribe_all(&self, callback: impl Fn(&ChartEvent) + Send + Sync + 'static) -> ListenerId {
        self.add_listener(None, Arc::new(callback))
    }

    fn add_listener(&self, filter: Option<EventKind>, callback: Callback) -> ListenerId {
        let id = ListenerId(self.shared.next_listener.fetch_add(1, Ordering::Relaxed));
        self.shared.listeners.write().push(Listener { id, filter, callback });
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.shared.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }
}

/// Unregisters a trace from the registry and its axes and clears its
/// back-reference.
fn detach(state: &mut ChartState, id: TraceId) -> Option<Trace> {
    if matches!(state.highlighted, Some((trace, _)) if trace == id) {
        input::clear_highlight(state);
    }
    let entry = state.traces.remove(&id)?;
    for axis_id in [entry.x_axis, entry.y_axis] {
        if let Some(axis) = state.axes.get_mut(&axis_id) {
            axis.remove_trace(id);
        }
    }
    *entry.trace.shared.owner.write() = None;
    Some(entry.trace)
}

impl Default for Chart2D {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Chart2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock_chart(&self.shared);
        f.debug_struct("Chart2D")
            .field("axes", &state.axes.len())
            .field("traces", &state.traces.len())
            .field("plot_area", &state.plot_area)
            .finish()
    }
}
