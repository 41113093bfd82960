//! Lock acquisition for charts and traces.
//!
//! Every code path that needs a chart and one of its traces goes through this
//! module, which always takes the chart lock first. A thread-local counter of
//! held trace locks records any chart-lock acquisition made while a trace lock
//! is held; [`lock_order_violations`] exposes the count to tests.

use std::cell::Cell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::MutexGuard;

use crate::chart::{ChartShared, ChartState};
use crate::data_types::{ChartEvent, TraceId};
use crate::error::{ChartError, Result};
use crate::trace::data::TraceData;
use crate::trace::{Trace, TraceShared};

thread_local! {
    static TRACE_LOCK_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static VIOLATIONS: AtomicUsize = AtomicUsize::new(0);

/// Number of chart locks taken while the same thread held a trace lock.
pub fn lock_order_violations() -> usize {
    VIOLATIONS.load(Ordering::SeqCst)
}

pub(crate) fn lock_chart(shared: &ChartShared) -> MutexGuard<'_, ChartState> {
    let held = TRACE_LOCK_DEPTH.with(Cell::get);
    if held > 0 {
        VIOLATIONS.fetch_add(1, Ordering::SeqCst);
        tracing::error!(held, "chart lock acquired while holding a trace lock");
    }
    shared.state.lock()
}

pub(crate) struct TraceGuard<'a> {
    guard: MutexGuard<'a, TraceData>,
}

pub(crate) fn lock_trace(shared: &TraceShared) -> TraceGuard<'_> {
    let guard = shared.data.lock();
    TRACE_LOCK_DEPTH.with(|depth| depth.set(depth.get() + 1));
    TraceGuard { guard }
}

impl Deref for TraceGuard<'_> {
    type Target = TraceData;

    fn deref(&self) -> &TraceData {
        &self.guard
    }
}

impl DerefMut for TraceGuard<'_> {
    fn deref_mut(&mut self) -> &mut TraceData {
        &mut self.guard
    }
}

impl Drop for TraceGuard<'_> {
    fn drop(&mut self) {
        TRACE_LOCK_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Chart state and trace data of an attached trace, both locked.
pub(crate) struct Locked<'a> {
    pub chart: &'a mut ChartState,
    pub trace: &'a mut TraceData,
    pub id: TraceId,
    /// Dispatched to subscribers after both locks are released.
    pub events: &'a mut Vec<ChartEvent>,
}

/// Runs `f` with the owning chart locked first and the trace second.
///
/// Fails with [`ChartError::TraceNotAttached`] when the trace has no chart,
/// including when it was removed concurrently.
pub(crate) fn with_chart_and_trace<R>(
    trace: &Trace,
    f: impl FnOnce(Locked<'_>) -> Result<R>,
) -> Result<R> {
    let Some((chart, id)) = trace.attachment() else {
        tracing::warn!("point mutation on a trace without chart");
        return Err(ChartError::TraceNotAttached);
    };
    let mut events = Vec::new();
    let result = {
        let mut state = lock_chart(&chart);
        if !state.holds(id, trace) {
            tracing::warn!(?id, "trace was removed from its chart");
            return Err(ChartError::TraceNotAttached);
        }
        let mut data = lock_trace(&trace.shared);
        f(Locked {
            chart: &mut state,
            trace: &mut data,
            id,
            events: &mut events,
        })
    };
    if result.is_ok() {
        chart.request_repaint();
    }
    chart.emit(events);
    result
}

/// Runs `f` on the trace data, locking the owning chart first if there is one.
///
/// Used for configuration that is valid on detached traces as well.
pub(crate) fn with_trace<R>(
    trace: &Trace,
    f: impl FnOnce(&mut TraceData, Option<TraceId>, &mut Vec<ChartEvent>) -> R,
) -> R {
    let mut events = Vec::new();
    let attached = trace.attachment();
    let result = match &attached {
        Some((chart, id)) => {
            let state = lock_chart(chart);
            let id = state.holds(*id, trace).then_some(*id);
            let mut data = lock_trace(&trace.shared);
            let result = f(&mut data, id, &mut events);
            drop(data);
            drop(state);
            result
        }
        None => {
            let mut data = lock_trace(&trace.shared);
            f(&mut data, None, &mut events)
        }
    };
    if let Some((chart, _)) = attached {
        chart.request_repaint();
        chart.emit(events);
    }
    result
}
