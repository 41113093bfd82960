use super::{AxisId, Bounds, TraceId};

/// Change notifications delivered to chart subscribers.
///
/// Events are queued while the chart is locked and dispatched once every lock
/// has been released, so callbacks may call back into the chart.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartEvent {
    TraceAdded(TraceId),
    TraceRemoved(TraceId),
    AxisAdded(AxisId),
    AxisRemoved(AxisId),
    /// Range policy, title, visibility, grid or tick spacing of an axis changed.
    AxisChanged(AxisId),
    /// The cached extremes of a trace changed after a point mutation.
    TraceBoundsChanged { trace: TraceId, bounds: Bounds },
    /// Visibility, z-index, style, painters or error bars of a trace changed.
    TraceStyleChanged(TraceId),
    ConfigChanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    TraceAdded,
    TraceRemoved,
    AxisAdded,
    AxisRemoved,
    AxisChanged,
    TraceBoundsChanged,
    TraceStyleChanged,
    ConfigChanged,
}

impl ChartEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TraceAdded(_) => EventKind::TraceAdded,
            Self::TraceRemoved(_) => EventKind::TraceRemoved,
            Self::AxisAdded(_) => EventKind::AxisAdded,
            Self::AxisRemoved(_) => EventKind::AxisRemoved,
            Self::AxisChanged(_) => EventKind::AxisChanged,
            Self::TraceBoundsChanged { .. } => EventKind::TraceBoundsChanged,
            Self::TraceStyleChanged(_) => EventKind::TraceStyleChanged,
            Self::ConfigChanged => EventKind::ConfigChanged,
        }
    }
}

/// Handle returned by `Chart2D::subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);
