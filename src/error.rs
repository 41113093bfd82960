use thiserror::Error;

use crate::data_types::{AxisEdge, AxisId, Dimension, PointId};

/// Contract violations reported to the caller of the offending operation.
///
/// A call returning an error leaves the chart and its traces unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("trace is not attached to a chart")]
    TraceNotAttached,

    #[error("trace is already attached to a chart")]
    TraceAlreadyAttached,

    #[error("axis {0:?} does not belong to this chart")]
    UnknownAxis(AxisId),

    #[error("axis {axis:?} does not carry {expected:?} values")]
    DimensionMismatch { axis: AxisId, expected: Dimension },

    #[error("axis {0:?} still has traces assigned")]
    AxisInUse(AxisId),

    #[error("the last axis on the {0:?} edge cannot be removed")]
    LastAxisOnEdge(AxisEdge),

    #[error("point {0:?} does not belong to this trace")]
    UnknownPoint(PointId),

    #[error("computing traces must not form a cycle")]
    ComputingTraceCycle,

    #[error("trace capacity must be at least 1")]
    InvalidCapacity,
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
