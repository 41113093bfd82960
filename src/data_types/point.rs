use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::plot_types::PointPainter;

/// Identifier of a trace inside the chart it is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraceId(pub u64);

/// Identifier of a point, unique within its trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u64);

/// A sample of a trace.
///
/// `scaled_x` / `scaled_y` hold the normalized position written by the axes
/// during the last scaling pass. They are stale after any mutation of the
/// owning trace until the next pass.
#[derive(Clone)]
pub struct TracePoint {
    id: PointId,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) scaled_x: f64,
    pub(crate) scaled_y: f64,
    /// Painters drawn on top of the trace painters at this point (highlighting).
    pub(crate) painters: Vec<Arc<dyn PointPainter>>,
}

impl TracePoint {
    pub fn new(id: PointId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            scaled_x: f64::NAN,
            scaled_y: f64::NAN,
            painters: Vec::new(),
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn scaled_x(&self) -> f64 {
        self.scaled_x
    }

    pub fn scaled_y(&self) -> f64 {
        self.scaled_y
    }

    /// A point with a NaN coordinate marks a gap in the trace.
    pub fn is_discontinuity(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    pub fn painters(&self) -> &[Arc<dyn PointPainter>] {
        &self.painters
    }

    pub fn add_painter(&mut self, painter: Arc<dyn PointPainter>) {
        self.painters.push(painter);
    }

    /// Removes the given painter instance, returns whether it was attached.
    pub fn remove_painter(&mut self, painter: &Arc<dyn PointPainter>) -> bool {
        let before = self.painters.len();
        self.painters.retain(|p| !Arc::ptr_eq(p, painter));
        before != self.painters.len()
    }
}

impl fmt::Debug for TracePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracePoint")
            .field("id", &self.id)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("scaled_x", &self.scaled_x)
            .field("scaled_y", &self.scaled_y)
            .field("painters", &self.painters.len())
            .finish()
    }
}

/// Creates the points stored by traces of a chart.
pub trait PointFactory: Send + Sync {
    fn create(&self, id: PointId, x: f64, y: f64) -> TracePoint;
}

#[derive(Debug, Default)]
pub struct DefaultPointFactory;

impl PointFactory for DefaultPointFactory {
    fn create(&self, id: PointId, x: f64, y: f64) -> TracePoint {
        TracePoint::new(id, x, y)
    }
}

/// Attaches a fixed set of point painters to every created point.
#[derive(Default)]
pub struct DecoratingPointFactory {
    painters: Vec<Arc<dyn PointPainter>>,
}

impl DecoratingPointFactory {
    pub fn new(painters: Vec<Arc<dyn PointPainter>>) -> Self {
        Self { painters }
    }
}

impl PointFactory for DecoratingPointFactory {
    fn create(&self, id: PointId, x: f64, y: f64) -> TracePoint {
        let mut point = TracePoint::new(id, x, y);
        point.painters = self.painters.clone();
        point
    }
}
