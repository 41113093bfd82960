use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data_types::Bounds;
use crate::plot_types::{ErrorBarPainter, ErrorBarPainterLine};

/// Size of an error in value units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ErrorValue {
    Absolute(f64),
    /// Fraction of the absolute value of the coordinate.
    Relative(f64),
}

impl ErrorValue {
    pub fn extent(&self, value: f64) -> f64 {
        match *self {
            Self::Absolute(error) => error.abs(),
            Self::Relative(fraction) => (value * fraction).abs(),
        }
    }
}

/// Which error bars a trace shows and how they are computed and painted.
#[derive(Clone)]
pub struct ErrorBarPolicy {
    pub x_error: Option<ErrorValue>,
    pub y_error: Option<ErrorValue>,
    pub show_positive_x: bool,
    pub show_negative_x: bool,
    pub show_positive_y: bool,
    pub show_negative_y: bool,
    painters: Vec<Arc<dyn ErrorBarPainter>>,
}

impl ErrorBarPolicy {
    /// Symmetric y error bars painted with [`ErrorBarPainterLine`].
    pub fn y(error: ErrorValue) -> Self {
        Self {
            x_error: None,
            y_error: Some(error),
            show_positive_x: false,
            show_negative_x: false,
            show_positive_y: true,
            show_negative_y: true,
            painters: vec![Arc::new(ErrorBarPainterLine::default())],
        }
    }

    /// Symmetric x error bars painted with [`ErrorBarPainterLine`].
    pub fn x(error: ErrorValue) -> Self {
        Self {
            x_error: Some(error),
            y_error: None,
            show_positive_x: true,
            show_negative_x: true,
            show_positive_y: false,
            show_negative_y: false,
            painters: vec![Arc::new(ErrorBarPainterLine::default())],
        }
    }

    pub fn with_painters(mut self, painters: Vec<Arc<dyn ErrorBarPainter>>) -> Self {
        self.painters = painters;
        self
    }

    pub fn painters(&self) -> &[Arc<dyn ErrorBarPainter>] {
        &self.painters
    }

    /// `(negative, positive)` extents of the x error at `x`, zero when hidden.
    pub fn x_extents(&self, x: f64) -> (f64, f64) {
        Self::extents(self.x_error, x, self.show_negative_x, self.show_positive_x)
    }

    /// `(negative, positive)` extents of the y error at `y`, zero when hidden.
    pub fn y_extents(&self, y: f64) -> (f64, f64) {
        Self::extents(self.y_error, y, self.show_negative_y, self.show_positive_y)
    }

    fn extents(error: Option<ErrorValue>, value: f64, negative: bool, positive: bool) -> (f64, f64) {
        let Some(error) = error else {
            return (0.0, 0.0);
        };
        let extent = error.extent(value);
        (
            if negative { extent } else { 0.0 },
            if positive { extent } else { 0.0 },
        )
    }
}

impl fmt::Debug for ErrorBarPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorBarPolicy")
            .field("x_error", &self.x_error)
            .field("y_error", &self.y_error)
            .field("show_positive_x", &self.show_positive_x)
            .field("show_negative_x", &self.show_negative_x)
            .field("show_positive_y", &self.show_positive_y)
            .field("show_negative_y", &self.show_negative_y)
            .field("painters", &self.painters.len())
            .finish()
    }
}

/// Widens plain bounds by the farthest reaching enabled error bar on each
/// side.
///
/// Absolute errors have the same extent everywhere and are applied at the
/// extremes. Relative errors depend on the value, so every point is visited.
pub fn extend_bounds<I>(bounds: Bounds, policies: &[ErrorBarPolicy], points: I) -> Bounds
where
    I: IntoIterator<Item = (f64, f64)> + Clone,
{
    let mut extended = bounds;
    for policy in policies {
        let (min_x, max_x) = reach(policy.x_error, (bounds.min_x, bounds.max_x), || {
            points.clone().into_iter().map(|(x, _)| (x, policy.x_extents(x)))
        });
        let (min_y, max_y) = reach(policy.y_error, (bounds.min_y, bounds.max_y), || {
            points.clone().into_iter().map(|(_, y)| (y, policy.y_extents(y)))
        });
        let (min_x, max_x) = (
            min_x - edge_extent(policy.x_error, policy.show_negative_x),
            max_x + edge_extent(policy.x_error, policy.show_positive_x),
        );
        let (min_y, max_y) = (
            min_y - edge_extent(policy.y_error, policy.show_negative_y),
            max_y + edge_extent(policy.y_error, policy.show_positive_y),
        );
        extended.min_x = extended.min_x.min(min_x);
        extended.max_x = extended.max_x.max(max_x);
        extended.min_y = extended.min_y.min(min_y);
        extended.max_y = extended.max_y.max(max_y);
    }
    extended
}

/// Extent added at the plain extremes: the absolute error of an enabled side.
fn edge_extent(error: Option<ErrorValue>, shown: bool) -> f64 {
    match error {
        Some(ErrorValue::Absolute(error)) if shown => error.abs(),
        _ => 0.0,
    }
}

/// Lowest and highest bar end over all values for relative errors, the plain
/// extremes otherwise.
fn reach<F, J>(error: Option<ErrorValue>, extremes: (f64, f64), values: F) -> (f64, f64)
where
    F: FnOnce() -> J,
    J: Iterator<Item = (f64, (f64, f64))>,
{
    if !matches!(error, Some(ErrorValue::Relative(_))) {
        return extremes;
    }
    values()
        .filter(|(value, _)| value.is_finite())
        .fold(extremes, |(low, high), (value, (negative, positive))| {
            (low.min(value - negative), high.max(value + positive))
        })
}
