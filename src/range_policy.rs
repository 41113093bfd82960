//! Strategies turning the data range of an axis into its displayed range.

use std::fmt::Debug;

use crate::data_types::Range;

/// Given the true extremes of the traces on an axis, returns the range the
/// axis displays and scales against.
///
/// The result may clip the data. Callers must cope with a degenerate result
/// (`min == max`).
pub trait RangePolicy: Debug + Send + Sync {
    fn resolve(&self, data: Range) -> Range;
}

/// Shows exactly the data range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Unbounded;

impl RangePolicy for Unbounded {
    fn resolve(&self, data: Range) -> Range {
        data
    }
}

/// Always shows the configured range, clipping data outside of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedViewport(pub Range);

impl RangePolicy for FixedViewport {
    fn resolve(&self, _data: Range) -> Range {
        self.0
    }
}

/// Shows at least the configured range, growing with the data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimumViewport(pub Range);

impl RangePolicy for MinimumViewport {
    fn resolve(&self, data: Range) -> Range {
        data.union(&self.0)
    }
}

/// Extends the data range so that the given value is always visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcedPoint(pub f64);

impl RangePolicy for ForcedPoint {
    fn resolve(&self, data: Range) -> Range {
        data.include(self.0)
    }
}

/// Shows the window of the given span ending at the highest value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighestValues(pub f64);

impl RangePolicy for HighestValues {
    fn resolve(&self, data: Range) -> Range {
        Range::new(data.max - self.0.abs(), data.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: Range = Range::new(2.0, 8.0);

    #[test]
    fn builtin_policies() {
        assert_eq!(Unbounded.resolve(DATA), DATA);
        assert_eq!(
            FixedViewport(Range::new(0.0, 5.0)).resolve(DATA),
            Range::new(0.0, 5.0)
        );
        assert_eq!(
            MinimumViewport(Range::new(0.0, 5.0)).resolve(DATA),
            Range::new(0.0, 8.0)
        );
        assert_eq!(ForcedPoint(0.0).resolve(DATA), Range::new(0.0, 8.0));
        assert_eq!(ForcedPoint(5.0).resolve(DATA), DATA);
        assert_eq!(HighestValues(3.0).resolve(DATA), Range::new(5.0, 8.0));
    }
}
