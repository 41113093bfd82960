use serde::{Deserialize, Serialize};

/// Axis management types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl AxisEdge {
    pub const ALL: [AxisEdge; 4] = [
        AxisEdge::Bottom,
        AxisEdge::Top,
        AxisEdge::Left,
        AxisEdge::Right,
    ];

    /// Bottom and top axes carry x values, left and right ones carry y values.
    pub fn dimension(self) -> Dimension {
        match self {
            Self::Bottom | Self::Top => Dimension::X,
            Self::Left | Self::Right => Dimension::Y,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Bottom => 0,
            Self::Top => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// Closed value interval `[min, max]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when the range cannot be used as a divisor.
    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        !span.is_finite() || span == 0.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn union(&self, other: &Range) -> Range {
        Range::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn include(&self, value: f64) -> Range {
        Range::new(self.min.min(value), self.max.max(value))
    }
}

/// Cached extremes of a trace in both dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn range(&self, dimension: Dimension) -> Range {
        match dimension {
            Dimension::X => Range::new(self.min_x, self.max_x),
            Dimension::Y => Range::new(self.min_y, self.max_y),
        }
    }
}

/// Distance between ticks in value units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TickSpacing {
    /// Five major divisions of the current range, five minor divisions each.
    #[default]
    Auto,
    Fixed { major: f64, minor: f64 },
}

impl TickSpacing {
    pub fn resolve(&self, range: &Range) -> (f64, f64) {
        match *self {
            Self::Auto => {
                let major = range.span() / 5.0;
                (major, major / 5.0)
            }
            Self::Fixed { major, minor } => (major, minor),
        }
    }
}
