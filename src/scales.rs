use crate::data_types::Range;

/// Maps `value` into `[0, 1]` relative to `range`.
///
/// Values outside the range map outside `[0, 1]`. A degenerate range maps
/// every value to `0.0`.
pub fn normalize(value: f64, range: &Range) -> f64 {
    if range.is_degenerate() {
        return 0.0;
    }
    (value - range.min) / range.span()
}

pub fn denormalize(scaled: f64, range: &Range) -> f64 {
    range.min + scaled * range.span()
}

/// Pixel offsets are clamped to this magnitude.
const MAX_PIXEL_OFFSET: f64 = (1 << 24) as f64;

/// Linear mapping between a value range and a pixel interval.
///
/// The pixel interval may run backwards: y scales use `(bottom, top)` because
/// pixel rows grow downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartScale {
    domain: Range,
    start_px: i32,
    end_px: i32,
}

impl ChartScale {
    pub fn new(domain: Range, start_px: i32, end_px: i32) -> Self {
        Self {
            domain,
            start_px,
            end_px,
        }
    }

    pub fn domain(&self) -> Range {
        self.domain
    }

    pub fn range(&self) -> (i32, i32) {
        (self.start_px, self.end_px)
    }

    /// Pixel position of an already normalized value.
    pub fn map_scaled(&self, scaled: f64) -> i32 {
        let extent = (self.end_px - self.start_px) as f64;
        let offset = (scaled * extent).round();
        if offset.is_finite() {
            let offset = offset.clamp(-MAX_PIXEL_OFFSET, MAX_PIXEL_OFFSET) as i32;
            self.start_px.saturating_add(offset)
        } else {
            self.start_px
        }
    }

    pub fn map(&self, value: f64) -> i32 {
        self.map_scaled(normalize(value, &self.domain))
    }

    pub fn invert(&self, pixel: i32) -> f64 {
        if self.end_px == self.start_px {
            return self.domain.min;
        }
        let scaled = (pixel - self.start_px) as f64 / (self.end_px - self.start_px) as f64;
        denormalize(scaled, &self.domain)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub major: bool,
}

const MAX_TICKS: usize = 1000;

/// Ticks at the multiples of `minor` inside `range`; multiples of `major` are
/// flagged as major ticks.
pub fn ticks(range: &Range, major: f64, minor: f64) -> Vec<Tick> {
    if range.is_degenerate() || major <= 0.0 || !major.is_finite() {
        return vec![Tick {
            value: range.min,
            major: true,
        }];
    }
    let step = if minor > 0.0 && minor.is_finite() && minor <= major {
        minor
    } else {
        major
    };
    if range.span() / step > MAX_TICKS as f64 {
        return Vec::new();
    }

    let epsilon = step * 1e-9;
    let first = (range.min / step - 1e-9).ceil() as i64;
    let last = (range.max / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|i| {
            let value = i as f64 * step;
            let ratio = value / major;
            let major_tick = (ratio - ratio.round()).abs() * major < epsilon.max(major * 1e-9);
            Tick {
                value,
                major: major_tick,
            }
        })
        .collect()
}

/// Label text of a tick value.
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() < 0.001 {
        format!("{:.4}", value)
    } else if value.abs() > 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
