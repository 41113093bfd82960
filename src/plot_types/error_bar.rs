use crate::surface::{PixelPoint, Surface};

/// Pixel end points of the error bars around one point.
///
/// An end is `None` when that side is disabled by the policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorBarPixels {
    pub center: PixelPoint,
    pub left: Option<PixelPoint>,
    pub right: Option<PixelPoint>,
    pub top: Option<PixelPoint>,
    pub bottom: Option<PixelPoint>,
}

pub trait ErrorBarPainter: Send + Sync {
    fn paint(&self, bars: &ErrorBarPixels, surface: &mut dyn Surface);
}

/// Draws each enabled side as a line with a perpendicular end cap.
#[derive(Debug, Clone)]
pub struct ErrorBarPainterLine {
    /// Total length of the end caps in pixels, 0 disables them.
    pub cap: i32,
}

impl Default for ErrorBarPainterLine {
    fn default() -> Self {
        Self { cap: 6 }
    }
}

impl ErrorBarPainter for ErrorBarPainterLine {
    fn paint(&self, bars: &ErrorBarPixels, surface: &mut dyn Surface) {
        let half = self.cap / 2;
        for end in [bars.left, bars.right].into_iter().flatten() {
            surface.draw_line(bars.center, end);
            if half > 0 {
                surface.draw_line(end - PixelPoint::new(0, half), end + PixelPoint::new(0, half));
            }
        }
        for end in [bars.top, bars.bottom].into_iter().flatten() {
            surface.draw_line(bars.center, end);
            if half > 0 {
                surface.draw_line(end - PixelPoint::new(half, 0), end + PixelPoint::new(half, 0));
            }
        }
    }
}
