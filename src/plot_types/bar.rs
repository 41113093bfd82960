use super::{PaintContext, Segment, TracePainter};
use crate::surface::{PixelPoint, Surface};

/// Draws a vertical bar from the bottom of the plot up to every point.
#[derive(Debug)]
pub struct VerticalBarPainter {
    /// Bar width in pixels.
    pub width: i32,
}

impl VerticalBarPainter {
    pub fn new(width: i32) -> Self {
        Self {
            width: width.max(1),
        }
    }
}

impl Default for VerticalBarPainter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TracePainter for VerticalBarPainter {
    fn paint_segment(&mut self, segment: &Segment<'_>, surface: &mut dyn Surface, ctx: &PaintContext) {
        if segment.target.is_none() {
            return;
        }
        let top = segment.to.y.min(ctx.plot.bottom);
        let height = ctx.plot.bottom - top;
        let origin = PixelPoint::new(segment.to.x - self.width / 2, top);
        surface.fill_rect(origin, self.width, height);
    }
}
