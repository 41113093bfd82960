use super::{PaintContext, Segment, TracePainter};
use crate::surface::{PixelPoint, Surface};

/// Fills the area between each continuous run and the bottom of the plot.
#[derive(Debug, Default)]
pub struct FillPainter {
    outline: Vec<PixelPoint>,
}

impl FillPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TracePainter for FillPainter {
    fn start_paint(&mut self, _surface: &mut dyn Surface, _ctx: &PaintContext) {
        self.outline.clear();
    }

    fn paint_segment(&mut self, segment: &Segment<'_>, _surface: &mut dyn Surface, _ctx: &PaintContext) {
        for point in [segment.from, segment.to] {
            if self.outline.last() != Some(&point) {
                self.outline.push(point);
            }
        }
    }

    fn discontinue(&mut self, surface: &mut dyn Surface, ctx: &PaintContext) {
        if self.outline.len() > 1 {
            let baseline = ctx.plot.bottom;
            let (first_x, last_x) = (self.outline[0].x, self.outline[self.outline.len() - 1].x);
            self.outline.push(PixelPoint::new(last_x, baseline));
            self.outline.push(PixelPoint::new(first_x, baseline));
            surface.fill_polygon(&self.outline);
        }
        self.outline.clear();
    }
}
