use super::{PaintContext, Segment, TracePainter};
use crate::surface::{PixelPoint, Surface};

/// Connects the points of a trace, issuing one polyline per continuous run.
#[derive(Debug, Default)]
pub struct PolylinePainter {
    buffer: Vec<PixelPoint>,
}

impl PolylinePainter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, point: PixelPoint) {
        if self.buffer.last() != Some(&point) {
            self.buffer.push(point);
        }
    }
}

impl TracePainter for PolylinePainter {
    fn start_paint(&mut self, _surface: &mut dyn Surface, _ctx: &PaintContext) {
        self.buffer.clear();
    }

    fn paint_segment(&mut self, segment: &Segment<'_>, _surface: &mut dyn Surface, _ctx: &PaintContext) {
        self.push(segment.from);
        self.push(segment.to);
    }

    fn discontinue(&mut self, surface: &mut dyn Surface, _ctx: &PaintContext) {
        if self.buffer.len() > 1 {
            surface.draw_polyline(&self.buffer);
        }
        self.buffer.clear();
    }
}

/// Draws every segment as an individual line.
#[derive(Debug, Default)]
pub struct LinePainter;

impl TracePainter for LinePainter {
    fn paint_segment(&mut self, segment: &Segment<'_>, surface: &mut dyn Surface, _ctx: &PaintContext) {
        if segment.from != segment.to {
            surface.draw_line(segment.from, segment.to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gutter_manager::PlotArea;
    use crate::surface::{DrawOp, RecordingSurface};

    fn ctx() -> PaintContext {
        PaintContext {
            plot: PlotArea::new(0, 100, 0, 100),
        }
    }

    fn segment(from: (i32, i32), to: (i32, i32)) -> Segment<'static> {
        Segment {
            from: PixelPoint::new(from.0, from.1),
            to: PixelPoint::new(to.0, to.1),
            target: None,
        }
    }

    #[test]
    fn polyline_flushes_on_discontinue() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut painter = PolylinePainter::new();
        let ctx = ctx();
        painter.start_paint(&mut surface, &ctx);
        painter.paint_segment(&segment((0, 0), (0, 0)), &mut surface, &ctx);
        painter.paint_segment(&segment((0, 0), (10, 10)), &mut surface, &ctx);
        painter.discontinue(&mut surface, &ctx);
        painter.paint_segment(&segment((50, 50), (60, 50)), &mut surface, &ctx);
        painter.end_paint(&mut surface, &ctx);

        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Polyline(vec![PixelPoint::new(0, 0), PixelPoint::new(10, 10)]),
                DrawOp::Polyline(vec![PixelPoint::new(50, 50), PixelPoint::new(60, 50)]),
            ]
        );
    }

    #[test]
    fn single_point_run_draws_nothing() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut painter = PolylinePainter::new();
        let ctx = ctx();
        painter.paint_segment(&segment((5, 5), (5, 5)), &mut surface, &ctx);
        painter.end_paint(&mut surface, &ctx);
        assert!(surface.ops().is_empty());
    }
}
