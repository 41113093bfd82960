// Plot types module

pub mod area;
pub mod bar;
pub mod error_bar;
pub mod line;
pub mod marker;

pub use area::FillPainter;
pub use bar::VerticalBarPainter;
pub use error_bar::{ErrorBarPainter, ErrorBarPainterLine, ErrorBarPixels};
pub use line::{LinePainter, PolylinePainter};
pub use marker::{DiscPainter, PointPainterDisc, PointPainterSquare};

use crate::data_types::TracePoint;
use crate::gutter_manager::PlotArea;
use crate::surface::{PixelPoint, Surface};

/// Per-pass information shared with painters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintContext {
    pub plot: PlotArea,
}

/// Visible piece of the line between two consecutive points of a trace.
///
/// `target` is the point `to` belongs to; it is `None` when `to` was
/// interpolated onto the viewport border. The first visible point of a run is
/// reported as a segment with `from == to`.
#[derive(Clone, Copy, Debug)]
pub struct Segment<'a> {
    pub from: PixelPoint,
    pub to: PixelPoint,
    pub target: Option<&'a TracePoint>,
}

/// Trait for rendering the points of a trace.
///
/// A pass calls `start_paint`, then `paint_segment` for every visible segment
/// in trace order, `discontinue` whenever the line is interrupted (gap or
/// viewport exit) and finally `end_paint`.
pub trait TracePainter: Send + Sync {
    fn start_paint(&mut self, _surface: &mut dyn Surface, _ctx: &PaintContext) {}

    fn paint_segment(&mut self, segment: &Segment<'_>, surface: &mut dyn Surface, ctx: &PaintContext);

    /// Flushes any accumulated geometry; the next segment starts a new run.
    fn discontinue(&mut self, _surface: &mut dyn Surface, _ctx: &PaintContext) {}

    fn end_paint(&mut self, surface: &mut dyn Surface, ctx: &PaintContext) {
        self.discontinue(surface, ctx);
    }
}

/// Paints a decoration at a single point, e.g. a highlight marker.
pub trait PointPainter: Send + Sync {
    fn paint(&self, at: PixelPoint, point: &TracePoint, surface: &mut dyn Surface);
}
