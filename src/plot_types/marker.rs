use super::{PaintContext, PointPainter, Segment, TracePainter};
use crate::data_types::{Color, TracePoint};
use crate::surface::{PixelPoint, Surface};

/// Draws a disc at every original point of the trace.
#[derive(Debug)]
pub struct DiscPainter {
    pub diameter: i32,
}

impl DiscPainter {
    pub fn new(diameter: i32) -> Self {
        Self {
            diameter: diameter.max(1),
        }
    }
}

impl Default for DiscPainter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TracePainter for DiscPainter {
    fn paint_segment(&mut self, segment: &Segment<'_>, surface: &mut dyn Surface, _ctx: &PaintContext) {
        if segment.target.is_some() {
            let r = self.diameter / 2;
            surface.fill_oval(segment.to - PixelPoint::splat(r), self.diameter, self.diameter);
        }
    }
}

/// Disc marker for a single point, typically used as highlighter.
#[derive(Debug, Clone)]
pub struct PointPainterDisc {
    pub diameter: i32,
    pub color: Option<Color>,
}

impl PointPainterDisc {
    pub fn new(diameter: i32) -> Self {
        Self {
            diameter: diameter.max(1),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl PointPainter for PointPainterDisc {
    fn paint(&self, at: PixelPoint, _point: &TracePoint, surface: &mut dyn Surface) {
        if let Some(color) = self.color {
            surface.set_color(color);
        }
        let r = self.diameter / 2;
        surface.fill_oval(at - PixelPoint::splat(r), self.diameter, self.diameter);
    }
}

/// Square marker for a single point.
#[derive(Debug, Clone)]
pub struct PointPainterSquare {
    pub size: i32,
    pub color: Option<Color>,
}

impl PointPainterSquare {
    pub fn new(size: i32) -> Self {
        Self {
            size: size.max(1),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl PointPainter for PointPainterSquare {
    fn paint(&self, at: PixelPoint, _point: &TracePoint, surface: &mut dyn Surface) {
        if let Some(color) = self.color {
            surface.set_color(color);
        }
        let half = self.size / 2;
        surface.fill_rect(at - PixelPoint::splat(half), self.size, self.size);
    }
}
