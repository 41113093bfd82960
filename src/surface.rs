//! Drawing surface abstraction.
//!
//! The chart never talks to a windowing toolkit directly: the host implements
//! [`Surface`] on top of whatever canvas it owns and hands it to
//! [`Chart2D::paint`](crate::Chart2D::paint). [`RecordingSurface`] is a
//! headless implementation that records the issued primitives.

use glam::IVec2;

use crate::data_types::{Color, Stroke};

/// Pixel coordinates, origin at the top-left corner, y growing downwards.
pub type PixelPoint = IVec2;

pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (i32, i32);

    fn set_color(&mut self, color: Color);

    fn set_stroke(&mut self, stroke: &Stroke);

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint);

    fn draw_polyline(&mut self, points: &[PixelPoint]) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1]);
        }
    }

    fn fill_polygon(&mut self, points: &[PixelPoint]);

    fn fill_rect(&mut self, origin: PixelPoint, width: i32, height: i32) {
        let corners = [
            origin,
            origin + IVec2::new(width, 0),
            origin + IVec2::new(width, height),
            origin + IVec2::new(0, height),
        ];
        self.fill_polygon(&corners);
    }

    /// Filled ellipse inscribed in the given rectangle.
    fn fill_oval(&mut self, origin: PixelPoint, width: i32, height: i32);

    /// Draws text with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: PixelPoint);

    /// Width and height of the rendered text in pixels.
    fn text_extent(&self, text: &str) -> (i32, i32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    SetColor(Color),
    SetStroke(Stroke),
    Line(PixelPoint, PixelPoint),
    Polyline(Vec<PixelPoint>),
    Polygon(Vec<PixelPoint>),
    Oval {
        origin: PixelPoint,
        width: i32,
        height: i32,
    },
    Text(String, PixelPoint),
}

/// Headless surface with a monospace font model.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: i32,
    height: i32,
    char_width: i32,
    line_height: i32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            char_width: 7,
            line_height: 12,
            ops: Vec::new(),
        }
    }

    pub fn with_font_metrics(mut self, char_width: i32, line_height: i32) -> Self {
        self.char_width = char_width;
        self.line_height = line_height;
        self
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// All line segments drawn, polylines split into their segments.
    pub fn segments(&self) -> Vec<(PixelPoint, PixelPoint)> {
        let mut segments = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Line(a, b) => segments.push((*a, *b)),
                DrawOp::Polyline(points) => {
                    segments.extend(points.windows(2).map(|w| (w[0], w[1])));
                }
                _ => {}
            }
        }
        segments
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn set_color(&mut self, color: Color) {
        self.ops.push(DrawOp::SetColor(color));
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        self.ops.push(DrawOp::SetStroke(stroke.clone()));
    }

    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint) {
        self.ops.push(DrawOp::Line(from, to));
    }

    fn draw_polyline(&mut self, points: &[PixelPoint]) {
        self.ops.push(DrawOp::Polyline(points.to_vec()));
    }

    fn fill_polygon(&mut self, points: &[PixelPoint]) {
        self.ops.push(DrawOp::Polygon(points.to_vec()));
    }

    fn fill_oval(&mut self, origin: PixelPoint, width: i32, height: i32) {
        self.ops.push(DrawOp::Oval {
            origin,
            width,
            height,
        });
    }

    fn draw_text(&mut self, text: &str, origin: PixelPoint) {
        self.ops.push(DrawOp::Text(text.to_string(), origin));
    }

    fn text_extent(&self, text: &str) -> (i32, i32) {
        (text.chars().count() as i32 * self.char_width, self.line_height)
    }
}
