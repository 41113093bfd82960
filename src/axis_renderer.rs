use crate::axis::{Axis, LABEL_GAP, MAJOR_TICK, MINOR_TICK};
use crate::data_types::{AxisEdge, Stroke};
use crate::gutter_manager::PlotArea;
use crate::surface::{PixelPoint, Surface};
use crate::theme::ChartTheme;

pub struct AxisRenderer;

impl AxisRenderer {
    /// Grid lines at the major ticks, drawn across the plot area below the
    /// traces.
    pub fn paint_grid(axis: &Axis, plot: PlotArea, theme: &ChartTheme, surface: &mut dyn Surface) {
        if !axis.is_visible() || !axis.has_grid() {
            return;
        }
        surface.set_color(theme.grid_line);
        surface.set_stroke(&Stroke::solid(1.0));
        for label in axis.labels().iter().filter(|l| l.tick.major) {
            let p = axis.translate_value_to_px(label.tick.value);
            match axis.edge() {
                AxisEdge::Bottom | AxisEdge::Top => {
                    surface.draw_line(PixelPoint::new(p, plot.top), PixelPoint::new(p, plot.bottom));
                }
                AxisEdge::Left | AxisEdge::Right => {
                    surface.draw_line(PixelPoint::new(plot.left, p), PixelPoint::new(plot.right, p));
                }
            }
        }
    }

    /// Axis line, ticks, labels and title inside the axis' pixel band.
    pub fn paint_axis(axis: &Axis, theme: &ChartTheme, surface: &mut dyn Surface) {
        if !axis.is_visible() {
            return;
        }
        let band = axis.pixel_bounds();
        let edge = axis.edge();

        // 1. Axis line, on the side of the band facing the plot
        let (line_from, line_to) = match edge {
            AxisEdge::Bottom => (PixelPoint::new(band.left, band.top), PixelPoint::new(band.right, band.top)),
            AxisEdge::Top => (
                PixelPoint::new(band.left, band.bottom),
                PixelPoint::new(band.right, band.bottom),
            ),
            AxisEdge::Left => (
                PixelPoint::new(band.right, band.top),
                PixelPoint::new(band.right, band.bottom),
            ),
            AxisEdge::Right => (PixelPoint::new(band.left, band.top), PixelPoint::new(band.left, band.bottom)),
        };
        surface.set_color(theme.axis_line);
        surface.set_stroke(&Stroke::solid(1.0));
        surface.draw_line(line_from, line_to);

        // 2. Ticks and labels
        for label in axis.labels() {
            let p = axis.translate_value_to_px(label.tick.value);
            let length = if label.tick.major { MAJOR_TICK } else { MINOR_TICK };
            let (from, to) = match edge {
                AxisEdge::Bottom => (PixelPoint::new(p, band.top), PixelPoint::new(p, band.top + length)),
                AxisEdge::Top => (PixelPoint::new(p, band.bottom), PixelPoint::new(p, band.bottom - length)),
                AxisEdge::Left => (PixelPoint::new(band.right, p), PixelPoint::new(band.right - length, p)),
                AxisEdge::Right => (PixelPoint::new(band.left, p), PixelPoint::new(band.left + length, p)),
            };
            surface.set_color(theme.axis_line);
            surface.draw_line(from, to);

            if label.text.is_empty() {
                continue;
            }
            let offset = MAJOR_TICK + LABEL_GAP;
            let origin = match edge {
                AxisEdge::Bottom => PixelPoint::new(p - label.width / 2, band.top + offset + label.height),
                AxisEdge::Top => PixelPoint::new(p - label.width / 2, band.bottom - offset),
                AxisEdge::Left => PixelPoint::new(band.right - offset - label.width, p + label.height / 2),
                AxisEdge::Right => PixelPoint::new(band.left + offset, p + label.height / 2),
            };
            surface.set_color(theme.axis_label);
            surface.draw_text(&label.text, origin);
        }

        // 3. Axis title, outside the labels
        let Some(title) = axis.title().filter(|t| !t.is_empty()) else {
            return;
        };
        let (width, height) = axis.title_extent();
        let labels = MAJOR_TICK + LABEL_GAP;
        let origin = match edge {
            AxisEdge::Bottom => PixelPoint::new(
                (band.left + band.right - width) / 2,
                band.top + labels + axis.label_height() + LABEL_GAP + height,
            ),
            AxisEdge::Top => PixelPoint::new(
                (band.left + band.right - width) / 2,
                band.bottom - labels - axis.label_height() - LABEL_GAP,
            ),
            AxisEdge::Left => PixelPoint::new(
                band.right - labels - axis.max_label_width() - LABEL_GAP - width,
                (band.top + band.bottom + height) / 2,
            ),
            AxisEdge::Right => PixelPoint::new(
                band.left + labels + axis.max_label_width() + LABEL_GAP,
                (band.top + band.bottom + height) / 2,
            ),
        };
        surface.set_color(theme.axis_title);
        surface.draw_text(title, origin);
    }
}
