//! Gutter negotiation: space reserved around the plot area for the axes.

use crate::data_types::{AxisEdge, AxisId};

/// Pixel rectangle; `left <= right` and `top <= bottom`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlotArea {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl PlotArea {
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Space requirement of one axis, measured at the start of a paint pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisFootprint {
    pub id: AxisId,
    pub edge: AxisEdge,
    pub visible: bool,
    /// Width for left/right axes, height for bottom/top axes.
    pub size: i32,
    pub max_label_width: i32,
    pub label_height: i32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gutters {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

/// Outcome of the negotiation.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub plot: PlotArea,
    pub gutters: Gutters,
    /// Left gutter this chart needs on its own, published to synchronized
    /// peers.
    pub natural_x_start: i32,
    /// Pixel band of every axis, in the order of the footprints.
    pub bands: Vec<(AxisId, PlotArea)>,
}

pub struct GutterManager;

impl GutterManager {
    /// Footprints of one edge must be given innermost first.
    ///
    /// Without visible right (top) axes the right (top) gutter still reserves
    /// half the widest bottom/top label (half the label height of the
    /// left/right axes) so that labels at the plot corners are not cut off.
    /// `peer_x_start` is the natural left gutter of a synchronized chart; the
    /// larger of both is used so the plot areas line up.
    pub fn calculate(
        width: i32,
        height: i32,
        axes: &[AxisFootprint],
        peer_x_start: Option<i32>,
    ) -> Layout {
        let visible = |edge: AxisEdge| axes.iter().filter(move |a| a.edge == edge && a.visible);
        let sum = |edge: AxisEdge| visible(edge).map(|a| a.size).sum::<i32>();

        let natural_x_start = sum(AxisEdge::Left);
        let left = natural_x_start.max(peer_x_start.unwrap_or(0));

        let right = if visible(AxisEdge::Right).next().is_some() {
            sum(AxisEdge::Right)
        } else {
            visible(AxisEdge::Bottom)
                .chain(visible(AxisEdge::Top))
                .map(|a| (a.max_label_width + 1) / 2)
                .max()
                .unwrap_or(0)
        };

        let top = if visible(AxisEdge::Top).next().is_some() {
            sum(AxisEdge::Top)
        } else {
            visible(AxisEdge::Left)
                .chain(visible(AxisEdge::Right))
                .map(|a| (a.label_height + 1) / 2)
                .max()
                .unwrap_or(0)
        };

        let bottom = sum(AxisEdge::Bottom);

        let plot_right = (width - right).max(left);
        let plot_bottom = (height - bottom).max(top);
        let plot = PlotArea::new(left, plot_right, top, plot_bottom);

        let mut offsets = [0i32; 4];
        let bands = axes
            .iter()
            .map(|axis| {
                let size = if axis.visible { axis.size } else { 0 };
                let offset = &mut offsets[axis.edge.index()];
                let band = match axis.edge {
                    AxisEdge::Left => {
                        PlotArea::new(left - *offset - size, left - *offset, plot.top, plot.bottom)
                    }
                    AxisEdge::Right => PlotArea::new(
                        plot.right + *offset,
                        plot.right + *offset + size,
                        plot.top,
                        plot.bottom,
                    ),
                    AxisEdge::Top => {
                        PlotArea::new(plot.left, plot.right, top - *offset - size, top - *offset)
                    }
                    AxisEdge::Bottom => PlotArea::new(
                        plot.left,
                        plot.right,
                        plot.bottom + *offset,
                        plot.bottom + *offset + size,
                    ),
                };
                *offset += size;
                (axis.id, band)
            })
            .collect();

        Layout {
            plot,
            gutters: Gutters {
                left,
                right,
                top,
                bottom,
            },
            natural_x_start,
            bands,
        }
    }
}
