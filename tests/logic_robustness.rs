#[cfg(test)]
mod tests {
    use chart2d::plot_types::{DiscPainter, FillPainter, LinePainter, VerticalBarPainter};
    use chart2d::scales::{normalize, ChartScale};
    use chart2d::{Chart2D, DrawOp, Range, RecordingSurface, Trace};

    #[test]
    fn test_scale_zero_domain() {
        // Case: Min == Max (e.g. only one data point at y=10.0)
        let domain = Range::new(10.0, 10.0);
        let scale = ChartScale::new(domain, 0, 100);

        assert_eq!(normalize(10.0, &domain), 0.0);
        let mapped = scale.map(10.0);
        assert_eq!(mapped, 0, "a flat domain maps to the start of the interval");
        assert_eq!(scale.invert(50), 10.0);
    }

    #[test]
    fn test_single_point_is_drawn_at_origin() {
        let chart = Chart2D::new();
        let trace = Trace::new("single");
        trace.set_painter(Box::new(DiscPainter::new(4)));
        chart.add_trace(&trace).unwrap();
        trace.add_point(10.0, 10.0).unwrap();

        let mut surface = RecordingSurface::new(200, 100);
        chart.paint(&mut surface);
        let plot = chart.plot_area().unwrap();
        let oval = surface.ops().iter().find_map(|op| match op {
            DrawOp::Oval { origin, .. } => Some(*origin),
            _ => None,
        });
        assert_eq!(oval.map(|o| (o.x + 2, o.y + 2)), Some((plot.left, plot.bottom)));
    }

    #[test]
    fn test_non_finite_values_do_not_panic() {
        let chart = Chart2D::new();
        let trace = Trace::new("wild");
        chart.add_trace(&trace).unwrap();
        trace
            .add_points([
                (0.0, 1.0),
                (f64::INFINITY, 2.0),
                (1.0, f64::NEG_INFINITY),
                (f64::NAN, f64::NAN),
                (2.0, 3.0),
            ])
            .unwrap();

        let mut surface = RecordingSurface::new(300, 200);
        chart.paint(&mut surface);
        assert!(chart.plot_area().is_some());
    }

    #[test]
    fn test_tiny_surface() {
        let chart = Chart2D::new();
        let trace = Trace::new("t");
        chart.add_trace(&trace).unwrap();
        trace.add_points((0..100).map(|i| (i as f64, (i as f64).sin()))).unwrap();

        for (w, h) in [(0, 0), (1, 1), (5, 3)] {
            let mut surface = RecordingSurface::new(w, h);
            chart.paint(&mut surface);
            let plot = chart.plot_area().unwrap();
            assert!(plot.width() >= 0 && plot.height() >= 0);
            if plot.width() == 0 {
                // Nothing to find in a collapsed plot area.
                assert!(chart.find_nearest_point(0, 0).is_none());
            }
        }
    }

    #[test]
    fn test_all_painters_survive_clipping() {
        let chart = Chart2D::new();
        let traces: Vec<Trace> = (0..4).map(|i| Trace::new(format!("t{i}"))).collect();
        traces[0].set_painter(Box::new(LinePainter));
        traces[1].set_painter(Box::new(FillPainter::new()));
        traces[2].set_painter(Box::new(VerticalBarPainter::new(3)));
        traces[3].set_painter(Box::new(DiscPainter::new(5)));
        let bottom = chart.axis_at(chart2d::AxisEdge::Bottom, 0).unwrap();
        chart
            .with_axis_mut(bottom, |a| {
                a.set_range_policy(std::sync::Arc::new(chart2d::FixedViewport(Range::new(2.0, 5.0))))
            })
            .unwrap();
        for trace in &traces {
            chart.add_trace(trace).unwrap();
            trace.add_points((0..8).map(|i| (i as f64, (i % 3) as f64))).unwrap();
        }

        let mut surface = RecordingSurface::new(320, 240);
        chart.paint(&mut surface);
        let plot = chart.plot_area().unwrap();
        for (from, to) in surface.segments() {
            for p in [from, to] {
                assert!(p.x >= 0 && p.x <= 320 && p.y >= 0 && p.y <= 240, "{p:?} outside surface");
            }
        }
        // Trace geometry stays within the plot area horizontally.
        for op in surface.ops() {
            if let DrawOp::Polygon(points) = op {
                if points.len() > 4 {
                    assert!(points.iter().all(|p| p.x >= plot.left && p.x <= plot.right));
                }
            }
        }
    }
}
