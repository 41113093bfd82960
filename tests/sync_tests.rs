use chart2d::{AxisEdge, Chart2D, RecordingSurface, Trace};

fn chart_with(points: &[(f64, f64)]) -> Chart2D {
    let chart = Chart2D::new();
    let trace = Trace::new("t");
    chart.add_trace(&trace).unwrap();
    trace.add_points(points.iter().copied()).unwrap();
    chart
}

#[test]
fn test_synchronized_charts_share_plot_start() {
    // Large y values produce wide labels on the left axis.
    let wide = chart_with(&[(0.0, 0.0), (10.0, 5_000_000.0)]);
    let narrow = chart_with(&[(0.0, 0.0), (10.0, 1.0)]);

    let mut surface = RecordingSurface::new(500, 300);
    wide.paint(&mut surface);
    narrow.paint(&mut surface);
    let own_wide = wide.plot_area().unwrap().left;
    let own_narrow = narrow.plot_area().unwrap().left;
    assert!(own_wide > own_narrow);

    wide.synchronize_x_start_with(&narrow);
    wide.paint(&mut surface);
    narrow.paint(&mut surface);
    assert_eq!(narrow.plot_area().unwrap().left, own_wide);
    assert_eq!(wide.plot_area().unwrap().left, own_wide);

    // The narrow chart's axis sits next to its plot, the offset is blank space.
    let left = narrow.axis_at(AxisEdge::Left, 0).unwrap();
    let band = narrow.with_axis(left, |a| a.pixel_bounds()).unwrap();
    assert_eq!(band.right, own_wide);
    assert!(band.left > 0);

    narrow.unsynchronize_x_start();
    narrow.paint(&mut surface);
    wide.paint(&mut surface);
    assert_eq!(narrow.plot_area().unwrap().left, own_narrow);
    assert_eq!(wide.plot_area().unwrap().left, own_wide);
}

#[test]
fn test_synchronizing_with_itself_is_ignored() {
    let chart = chart_with(&[(0.0, 0.0), (1.0, 1.0)]);
    let mut surface = RecordingSurface::new(300, 200);
    chart.paint(&mut surface);
    let before = chart.plot_area();
    chart.synchronize_x_start_with(&chart.clone());
    chart.paint(&mut surface);
    assert_eq!(chart.plot_area(), before);
}
