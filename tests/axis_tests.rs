use std::sync::Arc;

use chart2d::{
    Axis, AxisEdge, Chart2D, FixedViewport, ForcedPoint, HighestValues, MinimumViewport, Range, RecordingSurface,
    TickSpacing, Trace,
};

fn chart_with_points(points: &[(f64, f64)]) -> (Chart2D, Trace) {
    let chart = Chart2D::new();
    let trace = Trace::new("t");
    chart.add_trace(&trace).unwrap();
    trace.add_points(points.iter().copied()).unwrap();
    (chart, trace)
}

fn y_range(chart: &Chart2D) -> Range {
    let left = chart.axis_at(AxisEdge::Left, 0).unwrap();
    chart.with_axis(left, |a| a.range()).unwrap()
}

fn set_y_policy(chart: &Chart2D, policy: Arc<dyn chart2d::RangePolicy>) {
    let left = chart.axis_at(AxisEdge::Left, 0).unwrap();
    chart.with_axis_mut(left, |a| a.set_range_policy(policy)).unwrap();
}

#[test]
fn test_range_policies_on_chart() {
    let (chart, _trace) = chart_with_points(&[(0.0, 5.0), (1.0, 10.0)]);

    chart.update_scaling(false);
    assert_eq!(y_range(&chart), Range::new(5.0, 10.0));

    set_y_policy(&chart, Arc::new(ForcedPoint(0.0)));
    chart.update_scaling(false);
    assert_eq!(y_range(&chart), Range::new(0.0, 10.0));

    set_y_policy(&chart, Arc::new(MinimumViewport(Range::new(6.0, 20.0))));
    chart.update_scaling(false);
    assert_eq!(y_range(&chart), Range::new(5.0, 20.0));

    set_y_policy(&chart, Arc::new(HighestValues(2.0)));
    chart.update_scaling(false);
    assert_eq!(y_range(&chart), Range::new(8.0, 10.0));

    set_y_policy(&chart, Arc::new(FixedViewport(Range::new(-1.0, 1.0))));
    chart.update_scaling(false);
    assert_eq!(y_range(&chart), Range::new(-1.0, 1.0));
}

#[test]
fn test_axis_range_covers_all_its_traces() {
    let (chart, _a) = chart_with_points(&[(0.0, 0.0), (1.0, 1.0)]);
    let b = Trace::new("b");
    chart.add_trace(&b).unwrap();
    b.add_points([(-3.0, 0.5), (0.5, 7.0)]).unwrap();

    // A trace on a second left axis does not widen the first one.
    let second = chart.add_axis(AxisEdge::Left, Axis::new());
    let c = Trace::new("c");
    let bottom = chart.axis_at(AxisEdge::Bottom, 0).unwrap();
    chart.add_trace_on(&c, bottom, second).unwrap();
    c.add_point(0.0, 100.0).unwrap();

    chart.update_scaling(false);
    assert_eq!(y_range(&chart), Range::new(0.0, 7.0));
    assert_eq!(chart.with_axis(bottom, |a| a.range()).unwrap(), Range::new(-3.0, 1.0));
    assert_eq!(chart.with_axis(second, |a| a.range()).unwrap(), Range::new(100.0, 100.0));
}

#[test]
fn test_flat_range_scales_to_zero() {
    let (chart, trace) = chart_with_points(&[(2.0, 3.0)]);
    chart.update_scaling(false);
    let point = &trace.points()[0];
    assert_eq!(point.scaled_x(), 0.0);
    assert_eq!(point.scaled_y(), 0.0);
}

#[test]
fn test_pixel_translation_round_trip() {
    let (chart, _trace) = chart_with_points(&[(-50.0, 0.001), (50.0, 0.002)]);
    chart.paint(&mut RecordingSurface::new(640, 480));
    let plot = chart.plot_area().unwrap();

    for (edge, extent) in [(AxisEdge::Bottom, plot.width()), (AxisEdge::Left, plot.height())] {
        let id = chart.axis_at(edge, 0).unwrap();
        chart
            .with_axis(id, |axis| {
                let range = axis.range();
                let tolerance = range.span() / extent as f64;
                for i in 0..=100 {
                    let v = range.min + range.span() * i as f64 / 100.0;
                    let back = axis.translate_px_to_value(axis.translate_value_to_px(v));
                    assert!((back - v).abs() <= tolerance, "{edge:?}: {v} -> {back}");
                }
            })
            .unwrap();
    }
}

#[test]
fn test_axis_footprint_grows_with_labels_and_title() {
    let (chart, _trace) = chart_with_points(&[(0.0, 0.0), (1.0, 1.0)]);
    let left = chart.axis_at(AxisEdge::Left, 0).unwrap();
    let mut surface = RecordingSurface::new(400, 300);

    chart.paint(&mut surface);
    let plain = chart.with_axis(left, |a| a.width()).unwrap();
    assert_eq!(plain, chart.plot_area().unwrap().left);

    chart.with_axis_mut(left, |a| a.set_title(Some("volts".into()))).unwrap();
    chart.paint(&mut surface);
    let titled = chart.with_axis(left, |a| a.width()).unwrap();
    // Five characters of seven pixels plus a gap.
    assert_eq!(titled, plain + 35 + 3);

    chart.with_axis_mut(left, |a| a.set_visible(false)).unwrap();
    chart.paint(&mut surface);
    assert_eq!(chart.with_axis(left, |a| a.width()).unwrap(), 0);
    assert_eq!(chart.plot_area().unwrap().left, 0);
}

#[test]
fn test_fixed_tick_spacing() {
    let (chart, _trace) = chart_with_points(&[(0.0, 0.0), (10.0, 10.0)]);
    let bottom = chart.axis_at(AxisEdge::Bottom, 0).unwrap();
    chart
        .with_axis_mut(bottom, |a| a.set_tick_spacing(TickSpacing::Fixed { major: 5.0, minor: 1.0 }))
        .unwrap();
    chart.paint(&mut RecordingSurface::new(400, 300));

    let labels = chart
        .with_axis(bottom, |a| {
            a.labels()
                .iter()
                .filter(|l| l.tick.major)
                .map(|l| l.text.clone())
                .collect::<Vec<_>>()
        })
        .unwrap();
    assert_eq!(labels, vec!["0", "5.00", "10.00"]);
    let ticks = chart.with_axis(bottom, |a| a.labels().len()).unwrap();
    assert_eq!(ticks, 11);
}
