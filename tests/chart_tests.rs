use std::sync::{Arc, Mutex};

use chart2d::{Axis, AxisEdge, AxisId, Chart2D, ChartConfig, ChartError, ChartEvent, Dimension, EventKind, Trace};

#[test]
fn test_default_axes() {
    let chart = Chart2D::new();
    for edge in AxisEdge::ALL {
        assert_eq!(chart.axes(edge).len(), 1, "{edge:?}");
    }
    let top = chart.axis_at(AxisEdge::Top, 0).unwrap();
    let bottom = chart.axis_at(AxisEdge::Bottom, 0).unwrap();
    assert!(!chart.with_axis(top, |a| a.is_visible()).unwrap());
    assert!(chart.with_axis(bottom, |a| a.is_visible()).unwrap());
    assert_eq!(chart.with_axis(bottom, |a| a.dimension()).unwrap(), Dimension::X);
}

#[test]
fn test_find_axes_of_trace_on_second_axis() {
    let chart = Chart2D::new();
    let first = chart.axis_at(AxisEdge::Bottom, 0).unwrap();
    let second = chart.add_axis(AxisEdge::Bottom, Axis::new());
    let left = chart.axis_at(AxisEdge::Left, 0).unwrap();

    let trace = Trace::new("t");
    chart.add_trace_on(&trace, second, left).unwrap();

    let axes = chart.find_axes_of_trace(&trace);
    assert_eq!(axes[0], second);
    assert_ne!(axes[0], first);
    assert_eq!(axes[1], left);
    assert!(chart.find_axes_of_trace(&Trace::new("other")).is_empty());
}

#[test]
fn test_trace_attaches_to_one_chart_only() {
    let a = Chart2D::new();
    let b = Chart2D::new();
    let trace = Trace::new("t");
    let id = a.add_trace(&trace).unwrap();
    assert_eq!(trace.id(), Some(id));
    assert!(trace.chart().unwrap().ptr_eq(&a));

    assert_eq!(a.add_trace(&trace), Err(ChartError::TraceAlreadyAttached));
    assert_eq!(b.add_trace(&trace), Err(ChartError::TraceAlreadyAttached));
    assert_eq!(b.remove_trace(&trace), Err(ChartError::TraceNotAttached));

    a.remove_trace(&trace).unwrap();
    assert!(trace.chart().is_none());
    b.add_trace(&trace).unwrap();
    assert!(trace.chart().unwrap().ptr_eq(&b));
}

#[test]
fn test_axis_contract_violations() {
    let chart = Chart2D::new();
    let bottom = chart.axis_at(AxisEdge::Bottom, 0).unwrap();
    let left = chart.axis_at(AxisEdge::Left, 0).unwrap();
    let trace = Trace::new("t");

    assert_eq!(
        chart.add_trace_on(&trace, left, bottom),
        Err(ChartError::DimensionMismatch {
            axis: left,
            expected: Dimension::X,
        })
    );
    let unknown = AxisId(999);
    assert_eq!(chart.add_trace_on(&trace, unknown, left), Err(ChartError::UnknownAxis(unknown)));
    // Failed calls leave the trace detached.
    assert!(trace.chart().is_none());

    chart.add_trace(&trace).unwrap();
    assert_eq!(chart.remove_axis(bottom).unwrap_err(), ChartError::AxisInUse(bottom));

    let extra = chart.add_axis(AxisEdge::Left, Axis::new().titled("extra"));
    assert_eq!(chart.axes(AxisEdge::Left), vec![left, extra]);
    let removed = chart.remove_axis(extra).unwrap();
    assert_eq!(removed.title(), Some("extra"));

    chart.remove_trace(&trace).unwrap();
    assert_eq!(chart.remove_axis(bottom).unwrap_err(), ChartError::LastAxisOnEdge(AxisEdge::Bottom));
}

#[test]
fn test_remove_all_traces_is_idempotent() {
    let chart = Chart2D::new();
    let traces: Vec<Trace> = (0..3).map(|i| Trace::new(format!("t{i}"))).collect();
    for trace in &traces {
        chart.add_trace(trace).unwrap();
        trace.add_point(1.0, 1.0).unwrap();
    }

    let removed = chart.remove_all_traces();
    assert_eq!(removed.len(), 3);
    assert!(chart.traces().is_empty());
    for trace in &traces {
        assert!(trace.chart().is_none());
        assert_eq!(trace.add_point(2.0, 2.0), Err(ChartError::TraceNotAttached));
    }

    assert!(chart.remove_all_traces().is_empty());
    let bottom = chart.axis_at(AxisEdge::Bottom, 0).unwrap();
    assert_eq!(chart.with_axis(bottom, |a| a.traces().count()).unwrap(), 0);
}

#[test]
fn test_events_are_delivered_after_unlock() {
    let chart = Chart2D::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    let observed = chart.clone();
    chart.subscribe_all(move |event| {
        // Calling back into the chart must not deadlock.
        let count = observed.traces().len();
        sink.lock().unwrap().push((event.clone(), count));
    });

    let trace = Trace::new("t");
    let id = chart.add_trace(&trace).unwrap();
    trace.set_z_index(2);
    chart.remove_trace(&trace).unwrap();
    chart.set_config(ChartConfig::default());

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (ChartEvent::TraceAdded(id), 1),
            (ChartEvent::TraceStyleChanged(id), 1),
            (ChartEvent::TraceRemoved(id), 0),
            (ChartEvent::ConfigChanged, 0),
        ]
    );
}

#[test]
fn test_filtered_subscription_and_unsubscribe() {
    let chart = Chart2D::new();
    let count = Arc::new(Mutex::new(0));
    let sink = count.clone();
    let listener = chart.subscribe(EventKind::AxisAdded, move |_| *sink.lock().unwrap() += 1);

    chart.add_axis(AxisEdge::Right, Axis::new());
    let trace = Trace::new("t");
    chart.add_trace(&trace).unwrap();
    assert_eq!(*count.lock().unwrap(), 1);

    assert!(chart.unsubscribe(listener));
    assert!(!chart.unsubscribe(listener));
    chart.add_axis(AxisEdge::Right, Axis::new());
    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn test_mutations_request_repaint() {
    let chart = Chart2D::new();
    // A new chart needs its first paint.
    assert!(chart.take_repaint_request());
    assert!(!chart.take_repaint_request());

    let trace = Trace::new("t");
    chart.add_trace(&trace).unwrap();
    assert!(chart.take_repaint_request());

    trace.add_point(1.0, 1.0).unwrap();
    trace.add_point(2.0, 1.0).unwrap();
    assert!(chart.take_repaint_request());
    assert!(!chart.take_repaint_request());

    // Failed mutations do not.
    assert!(trace.remove_point(chart2d::PointId(42)).is_err());
    assert!(!chart.take_repaint_request());
}
