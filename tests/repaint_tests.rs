use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chart2d::{Chart2D, ChartConfig, RecordingSurface, RepaintTicker, Trace};

fn fast_chart() -> Chart2D {
    Chart2D::with_config(ChartConfig {
        min_paint_latency_ms: 5,
        ..ChartConfig::default()
    })
}

#[test]
fn test_burst_of_requests_is_coalesced() {
    let chart = fast_chart();
    let trace = Trace::new("t");
    chart.add_trace(&trace).unwrap();

    let paints = Arc::new(AtomicUsize::new(0));
    let counter = paints.clone();
    let ticker = RepaintTicker::spawn(chart.clone(), move |chart: &Chart2D| {
        chart.paint(&mut RecordingSurface::new(200, 100));
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    for i in 0..1_000 {
        trace.add_point(i as f64, i as f64).unwrap();
    }
    thread::sleep(Duration::from_millis(100));
    ticker.stop();

    let count = paints.load(Ordering::SeqCst);
    assert!(count >= 1);
    assert!(count < 1_000, "{count} paints for 1000 mutations");
}

#[test]
fn test_idle_chart_is_not_repainted() {
    let chart = fast_chart();
    // Consume the initial request.
    assert!(chart.take_repaint_request());

    let paints = Arc::new(AtomicUsize::new(0));
    let counter = paints.clone();
    let ticker = RepaintTicker::spawn(chart.clone(), move |_: &Chart2D| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    thread::sleep(Duration::from_millis(40));
    assert_eq!(paints.load(Ordering::SeqCst), 0);

    chart.request_repaint();
    thread::sleep(Duration::from_millis(60));
    assert_eq!(paints.load(Ordering::SeqCst), 1);
    drop(ticker);
}

#[test]
fn test_dropping_ticker_stops_repaints() {
    let chart = fast_chart();
    let paints = Arc::new(AtomicUsize::new(0));
    let counter = paints.clone();
    let ticker = RepaintTicker::spawn(chart.clone(), move |_: &Chart2D| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    drop(ticker);

    let before = paints.load(Ordering::SeqCst);
    chart.request_repaint();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(paints.load(Ordering::SeqCst), before);
    assert!(chart.take_repaint_request());
}
