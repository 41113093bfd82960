//! Coalescing of repaint requests.
//!
//! Mutations only flag the chart as needing a repaint. A [`RepaintTicker`]
//! checks the flag once per `min_paint_latency` and hands the chart to its
//! sink, so any number of requests between two ticks results in one paint.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use crate::chart::Chart2D;

/// Receives the chart when a repaint is due, typically to paint it onto the
/// host's surface.
pub trait RepaintSink: Send + 'static {
    fn repaint(&mut self, chart: &Chart2D);
}

impl<F> RepaintSink for F
where
    F: FnMut(&Chart2D) + Send + 'static,
{
    fn repaint(&mut self, chart: &Chart2D) {
        self(chart)
    }
}

#[derive(Default)]
struct Stop {
    stopped: Mutex<bool>,
    wakeup: Condvar,
}

/// Background thread driving repaints of one chart. Dropping it stops the
/// thread and waits for it to finish.
pub struct RepaintTicker {
    stop: Arc<Stop>,
    handle: Option<JoinHandle<()>>,
}

impl RepaintTicker {
    pub fn spawn(chart: Chart2D, mut sink: impl RepaintSink) -> std::io::Result<Self> {
        let stop = Arc::new(Stop::default());
        let thread_stop = stop.clone();
        let handle = thread::Builder::new()
            .name("chart2d-repaint".into())
            .spawn(move || loop {
                let latency = chart.min_paint_latency();
                {
                    let mut stopped = thread_stop.stopped.lock();
                    if !*stopped {
                        thread_stop.wakeup.wait_for(&mut stopped, latency);
                    }
                    if *stopped {
                        break;
                    }
                }
                if chart.take_repaint_request() {
                    tracing::trace!("repaint due");
                    sink.repaint(&chart);
                }
            })?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        *self.stop.stopped.lock() = true;
        self.stop.wakeup.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("repaint thread panicked");
            }
        }
    }
}

impl Drop for RepaintTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
