//! Nearest-point search in normalized coordinates.

use std::collections::VecDeque;

use glam::DVec2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_types::{PointId, TraceId, TracePoint};

/// Traces with more points are searched in parallel.
const PARALLEL_THRESHOLD: usize = 4096;

/// Distance metric used to find the point nearest to the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointFinder {
    #[default]
    Euclidean,
    Manhattan,
}

/// Result of a nearest-point search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestPoint {
    pub trace: TraceId,
    pub point: PointId,
    pub x: f64,
    pub y: f64,
    /// Distance in normalized coordinates.
    pub distance: f64,
}

impl PointFinder {
    pub fn distance(&self, a: DVec2, b: DVec2) -> f64 {
        match self {
            Self::Euclidean => a.distance(b),
            Self::Manhattan => {
                let d = (a - b).abs();
                d.x + d.y
            }
        }
    }

    /// Monotonic in `distance`, cheaper to compute.
    fn key(&self, a: DVec2, b: DVec2) -> f64 {
        match self {
            Self::Euclidean => a.distance_squared(b),
            Self::Manhattan => self.distance(a, b),
        }
    }

    /// Index and distance of the point nearest to `target`, comparing the
    /// scaled coordinates. Points never scaled or marking a gap are skipped.
    pub fn nearest(&self, points: &VecDeque<TracePoint>, target: DVec2) -> Option<(usize, f64)> {
        let candidate = |(index, point): (usize, &TracePoint)| {
            let at = DVec2::new(point.scaled_x, point.scaled_y);
            (!point.is_discontinuity() && at.is_finite()).then(|| (index, self.key(at, target)))
        };
        let best = if points.len() > PARALLEL_THRESHOLD {
            points
                .par_iter()
                .enumerate()
                .filter_map(candidate)
                .min_by(|a, b| a.1.total_cmp(&b.1))
        } else {
            points
                .iter()
                .enumerate()
                .filter_map(candidate)
                .min_by(|a, b| a.1.total_cmp(&b.1))
        }?;
        let point = &points[best.0];
        let distance = self.distance(DVec2::new(point.scaled_x, point.scaled_y), target);
        Some((best.0, distance))
    }
}
