//! Viewport clipping in normalized space.
//!
//! The visible viewport is `[0, 1] x [0, 1]`. Segments crossing its border are
//! shortened by linear interpolation; the interpolated points are transient
//! values that never enter a trace.

use glam::DVec2;

const EPSILON: f64 = 1e-12;

/// Border of the viewport a point is pulled towards, in trial order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportBound {
    Right,
    Left,
    Top,
    Bottom,
}

impl ViewportBound {
    const ORDER: [ViewportBound; 4] = [
        ViewportBound::Right,
        ViewportBound::Left,
        ViewportBound::Top,
        ViewportBound::Bottom,
    ];

    fn exceeded_by(self, p: DVec2) -> bool {
        match self {
            Self::Right => p.x > 1.0,
            Self::Left => p.x < 0.0,
            Self::Top => p.y > 1.0,
            Self::Bottom => p.y < 0.0,
        }
    }
}

pub fn is_inside(p: DVec2) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}

fn within_unit(v: f64) -> bool {
    (-EPSILON..=1.0 + EPSILON).contains(&v)
}

/// Moves `outside` along the segment towards `other` onto the viewport border.
///
/// Candidate borders are the ones `outside` exceeds, tried right, left, top,
/// bottom. A candidate is rejected when the crossing lies beyond the segment or
/// its other coordinate falls outside `[0, 1]`; the next one is tried then.
/// Returns `None` if the segment never touches the viewport.
pub fn interpolate(outside: DVec2, other: DVec2) -> Option<DVec2> {
    for bound in ViewportBound::ORDER {
        if !bound.exceeded_by(outside) {
            continue;
        }
        let (target, from, to) = match bound {
            ViewportBound::Right => (1.0, outside.x, other.x),
            ViewportBound::Left => (0.0, outside.x, other.x),
            ViewportBound::Top => (1.0, outside.y, other.y),
            ViewportBound::Bottom => (0.0, outside.y, other.y),
        };
        if to == from {
            continue;
        }
        let t = (target - from) / (to - from);
        if !within_unit(t) {
            continue;
        }
        let candidate = match bound {
            ViewportBound::Right | ViewportBound::Left => {
                DVec2::new(target, outside.y + t * (other.y - outside.y))
            }
            ViewportBound::Top | ViewportBound::Bottom => {
                DVec2::new(outside.x + t * (other.x - outside.x), target)
            }
        };
        if within_unit(candidate.x) && within_unit(candidate.y) {
            return Some(candidate.clamp(DVec2::ZERO, DVec2::ONE));
        }
    }
    None
}

/// Visible part of the segment `previous -> current`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClippedSegment {
    Hidden,
    Visible {
        from: DVec2,
        to: DVec2,
        /// `to` is `current` itself rather than an interpolated border point.
        to_is_original: bool,
    },
}

pub fn clip_segment(previous: DVec2, current: DVec2) -> ClippedSegment {
    match (is_inside(previous), is_inside(current)) {
        (true, true) => ClippedSegment::Visible {
            from: previous,
            to: current,
            to_is_original: true,
        },
        (false, true) => match interpolate(previous, current) {
            Some(from) => ClippedSegment::Visible {
                from,
                to: current,
                to_is_original: true,
            },
            None => ClippedSegment::Hidden,
        },
        (true, false) => match interpolate(current, previous) {
            Some(to) => ClippedSegment::Visible {
                from: previous,
                to,
                to_is_original: false,
            },
            None => ClippedSegment::Hidden,
        },
        (false, false) => {
            match (interpolate(previous, current), interpolate(current, previous)) {
                (Some(from), Some(to)) if from.distance_squared(to) > EPSILON => {
                    ClippedSegment::Visible {
                        from,
                        to,
                        to_is_original: false,
                    }
                }
                _ => ClippedSegment::Hidden,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_segment_leaving_through_top() {
        let outside = DVec2::new(0.5, 1.5);
        let inside = DVec2::new(0.5, 0.5);
        assert_eq!(interpolate(outside, inside), Some(DVec2::new(0.5, 1.0)));

        match clip_segment(inside, outside) {
            ClippedSegment::Visible {
                from,
                to,
                to_is_original,
            } => {
                assert_eq!(from, inside);
                assert_eq!(to, DVec2::new(0.5, 1.0));
                assert!(!to_is_original);
            }
            ClippedSegment::Hidden => panic!("segment must be drawn"),
        }
    }

    #[test]
    fn entering_keeps_original_target() {
        let segment = clip_segment(DVec2::new(-1.0, 0.5), DVec2::new(0.5, 0.5));
        assert_eq!(
            segment,
            ClippedSegment::Visible {
                from: DVec2::new(0.0, 0.5),
                to: DVec2::new(0.5, 0.5),
                to_is_original: true,
            }
        );
    }

    #[test]
    fn corner_overshoot_falls_through_to_next_bound() {
        // Exceeds right and top; the right crossing lies above the viewport.
        let outside = DVec2::new(1.2, 3.0);
        let inside = DVec2::new(0.8, 0.0);
        let p = interpolate(outside, inside).unwrap();
        assert_eq!(p.y, 1.0);
        assert!((p.x - (1.2 - 0.4 * 2.0 / 3.0)).abs() < 1e-9);

        // Exceeds right and top; the right crossing is valid and wins.
        let outside = DVec2::new(1.5, 1.2);
        let inside = DVec2::new(0.5, 0.2);
        let p = interpolate(outside, inside).unwrap();
        assert_eq!(p.x, 1.0);
        assert!((p.y - 0.7).abs() < 1e-9);
    }

    #[test]
    fn both_outside_crossing_viewport() {
        let segment = clip_segment(DVec2::new(-1.0, 0.5), DVec2::new(2.0, 0.5));
        assert_eq!(
            segment,
            ClippedSegment::Visible {
                from: DVec2::new(0.0, 0.5),
                to: DVec2::new(1.0, 0.5),
                to_is_original: false,
            }
        );
    }

    #[test]
    fn both_outside_same_side_is_hidden() {
        assert_eq!(
            clip_segment(DVec2::new(1.5, 0.2), DVec2::new(2.0, 0.8)),
            ClippedSegment::Hidden
        );
        // Passes the corner without touching the viewport.
        assert_eq!(
            clip_segment(DVec2::new(0.5, 1.8), DVec2::new(1.8, 0.5)),
            ClippedSegment::Hidden
        );
    }
}
