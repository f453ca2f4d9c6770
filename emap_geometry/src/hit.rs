// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-versus-shape hit tests.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, ParamCurveNearest, Point};

use crate::measure::distance;

/// Default perpendicular tolerance for [`point_on_line`], in the caller's units.
pub const DEFAULT_LINE_TOLERANCE: f64 = 5.0;

/// Slack allowed when checking that a point projects inside a segment.
///
/// [`point_on_line`] accepts a point only when the sum of its distances to
/// both endpoints is within this buffer of the segment length.
pub const LINE_SPAN_BUFFER: f64 = 0.1;

/// Even-odd ray casting test.
///
/// The polygon is implicitly closed; a closing duplicate of the first vertex
/// is neither needed nor harmful. Polygons with fewer than three vertices
/// enclose nothing.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for (i, &pi) in polygon.iter().enumerate() {
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Returns `true` if `point` lies on `segment`.
///
/// Two conditions must hold:
/// - the perpendicular distance from `point` to the line through the segment
///   is at most `tolerance`, and
/// - `point` projects within the segment span, checked by comparing the sum
///   of its distances to both endpoints against the segment length (within
///   [`LINE_SPAN_BUFFER`]).
///
/// A zero-length segment degenerates to a proximity test against its single
/// point.
#[must_use]
pub fn point_on_line(point: Point, segment: Line, tolerance: f64) -> bool {
    let Line { p0: a, p1: b } = segment;
    let len = distance(a, b);
    if len <= f64::EPSILON {
        return distance(point, a) <= tolerance;
    }

    let ab = b - a;
    let perpendicular = ab.cross(point - a).abs() / len;
    if perpendicular > tolerance {
        return false;
    }

    let span = distance(point, a) + distance(point, b);
    (span - len).abs() <= LINE_SPAN_BUFFER
}

/// Distance from `point` to the closest point of the segment `a`–`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to that endpoint.
#[must_use]
pub fn distance_point_to_segment(point: Point, a: Point, b: Point) -> f64 {
    if distance(a, b) <= f64::EPSILON {
        return distance(point, a);
    }
    Line::new(a, b).nearest(point, 0.).distance_sq.sqrt()
}

/// Returns `true` if `point` is inside or on the circle.
#[must_use]
pub fn point_in_circle(point: Point, center: Point, radius: f64) -> bool {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy <= radius * radius
}

/// Returns `true` if `a` and `b` are at most `tolerance` apart.
#[must_use]
pub fn is_near(a: Point, b: Point, tolerance: f64) -> bool {
    distance(a, b) <= tolerance
}
