// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use emap_canvas::DrawContext;
use emap_geometry::distance_point_to_segment;
use kurbo::{Cap, CubicBez, Join, PathEl, Point};

use super::{LineHitParams, apply_style};
use crate::ShapeStyle;

/// Tension of the spline fitted through curve points.
///
/// `0.0` gives a Catmull-Rom spline; larger values pull the control points
/// towards the vertices.
pub const CURVE_TENSION: f64 = 0.5;

/// Maximum deviation of the sampled polyline from the spline, in pixels.
const FLATTEN_TOLERANCE: f64 = 0.15;

/// Fits cubic segments through `points`.
///
/// Three points yield a single cubic using the middle point as the first
/// control point. Longer runs duplicate both ends and place each segment's
/// control points along the chord through its neighbours.
fn fit_spline(points: &[Point], tension: f64) -> Vec<CubicBez> {
    match points {
        [] | [_] | [_, _] => Vec::new(),
        [p0, p1, p2] => alloc::vec![CubicBez::new(*p0, *p1, *p2, *p2)],
        [first, .., last] => {
            let mut padded = Vec::with_capacity(points.len() + 2);
            padded.push(*first);
            padded.extend_from_slice(points);
            padded.push(*last);

            let s = (1.0 - tension) / 6.0;
            padded
                .windows(4)
                .map(|w| {
                    let c1 = w[1] + (w[2] - w[0]) * s;
                    let c2 = w[2] + (w[1] - w[3]) * s;
                    CubicBez::new(w[1], c1, c2, w[2])
                })
                .collect()
        }
    }
}

/// The polyline a curve through `points` is drawn and hit tested as.
///
/// Two points give the straight segment between them; three or more are
/// fitted with a spline of [`CURVE_TENSION`] and flattened.
#[must_use]
pub fn curve_polyline(points: &[Point]) -> Vec<Point> {
    let [first, ..] = points else {
        return Vec::new();
    };
    if points.len() < 3 {
        return points.to_vec();
    }
    let segments = fit_spline(points, CURVE_TENSION);
    let path = core::iter::once(PathEl::MoveTo(*first))
        .chain(segments.iter().map(|c| PathEl::CurveTo(c.p1, c.p2, c.p3)));

    let mut out = Vec::new();
    kurbo::flatten(path, FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => out.push(p),
        _ => {}
    });
    out
}

pub(super) fn draw(cx: &mut dyn DrawContext, points: &[Point], style: &ShapeStyle) {
    if points.len() < 2 {
        return;
    }
    cx.save();
    apply_style(cx, style);
    cx.set_line_cap(Cap::Round);
    cx.set_line_join(Join::Round);
    cx.trace_polyline(&curve_polyline(points), false);
    cx.stroke();
    cx.restore();
}

pub(super) fn hit_test(point: Point, points: &[Point], params: &LineHitParams) -> bool {
    curve_polyline(points)
        .windows(2)
        .any(|w| distance_point_to_segment(point, w[0], w[1]) <= params.tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_points_stay_straight() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(curve_polyline(&pts), pts);
        assert!(curve_polyline(&[]).is_empty());
    }

    #[test]
    fn three_points_use_the_middle_as_control() {
        let pts = [Point::new(0.0, 0.0), Point::new(50.0, 50.0), Point::new(100.0, 0.0)];
        let spline = fit_spline(&pts, CURVE_TENSION);
        assert_eq!(spline.len(), 1);
        assert_eq!(spline[0], CubicBez::new(pts[0], pts[1], pts[2], pts[2]));
    }

    #[test]
    fn longer_runs_pass_through_every_point() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(40.0, 30.0),
            Point::new(80.0, -10.0),
            Point::new(120.0, 20.0),
        ];
        let spline = fit_spline(&pts, CURVE_TENSION);
        assert_eq!(spline.len(), pts.len() - 1);
        for (i, seg) in spline.iter().enumerate() {
            assert_eq!(seg.p0, pts[i]);
            assert_eq!(seg.p3, pts[i + 1]);
        }
        // The first control point sits on the chord through the padded
        // neighbours: (p1 - p0) * (1 - 0.5) / 6 away from p0.
        let expected = pts[0] + (pts[1] - pts[0]) * (0.5 / 6.0);
        assert!((spline[0].p1 - expected).hypot() < 1e-12);
    }

    #[test]
    fn flattened_curve_starts_and_ends_on_the_input() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(40.0, 30.0),
            Point::new(80.0, -10.0),
            Point::new(120.0, 20.0),
        ];
        let line = curve_polyline(&pts);
        assert!(line.len() > pts.len());
        assert_eq!(line.first(), Some(&pts[0]));
        assert_eq!(line.last(), Some(&pts[3]));
    }

    #[test]
    fn hit_follows_the_curve() {
        let pts = [Point::new(0.0, 0.0), Point::new(50.0, 50.0), Point::new(100.0, 0.0)];
        let params = LineHitParams::default();
        let mid = kurbo::ParamCurve::eval(&fit_spline(&pts, CURVE_TENSION)[0], 0.5);
        for p in [pts[0], mid, pts[2]] {
            assert!(hit_test(p, &pts, &params), "{p:?} should hit");
        }
        // The middle input point is a control point, off the curve.
        assert!(!hit_test(pts[1], &pts, &params));
        assert!(!hit_test(Point::new(50.0, 0.0), &pts, &params));
    }
}
