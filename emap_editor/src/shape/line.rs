// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use emap_canvas::DrawContext;
use emap_geometry::point_on_line;
use kurbo::{Line, Point, Vec2};

use super::{LineHitParams, apply_style};
use crate::ShapeStyle;

pub(super) fn draw(cx: &mut dyn DrawContext, points: &[Point], style: &ShapeStyle) {
    if points.len() < 2 {
        return;
    }
    cx.save();
    apply_style(cx, style);
    cx.trace_polyline(&points[..2], false);
    cx.stroke();
    cx.restore();
}

/// Moves endpoint 0 or 1; any other index leaves the line alone.
pub(super) fn update_point(points: &[Point], delta: Vec2, index: usize) -> Vec<Point> {
    let mut out = points.to_vec();
    if index < 2
        && let Some(p) = out.get_mut(index)
    {
        *p += delta;
    }
    out
}

pub(super) fn hit_test(point: Point, points: &[Point], params: &LineHitParams) -> bool {
    match points {
        [a, b, ..] => point_on_line(point, Line::new(*a, *b), params.tolerance),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use emap_canvas::{DrawCommand, RecordingContext};

    use super::*;

    #[test]
    fn only_the_indexed_endpoint_moves() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let d = Vec2::new(3.0, -2.0);
        assert_eq!(update_point(&pts, d, 0), [Point::new(3.0, -2.0), pts[1]]);
        assert_eq!(update_point(&pts, d, 1), [pts[0], Point::new(13.0, 8.0)]);
        assert_eq!(update_point(&pts, d, 2), pts);
    }

    #[test]
    fn hit_uses_segment_proximity() {
        let pts = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let params = LineHitParams::default();
        assert!(hit_test(Point::new(50.0, 0.0), &pts, &params));
        assert!(!hit_test(Point::new(50.0, 20.0), &pts, &params));
        assert!(!hit_test(Point::new(50.0, 0.0), &pts[..1], &params));
    }

    #[test]
    fn draws_one_stroked_segment() {
        let mut cx = RecordingContext::new();
        draw(&mut cx, &[Point::ZERO, Point::new(4.0, 4.0)], &ShapeStyle::default());
        assert!(cx.commands().contains(&DrawCommand::LineTo(Point::new(4.0, 4.0))));
        assert_eq!(cx.paint_count(), 1);
        assert_eq!(cx.save_depth(), 0);
    }
}
