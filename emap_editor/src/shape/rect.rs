// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use emap_canvas::DrawContext;
use emap_geometry::point_in_polygon;
use kurbo::{Point, Rect, Vec2};

use super::{LineHitParams, apply_style};
use crate::ShapeStyle;

/// Expands the two stored corners of a rectangle into its four corners.
///
/// The order is top-left, top-right, bottom-right, bottom-left, assuming
/// `tl` is above and left of `br`. The first and third outputs are always
/// the inputs.
///
/// ```rust
/// use emap_editor::rect_corners;
/// use kurbo::Point;
///
/// let c = rect_corners(Point::new(0.0, 0.0), Point::new(100.0, 50.0));
/// assert_eq!(c[1], Point::new(100.0, 0.0));
/// assert_eq!(c[3], Point::new(0.0, 50.0));
/// ```
#[must_use]
pub fn rect_corners(tl: Point, br: Point) -> [Point; 4] {
    [tl, Point::new(br.x, tl.y), br, Point::new(tl.x, br.y)]
}

/// Reorders two opposite corners into (top-left, bottom-right).
#[must_use]
pub fn normalize_rect(a: Point, b: Point) -> [Point; 2] {
    let r = Rect::from_points(a, b);
    [r.origin(), Point::new(r.x1, r.y1)]
}

pub(super) fn draw(cx: &mut dyn DrawContext, points: &[Point], style: &ShapeStyle) {
    let [a, b, ..] = points else {
        return;
    };
    cx.save();
    apply_style(cx, style);
    cx.begin_path();
    cx.rect(Rect::from_points(*a, *b));
    cx.stroke();
    cx.fill();
    cx.restore();
}

/// Moves the coordinates backing corner `index` of [`rect_corners`].
///
/// Corner 0 owns `p0`, corner 2 owns `p1`; corner 1 takes `x` from `p1`
/// and `y` from `p0`, corner 3 the reverse.
pub(super) fn update_point(points: &[Point], delta: Vec2, index: usize) -> Vec<Point> {
    let mut out = points.to_vec();
    if let [p0, p1] = out.as_mut_slice() {
        match index {
            0 => *p0 += delta,
            1 => {
                p1.x += delta.x;
                p0.y += delta.y;
            }
            2 => *p1 += delta,
            3 => {
                p0.x += delta.x;
                p1.y += delta.y;
            }
            _ => {}
        }
    }
    out
}

pub(super) fn hit_test(point: Point, points: &[Point], _params: &LineHitParams) -> bool {
    match points {
        [a, b] => point_in_polygon(point, &rect_corners(*a, *b)),
        _ => false,
    }
}
