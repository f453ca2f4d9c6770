// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use emap_canvas::DrawContext;
use emap_geometry::point_in_polygon;
use kurbo::Point;

use super::{LineHitParams, apply_style};
use crate::ShapeStyle;

/// How close, in pixels, a new vertex must land to the first one to close
/// the polygon while drawing.
pub const POLYGON_CLOSE_TOLERANCE: f64 = 10.0;

pub(super) fn draw(cx: &mut dyn DrawContext, points: &[Point], style: &ShapeStyle) {
    if points.len() < 2 {
        return;
    }
    cx.save();
    apply_style(cx, style);
    cx.trace_polyline(points, true);
    cx.fill();
    cx.stroke();
    cx.restore();
}

pub(super) fn hit_test(point: Point, points: &[Point], _params: &LineHitParams) -> bool {
    point_in_polygon(point, points)
}
