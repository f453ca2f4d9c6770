// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use emap_canvas::DrawContext;
use kurbo::{Line, Point};

use super::{apply_style, line};
use crate::{ArrowStyle, ShapeStyle};

/// Geometry of the arrow standing on the midpoint of `p0`–`p1`.
///
/// Returns the shaft as a [`Line`] from the midpoint outwards and the head
/// as four points: shaft tip, one base corner, apex, other base corner.
/// `None` when the endpoints coincide and there is no perpendicular.
#[must_use]
pub fn arrow_head(p0: Point, p1: Point, style: &ArrowStyle) -> Option<(Line, [Point; 4])> {
    let d = p1 - p0;
    let len = d.hypot();
    if len <= f64::EPSILON {
        return None;
    }
    let mid = p0.midpoint(p1);
    let mut perp = d.turn_90() / len;
    if style.is_above {
        perp = -perp;
    }
    let along = -perp.turn_90();

    let shaft = style.shaft_length;
    let tip = mid + perp * shaft;
    let base = mid + perp * (shaft - style.arrow_width);
    let apex = mid + perp * (shaft + style.arrow_length);
    Some((
        Line::new(mid, tip),
        [
            tip,
            base + along * style.arrow_width,
            apex,
            base - along * style.arrow_width,
        ],
    ))
}

pub(super) fn draw(cx: &mut dyn DrawContext, points: &[Point], style: &ShapeStyle) {
    let [p0, p1, ..] = points else {
        return;
    };
    line::draw(cx, points, style);

    let Some((shaft, head)) = arrow_head(*p0, *p1, &style.arrow) else {
        return;
    };
    cx.save();
    apply_style(cx, style);
    cx.trace_polyline(&[shaft.p0, shaft.p1], false);
    cx.stroke();
    cx.trace_polyline(&head, true);
    cx.fill();
    cx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn arrow_is_perpendicular_at_midpoint() {
        let style = ArrowStyle::default();
        let (shaft, head) =
            arrow_head(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &style).unwrap();
        assert!(close(shaft.p0, Point::new(50.0, 0.0)));
        // (-dy, dx) of a rightward line points down in y-down space.
        assert!(close(shaft.p1, Point::new(50.0, 10.0)));
        assert!(close(head[2], Point::new(50.0, 20.0)));
        // Base corners straddle the shaft at distance `arrow_width`.
        assert!(close(head[1], Point::new(55.0, 5.0)));
        assert!(close(head[3], Point::new(45.0, 5.0)));
    }

    #[test]
    fn is_above_flips_the_side() {
        let style = ArrowStyle {
            is_above: true,
            ..ArrowStyle::default()
        };
        let (shaft, head) =
            arrow_head(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &style).unwrap();
        assert!(close(shaft.p1, Point::new(50.0, -10.0)));
        assert!(close(head[2], Point::new(50.0, -20.0)));
    }

    #[test]
    fn degenerate_line_has_no_arrow() {
        let p = Point::new(3.0, 3.0);
        assert!(arrow_head(p, p, &ArrowStyle::default()).is_none());
    }
}
