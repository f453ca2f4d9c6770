// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move and resize handles around the selected shape.
//!
//! Controls are derived from the shape's points on every render and never
//! stored alongside the shape. [`compute_controls`] lays them out;
//! [`Controls::hit_corner`] resolves a pointer to a handle.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use emap_canvas::DrawContext;
use emap_geometry::{centroid, distance, scale_point};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use smallvec::SmallVec;

use crate::{ShapeKind, rect_corners};

/// Outline color of handles and borders.
pub const CONTROL_STROKE: Color = Color::from_rgb8(0x00, 0xc9, 0xff);

/// Layout and paint of the selection controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlOptions {
    /// Side length of a square handle, diameter of a round one.
    pub corner_size: f64,
    /// Handle outline.
    pub corner_stroke: Color,
    /// Handle interior.
    pub corner_fill: Color,
    /// Border outline.
    pub border_stroke: Color,
    /// Gap between the shape and its handles, on top of half the line width.
    pub distance: f64,
    /// Slack around each handle that still counts as grabbing it.
    pub hit_tolerance: f64,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            corner_size: 8.0,
            corner_stroke: CONTROL_STROKE,
            corner_fill: Color::WHITE,
            border_stroke: CONTROL_STROKE,
            distance: 10.0,
            hit_tolerance: 10.0,
        }
    }
}

/// Pointer cursor requested by the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// The platform default.
    #[default]
    Default,
    /// Dragging a whole shape.
    Move,
    /// North-west corner.
    NwResize,
    /// North edge.
    NResize,
    /// North-east corner.
    NeResize,
    /// West edge.
    WResize,
    /// East edge.
    EResize,
    /// South-west corner.
    SwResize,
    /// South edge.
    SResize,
    /// South-east corner.
    SeResize,
}

impl Cursor {
    /// The CSS `cursor` keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Move => "move",
            Self::NwResize => "nw-resize",
            Self::NResize => "n-resize",
            Self::NeResize => "ne-resize",
            Self::WResize => "w-resize",
            Self::EResize => "e-resize",
            Self::SwResize => "sw-resize",
            Self::SResize => "s-resize",
            Self::SeResize => "se-resize",
        }
    }
}

/// Resize cursor for a handle at `corner` on a shape centered at `center`.
///
/// Picks the compass direction of `corner` as seen from `center` (y grows
/// downwards). A handle level with the center on both axes gets
/// [`Cursor::EResize`].
///
/// ```rust
/// use emap_editor::{Cursor, corner_cursor};
/// use kurbo::Point;
///
/// let c = Point::new(50.0, 50.0);
/// assert_eq!(corner_cursor(Point::new(0.0, 0.0), c), Cursor::NwResize);
/// assert_eq!(corner_cursor(Point::new(50.0, 90.0), c), Cursor::SResize);
/// ```
#[must_use]
pub fn corner_cursor(corner: Point, center: Point) -> Cursor {
    use core::cmp::Ordering::{Equal, Greater, Less};

    let h = corner.x.partial_cmp(&center.x).unwrap_or(Equal);
    let v = corner.y.partial_cmp(&center.y).unwrap_or(Equal);
    match (v, h) {
        (Less, Less) => Cursor::NwResize,
        (Less, Greater) => Cursor::NeResize,
        (Less, Equal) => Cursor::NResize,
        (Greater, Less) => Cursor::SwResize,
        (Greater, Greater) => Cursor::SeResize,
        (Greater, Equal) => Cursor::SResize,
        (Equal, Less) => Cursor::WResize,
        (Equal, _) => Cursor::EResize,
    }
}

/// How a handle is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleShape {
    /// A filled square.
    Square,
    /// A filled circle.
    Round,
}

/// One handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    /// Handle index passed to [`ShapeKind::update_point`].
    pub index: usize,
    /// Painted bounds.
    pub rect: Rect,
    /// Cursor while resizing through this handle.
    pub cursor: Cursor,
    /// Paint style.
    pub shape: HandleShape,
}

impl Corner {
    /// Whether `point` lies within the handle grown by `tolerance` on every
    /// side. Edges count as inside.
    #[must_use]
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        let r = self.rect;
        point.x >= r.x0 - tolerance
            && point.x <= r.x1 + tolerance
            && point.y >= r.y0 - tolerance
            && point.y <= r.y1 + tolerance
    }
}

/// Outline drawn around the selection.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlBorder {
    /// Rectangle grown outwards on every side.
    Rect(Rect),
    /// Polygon with every vertex pushed away from the center.
    Polygon(Vec<Point>),
}

/// The handles and border of one selected shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    /// Center the handles are laid out around.
    pub center: Point,
    /// Border, if the kind has one.
    pub border: Option<ControlBorder>,
    /// Handles in index order.
    pub corners: SmallVec<[Corner; 8]>,
}

impl Controls {
    /// First handle, in index order, containing `point` within `tolerance`.
    #[must_use]
    pub fn hit_corner(&self, point: Point, tolerance: f64) -> Option<&Corner> {
        self.corners.iter().find(|c| c.contains(point, tolerance))
    }

    /// Paints the border and then the handles.
    pub fn draw(&self, cx: &mut dyn DrawContext, options: &ControlOptions) {
        cx.save();
        cx.set_global_alpha(1.0);
        cx.set_line_width(1.0);

        if let Some(border) = &self.border {
            cx.set_stroke_color(options.border_stroke);
            match border {
                ControlBorder::Rect(r) => {
                    cx.begin_path();
                    cx.rect(*r);
                }
                ControlBorder::Polygon(points) => cx.trace_polyline(points, true),
            }
            cx.stroke();
        }

        cx.set_stroke_color(options.corner_stroke);
        cx.set_fill_color(options.corner_fill);
        for corner in &self.corners {
            cx.begin_path();
            match corner.shape {
                HandleShape::Square => cx.rect(corner.rect),
                HandleShape::Round => {
                    cx.arc(corner.rect.center(), corner.rect.width() / 2.0, 0.0, TAU);
                }
            }
            cx.fill();
            cx.stroke();
        }
        cx.restore();
    }
}

/// Lays out the controls of a shape.
///
/// Handles sit `line_width / 2 + options.distance` outside the shape:
/// rectangles get a grown border with square handles on its corners, lines
/// and arrows get round handles beyond each endpoint, and polygons and
/// curves get square handles beyond each vertex. Returns `None` when the
/// points cannot form the kind.
#[must_use]
pub fn compute_controls(
    kind: ShapeKind,
    points: &[Point],
    line_width: f64,
    options: &ControlOptions,
) -> Option<Controls> {
    let offset = line_width / 2.0 + options.distance;
    let handle = Size::new(options.corner_size, options.corner_size);
    let corner = |index: usize, at: Point, center: Point, shape| Corner {
        index,
        rect: Rect::from_center_size(at, handle),
        cursor: corner_cursor(at, center),
        shape,
    };

    match kind {
        ShapeKind::Rect => {
            let [a, b] = points else {
                return None;
            };
            let expanded = rect_corners(*a, *b);
            let center = centroid(&expanded).ok()?;
            let size = Size::new(
                (expanded[2].x - expanded[0].x).abs() + 2.0 * offset,
                (expanded[2].y - expanded[0].y).abs() + 2.0 * offset,
            );
            let border = Rect::from_center_size(center, size);
            let handles = [
                Point::new(border.x0, border.y0),
                Point::new(border.x1, border.y0),
                Point::new(border.x1, border.y1),
                Point::new(border.x0, border.y1),
            ];
            Some(Controls {
                center,
                border: Some(ControlBorder::Rect(border)),
                corners: handles
                    .iter()
                    .enumerate()
                    .map(|(i, p)| corner(i, *p, center, HandleShape::Square))
                    .collect(),
            })
        }
        ShapeKind::Line | ShapeKind::LineWithArrow | ShapeKind::Polygon | ShapeKind::Curve => {
            if !kind.accepts(points) {
                return None;
            }
            let center = centroid(points).ok()?;
            let pushed: Vec<Point> = points
                .iter()
                .map(|p| scale_point(*p, center, distance(*p, center) + offset).unwrap_or(*p))
                .collect();
            let shape = match kind {
                ShapeKind::Line | ShapeKind::LineWithArrow => HandleShape::Round,
                _ => HandleShape::Square,
            };
            let corners = pushed
                .iter()
                .enumerate()
                .map(|(i, p)| corner(i, *p, center, shape))
                .collect();
            let border = (kind == ShapeKind::Polygon).then(|| ControlBorder::Polygon(pushed));
            Some(Controls {
                center,
                border,
                corners,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use emap_canvas::{DrawCommand, RecordingContext};

    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn compass_covers_every_direction() {
        let c = Point::new(0.0, 0.0);
        let cases = [
            ((-1.0, -1.0), Cursor::NwResize),
            ((0.0, -1.0), Cursor::NResize),
            ((1.0, -1.0), Cursor::NeResize),
            ((-1.0, 0.0), Cursor::WResize),
            ((1.0, 0.0), Cursor::EResize),
            ((-1.0, 1.0), Cursor::SwResize),
            ((0.0, 1.0), Cursor::SResize),
            ((1.0, 1.0), Cursor::SeResize),
            ((0.0, 0.0), Cursor::EResize),
        ];
        for ((x, y), want) in cases {
            assert_eq!(corner_cursor(Point::new(x, y), c), want, "({x}, {y})");
        }
        assert_eq!(Cursor::SeResize.as_css(), "se-resize");
    }

    #[test]
    fn rect_border_grows_by_the_offset() {
        let pts = [Point::new(0.0, 0.0), Point::new(100.0, 50.0)];
        let controls = compute_controls(ShapeKind::Rect, &pts, 2.0, &ControlOptions::default())
            .unwrap();
        // 2 / 2 + 10 on each side.
        assert_eq!(
            controls.border,
            Some(ControlBorder::Rect(Rect::new(-11.0, -11.0, 111.0, 61.0)))
        );
        assert_eq!(controls.corners.len(), 4);
        let cursors: Vec<_> = controls.corners.iter().map(|c| c.cursor).collect();
        assert_eq!(
            cursors,
            [
                Cursor::NwResize,
                Cursor::NeResize,
                Cursor::SeResize,
                Cursor::SwResize
            ]
        );
        assert!(close(controls.corners[2].rect.center(), Point::new(111.0, 61.0)));
        assert_eq!(controls.corners[0].rect.width(), 8.0);
    }

    #[test]
    fn line_handles_are_round_and_pushed_out() {
        let pts = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let controls = compute_controls(ShapeKind::Line, &pts, 1.0, &ControlOptions::default())
            .unwrap();
        assert!(controls.border.is_none());
        assert_eq!(controls.corners[0].shape, HandleShape::Round);
        assert!(close(controls.corners[0].rect.center(), Point::new(-10.5, 0.0)));
        assert!(close(controls.corners[1].rect.center(), Point::new(110.5, 0.0)));
    }

    #[test]
    fn polygon_has_a_border_and_curve_does_not() {
        let tri = [Point::new(0.0, 0.0), Point::new(30.0, 0.0), Point::new(15.0, 30.0)];
        let options = ControlOptions::default();
        let polygon = compute_controls(ShapeKind::Polygon, &tri, 1.0, &options).unwrap();
        assert!(matches!(polygon.border, Some(ControlBorder::Polygon(ref p)) if p.len() == 3));
        assert_eq!(polygon.corners[0].shape, HandleShape::Square);

        let curve = compute_controls(ShapeKind::Curve, &tri, 1.0, &options).unwrap();
        assert!(curve.border.is_none());
        assert_eq!(curve.corners.len(), 3);
    }

    #[test]
    fn malformed_points_have_no_controls() {
        let options = ControlOptions::default();
        assert!(compute_controls(ShapeKind::Rect, &[Point::ZERO], 1.0, &options).is_none());
        assert!(compute_controls(ShapeKind::Polygon, &[], 1.0, &options).is_none());
    }

    #[test]
    fn first_overlapping_handle_wins() {
        // Both handles overlap the probe once grown by the tolerance.
        let square = |x: f64| Corner {
            index: 0,
            rect: Rect::new(x, 0.0, x + 8.0, 8.0),
            cursor: Cursor::Move,
            shape: HandleShape::Square,
        };
        let mut second = square(12.0);
        second.index = 1;
        let controls = Controls {
            center: Point::ZERO,
            border: None,
            corners: [square(0.0), second].into_iter().collect(),
        };
        let hit = controls.hit_corner(Point::new(10.0, 4.0), 10.0).unwrap();
        assert_eq!(hit.index, 0);
        // Edges of the grown box are inclusive.
        assert!(controls.corners[0].contains(Point::new(-10.0, -10.0), 10.0));
        assert!(controls.hit_corner(Point::new(40.0, 40.0), 10.0).is_none());
    }

    #[test]
    fn draws_border_then_handles() {
        let pts = [Point::new(0.0, 0.0), Point::new(100.0, 50.0)];
        let options = ControlOptions::default();
        let controls = compute_controls(ShapeKind::Rect, &pts, 1.0, &options).unwrap();
        let mut cx = RecordingContext::new();
        controls.draw(&mut cx, &options);
        // One border stroke plus fill and stroke per handle.
        assert_eq!(cx.paint_count(), 1 + 2 * 4);
        assert_eq!(cx.save_depth(), 0);
        assert!(matches!(cx.commands().last(), Some(DrawCommand::Restore)));
    }
}
