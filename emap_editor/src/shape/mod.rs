// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape primitives: drawing, point updates and hit tests per kind.
//!
//! Every kind exposes the same three capabilities through a
//! [`ShapeVTable`]. Point updates are pure: they take the current points and
//! return a new vector, leaving the input alone.

use alloc::vec::Vec;

use emap_canvas::DrawContext;
use emap_geometry::DEFAULT_LINE_TOLERANCE;
use kurbo::{Point, Vec2};

use crate::ShapeStyle;

mod arrow;
mod curve;
mod line;
mod polygon;
mod rect;

pub use arrow::arrow_head;
pub use curve::{CURVE_TENSION, curve_polyline};
pub use polygon::POLYGON_CLOSE_TOLERANCE;
pub use rect::{normalize_rect, rect_corners};

/// The closed set of shapes the editor can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A straight segment between two points.
    Line,
    /// A segment with a perpendicular arrow at its midpoint.
    LineWithArrow,
    /// An axis-aligned rectangle stored as two opposite corners.
    Rect,
    /// A closed polygon with at least three vertices.
    Polygon,
    /// A smooth open curve through at least two points.
    Curve,
}

/// Tolerances for hit testing outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHitParams {
    /// Maximum distance from a line or curve that still counts as a hit.
    pub tolerance: f64,
}

impl Default for LineHitParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_LINE_TOLERANCE,
        }
    }
}

/// Paints `points` as a shape of one kind.
pub type DrawFn = fn(&mut dyn DrawContext, &[Point], &ShapeStyle);
/// Moves the point behind handle `index` by a delta, returning new points.
pub type UpdatePointFn = fn(&[Point], Vec2, usize) -> Vec<Point>;
/// Whether a point hits the shape's body.
pub type HitTestFn = fn(Point, &[Point], &LineHitParams) -> bool;

/// The capabilities of one shape kind.
#[derive(Clone, Copy, Debug)]
pub struct ShapeVTable {
    /// Paints the shape.
    pub draw: DrawFn,
    /// Moves one handle.
    pub update_point: UpdatePointFn,
    /// Tests the shape body.
    pub hit_test: HitTestFn,
}

static LINE: ShapeVTable = ShapeVTable {
    draw: line::draw,
    update_point: line::update_point,
    hit_test: line::hit_test,
};

static LINE_WITH_ARROW: ShapeVTable = ShapeVTable {
    draw: arrow::draw,
    update_point: line::update_point,
    hit_test: line::hit_test,
};

static RECT: ShapeVTable = ShapeVTable {
    draw: rect::draw,
    update_point: rect::update_point,
    hit_test: rect::hit_test,
};

static POLYGON: ShapeVTable = ShapeVTable {
    draw: polygon::draw,
    update_point: update_index,
    hit_test: polygon::hit_test,
};

static CURVE: ShapeVTable = ShapeVTable {
    draw: curve::draw,
    update_point: update_index,
    hit_test: curve::hit_test,
};

impl ShapeKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Line,
        Self::LineWithArrow,
        Self::Rect,
        Self::Polygon,
        Self::Curve,
    ];

    /// The dispatch table for this kind.
    #[must_use]
    pub fn vtable(self) -> &'static ShapeVTable {
        match self {
            Self::Line => &LINE,
            Self::LineWithArrow => &LINE_WITH_ARROW,
            Self::Rect => &RECT,
            Self::Polygon => &POLYGON,
            Self::Curve => &CURVE,
        }
    }

    /// Fewest points a committed shape of this kind has.
    #[must_use]
    pub fn min_points(self) -> usize {
        match self {
            Self::Line | Self::LineWithArrow | Self::Rect | Self::Curve => 2,
            Self::Polygon => 3,
        }
    }

    /// Whether `points` is a valid committed point list for this kind.
    #[must_use]
    pub fn accepts(self, points: &[Point]) -> bool {
        match self {
            Self::Line | Self::LineWithArrow | Self::Rect => points.len() == 2,
            Self::Polygon | Self::Curve => points.len() >= self.min_points(),
        }
    }

    /// Paints `points` with `style`.
    pub fn draw(self, cx: &mut dyn DrawContext, points: &[Point], style: &ShapeStyle) {
        (self.vtable().draw)(cx, points, style);
    }

    /// Moves the point behind handle `index` by `delta`.
    ///
    /// Out-of-range indices return the points unchanged.
    #[must_use]
    pub fn update_point(self, points: &[Point], delta: Vec2, index: usize) -> Vec<Point> {
        (self.vtable().update_point)(points, delta, index)
    }

    /// Whether `point` hits the body of the shape described by `points`.
    #[must_use]
    pub fn hit_test(self, point: Point, points: &[Point], params: &LineHitParams) -> bool {
        (self.vtable().hit_test)(point, points, params)
    }
}

/// Points of an in-progress shape with the pointer appended.
///
/// Recomputed on every render; the draft itself is never extended.
#[must_use]
pub fn preview_points(points: &[Point], cursor: Point) -> Vec<Point> {
    let mut out = Vec::with_capacity(points.len() + 1);
    out.extend_from_slice(points);
    out.push(cursor);
    out
}

/// Moves exactly the point at `index`.
fn update_index(points: &[Point], delta: Vec2, index: usize) -> Vec<Point> {
    let mut out = points.to_vec();
    if let Some(p) = out.get_mut(index) {
        *p += delta;
    }
    out
}

/// Shared preamble of every draw routine: stroke, fill and width.
fn apply_style(cx: &mut dyn DrawContext, style: &ShapeStyle) {
    cx.set_stroke_color(style.stroke);
    cx.set_fill_color(style.fill);
    cx.set_line_width(style.line_width);
}
