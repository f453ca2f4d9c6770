// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::GeometryError;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Arithmetic mean of the given points.
///
/// Returns [`GeometryError::EmptyPoints`] for an empty slice.
pub fn centroid(points: &[Point]) -> Result<Point, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPoints);
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let n = points.len() as f64;
    Ok((sum / n).to_point())
}

/// Moves `point` along the ray from `center` through `point` so that it ends
/// up `new_distance` away from `center`.
///
/// The direction is preserved and only the magnitude changes. A point equal
/// to `center` has no direction and yields
/// [`GeometryError::DegenerateDirection`].
pub fn scale_point(point: Point, center: Point, new_distance: f64) -> Result<Point, GeometryError> {
    let dir = point - center;
    let len = dir.hypot();
    if len <= f64::EPSILON {
        return Err(GeometryError::DegenerateDirection);
    }
    Ok(center + dir * (new_distance / len))
}

/// Smallest axis-aligned rectangle containing every point, or `None` for an
/// empty slice.
#[must_use]
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
    )
}

/// Offset that centers an `inner` box inside an `outer` box.
///
/// Used to place the map image in the middle of its layer on first paint.
/// The offset is negative on an axis where `inner` is larger than `outer`.
#[must_use]
pub fn center_offset(outer: Size, inner: Size) -> Vec2 {
    Vec2::new(
        (outer.width - inner.width) / 2.0,
        (outer.height - inner.height) / 2.0,
    )
}
