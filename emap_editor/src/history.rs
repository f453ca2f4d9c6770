// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Point;

use crate::{LineHitParams, ShapeKind, ShapeStyle};

/// Stable identity of a committed shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u64);

impl ShapeId {
    /// The raw id value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// One committed shape.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    /// Identity, unique within its [`History`].
    pub id: ShapeId,
    /// Kind of shape.
    pub kind: ShapeKind,
    /// Points in screen space; cardinality matches `kind`.
    pub points: Vec<Point>,
    /// Paint.
    pub style: ShapeStyle,
}

impl HistoryEntry {
    /// Whether `point` hits the body of this shape.
    #[must_use]
    pub fn hit_test(&self, point: Point, params: &LineHitParams) -> bool {
        self.kind.hit_test(point, &self.points, params)
    }
}

/// The committed shapes, in drawing order.
///
/// Ids are allocated monotonically and never reused. A revision counter
/// bumps on every change so renderers can skip redundant repaints.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    next_id: u64,
    revision: u64,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shapes in drawing order.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Iterates shapes in drawing order.
    pub fn iter(&self) -> core::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Current revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Looks up a shape.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Whether `id` refers to a live shape.
    #[must_use]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a shape and returns its id.
    ///
    /// Callers check the point count against the kind beforehand.
    pub fn push(&mut self, kind: ShapeKind, points: Vec<Point>, style: ShapeStyle) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.entries.push(HistoryEntry {
            id,
            kind,
            points,
            style,
        });
        self.bump_revision();
        id
    }

    /// Replaces the points of a shape. Returns `false` for a stale id.
    pub fn replace_points(&mut self, id: ShapeId, points: Vec<Point>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.points = points;
        self.bump_revision();
        true
    }

    /// Removes a shape and returns it.
    pub fn remove(&mut self, id: ShapeId) -> Option<HistoryEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.bump_revision();
        Some(self.entries.remove(index))
    }

    /// Removes every shape. Ids keep counting up.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.bump_revision();
    }

    /// The topmost shape hit by `point`, if any.
    #[must_use]
    pub fn hit(&self, point: Point, params: &LineHitParams) -> Option<ShapeId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.hit_test(point, params))
            .map(|e| e.id)
    }

    /// Maps every point of every shape through `f`.
    pub(crate) fn map_points(&mut self, mut f: impl FnMut(Point) -> Point) {
        if self.entries.is_empty() {
            return;
        }
        for entry in &mut self.entries {
            entry.points = entry.points.iter().map(|p| f(*p)).collect();
        }
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = core::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn square() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)]
    }

    #[test]
    fn ids_are_monotonic_and_not_reused() {
        let mut h = History::new();
        let a = h.push(ShapeKind::Rect, square(), ShapeStyle::default());
        let b = h.push(ShapeKind::Rect, square(), ShapeStyle::default());
        assert!(b > a);
        h.remove(b);
        h.clear();
        let c = h.push(ShapeKind::Rect, square(), ShapeStyle::default());
        assert!(c > b);
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn revision_bumps_on_changes_only() {
        let mut h = History::new();
        let r0 = h.revision();
        h.clear();
        assert_eq!(h.revision(), r0);

        let id = h.push(ShapeKind::Line, square(), ShapeStyle::default());
        let r1 = h.revision();
        assert!(r1 > r0);

        let stale = ShapeId(999);
        assert!(!h.replace_points(stale, square()));
        assert!(h.remove(stale).is_none());
        assert_eq!(h.revision(), r1);

        assert!(h.replace_points(id, vec![Point::ZERO, Point::new(1.0, 1.0)]));
        assert!(h.revision() > r1);
    }

    #[test]
    fn topmost_hit_wins() {
        let mut h = History::new();
        let below = h.push(ShapeKind::Rect, square(), ShapeStyle::default());
        let above = h.push(
            ShapeKind::Rect,
            vec![Point::new(50.0, 50.0), Point::new(150.0, 150.0)],
            ShapeStyle::default(),
        );
        let params = LineHitParams::default();
        assert_eq!(h.hit(Point::new(75.0, 75.0), &params), Some(above));
        assert_eq!(h.hit(Point::new(25.0, 25.0), &params), Some(below));
        assert_eq!(h.hit(Point::new(500.0, 500.0), &params), None);
    }
}
