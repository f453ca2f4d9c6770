// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

/// Anything with a position that can be clustered.
pub trait Positioned {
    /// Position of the item, in the space clustering runs in.
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Point {
        (**self).position()
    }
}

/// A group of nearby markers.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<M> {
    position: Point,
    markers: Vec<M>,
    grid_size: f64,
    sum: Vec2,
}

impl<M: Positioned> Cluster<M> {
    /// Opens a cluster holding only `marker`, centered on it.
    pub fn new(marker: M, grid_size: f64) -> Self {
        let position = marker.position();
        Self {
            position,
            markers: alloc::vec![marker],
            grid_size,
            sum: position.to_vec2(),
        }
    }

    /// Center of the cluster.
    ///
    /// The centroid of the members, or the exact position of a sole member.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Members in insertion order.
    #[must_use]
    pub fn markers(&self) -> &[M] {
        &self.markers
    }

    /// Consumes the cluster and returns its members.
    #[must_use]
    pub fn into_markers(self) -> Vec<M> {
        self.markers
    }

    /// Side length of the box the cluster accepts members from.
    #[must_use]
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Number of members.
    #[must_use]
    pub fn count(&self) -> usize {
        self.markers.len()
    }

    /// The representative member, which is the first one added.
    #[must_use]
    pub fn marker(&self) -> &M {
        &self.markers[0]
    }

    /// Smallest rectangle containing every member.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.markers
            .iter()
            .fold(Rect::from_points(self.position, self.position), |r, m| {
                r.union_pt(m.position())
            })
    }

    /// Whether `point` falls in the box of side [`Self::grid_size`] centered
    /// on the cluster. Edges count as inside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let half = self.grid_size / 2.0;
        point.x >= self.position.x - half
            && point.x <= self.position.x + half
            && point.y >= self.position.y - half
            && point.y <= self.position.y + half
    }

    /// Adds a member and moves the center to the new centroid.
    pub fn push(&mut self, marker: M) {
        self.sum += marker.position().to_vec2();
        self.markers.push(marker);
        let n = self.markers.len() as f64;
        self.position = (self.sum / n).to_point();
    }
}
