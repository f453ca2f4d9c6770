// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use emap_geometry::distance;

use crate::{Algorithm, AlgorithmOutput, Cluster, Positioned};

/// Configuration of a [`GridAlgorithm`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridOptions {
    /// Side length of the box around a cluster center that accepts members.
    pub grid_size: f64,
    /// Distance beyond which a cluster is not considered at all.
    pub max_distance: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            grid_size: 500.0,
            max_distance: 500.0,
        }
    }
}

/// Greedy nearest-cluster grouping.
///
/// Each pass starts from scratch and visits markers in order. A marker joins
/// the closest existing cluster strictly within `max_distance`, provided
/// that cluster's grid box contains it. Otherwise it opens a new cluster.
/// Membership is first fit: clusters never merge or split within a pass.
///
/// ```rust
/// use emap_cluster::{Algorithm, GridAlgorithm};
/// use kurbo::Point;
///
/// let mut grid = GridAlgorithm::default();
/// let out = grid.calculate(
///     1.0,
///     vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0), Point::new(1000.0, 1000.0)],
/// );
/// assert_eq!(out.clusters.len(), 2);
/// assert_eq!(out.clusters[0].count(), 2);
/// assert!(!out.changed);
/// ```
#[derive(Clone, Debug)]
pub struct GridAlgorithm {
    options: GridOptions,
    previous_zoom: f64,
}

impl Default for GridAlgorithm {
    fn default() -> Self {
        Self::new(GridOptions::default())
    }
}

impl GridAlgorithm {
    /// Creates the algorithm. The previous zoom starts at `1.0`.
    #[must_use]
    pub fn new(options: GridOptions) -> Self {
        Self {
            options,
            previous_zoom: 1.0,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Zoom seen by the last [`Algorithm::calculate`] call.
    #[must_use]
    pub fn previous_zoom(&self) -> f64 {
        self.previous_zoom
    }

    /// Groups `markers` without touching the zoom bookkeeping.
    pub fn cluster<M: Positioned>(&self, markers: impl IntoIterator<Item = M>) -> Vec<Cluster<M>> {
        let mut clusters: Vec<Cluster<M>> = Vec::new();
        for marker in markers {
            let position = marker.position();
            let mut best = self.options.max_distance;
            let mut closest = None;
            for (i, cluster) in clusters.iter().enumerate() {
                let d = distance(cluster.position(), position);
                if d < best {
                    best = d;
                    closest = Some(i);
                }
            }
            match closest.filter(|&i| clusters[i].contains(position)) {
                Some(i) => clusters[i].push(marker),
                None => clusters.push(Cluster::new(marker, self.options.grid_size)),
            }
        }
        clusters
    }
}

impl<M: Positioned> Algorithm<M> for GridAlgorithm {
    fn calculate(&mut self, zoom: f64, markers: Vec<M>) -> AlgorithmOutput<M> {
        let changed = zoom != self.previous_zoom;
        self.previous_zoom = zoom;
        let clusters = self.cluster(markers);
        crate::log::debug!(zoom, changed, clusters = clusters.len(), "clustered markers");
        AlgorithmOutput { changed, clusters }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;

    #[test]
    fn single_marker_keeps_its_position() {
        let p = Point::new(12.345, -6.789);
        let clusters = GridAlgorithm::default().cluster([p]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].position(), p);
    }

    #[test]
    fn near_markers_share_a_cluster() {
        let grid = GridAlgorithm::default();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 100.0);
        let c = Point::new(1000.0, 1000.0);
        assert_eq!(grid.cluster([a, b]).len(), 1);
        assert_eq!(grid.cluster([a, c]).len(), 2);
    }

    #[test]
    fn distance_bound_is_strict() {
        let grid = GridAlgorithm::new(GridOptions {
            grid_size: 1000.0,
            max_distance: 100.0,
        });
        let clusters = grid.cluster([Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn close_but_outside_the_box_opens_a_cluster() {
        // Within max_distance, outside the 100 wide box.
        let grid = GridAlgorithm::new(GridOptions {
            grid_size: 100.0,
            max_distance: 500.0,
        });
        let clusters = grid.cluster([Point::new(0.0, 0.0), Point::new(80.0, 0.0)]);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn ties_go_to_the_first_cluster() {
        let grid = GridAlgorithm::new(GridOptions {
            grid_size: 200.0,
            max_distance: 150.0,
        });
        // Two clusters 200 apart, then a marker exactly between them.
        let clusters = grid.cluster([
            Point::new(0.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(100.0, 0.0),
        ]);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].count(), 2);
        assert_eq!(clusters[1].count(), 1);
    }

    #[test]
    fn changed_tracks_the_zoom() {
        let mut grid = GridAlgorithm::default();
        let markers = || vec![Point::new(0.0, 0.0)];
        assert!(!grid.calculate(1.0, markers()).changed);
        assert!(grid.calculate(2.0, markers()).changed);
        assert!(!grid.calculate(2.0, markers()).changed);
        assert_eq!(grid.previous_zoom(), 2.0);
    }
}
