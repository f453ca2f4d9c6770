// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! EMap Cluster: group nearby markers so a crowded map stays readable.
//!
//! Markers are anything implementing [`Positioned`]. An [`Algorithm`] turns
//! the current zoom and a list of markers into [`Cluster`]s; the built-in
//! one is [`GridAlgorithm`]. Clusters are rebuilt from scratch on every
//! call.
//!
//! [`AlgorithmOutput::changed`] reports whether the zoom moved since the
//! previous call, which hosts use to decide whether to re-render.
//!
//! ## Minimal example
//!
//! ```rust
//! use emap_cluster::{Algorithm, GridAlgorithm, GridOptions, Positioned};
//! use kurbo::Point;
//!
//! struct Pin {
//!     name: &'static str,
//!     at: Point,
//! }
//!
//! impl Positioned for Pin {
//!     fn position(&self) -> Point {
//!         self.at
//!     }
//! }
//!
//! let pins = [
//!     Pin { name: "a", at: Point::new(0.0, 0.0) },
//!     Pin { name: "b", at: Point::new(40.0, 30.0) },
//!     Pin { name: "c", at: Point::new(900.0, 0.0) },
//! ];
//!
//! let mut grid = GridAlgorithm::new(GridOptions::default());
//! let out = grid.calculate(2.0, pins.iter().collect());
//! assert!(out.changed);
//! assert_eq!(out.clusters.len(), 2);
//! assert_eq!(out.clusters[0].marker().name, "a");
//! assert_eq!(out.clusters[0].count(), 2);
//! assert_eq!(out.clusters[0].position(), Point::new(20.0, 15.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo` and `emap_geometry`.
//! - `libm`: `no_std` float math.
//! - `tracing`: a debug event per clustering pass.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

mod cluster;
mod grid;
mod log;

pub use cluster::{Cluster, Positioned};
pub use grid::{GridAlgorithm, GridOptions};

/// Result of one clustering pass.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmOutput<M> {
    /// Whether the zoom differs from the previous pass.
    pub changed: bool,
    /// The clusters, in creation order.
    pub clusters: Vec<Cluster<M>>,
}

/// A clustering strategy.
pub trait Algorithm<M: Positioned> {
    /// Groups `markers` for display at `zoom`.
    fn calculate(&mut self, zoom: f64, markers: Vec<M>) -> AlgorithmOutput<M>;
}
