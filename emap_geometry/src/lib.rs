// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! EMap Geometry: the geometry kernel shared by the map, marker, area and
//! editor crates.
//!
//! Everything here is a pure function over [`kurbo`] types:
//! - Measuring: [`distance`], [`centroid`], [`bounding_rect`], [`center_offset`].
//! - Moving points: [`scale_point`].
//! - Hit testing: [`point_in_polygon`], [`point_on_line`],
//!   [`distance_point_to_segment`], [`point_in_circle`], [`is_near`].
//!
//! Callers decide which space a point lives in (world or screen). The kernel
//! never converts between spaces.
//!
//! Inputs that have no meaningful answer, such as the centroid of nothing or
//! the direction from a point to itself, are reported as [`GeometryError`]
//! instead of silently producing `NaN`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Line, Point};
//! use emap_geometry::{centroid, point_in_polygon, point_on_line, DEFAULT_LINE_TOLERANCE};
//!
//! let square = [
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ];
//! assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
//! assert_eq!(centroid(&square).unwrap(), Point::new(5.0, 5.0));
//!
//! let segment = Line::new((0.0, 0.0), (100.0, 0.0));
//! assert!(point_on_line(Point::new(50.0, 0.0), segment, DEFAULT_LINE_TOLERANCE));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod error;
mod hit;
mod measure;

pub use error::GeometryError;
pub use hit::{
    DEFAULT_LINE_TOLERANCE, LINE_SPAN_BUFFER, distance_point_to_segment, is_near,
    point_in_circle, point_in_polygon, point_on_line,
};
pub use measure::{bounding_rect, center_offset, centroid, distance, scale_point};
