// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! EMap View: the zoom and pan model of an image map, plus the layers that
//! ride on it.
//!
//! A map shows one image. The image lives in **world space** (its own
//! pixels); what the user sees is **screen space**. [`TransformContext`]
//! owns the mapping between the two:
//! - the zoom, clamped to the bounds from [`MapOptions`],
//! - the accumulated pan,
//! - the anchor and ratio of the last zoom change,
//! - the DPI scale and layer size,
//! - the screen rectangle of the placed image.
//!
//! Mutations notify subscribers synchronously with a [`TransformEvent`].
//! Screen-space state is carried along with [`apply_pan`] and
//! [`apply_zoom_anchor`], which is what [`ScreenAnchor`] does for each event.
//!
//! On top of that sit:
//! - [`MapImage`] with its [`ImageStatus`] and [`ImageError`],
//! - [`Marker`]s with a content-box origin,
//! - [`Area`]s, world-space polygons painted through an
//!   [`emap_canvas::DrawContext`],
//! - [`ZoomAnimation`] with the [`Easing`] curves.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use emap_view::{MapImage, MapOptions, ScreenAnchor, TransformContext};
//! use kurbo::{Point, Size, Vec2};
//!
//! let mut view = TransformContext::new(&MapOptions::default());
//! view.resize(Size::new(800.0, 600.0));
//!
//! let mut image = MapImage::new();
//! let rect = image.finish_loading(Ok(Size::new(400.0, 300.0)), &mut view).unwrap();
//! assert_eq!(rect.origin(), Point::new(200.0, 150.0));
//!
//! // Keep a screen point glued to the image through pan and zoom.
//! let world = Point::new(100.0, 100.0);
//! let pin = Rc::new(RefCell::new(ScreenAnchor::new(view.world_to_screen(world))));
//! let tracked = pin.clone();
//! view.subscribe(move |event| tracked.borrow_mut().apply(event));
//!
//! view.pan_by(Vec2::new(-50.0, 0.0));
//! view.zoom_to(2.0, Point::new(400.0, 300.0));
//! assert_eq!(pin.borrow().position, view.world_to_screen(world));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`/`peniko` and the sibling crates.
//! - `libm`: `no_std` float math.
//! - `tracing`: debug events for zoom changes and image placement.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod area;
mod easing;
mod image;
mod log;
mod marker;
mod options;
mod transform;

pub use area::{Area, AreaStyle};
pub use easing::{Animation, Easing, ZoomAnimation};
pub use emap_canvas::resolve_dpi;
pub use image::{ImageError, ImageStatus, MapImage};
pub use marker::{Marker, OriginX, OriginY, ScreenAnchor};
pub use options::MapOptions;
pub use transform::{
    ListenerId, TransformContext, TransformDebugInfo, TransformEvent, apply_pan,
    apply_zoom_anchor,
};
