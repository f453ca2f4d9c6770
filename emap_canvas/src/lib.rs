// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! EMap Canvas: the drawing seam between map layers and whatever actually
//! paints pixels.
//!
//! - [`DrawContext`] is a small immediate-mode 2D API modelled on the HTML
//!   canvas context. Map areas, markers and the shape editor draw through it.
//! - [`SurfaceTarget`] is the element that owns a context and a backing store.
//! - [`Surface`] drives the DPI-aware lifecycle: it sizes the backing store in
//!   device pixels, scales the context once, and reports
//!   [`SurfaceState::Pending`] while the target is not ready yet.
//! - [`RecordingContext`] and [`RecordingTarget`] are a headless
//!   implementation that records [`DrawCommand`]s, useful in tests and for
//!   embedders that replay commands into their own renderer.
//!
//! ## Minimal example
//!
//! ```rust
//! use emap_canvas::{DrawCommand, DrawContext, RecordingTarget, Surface, SurfaceState};
//! use kurbo::{Point, Size};
//! use peniko::Color;
//!
//! let mut surface = Surface::new(RecordingTarget::attached());
//! assert_eq!(surface.init(Size::new(200.0, 100.0), 2.0), SurfaceState::Ready);
//!
//! let cx = surface.context_mut().unwrap();
//! cx.set_stroke_color(Color::from_rgb8(0x00, 0x73, 0xe6));
//! cx.trace_polyline(&[Point::new(10.0, 10.0), Point::new(50.0, 40.0)], false);
//! cx.stroke();
//!
//! let recording = surface.target().recording();
//! assert_eq!(recording.paint_count(), 1);
//! assert!(matches!(recording.commands().last(), Some(DrawCommand::Stroke { .. })));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`/`peniko`.
//! - `libm`: `no_std` float math.
//! - `tracing`: debug events for surface (re)initialization.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod log;
mod recording;
mod surface;

pub use context::DrawContext;
pub use recording::{DrawCommand, PaintState, RecordingContext, RecordingTarget};
pub use surface::{Surface, SurfaceState, SurfaceTarget, resolve_dpi};
