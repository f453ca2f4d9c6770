// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! EMap Editor: draw and edit vector shapes on top of an image map.
//!
//! Five shape kinds are supported, see [`ShapeKind`]. Each kind dispatches
//! drawing, point updates and hit testing through a static [`ShapeVTable`].
//!
//! The [`Editor`] is a small state machine over [`EditorMode`]:
//! - `Default`: idle, pointer input is ignored.
//! - `Draw`: pointer presses place points. Lines, arrows and rectangles
//!   commit on their second point. Polygons commit when a point lands back
//!   on the first one. Curves commit on [`Editor::finish_draw`].
//! - `Edit`: one shape is selected. Pressing on a handle resizes it,
//!   pressing on its body moves it.
//!
//! Committed shapes live in a [`History`]. Handles are recomputed from the
//! selected shape on every frame by [`compute_controls`].
//!
//! Hosts forward pointer input, drain [`EditorEvent`]s and paint through an
//! [`emap_canvas::DrawContext`].
//!
//! ## Minimal example
//!
//! ```rust
//! use emap_canvas::RecordingContext;
//! use emap_editor::{Cursor, Editor, EditorEvent, EditorMode, EditorOptions, ShapeKind};
//! use kurbo::Point;
//!
//! let mut editor = Editor::new(EditorOptions {
//!     auto_edit: true,
//!     ..EditorOptions::default()
//! });
//!
//! editor.begin_draw(ShapeKind::Rect);
//! editor.pointer_down(Point::new(10.0, 10.0));
//! editor.pointer_move(Point::new(60.0, 40.0));
//! editor.pointer_down(Point::new(110.0, 60.0));
//! assert_eq!(editor.mode(), EditorMode::Edit);
//! assert!(editor
//!     .drain_events()
//!     .any(|e| matches!(e, EditorEvent::Saved { kind: ShapeKind::Rect, .. })));
//!
//! // Drag the rectangle by its body.
//! editor.pointer_down(Point::new(50.0, 30.0));
//! assert_eq!(editor.cursor(), Cursor::Move);
//! editor.pointer_move(Point::new(55.0, 35.0));
//! editor.pointer_up(Point::new(55.0, 35.0));
//! assert_eq!(
//!     editor.selected_entry().unwrap().points,
//!     [Point::new(15.0, 15.0), Point::new(115.0, 65.0)]
//! );
//!
//! let mut cx = RecordingContext::new();
//! editor.render(&mut cx);
//! assert!(cx.paint_count() > 0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`/`peniko` and the sibling crates.
//! - `libm`: `no_std` float math.
//! - `tracing`: debug events for mode changes and commits.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod control;
mod editor;
mod history;
mod log;
mod shape;
mod style;

pub use control::{
    CONTROL_STROKE, ControlBorder, ControlOptions, Controls, Corner, Cursor, HandleShape,
    compute_controls, corner_cursor,
};
pub use editor::{Editor, EditorEvent, EditorKey, EditorMode, EditorOptions};
pub use history::{History, HistoryEntry, ShapeId};
pub use shape::{
    CURVE_TENSION, DrawFn, HitTestFn, LineHitParams, POLYGON_CLOSE_TOLERANCE, ShapeKind,
    ShapeVTable, UpdatePointFn, arrow_head, curve_polyline, normalize_rect, preview_points,
    rect_corners,
};
pub use style::{ArrowStyle, DEFAULT_STROKE, ShapeStyle, ShapeStyles};
