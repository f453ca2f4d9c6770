// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Cap, Join, Point, Rect, Vec2};
use peniko::Color;

/// An immediate-mode 2D drawing context.
///
/// This mirrors the subset of the HTML canvas 2D API that map layers and the
/// shape editor need. Implementations may paint directly (a browser context,
/// a raster backend) or record calls for later replay, as
/// [`RecordingContext`](crate::RecordingContext) does.
///
/// Coordinates passed to path and rect methods are in the context's current
/// user space, that is, after any `translate`/`scale` calls.
pub trait DrawContext {
    /// Pushes the current drawing state (transform and styles).
    fn save(&mut self);

    /// Pops the most recently saved drawing state. Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Resets the current transform to identity.
    fn reset_transform(&mut self);

    /// Appends a translation to the current transform.
    fn translate(&mut self, offset: Vec2);

    /// Appends a non-uniform scale to the current transform.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Clears `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Sets the color used by [`DrawContext::stroke`] and [`DrawContext::stroke_rect`].
    fn set_stroke_color(&mut self, color: Color);

    /// Sets the color used by [`DrawContext::fill`] and [`DrawContext::fill_rect`].
    fn set_fill_color(&mut self, color: Color);

    /// Sets the stroke width.
    fn set_line_width(&mut self, width: f64);

    /// Sets the stroke cap style.
    fn set_line_cap(&mut self, cap: Cap);

    /// Sets the stroke join style.
    fn set_line_join(&mut self, join: Join);

    /// Sets the global alpha applied to every subsequent paint.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Starts a new, empty path.
    fn begin_path(&mut self);

    /// Starts a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Adds a straight segment to `p`.
    fn line_to(&mut self, p: Point);

    /// Closes the current subpath.
    fn close_path(&mut self);

    /// Adds a closed rectangle subpath.
    fn rect(&mut self, rect: Rect);

    /// Adds a circular arc, angles in radians, clockwise in a y-down space.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);

    /// Strokes the current path.
    fn stroke(&mut self);

    /// Fills the current path.
    fn fill(&mut self);

    /// Fills `rect` without touching the current path.
    fn fill_rect(&mut self, rect: Rect);

    /// Strokes `rect` without touching the current path.
    fn stroke_rect(&mut self, rect: Rect);

    /// Replaces the current path with a polyline through `points`.
    ///
    /// Does nothing for an empty slice apart from beginning a new path.
    fn trace_polyline(&mut self, points: &[Point], close: bool) {
        self.begin_path();
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        if close {
            self.close_path();
        }
    }
}
