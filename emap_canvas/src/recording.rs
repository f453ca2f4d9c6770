// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless drawing context that records calls instead of painting.

use alloc::vec::Vec;

use kurbo::{Affine, Cap, Join, Point, Rect, Vec2};
use peniko::Color;

use crate::{DrawContext, SurfaceTarget};

/// Paint state tracked by [`RecordingContext`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintState {
    /// Current transform, composed from `translate`/`scale` calls.
    pub transform: Affine,
    /// Current stroke color.
    pub stroke_color: Color,
    /// Current fill color.
    pub fill_color: Color,
    /// Current stroke width.
    pub line_width: f64,
    /// Current global alpha.
    pub global_alpha: f64,
}

impl Default for PaintState {
    fn default() -> Self {
        // Canvas 2D initial state.
        Self {
            transform: Affine::IDENTITY,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
        }
    }
}

/// One recorded drawing call.
///
/// Paint operations (`Stroke`, `Fill`, `FillRect`, `StrokeRect`, `ClearRect`)
/// carry the [`PaintState`] in effect when they were issued so tests can assert
/// on colors and transforms without replaying the log.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `save()`.
    Save,
    /// `restore()`.
    Restore,
    /// `reset_transform()`.
    ResetTransform,
    /// `translate(offset)`.
    Translate(Vec2),
    /// `scale(sx, sy)`.
    Scale(f64, f64),
    /// `set_stroke_color(color)`.
    StrokeColor(Color),
    /// `set_fill_color(color)`.
    FillColor(Color),
    /// `set_line_width(width)`.
    LineWidth(f64),
    /// `set_line_cap(cap)`.
    LineCap(Cap),
    /// `set_line_join(join)`.
    LineJoin(Join),
    /// `set_global_alpha(alpha)`.
    GlobalAlpha(f64),
    /// `begin_path()`.
    BeginPath,
    /// `move_to(p)`.
    MoveTo(Point),
    /// `line_to(p)`.
    LineTo(Point),
    /// `close_path()`.
    ClosePath,
    /// `rect(rect)`.
    Rect(Rect),
    /// `arc(center, radius, start, end)`.
    Arc {
        /// Arc center.
        center: Point,
        /// Arc radius.
        radius: f64,
        /// Start angle in radians.
        start_angle: f64,
        /// End angle in radians.
        end_angle: f64,
    },
    /// `clear_rect(rect)`.
    ClearRect {
        /// Cleared rectangle in user space.
        rect: Rect,
        /// State at the time of the call.
        state: PaintState,
    },
    /// `stroke()`.
    Stroke {
        /// State at the time of the call.
        state: PaintState,
    },
    /// `fill()`.
    Fill {
        /// State at the time of the call.
        state: PaintState,
    },
    /// `fill_rect(rect)`.
    FillRect {
        /// Filled rectangle in user space.
        rect: Rect,
        /// State at the time of the call.
        state: PaintState,
    },
    /// `stroke_rect(rect)`.
    StrokeRect {
        /// Stroked rectangle in user space.
        rect: Rect,
        /// State at the time of the call.
        state: PaintState,
    },
}

impl DrawCommand {
    /// Returns `true` for commands that put pixels on the surface.
    #[must_use]
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            Self::Stroke { .. } | Self::Fill { .. } | Self::FillRect { .. } | Self::StrokeRect { .. }
        )
    }
}

/// A [`DrawContext`] that appends every call to a command log.
///
/// It also tracks the current [`PaintState`], including a save/restore stack,
/// so the effective transform can be inspected at any point.
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    state: PaintState,
    saved: Vec<PaintState>,
}

impl RecordingContext {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the log empty.
    ///
    /// The paint state is kept.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Clears the command log but keeps the paint state.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Current paint state.
    #[must_use]
    pub fn state(&self) -> &PaintState {
        &self.state
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Depth of the save/restore stack.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Number of painting commands recorded so far.
    #[must_use]
    pub fn paint_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_paint()).count()
    }
}

impl DrawContext for RecordingContext {
    fn save(&mut self) {
        self.saved.push(self.state);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn reset_transform(&mut self) {
        self.state.transform = Affine::IDENTITY;
        self.commands.push(DrawCommand::ResetTransform);
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform *= Affine::translate(offset);
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform *= Affine::scale_non_uniform(sx, sy);
        self.commands.push(DrawCommand::Scale(sx, sy));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect {
            rect,
            state: self.state,
        });
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
        self.commands.push(DrawCommand::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: Cap) {
        self.commands.push(DrawCommand::LineCap(cap));
    }

    fn set_line_join(&mut self, join: Join) {
        self.commands.push(DrawCommand::LineJoin(join));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.global_alpha = alpha;
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Rect(rect));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke { state: self.state });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill { state: self.state });
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            state: self.state,
        });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            state: self.state,
        });
    }
}

/// A [`SurfaceTarget`] backed by a [`RecordingContext`].
///
/// Starts detached; call [`RecordingTarget::attach`] to simulate the element
/// entering the document.
#[derive(Clone, Debug, Default)]
pub struct RecordingTarget {
    attached: bool,
    backing: (u32, u32),
    context: RecordingContext,
}

impl RecordingTarget {
    /// Creates a detached target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a target that is already attached.
    #[must_use]
    pub fn attached() -> Self {
        Self {
            attached: true,
            ..Self::default()
        }
    }

    /// Marks the target as attached.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Marks the target as detached. The recorded log is kept.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Backing-store size last set by the surface, in device pixels.
    #[must_use]
    pub fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    /// The recording context, regardless of attachment.
    #[must_use]
    pub fn recording(&self) -> &RecordingContext {
        &self.context
    }

    /// Mutable access to the recording context, regardless of attachment.
    pub fn recording_mut(&mut self) -> &mut RecordingContext {
        &mut self.context
    }
}

impl SurfaceTarget for RecordingTarget {
    type Context = RecordingContext;

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn context_mut(&mut self) -> Option<&mut RecordingContext> {
        self.attached.then_some(&mut self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_restore_tracks_transform() {
        let mut cx = RecordingContext::new();
        cx.translate(Vec2::new(10.0, 20.0));
        cx.save();
        cx.scale(2.0, 2.0);
        assert_eq!(
            cx.transform() * Point::new(1.0, 1.0),
            Point::new(12.0, 22.0)
        );
        cx.restore();
        assert_eq!(cx.transform(), Affine::translate((10.0, 20.0)));
        assert_eq!(cx.save_depth(), 0);
    }

    #[test]
    fn unbalanced_restore_is_ignored() {
        let mut cx = RecordingContext::new();
        cx.scale(3.0, 3.0);
        cx.restore();
        assert_eq!(cx.transform(), Affine::scale(3.0));
        assert_eq!(cx.commands().last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn paint_commands_capture_state() {
        let mut cx = RecordingContext::new();
        let red = Color::from_rgb8(255, 0, 0);
        cx.set_stroke_color(red);
        cx.set_line_width(2.0);
        cx.begin_path();
        cx.move_to(Point::ZERO);
        cx.line_to(Point::new(5.0, 5.0));
        cx.stroke();

        let Some(DrawCommand::Stroke { state }) = cx.commands().last() else {
            panic!("expected a stroke, got {:?}", cx.commands().last());
        };
        assert_eq!(state.stroke_color, red);
        assert_eq!(state.line_width, 2.0);
        assert_eq!(cx.paint_count(), 1);
    }

    #[test]
    fn trace_polyline_emits_path() {
        let mut cx = RecordingContext::new();
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        cx.trace_polyline(&pts, true);
        assert_eq!(
            cx.commands(),
            &[
                DrawCommand::BeginPath,
                DrawCommand::MoveTo(pts[0]),
                DrawCommand::LineTo(pts[1]),
                DrawCommand::LineTo(pts[2]),
                DrawCommand::ClosePath,
            ]
        );

        cx.clear_commands();
        cx.trace_polyline(&[], false);
        assert_eq!(cx.commands(), &[DrawCommand::BeginPath]);
    }

    #[test]
    fn detached_target_has_no_context() {
        let mut target = RecordingTarget::new();
        assert!(target.context_mut().is_none());
        target.attach();
        assert!(target.context_mut().is_some());
        target.detach();
        assert!(!target.is_attached());
    }
}
