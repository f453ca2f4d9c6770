// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing and editing state machine.

use alloc::vec::Vec;

use emap_canvas::DrawContext;
use emap_geometry::is_near;
use emap_view::{TransformEvent, apply_pan, apply_zoom_anchor};
use kurbo::{Point, Vec2};

use crate::{
    ControlOptions, Controls, Cursor, History, HistoryEntry, LineHitParams,
    POLYGON_CLOSE_TOLERANCE, ShapeId, ShapeKind, ShapeStyles, compute_controls, normalize_rect,
    preview_points,
};

/// Top-level mode of an [`Editor`]. Exactly one is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditorMode {
    /// Idle. Pointer input is ignored.
    #[default]
    Default,
    /// Placing the points of a new shape.
    Draw,
    /// A shape is selected and can be moved or resized.
    Edit,
}

/// Notification queued by the [`Editor`].
///
/// Events accumulate until [`Editor::drain_events`] is called.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorEvent {
    /// The live preview should be erased.
    Clear,
    /// A drawn shape was committed to the history.
    Saved {
        /// Id of the new shape.
        id: ShapeId,
        /// Its kind.
        kind: ShapeKind,
    },
    /// The mode changed.
    ModeChanged {
        /// Previous mode.
        from: EditorMode,
        /// New mode.
        to: EditorMode,
    },
    /// The host should show a different pointer cursor.
    CursorChanged(Cursor),
    /// A shape was moved or resized.
    ShapeUpdated {
        /// Id of the shape.
        id: ShapeId,
    },
    /// A shape was removed from the history.
    Deleted {
        /// Id of the removed shape.
        id: ShapeId,
    },
}

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorKey {
    /// The backspace key.
    Backspace,
    /// The forward delete key.
    Delete,
}

/// Configuration of an [`Editor`].
#[derive(Clone, Debug, Default)]
pub struct EditorOptions {
    /// Select each shape as soon as it is committed.
    pub auto_edit: bool,
    /// Let Backspace and Delete remove the selected shape.
    pub delete_on_backspace: bool,
    /// Style of new shapes, per kind.
    pub styles: ShapeStyles,
    /// Selection handles.
    pub control: ControlOptions,
    /// Body hit testing.
    pub hit: LineHitParams,
    /// Shapes present from the start, in drawing order.
    ///
    /// Entries whose point count does not fit their kind are skipped.
    pub history: Vec<(ShapeKind, Vec<Point>)>,
}

#[derive(Clone, Debug)]
struct Draft {
    kind: ShapeKind,
    points: Vec<Point>,
    cursor: Option<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Session {
    Resize { index: usize, cursor: Cursor },
    Move,
}

/// A running drag or resize. Deltas are taken against the previous pointer
/// position, never the start.
#[derive(Clone, Copy, Debug)]
struct Drag {
    session: Session,
    last: Point,
}

impl Drag {
    fn update(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        delta
    }
}

/// Draws, selects, moves and resizes shapes from pointer input.
///
/// Points are in screen space. Feed pointer events in order; each returns
/// whether anything visible changed. Feed [`TransformEvent`]s through
/// [`Editor::on_transform`] so shapes follow the map.
#[derive(Debug)]
pub struct Editor {
    options: EditorOptions,
    mode: EditorMode,
    history: History,
    draft: Option<Draft>,
    selected: Option<ShapeId>,
    drag: Option<Drag>,
    cursor: Cursor,
    events: Vec<EditorEvent>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

impl Editor {
    /// Creates an editor in [`EditorMode::Default`], seeded with
    /// `options.history`.
    #[must_use]
    pub fn new(mut options: EditorOptions) -> Self {
        let mut history = History::new();
        for (kind, points) in core::mem::take(&mut options.history) {
            if !kind.accepts(&points) {
                crate::log::warn!(?kind, count = points.len(), "skipping malformed seed shape");
                continue;
            }
            let points = normalized(kind, points);
            history.push(kind, points, options.styles.for_kind(kind));
        }
        Self {
            options,
            mode: EditorMode::Default,
            history,
            draft: None,
            selected: None,
            drag: None,
            cursor: Cursor::Default,
            events: Vec::new(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Committed shapes.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The selected shape, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    /// The selected shape's history entry.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.history.get(self.selected?)
    }

    /// Cursor the host should show.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Kind being drawn, while in [`EditorMode::Draw`].
    #[must_use]
    pub fn draft_kind(&self) -> Option<ShapeKind> {
        self.draft.as_ref().map(|d| d.kind)
    }

    /// Points placed so far in the shape being drawn.
    #[must_use]
    pub fn draft_points(&self) -> &[Point] {
        match &self.draft {
            Some(draft) => &draft.points,
            None => &[],
        }
    }

    /// Whether a move sub-session is running.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Some(Drag { session: Session::Move, .. }))
    }

    /// Whether a resize sub-session is running.
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(
            self.drag,
            Some(Drag {
                session: Session::Resize { .. },
                ..
            })
        )
    }

    /// Whether `point` hits the body of a `kind` shape through `points`,
    /// using the configured line tolerance.
    #[must_use]
    pub fn is_inside(&self, kind: ShapeKind, point: Point, points: &[Point]) -> bool {
        kind.hit_test(point, points, &self.options.hit)
    }

    /// Takes every queued event, oldest first.
    pub fn drain_events(&mut self) -> alloc::vec::Drain<'_, EditorEvent> {
        self.events.drain(..)
    }

    /// Starts drawing a shape of `kind`.
    ///
    /// Any uncommitted draft and the selection are dropped.
    pub fn begin_draw(&mut self, kind: ShapeKind) {
        if self.draft.take().is_some() {
            self.events.push(EditorEvent::Clear);
        }
        self.end_drag();
        self.selected = None;
        self.draft = Some(Draft {
            kind,
            points: Vec::new(),
            cursor: None,
        });
        self.set_mode(EditorMode::Draw);
    }

    /// Abandons the shape being drawn and returns to [`EditorMode::Default`].
    pub fn cancel_draw(&mut self) -> bool {
        if self.draft.take().is_none() {
            return false;
        }
        self.events.push(EditorEvent::Clear);
        self.set_mode(EditorMode::Default);
        true
    }

    /// Handles a pointer press at `pos`.
    ///
    /// While drawing this places a point and may commit the shape. While
    /// editing it starts a resize on a handle or a move on the shape body.
    pub fn pointer_down(&mut self, pos: Point) -> bool {
        match self.mode {
            EditorMode::Default => false,
            EditorMode::Draw => self.place_point(pos),
            EditorMode::Edit => self.start_drag(pos),
        }
    }

    /// Handles pointer motion to `pos`.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        match self.mode {
            EditorMode::Default => false,
            EditorMode::Draw => match &mut self.draft {
                Some(draft) => {
                    draft.cursor = Some(pos);
                    true
                }
                None => false,
            },
            EditorMode::Edit => self.continue_drag(pos),
        }
    }

    /// Handles a pointer release. Ends any move or resize.
    pub fn pointer_up(&mut self, _pos: Point) -> bool {
        self.end_drag()
    }

    /// Commits a polygon or curve that has enough points.
    ///
    /// Curves need two points and polygons three. Other kinds commit on
    /// their own and return `None` here.
    pub fn finish_draw(&mut self) -> Option<ShapeId> {
        let draft = self.draft.as_ref()?;
        let ready = match draft.kind {
            ShapeKind::Polygon | ShapeKind::Curve => draft.points.len() >= draft.kind.min_points(),
            ShapeKind::Line | ShapeKind::LineWithArrow | ShapeKind::Rect => false,
        };
        if ready { self.commit() } else { None }
    }

    /// Selects `id` and enters [`EditorMode::Edit`].
    ///
    /// Returns `false` and changes nothing when `id` is not in the history.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if !self.history.contains(id) {
            return false;
        }
        if self.draft.take().is_some() {
            self.events.push(EditorEvent::Clear);
        }
        self.end_drag();
        self.selected = Some(id);
        self.set_mode(EditorMode::Edit);
        true
    }

    /// Selects the topmost shape under `pos`.
    pub fn select_at(&mut self, pos: Point) -> Option<ShapeId> {
        let id = self.history.hit(pos, &self.options.hit)?;
        self.select(id).then_some(id)
    }

    /// Drops the selection and returns to [`EditorMode::Default`].
    pub fn deselect(&mut self) -> bool {
        if self.mode != EditorMode::Edit {
            return false;
        }
        self.end_drag();
        self.selected = None;
        self.set_mode(EditorMode::Default);
        true
    }

    /// Removes a shape. Removing the selection also deselects it.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        if self.history.remove(id).is_none() {
            return false;
        }
        crate::log::debug!(id = id.get(), "shape removed");
        self.events.push(EditorEvent::Deleted { id });
        if self.selected == Some(id) {
            self.end_drag();
            self.selected = None;
            self.set_mode(EditorMode::Default);
        }
        true
    }

    /// Handles a key press.
    ///
    /// With [`EditorOptions::delete_on_backspace`], Backspace and Delete
    /// remove the selected shape.
    pub fn key_down(&mut self, key: EditorKey) -> bool {
        match (key, self.selected) {
            (EditorKey::Backspace | EditorKey::Delete, Some(id))
                if self.options.delete_on_backspace && self.mode == EditorMode::Edit =>
            {
                self.remove(id)
            }
            _ => false,
        }
    }

    /// Removes every shape and returns to [`EditorMode::Default`].
    pub fn reset(&mut self) {
        self.history.clear();
        self.draft = None;
        self.selected = None;
        self.end_drag();
        self.events.push(EditorEvent::Clear);
        self.set_mode(EditorMode::Default);
    }

    /// Carries shapes and the draft along with a map pan or zoom.
    pub fn on_transform(&mut self, event: &TransformEvent) {
        let map = |p: Point| match *event {
            TransformEvent::Panned { delta } => apply_pan(p, delta),
            TransformEvent::Zoomed { anchor, ratio, .. } => apply_zoom_anchor(p, anchor, ratio),
            TransformEvent::Resized { .. } | TransformEvent::DpiChanged { .. } => p,
        };
        if matches!(
            event,
            TransformEvent::Resized { .. } | TransformEvent::DpiChanged { .. }
        ) {
            return;
        }
        self.history.map_points(map);
        if let Some(draft) = &mut self.draft {
            for p in &mut draft.points {
                *p = map(*p);
            }
            draft.cursor = draft.cursor.map(map);
        }
        if let Some(drag) = &mut self.drag {
            drag.last = map(drag.last);
        }
    }

    /// Handles of the selected shape, laid out for this frame.
    #[must_use]
    pub fn controls(&self) -> Option<Controls> {
        let entry = self.selected_entry()?;
        compute_controls(
            entry.kind,
            &entry.points,
            entry.style.line_width,
            &self.options.control,
        )
    }

    /// Paints every committed shape in drawing order.
    pub fn draw_shapes(&self, cx: &mut dyn DrawContext) {
        for entry in &self.history {
            entry.kind.draw(cx, &entry.points, &entry.style);
        }
    }

    /// Paints the shape being drawn, extended to the pointer.
    pub fn draw_preview(&self, cx: &mut dyn DrawContext) {
        let Some(draft) = &self.draft else {
            return;
        };
        let points = match draft.cursor {
            Some(cursor) if !draft.points.is_empty() => preview_points(&draft.points, cursor),
            _ => draft.points.clone(),
        };
        let style = self.options.styles.for_kind(draft.kind);
        draft.kind.draw(cx, &points, &style);
    }

    /// Paints the handles of the selected shape.
    pub fn draw_controls(&self, cx: &mut dyn DrawContext) {
        if let Some(controls) = self.controls() {
            controls.draw(cx, &self.options.control);
        }
    }

    /// Paints shapes, then the preview, then the handles.
    pub fn render(&self, cx: &mut dyn DrawContext) {
        self.draw_shapes(cx);
        self.draw_preview(cx);
        self.draw_controls(cx);
    }

    fn place_point(&mut self, pos: Point) -> bool {
        let Some(draft) = &mut self.draft else {
            return false;
        };
        draft.points.push(pos);
        let complete = match draft.kind {
            ShapeKind::Line | ShapeKind::LineWithArrow | ShapeKind::Rect => draft.points.len() == 2,
            ShapeKind::Polygon => match draft.points.as_slice() {
                [first, .., last] if draft.points.len() >= 4 => {
                    is_near(*last, *first, POLYGON_CLOSE_TOLERANCE)
                }
                _ => false,
            },
            ShapeKind::Curve => false,
        };
        if complete {
            if draft.kind == ShapeKind::Polygon {
                draft.points.pop();
            }
            self.commit();
        }
        true
    }

    fn commit(&mut self) -> Option<ShapeId> {
        let Draft { kind, points, .. } = self.draft.take()?;
        let points = normalized(kind, points);
        let style = self.options.styles.for_kind(kind);
        let id = self.history.push(kind, points, style);
        crate::log::debug!(?kind, id = id.get(), "shape committed");
        self.events.push(EditorEvent::Clear);
        self.events.push(EditorEvent::Saved { id, kind });
        if self.options.auto_edit {
            self.selected = Some(id);
            self.set_mode(EditorMode::Edit);
        } else {
            self.set_mode(EditorMode::Default);
        }
        Some(id)
    }

    fn start_drag(&mut self, pos: Point) -> bool {
        let Some(entry) = self.selected_entry() else {
            return false;
        };
        let session = if let Some(corner) = self
            .controls()
            .and_then(|c| c.hit_corner(pos, self.options.control.hit_tolerance).copied())
        {
            Session::Resize {
                index: corner.index,
                cursor: corner.cursor,
            }
        } else if entry.hit_test(pos, &self.options.hit) {
            Session::Move
        } else {
            return false;
        };
        self.drag = Some(Drag { session, last: pos });
        if session == Session::Move {
            self.set_cursor(Cursor::Move);
        }
        true
    }

    fn continue_drag(&mut self, pos: Point) -> bool {
        let Some(drag) = &mut self.drag else {
            return false;
        };
        let delta = drag.update(pos);
        let session = drag.session;
        let Some(entry) = self.selected.and_then(|id| self.history.get(id)) else {
            return false;
        };
        let id = entry.id;
        let kind = entry.kind;
        let session = match session {
            Session::Resize { index, .. } => {
                let moved = kind.update_point(&entry.points, delta, index);
                let (points, index) = renormalized(kind, moved, index);
                self.history.replace_points(id, points);
                let cursor = self
                    .controls()
                    .and_then(|c| c.corners.into_iter().find(|c| c.index == index))
                    .map_or(self.cursor, |c| c.cursor);
                self.set_cursor(cursor);
                Session::Resize { index, cursor }
            }
            Session::Move => {
                let points = entry.points.iter().map(|p| *p + delta).collect();
                self.history.replace_points(id, points);
                Session::Move
            }
        };
        if let Some(drag) = &mut self.drag {
            drag.session = session;
        }
        self.events.push(EditorEvent::ShapeUpdated { id });
        true
    }

    fn end_drag(&mut self) -> bool {
        let ended = self.drag.take().is_some();
        self.set_cursor(Cursor::Default);
        ended
    }

    fn set_mode(&mut self, to: EditorMode) {
        let from = self.mode;
        if from == to {
            return;
        }
        crate::log::debug!(?from, ?to, "editor mode changed");
        self.mode = to;
        self.events.push(EditorEvent::ModeChanged { from, to });
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        if self.cursor == cursor {
            return;
        }
        self.cursor = cursor;
        self.events.push(EditorEvent::CursorChanged(cursor));
    }
}

/// Rectangles are stored top-left first.
fn normalized(kind: ShapeKind, points: Vec<Point>) -> Vec<Point> {
    match (kind, points.as_slice()) {
        (ShapeKind::Rect, [a, b]) => normalize_rect(*a, *b).to_vec(),
        _ => points,
    }
}

/// Keeps a resized rectangle top-left first and follows the grabbed corner
/// when the drag crosses the opposite edge.
fn renormalized(kind: ShapeKind, points: Vec<Point>, index: usize) -> (Vec<Point>, usize) {
    let (ShapeKind::Rect, [a, b]) = (kind, points.as_slice()) else {
        return (points, index);
    };
    let flip_x = a.x > b.x;
    let flip_y = a.y > b.y;
    // Corners go clockwise from the top-left.
    let (mut right, mut bottom) = match index {
        0 => (false, false),
        1 => (true, false),
        2 => (true, true),
        3 => (false, true),
        _ => return (normalize_rect(*a, *b).to_vec(), index),
    };
    right ^= flip_x;
    bottom ^= flip_y;
    let index = match (right, bottom) {
        (false, false) => 0,
        (true, false) => 1,
        (true, true) => 2,
        (false, true) => 3,
    };
    (normalize_rect(*a, *b).to_vec(), index)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn line_commits_on_second_point() {
        let mut editor = Editor::default();
        editor.begin_draw(ShapeKind::Line);
        assert!(editor.pointer_down(Point::new(0.0, 0.0)));
        assert_eq!(editor.mode(), EditorMode::Draw);
        assert!(editor.pointer_down(Point::new(10.0, 0.0)));
        assert_eq!(editor.mode(), EditorMode::Default);
        assert_eq!(editor.history().len(), 1);

        let events: Vec<_> = editor.drain_events().collect();
        let id = editor.history().entries()[0].id;
        assert_eq!(
            events,
            vec![
                EditorEvent::ModeChanged {
                    from: EditorMode::Default,
                    to: EditorMode::Draw
                },
                EditorEvent::Clear,
                EditorEvent::Saved {
                    id,
                    kind: ShapeKind::Line
                },
                EditorEvent::ModeChanged {
                    from: EditorMode::Draw,
                    to: EditorMode::Default
                },
            ]
        );
    }

    #[test]
    fn rect_is_normalized_on_commit() {
        let mut editor = Editor::default();
        editor.begin_draw(ShapeKind::Rect);
        editor.pointer_down(Point::new(100.0, 80.0));
        editor.pointer_down(Point::new(20.0, 10.0));
        assert_eq!(
            editor.history().entries()[0].points,
            [Point::new(20.0, 10.0), Point::new(100.0, 80.0)]
        );
    }

    #[test]
    fn malformed_seeds_are_skipped() {
        let editor = Editor::new(EditorOptions {
            history: vec![
                (ShapeKind::Line, vec![Point::ZERO, Point::new(5.0, 5.0)]),
                (ShapeKind::Rect, vec![Point::ZERO]),
                (
                    ShapeKind::Polygon,
                    vec![Point::ZERO, Point::new(5.0, 0.0), Point::new(0.0, 5.0)],
                ),
            ],
            ..EditorOptions::default()
        });
        let kinds: Vec<_> = editor.history().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, [ShapeKind::Line, ShapeKind::Polygon]);
        assert!(editor.options().history.is_empty());
    }

    #[test]
    fn finish_draw_needs_enough_points() {
        let mut editor = Editor::default();
        editor.begin_draw(ShapeKind::Curve);
        editor.pointer_down(Point::new(0.0, 0.0));
        assert!(editor.finish_draw().is_none());
        editor.pointer_down(Point::new(10.0, 10.0));
        assert!(editor.finish_draw().is_some());
        assert_eq!(editor.mode(), EditorMode::Default);

        editor.begin_draw(ShapeKind::Line);
        editor.pointer_down(Point::new(0.0, 0.0));
        assert!(editor.finish_draw().is_none());
    }

    #[test]
    fn begin_draw_discards_the_previous_draft() {
        let mut editor = Editor::default();
        editor.begin_draw(ShapeKind::Polygon);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.begin_draw(ShapeKind::Line);
        assert_eq!(editor.draft_kind(), Some(ShapeKind::Line));
        assert!(editor.draft_points().is_empty());
        assert!(editor.cancel_draw());
        assert_eq!(editor.mode(), EditorMode::Default);
        assert!(editor.history().is_empty());
    }
}
