// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::{TransformContext, TransformEvent, apply_pan, apply_zoom_anchor};

/// Horizontal point of a marker's content box that sits on its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OriginX {
    /// Left edge.
    Left,
    /// Horizontal center.
    #[default]
    Center,
    /// Right edge.
    Right,
}

/// Vertical point of a marker's content box that sits on its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OriginY {
    /// Top edge.
    Top,
    /// Vertical center.
    #[default]
    Center,
    /// Bottom edge, typical for pins.
    Bottom,
}

/// A screen-space position kept in step with the map.
///
/// Feed it every [`TransformEvent`]; pans translate it and zooms rescale it
/// about the event's anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenAnchor {
    /// Current screen position.
    pub position: Point,
}

impl ScreenAnchor {
    /// Creates an anchor at `position`.
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    /// Updates the position for one transform change.
    pub fn apply(&mut self, event: &TransformEvent) {
        match *event {
            TransformEvent::Panned { delta } => {
                self.position = apply_pan(self.position, delta);
            }
            TransformEvent::Zoomed { anchor, ratio, .. } => {
                self.position = apply_zoom_anchor(self.position, anchor, ratio);
            }
            TransformEvent::Resized { .. } | TransformEvent::DpiChanged { .. } => {}
        }
    }
}

/// A point of interest pinned to the map image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Marker {
    /// Position on the map image (world space).
    pub position: Point,
    /// Horizontal origin of the content box.
    pub origin_x: OriginX,
    /// Vertical origin of the content box.
    pub origin_y: OriginY,
    /// Whether the marker follows pointer drags.
    pub draggable: bool,
}

impl Marker {
    /// Creates a non-draggable, centered marker at `position`.
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Offset from the marker's screen position to the top-left of a content
    /// box of size `content`.
    #[must_use]
    pub fn origin_offset(&self, content: Size) -> Vec2 {
        let dx = match self.origin_x {
            OriginX::Left => 0.0,
            OriginX::Center => -content.width / 2.0,
            OriginX::Right => -content.width,
        };
        let dy = match self.origin_y {
            OriginY::Top => 0.0,
            OriginY::Center => -content.height / 2.0,
            OriginY::Bottom => -content.height,
        };
        Vec2::new(dx, dy)
    }

    /// Screen position of the marker.
    #[must_use]
    pub fn screen_position(&self, view: &TransformContext) -> Point {
        view.world_to_screen(self.position)
    }

    /// Screen rectangle of a content box of size `content`.
    #[must_use]
    pub fn screen_rect(&self, view: &TransformContext, content: Size) -> Rect {
        Rect::from_origin_size(
            self.screen_position(view) + self.origin_offset(content),
            content,
        )
    }

    /// Moves the marker by a pointer delta in screen pixels.
    ///
    /// Returns `false` and leaves the marker alone when it is not draggable.
    pub fn drag_by(&mut self, screen_delta: Vec2, view: &TransformContext) -> bool {
        if !self.draggable || screen_delta == Vec2::ZERO {
            return false;
        }
        self.position += screen_delta / view.zoom();
        true
    }
}
