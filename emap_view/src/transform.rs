// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use emap_geometry::center_offset;
use kurbo::{Point, Rect, Size, Vec2};

use crate::{ImageError, MapOptions};

/// Moves a screen-space `position` by a pan `delta`.
#[must_use]
pub fn apply_pan(position: Point, delta: Vec2) -> Point {
    position + delta
}

/// Rescales a screen-space `position` about `anchor`.
///
/// The result is `anchor + (position - anchor) * zoom_ratio`, where
/// `zoom_ratio` is the applied change `new_zoom / old_zoom`. A ratio of `1.0`
/// leaves every point where it is.
#[must_use]
pub fn apply_zoom_anchor(position: Point, anchor: Point, zoom_ratio: f64) -> Point {
    anchor + (position - anchor) * zoom_ratio
}

/// A change announced by [`TransformContext`] to its listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformEvent {
    /// The map moved by `delta` screen pixels.
    Panned {
        /// Pan offset applied by this change.
        delta: Vec2,
    },
    /// The zoom changed about `anchor`.
    Zoomed {
        /// Screen point that stayed fixed.
        anchor: Point,
        /// Applied change, `new_zoom / old_zoom`.
        ratio: f64,
        /// Zoom after the change.
        zoom: f64,
    },
    /// The map layer was resized.
    Resized {
        /// New layer size in logical pixels.
        size: Size,
    },
    /// The DPI scale changed.
    DpiChanged {
        /// New DPI scale.
        dpi: f64,
    },
}

/// Handle returned by [`TransformContext::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&TransformEvent)>;

/// Shared zoom and pan state of one map.
///
/// The context owns the current zoom (clamped to the configured bounds), the
/// accumulated pan, the most recent zoom anchor and ratio, the DPI scale, the
/// layer size and the screen rectangle where the map image is placed.
///
/// Layers that keep screen-space state (markers, the shape editor) subscribe
/// with [`TransformContext::subscribe`]. Every mutation notifies all
/// listeners synchronously, in subscription order, before it returns.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use emap_view::{MapOptions, TransformContext, TransformEvent};
/// use kurbo::{Point, Vec2};
///
/// let mut view = TransformContext::new(&MapOptions::default());
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// view.subscribe(move |e: &TransformEvent| sink.borrow_mut().push(*e));
///
/// view.pan_by(Vec2::new(10.0, 0.0));
/// view.zoom_to(2.0, Point::new(100.0, 100.0));
///
/// assert_eq!(seen.borrow().len(), 2);
/// assert!(matches!(seen.borrow()[1], TransformEvent::Zoomed { ratio, .. } if ratio == 2.0));
/// ```
pub struct TransformContext {
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    draggable: bool,
    translate: Vec2,
    zoom_anchor: Point,
    zoom_ratio: f64,
    dpi: f64,
    layer_size: Size,
    image: Rect,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl TransformContext {
    /// Creates a context from map options.
    ///
    /// Zoom bounds are normalized so that `min_zoom <= max_zoom`, and the
    /// initial zoom is clamped into them. Bounds are kept positive and
    /// finite: a non-positive or NaN minimum becomes [`f64::MIN_POSITIVE`],
    /// a non-positive or non-finite maximum becomes [`f64::MAX`]. A
    /// non-positive or non-finite initial zoom falls back to `1.0`.
    #[must_use]
    pub fn new(options: &MapOptions) -> Self {
        let positive = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 { v } else { fallback }
        };
        let min = positive(options.min_zoom, f64::MIN_POSITIVE);
        let max = positive(options.max_zoom, f64::MAX);
        let (min_zoom, max_zoom) = if min <= max { (min, max) } else { (max, min) };
        Self {
            zoom: positive(options.zoom, 1.0).clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            draggable: options.draggable,
            translate: Vec2::ZERO,
            zoom_anchor: Point::ZERO,
            zoom_ratio: 1.0,
            dpi: 1.0,
            layer_size: Size::ZERO,
            image: Rect::ZERO,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Current zoom.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom bounds as `(min, max)`.
    #[must_use]
    pub fn zoom_bounds(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Accumulated pan offset in screen pixels.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Anchor of the most recent zoom change.
    #[must_use]
    pub fn zoom_anchor(&self) -> Point {
        self.zoom_anchor
    }

    /// Ratio of the most recent zoom change.
    #[must_use]
    pub fn zoom_ratio(&self) -> f64 {
        self.zoom_ratio
    }

    /// Current DPI scale.
    #[must_use]
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Size of the map layer in logical pixels.
    #[must_use]
    pub fn layer_size(&self) -> Size {
        self.layer_size
    }

    /// Screen rectangle currently covered by the map image.
    #[must_use]
    pub fn image_rect(&self) -> Rect {
        self.image
    }

    /// Whether [`TransformContext::pan_by`] has any effect.
    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Enables or disables panning.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    /// Registers a listener and returns its handle.
    pub fn subscribe(&mut self, listener: impl FnMut(&TransformEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Sets the zoom to `requested`, keeping `anchor` fixed on screen.
    ///
    /// The request is clamped to the zoom bounds first; the ratio announced in
    /// [`TransformEvent::Zoomed`] is the change actually applied. Returns
    /// `false` and notifies nobody when the clamped zoom equals the current
    /// one.
    pub fn zoom_to(&mut self, requested: f64, anchor: Point) -> bool {
        if !requested.is_finite() {
            return false;
        }
        let zoom = requested.clamp(self.min_zoom, self.max_zoom);
        if zoom == self.zoom {
            return false;
        }
        let ratio = zoom / self.zoom;
        self.zoom = zoom;
        self.zoom_anchor = anchor;
        self.zoom_ratio = ratio;

        let origin = apply_zoom_anchor(self.image.origin(), anchor, ratio);
        self.image = Rect::from_origin_size(origin, self.image.size() * ratio);

        crate::log::debug!(zoom, ratio, ?anchor, "zoom changed");
        self.notify(TransformEvent::Zoomed {
            anchor,
            ratio,
            zoom,
        });
        true
    }

    /// Multiplies the zoom by `factor`, keeping `anchor` fixed on screen.
    ///
    /// Non-positive or non-finite factors are ignored.
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.zoom_to(self.zoom * factor, anchor)
    }

    /// Pans the map by `delta` screen pixels.
    ///
    /// Does nothing when the map is not draggable or `delta` is zero.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if !self.draggable || delta == Vec2::ZERO {
            return false;
        }
        self.translate += delta;
        self.image = self.image + delta;
        self.notify(TransformEvent::Panned { delta });
        true
    }

    /// Sets the layer size. Unchanged sizes are ignored.
    pub fn resize(&mut self, size: Size) -> bool {
        if size == self.layer_size {
            return false;
        }
        self.layer_size = size;
        self.notify(TransformEvent::Resized { size });
        true
    }

    /// Sets the DPI scale. Invalid or unchanged values are ignored.
    pub fn set_dpi(&mut self, dpi: f64) -> bool {
        if !dpi.is_finite() || dpi <= 0.0 || dpi == self.dpi {
            return false;
        }
        self.dpi = dpi;
        self.notify(TransformEvent::DpiChanged { dpi });
        true
    }

    /// Places a loaded image of `natural` size centered in the layer at the
    /// current zoom, and returns its screen rectangle.
    ///
    /// A zero-area image is [`ImageError::EmptyImage`].
    pub fn place_image(&mut self, natural: Size) -> Result<Rect, ImageError> {
        if natural.is_zero_area() || !natural.is_finite() {
            return Err(ImageError::EmptyImage);
        }
        let scaled = natural * self.zoom;
        let offset = center_offset(self.layer_size, scaled);
        self.image = Rect::from_origin_size(offset.to_point(), scaled);
        crate::log::debug!(rect = ?self.image, "image placed");
        Ok(self.image)
    }

    /// Maps a point on the map image (world space) to the screen.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.image.origin() + world.to_vec2() * self.zoom
    }

    /// Maps a screen point back onto the map image (world space).
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        ((screen - self.image.origin()) / self.zoom).to_point()
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> TransformDebugInfo {
        TransformDebugInfo {
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            translate: self.translate,
            zoom_anchor: self.zoom_anchor,
            zoom_ratio: self.zoom_ratio,
            dpi: self.dpi,
            image: self.image,
            listeners: self.listeners.len(),
        }
    }

    fn notify(&mut self, event: TransformEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for TransformContext {
    fn default() -> Self {
        Self::new(&MapOptions::default())
    }
}

impl fmt::Debug for TransformContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformContext")
            .field("zoom", &self.zoom)
            .field("min_zoom", &self.min_zoom)
            .field("max_zoom", &self.max_zoom)
            .field("draggable", &self.draggable)
            .field("translate", &self.translate)
            .field("image", &self.image)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

/// Debug snapshot of a [`TransformContext`].
#[derive(Clone, Copy, Debug)]
pub struct TransformDebugInfo {
    /// Current zoom.
    pub zoom: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Accumulated pan offset.
    pub translate: Vec2,
    /// Anchor of the last zoom change.
    pub zoom_anchor: Point,
    /// Ratio of the last zoom change.
    pub zoom_ratio: f64,
    /// DPI scale.
    pub dpi: f64,
    /// Screen rectangle of the map image.
    pub image: Rect,
    /// Number of registered listeners.
    pub listeners: usize,
}
