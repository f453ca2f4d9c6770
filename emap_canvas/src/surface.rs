// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DPI-aware surface lifecycle.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

use crate::DrawContext;

/// The element-like owner of one drawing context.
///
/// In a browser this is the `<canvas>` element: it may not be in the
/// document yet, its backing store is sized in device pixels, and it hands
/// out a 2D context.
pub trait SurfaceTarget {
    /// The drawing context this target hands out.
    type Context: DrawContext;

    /// Whether the target is attached and can produce a context.
    fn is_attached(&self) -> bool;

    /// Resizes the backing store, in device pixels.
    ///
    /// Browser targets reset the context's transform as a side effect of
    /// assigning `canvas.width`; [`Surface`] resets it explicitly either way.
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// The drawing context, or `None` when the target is not attached.
    fn context_mut(&mut self) -> Option<&mut Self::Context>;
}

/// Outcome of a surface (re)initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceState {
    /// The backing store matches the requested size and DPI scale.
    Ready,
    /// The target is detached or the size is empty; retry with
    /// [`Surface::poll_ready`].
    Pending,
}

/// Chooses the DPI scale for a surface.
///
/// A present, positive and finite `override_dpi` wins. Otherwise the scale is
/// `device_pixel_ratio / backing_store_ratio`, falling back to `1.0` when that
/// ratio is not a positive finite number.
///
/// ```rust
/// use emap_canvas::resolve_dpi;
///
/// assert_eq!(resolve_dpi(None, 2.0, 1.0), 2.0);
/// assert_eq!(resolve_dpi(Some(3.0), 2.0, 1.0), 3.0);
/// assert_eq!(resolve_dpi(None, 2.0, 0.0), 1.0);
/// ```
#[must_use]
pub fn resolve_dpi(override_dpi: Option<f64>, device_pixel_ratio: f64, backing_store_ratio: f64) -> f64 {
    if let Some(dpi) = override_dpi.filter(|d| is_valid_scale(*d)) {
        return dpi;
    }
    let ratio = device_pixel_ratio / backing_store_ratio;
    if is_valid_scale(ratio) { ratio } else { 1.0 }
}

fn is_valid_scale(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "device sizes are clamped to the u32 range before casting"
)]
fn device_pixels(logical: f64, dpi: f64) -> u32 {
    (logical * dpi).round().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// A drawing surface sized in logical pixels and scaled for the display.
///
/// [`Surface::init`] allocates a backing store of `size * dpi` device pixels
/// and scales the context by `dpi` so callers keep drawing in logical units.
/// Re-initializing with the same size and DPI is a no-op; a change resets the
/// transform before scaling again, so scales never accumulate.
///
/// ```rust
/// use emap_canvas::{RecordingTarget, Surface, SurfaceState};
/// use kurbo::{Point, Size};
///
/// let mut surface = Surface::new(RecordingTarget::new());
/// // Detached targets defer initialization.
/// assert_eq!(surface.init(Size::new(300.0, 200.0), 2.0), SurfaceState::Pending);
///
/// surface.target_mut().attach();
/// assert_eq!(surface.poll_ready(), SurfaceState::Ready);
/// assert_eq!(surface.target().backing_size(), (600, 400));
/// assert_eq!(surface.center(), Point::new(150.0, 100.0));
/// ```
#[derive(Debug)]
pub struct Surface<T> {
    target: T,
    size: Size,
    dpi: f64,
    applied: Option<(Size, f64)>,
}

impl<T: SurfaceTarget> Surface<T> {
    /// Wraps `target`. Nothing is allocated until [`Surface::init`].
    pub fn new(target: T) -> Self {
        Self {
            target,
            size: Size::ZERO,
            dpi: 1.0,
            applied: None,
        }
    }

    /// Requests a logical `size` at scale `dpi` and applies it if possible.
    ///
    /// An invalid `dpi` (non-positive or non-finite) is treated as `1.0`.
    pub fn init(&mut self, size: Size, dpi: f64) -> SurfaceState {
        self.size = size;
        self.dpi = if is_valid_scale(dpi) { dpi } else { 1.0 };
        self.apply()
    }

    /// Retries a pending initialization with the last requested size and DPI.
    pub fn poll_ready(&mut self) -> SurfaceState {
        self.apply()
    }

    /// Changes the logical size, keeping the DPI.
    pub fn resize(&mut self, size: Size) -> SurfaceState {
        self.init(size, self.dpi)
    }

    /// Changes the DPI, keeping the logical size.
    pub fn set_dpi(&mut self, dpi: f64) -> SurfaceState {
        self.init(self.size, dpi)
    }

    /// Current DPI scale.
    #[must_use]
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Logical size last requested.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Center of the logical area.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Whether the backing store matches the requested size and DPI.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.applied == Some((self.size, self.dpi)) && self.target.is_attached()
    }

    /// Clears the whole logical area. Does nothing until ready.
    pub fn clear(&mut self) {
        let area = Rect::from_origin_size(Point::ZERO, self.size);
        if let Some(cx) = self.context_mut() {
            cx.clear_rect(area);
        }
    }

    /// The drawing context, scaled for DPI, once the surface is ready.
    pub fn context_mut(&mut self) -> Option<&mut T::Context> {
        if !self.is_ready() {
            return None;
        }
        self.target.context_mut()
    }

    /// The wrapped target.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the wrapped target.
    ///
    /// Resizing the target's backing store through this reference bypasses
    /// the surface; call [`Surface::init`] again afterwards.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Unwraps the target.
    pub fn into_target(self) -> T {
        self.target
    }

    fn apply(&mut self) -> SurfaceState {
        let (size, dpi) = (self.size, self.dpi);
        if !self.target.is_attached() {
            // A reattached target may hand back a fresh context.
            self.applied = None;
        }
        if !self.target.is_attached() || size.is_zero_area() {
            crate::log::debug!(?size, "surface init deferred");
            return SurfaceState::Pending;
        }
        if self.applied == Some((size, dpi)) {
            return SurfaceState::Ready;
        }

        self.target
            .set_backing_size(device_pixels(size.width, dpi), device_pixels(size.height, dpi));
        let Some(cx) = self.target.context_mut() else {
            return SurfaceState::Pending;
        };
        cx.reset_transform();
        cx.scale(dpi, dpi);
        self.applied = Some((size, dpi));
        crate::log::debug!(?size, dpi, "surface initialized");
        SurfaceState::Ready
    }
}
