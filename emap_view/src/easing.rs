// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves and animated zoom.

use kurbo::Point;

use crate::TransformContext;

/// Easing curve mapping progress in `[0, 1]` onto `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// No acceleration.
    #[default]
    Linear,
    /// Quadratic, accelerating from zero velocity.
    EaseInQuad,
    /// Quadratic, decelerating to zero velocity.
    EaseOutQuad,
    /// Quadratic, accelerating until halfway, then decelerating.
    EaseInOutQuad,
    /// Cubic, accelerating from zero velocity.
    EaseInCubic,
    /// Cubic, decelerating to zero velocity.
    EaseOutCubic,
    /// Cubic, accelerating until halfway, then decelerating.
    EaseInOutCubic,
    /// Quartic, accelerating from zero velocity.
    EaseInQuart,
    /// Quartic, decelerating to zero velocity.
    EaseOutQuart,
    /// Quartic, accelerating until halfway, then decelerating.
    EaseInOutQuart,
    /// Quintic, accelerating from zero velocity.
    EaseInQuint,
    /// Quintic, decelerating to zero velocity.
    EaseOutQuint,
    /// Quintic, accelerating until halfway, then decelerating.
    EaseInOutQuint,
}

impl Easing {
    /// Evaluates the curve at `t`, which is clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let u = t - 1.0;
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => t * (2.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => u * u * u + 1.0,
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    u * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }
            Self::EaseInQuart => t * t * t * t,
            Self::EaseOutQuart => 1.0 - u * u * u * u,
            Self::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - 8.0 * u * u * u * u
                }
            }
            Self::EaseInQuint => t * t * t * t * t,
            Self::EaseOutQuint => 1.0 + u * u * u * u * u,
            Self::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t * t * t * t * t
                } else {
                    1.0 + 16.0 * u * u * u * u * u
                }
            }
        }
    }
}

/// Timing of animated zoom changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Easing curve.
    pub easing: Easing,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            easing: Easing::Linear,
        }
    }
}

/// A zoom change spread over time.
///
/// The animation does not own a clock. Drive it with the elapsed time since
/// it started, typically once per frame:
///
/// ```rust
/// use emap_view::{Animation, Easing, TransformContext, ZoomAnimation};
/// use kurbo::Point;
///
/// let mut view = TransformContext::default();
/// let anim = ZoomAnimation::new(
///     view.zoom(),
///     4.0,
///     Point::new(100.0, 100.0),
///     Animation { duration_ms: 200.0, easing: Easing::EaseOutQuad },
/// );
///
/// let mut elapsed = 0.0;
/// while !anim.is_finished(elapsed) {
///     elapsed += 16.0;
///     anim.step(&mut view, elapsed);
/// }
/// assert_eq!(view.zoom(), 4.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomAnimation {
    /// Zoom at the start.
    pub from: f64,
    /// Zoom at the end.
    pub to: f64,
    /// Screen point kept fixed throughout.
    pub anchor: Point,
    /// Timing.
    pub animation: Animation,
}

impl ZoomAnimation {
    /// Creates an animation from `from` to `to` about `anchor`.
    #[must_use]
    pub fn new(from: f64, to: f64, anchor: Point, animation: Animation) -> Self {
        Self {
            from,
            to,
            anchor,
            animation,
        }
    }

    /// Progress in `[0, 1]` after `elapsed_ms`.
    ///
    /// A zero or negative duration completes immediately.
    #[must_use]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.animation.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.animation.duration_ms).clamp(0.0, 1.0)
    }

    /// Zoom after `elapsed_ms`.
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> f64 {
        let p = self.progress(elapsed_ms);
        if p >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.animation.easing.apply(p)
    }

    /// Whether `elapsed_ms` is past the end of the animation.
    #[must_use]
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }

    /// Applies the zoom for `elapsed_ms` to `view`.
    ///
    /// Returns whether the view changed.
    pub fn step(&self, view: &mut TransformContext, elapsed_ms: f64) -> bool {
        view.zoom_to(self.sample(elapsed_ms), self.anchor)
    }
}
