// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::ShapeKind;

/// Default stroke color of every shape.
pub const DEFAULT_STROKE: Color = Color::from_rgb8(0x00, 0x73, 0xe6);

/// Arrowhead geometry of a [`ShapeKind::LineWithArrow`].
///
/// The arrow stands perpendicular to the line at its midpoint: a shaft of
/// `shaft_length`, then a head `arrow_length` long and `2 * arrow_width`
/// wide at its base.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowStyle {
    /// Length of the shaft from the line to the base of the head.
    pub shaft_length: f64,
    /// Half width of the head's base.
    pub arrow_width: f64,
    /// Length of the head beyond the shaft.
    pub arrow_length: f64,
    /// Point the arrow to the other side of the line.
    pub is_above: bool,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            shaft_length: 10.0,
            arrow_width: 5.0,
            arrow_length: 10.0,
            is_above: false,
        }
    }
}

/// Paint of one shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Outline color.
    pub stroke: Color,
    /// Interior color; for arrows, the color of the head.
    pub fill: Color,
    /// Outline width.
    pub line_width: f64,
    /// Arrowhead geometry. Only arrows read it.
    pub arrow: ArrowStyle,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE,
            fill: Color::TRANSPARENT,
            line_width: 1.0,
            arrow: ArrowStyle::default(),
        }
    }
}

/// Style applied to newly drawn shapes, per kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyles {
    /// Style of [`ShapeKind::Line`].
    pub line: ShapeStyle,
    /// Style of [`ShapeKind::LineWithArrow`].
    pub line_with_arrow: ShapeStyle,
    /// Style of [`ShapeKind::Rect`].
    pub rect: ShapeStyle,
    /// Style of [`ShapeKind::Polygon`].
    pub polygon: ShapeStyle,
    /// Style of [`ShapeKind::Curve`].
    pub curve: ShapeStyle,
}

impl ShapeStyles {
    /// Style for shapes of `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: ShapeKind) -> ShapeStyle {
        match kind {
            ShapeKind::Line => self.line,
            ShapeKind::LineWithArrow => self.line_with_arrow,
            ShapeKind::Rect => self.rect,
            ShapeKind::Polygon => self.polygon,
            ShapeKind::Curve => self.curve,
        }
    }
}

impl Default for ShapeStyles {
    fn default() -> Self {
        let base = ShapeStyle::default();
        Self {
            line: base,
            line_with_arrow: ShapeStyle {
                fill: DEFAULT_STROKE,
                ..base
            },
            rect: base,
            polygon: base,
            curve: base,
        }
    }
}
