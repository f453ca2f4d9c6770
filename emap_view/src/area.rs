// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use emap_canvas::DrawContext;
use emap_geometry::point_in_polygon;
use kurbo::{Point, Vec2};
use peniko::Color;

use crate::TransformContext;

/// Paint of an [`Area`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaStyle {
    /// Outline color.
    pub stroke: Color,
    /// Interior color.
    pub fill: Color,
    /// Outline width in world units.
    pub line_width: f64,
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self {
            stroke: Color::from_rgb8(255, 0, 0),
            fill: Color::from_rgba8(255, 0, 0, 128),
            line_width: 2.0,
        }
    }
}

/// A polygonal region of the map image.
///
/// Points are in world space (map image pixels), so the area stays attached
/// to the image as the map pans and zooms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Area {
    /// Vertices in world space.
    pub points: Vec<Point>,
    /// Paint.
    pub style: AreaStyle,
    /// Whether the area follows pointer drags.
    pub draggable: bool,
}

impl Area {
    /// Creates an area with the default style.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Whether a world-space point is inside the area.
    #[must_use]
    pub fn contains(&self, world: Point) -> bool {
        point_in_polygon(world, &self.points)
    }

    /// Whether a screen-space point is inside the area.
    #[must_use]
    pub fn contains_screen(&self, screen: Point, view: &TransformContext) -> bool {
        self.contains(view.screen_to_world(screen))
    }

    /// Moves the area by a pointer delta in screen pixels.
    ///
    /// Returns `false` when the area is not draggable.
    pub fn drag_by(&mut self, screen_delta: Vec2, view: &TransformContext) -> bool {
        if !self.draggable || screen_delta == Vec2::ZERO {
            return false;
        }
        let world_delta = screen_delta / view.zoom();
        for p in &mut self.points {
            *p += world_delta;
        }
        true
    }

    /// Paints the area with the map transform applied.
    ///
    /// The context state is saved and restored around the call.
    pub fn draw(&self, cx: &mut impl DrawContext, view: &TransformContext) {
        if self.points.len() < 3 {
            return;
        }
        let zoom = view.zoom();
        cx.save();
        cx.translate(view.image_rect().origin().to_vec2());
        cx.scale(zoom, zoom);
        cx.set_stroke_color(self.style.stroke);
        cx.set_fill_color(self.style.fill);
        cx.set_line_width(self.style.line_width);
        cx.trace_polyline(&self.points, true);
        cx.stroke();
        cx.fill();
        cx.restore();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use emap_canvas::{DrawCommand, RecordingContext};
    use kurbo::{Affine, Size};

    use super::*;

    fn triangle() -> Area {
        Area::new(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
        ])
    }

    #[test]
    fn draws_with_map_transform() {
        let mut view = TransformContext::default();
        view.resize(Size::new(300.0, 300.0));
        view.place_image(Size::new(100.0, 100.0)).unwrap();
        view.zoom_to(2.0, Point::new(150.0, 150.0));

        let mut cx = RecordingContext::new();
        triangle().draw(&mut cx, &view);

        let stroke = cx
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Stroke { state } => Some(*state),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            stroke.transform,
            Affine::translate((50.0, 50.0)) * Affine::scale(2.0)
        );
        assert_eq!(stroke.line_width, 2.0);
        assert_eq!(cx.paint_count(), 2);
        assert_eq!(cx.transform(), Affine::IDENTITY);
    }

    #[test]
    fn hit_testing_in_both_spaces() {
        let mut view = TransformContext::default();
        view.zoom_to(2.0, Point::ZERO);
        let area = triangle();
        assert!(area.contains(Point::new(10.0, 10.0)));
        assert!(!area.contains(Point::new(90.0, 90.0)));
        assert!(area.contains_screen(Point::new(20.0, 20.0), &view));
        assert!(!area.contains_screen(Point::new(180.0, 180.0), &view));
    }

    #[test]
    fn only_draggable_areas_move() {
        let view = TransformContext::default();
        let mut area = triangle();
        assert!(!area.drag_by(Vec2::new(5.0, 5.0), &view));
        area.draggable = true;
        assert!(area.drag_by(Vec2::new(5.0, 5.0), &view));
        assert_eq!(area.points[0], Point::new(5.0, 5.0));
    }
}
