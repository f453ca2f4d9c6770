// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space state stays consistent with the transform context across
//! long sequences of pans and zooms.

use std::cell::RefCell;
use std::rc::Rc;

use emap_view::{MapOptions, ScreenAnchor, TransformContext, TransformEvent};
use kurbo::{Point, Size, Vec2};

struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 11) as f64) / ((1_u64 << 53) as f64)
    }
}

fn placed_view() -> TransformContext {
    let mut view = TransformContext::new(&MapOptions::default());
    view.resize(Size::new(1024.0, 768.0));
    view.place_image(Size::new(2000.0, 1500.0)).unwrap();
    view
}

#[test]
fn anchors_track_world_points() {
    let mut view = placed_view();
    let worlds = [
        Point::new(0.0, 0.0),
        Point::new(1000.0, 750.0),
        Point::new(1999.0, 3.0),
    ];
    let anchors: Vec<_> = worlds
        .iter()
        .map(|w| Rc::new(RefCell::new(ScreenAnchor::new(view.world_to_screen(*w)))))
        .collect();
    for a in &anchors {
        let a = a.clone();
        view.subscribe(move |e| a.borrow_mut().apply(e));
    }

    let mut rng = Lcg(11);
    for _ in 0..300 {
        if rng.next_f64() < 0.5 {
            let delta = Vec2::new(rng.next_f64() * 80.0 - 40.0, rng.next_f64() * 80.0 - 40.0);
            view.pan_by(delta);
        } else {
            let anchor = Point::new(rng.next_f64() * 1024.0, rng.next_f64() * 768.0);
            view.zoom_by(0.5 + rng.next_f64() * 1.5, anchor);
        }
    }

    for (w, a) in worlds.iter().zip(&anchors) {
        let expected = view.world_to_screen(*w);
        let got = a.borrow().position;
        assert!(
            (expected - got).hypot() < 1e-6,
            "anchor for {w:?} drifted: {got:?} vs {expected:?}"
        );
    }
}

#[test]
fn world_screen_round_trip() {
    let mut view = placed_view();
    view.zoom_to(3.5, Point::new(300.0, 200.0));
    view.pan_by(Vec2::new(-120.0, 45.0));
    for p in [Point::new(0.0, 0.0), Point::new(17.0, 1234.0), Point::new(-5.0, 9.0)] {
        let back = view.screen_to_world(view.world_to_screen(p));
        assert!((back - p).hypot() < 1e-9, "{p:?} came back as {back:?}");
    }
}

#[test]
fn zoom_stays_within_bounds() {
    let mut view = placed_view();
    let zooms = Rc::new(RefCell::new(Vec::new()));
    let sink = zooms.clone();
    view.subscribe(move |e| {
        if let TransformEvent::Zoomed { zoom, .. } = e {
            sink.borrow_mut().push(*zoom);
        }
    });

    for _ in 0..40 {
        view.zoom_by(1.7, Point::ZERO);
    }
    for _ in 0..80 {
        view.zoom_by(0.6, Point::ZERO);
    }

    let (min, max) = view.zoom_bounds();
    assert!(zooms.borrow().iter().all(|z| (min..=max).contains(z)));
    assert_eq!(zooms.borrow().iter().copied().fold(f64::MIN, f64::max), max);
    assert_eq!(view.zoom(), min);
}
