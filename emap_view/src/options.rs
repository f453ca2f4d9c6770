// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Animation;

/// Configuration of one map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapOptions {
    /// Initial zoom.
    pub zoom: f64,
    /// Smallest zoom reachable by zooming out.
    pub min_zoom: f64,
    /// Largest zoom reachable by zooming in.
    pub max_zoom: f64,
    /// Whether the map can be panned.
    pub draggable: bool,
    /// Whether zoom controls are shown by the composition layer.
    pub zoom_control: bool,
    /// Animate zoom changes, or jump when `None`.
    pub animation: Option<Animation>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            draggable: true,
            zoom_control: true,
            animation: None,
        }
    }
}
