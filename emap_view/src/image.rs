// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map image loading state.

use alloc::string::String;

use kurbo::{Rect, Size};
use thiserror::Error;

use crate::TransformContext;

/// Why the map image could not be used.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The host failed to load the image.
    #[error("failed to load map image: {reason}")]
    Load {
        /// Host-provided description of the failure.
        reason: String,
    },
    /// The image loaded but has no pixels.
    #[error("map image has zero area")]
    EmptyImage,
}

/// Loading state of the map image.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ImageStatus {
    /// Still loading. Layers wait before painting.
    #[default]
    Loading,
    /// Loaded and placed.
    Ready {
        /// Natural size of the image in pixels.
        natural: Size,
    },
    /// Loading failed. The library does not retry.
    Failed(ImageError),
}

/// Tracks the map image from request to placement.
///
/// Loading itself belongs to the host. Its screen rectangle lives in the
/// [`TransformContext`].
#[derive(Clone, Debug, Default)]
pub struct MapImage {
    status: ImageStatus,
}

impl MapImage {
    /// Creates an image in the [`ImageStatus::Loading`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> &ImageStatus {
        &self.status
    }

    /// Whether layers may paint.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.status, ImageStatus::Ready { .. })
    }

    /// Records the outcome of the host's load and places the image in `view`.
    ///
    /// On success the image is centered in the layer and its screen rectangle
    /// is returned. Failures are stored in the status and returned as well.
    pub fn finish_loading(
        &mut self,
        result: Result<Size, ImageError>,
        view: &mut TransformContext,
    ) -> Result<Rect, ImageError> {
        let placed = result.and_then(|natural| view.place_image(natural).map(|r| (natural, r)));
        match placed {
            Ok((natural, rect)) => {
                self.status = ImageStatus::Ready { natural };
                Ok(rect)
            }
            Err(err) => {
                self.status = ImageStatus::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Puts the image back into [`ImageStatus::Loading`], for a new source.
    pub fn reload(&mut self) {
        self.status = ImageStatus::Loading;
    }
}
