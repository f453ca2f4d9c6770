// Copyright 2025 the EMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Precondition violations reported by the geometry kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The operation needs at least one point.
    #[error("operation needs at least one point")]
    EmptyPoints,
    /// The point coincides with the reference center, so there is no
    /// direction to scale along.
    #[error("point coincides with the center; direction is undefined")]
    DegenerateDirection,
}
