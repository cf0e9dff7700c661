// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scale mapping — working-image corners back to original resolution.

use flatscan_core::{Corner, CornerQuad, Point};

/// Map corners from working-image space to original-image space.
///
/// Coordinates are multiplied by `scale` with no clamping. Validity flags are
/// carried over untouched, so an undefined corner stays detectable even
/// though its sentinel coordinates are scaled too.
pub fn scale_corners(quad: &CornerQuad, scale: f32) -> CornerQuad {
    CornerQuad {
        corners: quad.corners.map(|corner| Corner {
            point: Point::new(corner.point.x * scale, corner.point.y * scale),
            valid: corner.valid,
        }),
    }
}
