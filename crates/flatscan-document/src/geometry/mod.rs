// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry module — line classification, boundary selection, corner
// intersection, and working-to-original scale mapping.

pub mod boundary;
pub mod classify;
pub mod intersect;
pub mod scale;

pub use boundary::{Axis, BoundaryLines, BoundarySelection, select_boundaries};
pub use classify::{ClassifiedLines, classify_lines};
pub use intersect::{intersect, quad_corners};
pub use scale::scale_corners;
