// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner intersection — the document quadrilateral from its four edges.

use flatscan_core::{Corner, CornerQuad, LineSegment, Point};

use super::boundary::BoundaryLines;

/// Intersect the infinite lines through `a` and `b`.
///
/// Uses the determinant form over the four endpoints. Parallel or coincident
/// lines (determinant exactly zero) yield [`Corner::SENTINEL`]. The result is
/// not clamped to any image bounds.
pub fn intersect(a: &LineSegment, b: &LineSegment) -> Corner {
    let (x1, y1) = (f64::from(a.p1.x), f64::from(a.p1.y));
    let (x2, y2) = (f64::from(a.p2.x), f64::from(a.p2.y));
    let (x3, y3) = (f64::from(b.p1.x), f64::from(b.p1.y));
    let (x4, y4) = (f64::from(b.p2.x), f64::from(b.p2.y));

    let d = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if d == 0.0 {
        return Corner::SENTINEL;
    }

    let cross_a = x1 * y2 - y1 * x2;
    let cross_b = x3 * y4 - y3 * x4;
    let x = (cross_a * (x3 - x4) - (x1 - x2) * cross_b) / d;
    let y = (cross_a * (y3 - y4) - (y1 - y2) * cross_b) / d;

    Corner::at(Point::new(x as f32, y as f32))
}

/// Corners in quad order: top×left, top×right, bottom×left, bottom×right.
pub fn quad_corners(lines: &BoundaryLines) -> CornerQuad {
    CornerQuad::new(
        intersect(&lines.top, &lines.left),
        intersect(&lines.top, &lines.right),
        intersect(&lines.bottom, &lines.left),
        intersect(&lines.bottom, &lines.right),
    )
}
