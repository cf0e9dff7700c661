// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Debug overlay — the detected geometry drawn over the working image.

use flatscan_core::LineSegment;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use crate::scan::{ScanGeometry, WorkingImage};

const DETECTED: Rgb<u8> = Rgb([255, 0, 0]);
const HORIZONTAL_EDGE: Rgb<u8> = Rgb([0, 255, 0]);
const VERTICAL_EDGE: Rgb<u8> = Rgb([0, 0, 255]);
const CORNER: Rgb<u8> = Rgb([0, 255, 255]);
const CORNER_RADIUS: i32 = 10;

/// Draw every detected segment (red), the horizontal boundary lines (green),
/// the vertical boundary lines (blue) and each defined corner (cyan circle)
/// on a copy of the working image.
pub fn render_overlay(working: &WorkingImage, geometry: &ScanGeometry) -> RgbImage {
    let mut canvas = working.rgb.clone();

    for line in geometry.lines.iter() {
        draw_segment(&mut canvas, line, DETECTED, false);
    }

    let edges = &geometry.boundary.lines;
    draw_segment(&mut canvas, &edges.top, HORIZONTAL_EDGE, true);
    draw_segment(&mut canvas, &edges.bottom, HORIZONTAL_EDGE, true);
    draw_segment(&mut canvas, &edges.left, VERTICAL_EDGE, true);
    draw_segment(&mut canvas, &edges.right, VERTICAL_EDGE, true);

    for corner in geometry.analysis_corners.corners.iter().filter(|c| c.valid) {
        let center = (corner.point.x.round() as i32, corner.point.y.round() as i32);
        draw_hollow_circle_mut(&mut canvas, center, CORNER_RADIUS, CORNER);
    }

    canvas
}

/// Thick lines get a second pass shifted one pixel across their direction.
fn draw_segment(canvas: &mut RgbImage, line: &LineSegment, color: Rgb<u8>, thick: bool) {
    let (start, end) = ((line.p1.x, line.p1.y), (line.p2.x, line.p2.y));
    draw_line_segment_mut(canvas, start, end, color);

    if thick {
        let (ox, oy) = if line.dx().abs() > line.dy().abs() {
            (0.0, 1.0)
        } else {
            (1.0, 0.0)
        };
        draw_line_segment_mut(
            canvas,
            (start.0 + ox, start.1 + oy),
            (end.0 + ox, end.1 + oy),
            color,
        );
    }
}
