// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boundary selection — pick the outermost horizontal and vertical lines as
// the document edges, falling back to the image border when too few lines
// were detected on an axis.

use flatscan_core::{LineSegment, Point};
use tracing::debug;

use super::classify::ClassifiedLines;

/// Which set a line belongs to. Decides the coordinate it is sorted by and
/// which image borders stand in for missing lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Coordinate along the perpendicular axis (y for horizontals, x for verticals).
    pub fn coordinate(self, p: Point) -> f32 {
        match self {
            Self::Horizontal => p.y,
            Self::Vertical => p.x,
        }
    }

    /// Half the image extent across this axis, rounded down.
    fn midline(self, width: u32, height: u32) -> f32 {
        let extent = match self {
            Self::Horizontal => height,
            Self::Vertical => width,
        };
        (extent / 2) as f32
    }

    /// Border line at coordinate 0 (top or left).
    fn near_border(self, width: u32, height: u32) -> LineSegment {
        let right = width.saturating_sub(1) as f32;
        let bottom = height.saturating_sub(1) as f32;
        match self {
            Self::Horizontal => LineSegment::new(Point::new(0.0, 0.0), Point::new(right, 0.0)),
            Self::Vertical => LineSegment::new(Point::new(0.0, 0.0), Point::new(0.0, bottom)),
        }
    }

    /// Border line at the last pixel row or column (bottom or right).
    fn far_border(self, width: u32, height: u32) -> LineSegment {
        let right = width.saturating_sub(1) as f32;
        let bottom = height.saturating_sub(1) as f32;
        match self {
            Self::Horizontal => {
                LineSegment::new(Point::new(0.0, bottom), Point::new(right, bottom))
            }
            Self::Vertical => LineSegment::new(Point::new(right, 0.0), Point::new(right, bottom)),
        }
    }
}

/// The four lines taken as document edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryLines {
    pub top: LineSegment,
    pub bottom: LineSegment,
    pub left: LineSegment,
    pub right: LineSegment,
}

/// Completed, sorted line sets and the boundary lines picked from them.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySelection {
    /// Ascending by center y, at least two entries.
    pub horizontals: Vec<LineSegment>,
    /// Ascending by center x, at least two entries.
    pub verticals: Vec<LineSegment>,
    pub lines: BoundaryLines,
}

/// Top up an axis set that holds fewer than two lines with image-border lines.
///
/// With no lines both borders are added. With one line, the border on the
/// opposite side of the midline is added: a line in the far half gets the
/// near border, a line in the near half (or exactly on the midline) gets the
/// far border. The midline is the integer half of the extent (75 for a
/// height of 151).
pub fn complete_axis(lines: &mut Vec<LineSegment>, axis: Axis, width: u32, height: u32) {
    if lines.len() >= 2 {
        return;
    }

    let midline = axis.midline(width, height);
    let existing = lines.first().map(|line| axis.coordinate(line.center));

    if existing.is_none_or(|c| c > midline) {
        lines.push(axis.near_border(width, height));
    }
    if existing.is_none_or(|c| c <= midline) {
        lines.push(axis.far_border(width, height));
    }

    debug!(?axis, ?existing, midline, count = lines.len(), "Synthesized border fallback");
}

/// Stable ascending sort by center coordinate on the perpendicular axis.
pub fn sort_axis(lines: &mut [LineSegment], axis: Axis) {
    lines.sort_by(|a, b| axis.coordinate(a.center).total_cmp(&axis.coordinate(b.center)));
}

/// First and last entries of a sorted set.
fn extremes(lines: &[LineSegment], axis: Axis, width: u32, height: u32) -> (LineSegment, LineSegment) {
    match (lines.first(), lines.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => (axis.near_border(width, height), axis.far_border(width, height)),
    }
}

/// Guarantee two lines per axis, sort both axes, and take the outermost pair
/// of each as the document edges. Never fails.
pub fn select_boundaries(classified: ClassifiedLines, width: u32, height: u32) -> BoundarySelection {
    let ClassifiedLines {
        mut horizontals,
        mut verticals,
    } = classified;

    complete_axis(&mut horizontals, Axis::Horizontal, width, height);
    complete_axis(&mut verticals, Axis::Vertical, width, height);
    sort_axis(&mut horizontals, Axis::Horizontal);
    sort_axis(&mut verticals, Axis::Vertical);

    let (top, bottom) = extremes(&horizontals, Axis::Horizontal, width, height);
    let (left, right) = extremes(&verticals, Axis::Vertical, width, height);

    BoundarySelection {
        horizontals,
        verticals,
        lines: BoundaryLines {
            top,
            bottom,
            left,
            right,
        },
    }
}
