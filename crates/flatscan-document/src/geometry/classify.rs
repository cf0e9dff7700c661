// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line classification — split raw segments into horizontal and vertical sets.

use flatscan_core::{LineSegment, Point};

/// Segments split by dominant axis. Neither set is sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedLines {
    pub horizontals: Vec<LineSegment>,
    pub verticals: Vec<LineSegment>,
}

impl ClassifiedLines {
    pub fn len(&self) -> usize {
        self.horizontals.len() + self.verticals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every segment, horizontals first.
    pub fn iter(&self) -> impl Iterator<Item = &LineSegment> {
        self.horizontals.iter().chain(self.verticals.iter())
    }
}

/// Classify each segment as horizontal when `|dx| > |dy|`, vertical otherwise.
///
/// A 45° segment (`|dx| == |dy|`) lands in the vertical set.
pub fn classify_lines(segments: &[(Point, Point)]) -> ClassifiedLines {
    let mut classified = ClassifiedLines::default();

    for &(p1, p2) in segments {
        let line = LineSegment::new(p1, p2);
        if line.dx().abs() > line.dy().abs() {
            classified.horizontals.push(line);
        } else {
            classified.verticals.push(line);
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> (Point, Point) {
        (Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn empty_input_gives_empty_sets() {
        let classified = classify_lines(&[]);
        assert!(classified.is_empty());
    }

    #[test]
    fn dominant_axis_decides() {
        let classified = classify_lines(&[
            seg(0.0, 0.0, 100.0, 3.0),   // horizontal
            seg(10.0, 0.0, 12.0, 80.0),  // vertical
            seg(50.0, 40.0, 0.0, 45.0),  // horizontal, reversed endpoints
            seg(0.0, 90.0, 1.0, 0.0),    // vertical, reversed endpoints
        ]);
        assert_eq!(classified.horizontals.len(), 2);
        assert_eq!(classified.verticals.len(), 2);
        assert_eq!(classified.horizontals[1].center, Point::new(25.0, 42.5));
    }

    #[test]
    fn diagonal_tie_is_vertical() {
        let classified = classify_lines(&[seg(0.0, 0.0, 30.0, 30.0), seg(0.0, 30.0, 30.0, 0.0)]);
        assert!(classified.horizontals.is_empty());
        assert_eq!(classified.verticals.len(), 2);
    }

    #[test]
    fn degenerate_point_segment_is_vertical() {
        let classified = classify_lines(&[seg(5.0, 5.0, 5.0, 5.0)]);
        assert_eq!(classified.verticals.len(), 1);
    }

    #[test]
    fn every_segment_lands_in_exactly_one_set() {
        let segments: Vec<_> = (0..40)
            .map(|i| {
                let t = i as f32;
                seg(0.0, 0.0, (t * 7.0) % 23.0 - 11.0, (t * 5.0) % 19.0 - 9.0)
            })
            .collect();
        let classified = classify_lines(&segments);
        assert_eq!(classified.len(), segments.len());
        for line in &classified.horizontals {
            assert!(line.dx().abs() > line.dy().abs());
        }
        for line in &classified.verticals {
            assert!(line.dx().abs() <= line.dy().abs());
        }
    }
}
