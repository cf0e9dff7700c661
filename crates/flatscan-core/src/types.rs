// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Flatscan rectification pipeline.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A real-valued image coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

impl From<Point> for (f32, f32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// A detected (or synthesized) line segment.
///
/// The center is derived once at construction. Orientation is not stored:
/// it is decided by which axis-set the segment ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub p1: Point,
    pub p2: Point,
    pub center: Point,
}

impl LineSegment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self {
            p1,
            p2,
            center: p1.midpoint(p2),
        }
    }

    pub fn dx(&self) -> f32 {
        self.p1.x - self.p2.x
    }

    pub fn dy(&self) -> f32 {
        self.p1.y - self.p2.y
    }
}

/// One corner of the document quadrilateral.
///
/// `valid` is false when the two boundary lines defining the corner are
/// parallel; the point then holds the sentinel (-1, -1) scaled along with
/// everything else, so consumers must test the flag rather than the value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub point: Point,
    pub valid: bool,
}

impl Corner {
    /// The undefined intersection.
    pub const SENTINEL: Corner = Corner {
        point: Point::new(-1.0, -1.0),
        valid: false,
    };

    pub fn at(point: Point) -> Self {
        Self { point, valid: true }
    }
}

/// Four corners in the fixed order `[top-left, top-right, bottom-left, bottom-right]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerQuad {
    pub corners: [Corner; 4],
}

impl CornerQuad {
    pub fn new(top_left: Corner, top_right: Corner, bottom_left: Corner, bottom_right: Corner) -> Self {
        Self {
            corners: [top_left, top_right, bottom_left, bottom_right],
        }
    }

    pub fn top_left(&self) -> Corner {
        self.corners[0]
    }

    pub fn top_right(&self) -> Corner {
        self.corners[1]
    }

    pub fn bottom_left(&self) -> Corner {
        self.corners[2]
    }

    pub fn bottom_right(&self) -> Corner {
        self.corners[3]
    }

    /// Raw corner coordinates in quad order, regardless of validity.
    pub fn points(&self) -> [Point; 4] {
        self.corners.map(|c| c.point)
    }

    /// Number of corners whose intersection was undefined.
    pub fn invalid_count(&self) -> usize {
        self.corners.iter().filter(|c| !c.valid).count()
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_count() == 0
    }
}

/// Standard page sizes, measured in hundredths of an inch.
///
/// Integer dimensions keep `floor(ppi * inches)` exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom {
        width_hundredths: u32,
        height_hundredths: u32,
    },
}

impl PaperSize {
    /// Dimensions in hundredths of an inch (width, height).
    pub fn dimensions_hundredths(&self) -> (u32, u32) {
        match self {
            Self::A4 => (827, 1170),
            Self::A5 => (583, 827),
            Self::Letter => (850, 1100),
            Self::Legal => (850, 1400),
            Self::Custom {
                width_hundredths,
                height_hundredths,
            } => (*width_hundredths, *height_hundredths),
        }
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            other => Err(format!(
                "unknown paper size '{other}' (expected a4, a5, letter or legal)"
            )),
        }
    }
}

/// The fixed-size output rectangle a document is warped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRectangle {
    pub width: u32,
    pub height: u32,
}

impl TargetRectangle {
    /// Page size in pixels at `ppi`: `floor(ppi * inches)` per axis.
    ///
    /// `None` when either side does not fit in a `u32`.
    pub fn for_paper(paper: PaperSize, ppi: u32) -> Option<Self> {
        let (w, h) = paper.dimensions_hundredths();
        let pixels = |hundredths: u32| u32::try_from(u64::from(ppi) * u64::from(hundredths) / 100).ok();
        Some(Self {
            width: pixels(w)?,
            height: pixels(h)?,
        })
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Corners in quad order `[tl, tr, bl, br]`.
    pub fn corners(&self) -> [Point; 4] {
        let right = self.width.saturating_sub(1) as f32;
        let bottom = self.height.saturating_sub(1) as f32;
        [
            Point::new(0.0, 0.0),
            Point::new(right, 0.0),
            Point::new(0.0, bottom),
            Point::new(right, bottom),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_at_100_ppi() {
        let target = TargetRectangle::for_paper(PaperSize::A4, 100).unwrap();
        assert_eq!((target.width, target.height), (827, 1170));
    }

    #[test]
    fn a4_at_default_ppi_floors() {
        let target = TargetRectangle::for_paper(PaperSize::A4, 200).unwrap();
        assert_eq!((target.width, target.height), (1654, 2340));

        // 8.27 * 150 = 1240.5, 11.7 * 150 = 1755
        let target = TargetRectangle::for_paper(PaperSize::A4, 150).unwrap();
        assert_eq!((target.width, target.height), (1240, 1755));
    }

    #[test]
    fn oversized_custom_page_does_not_wrap() {
        let paper = PaperSize::Custom {
            width_hundredths: u32::MAX,
            height_hundredths: 1100,
        };
        assert_eq!(TargetRectangle::for_paper(paper, 2400), None);

        let legal = TargetRectangle::for_paper(PaperSize::Legal, 2400).unwrap();
        assert_eq!((legal.width, legal.height), (20_400, 33_600));
        assert_eq!(legal.pixel_count(), 685_440_000);
    }

    #[test]
    fn target_corners_are_in_quad_order() {
        let target = TargetRectangle { width: 10, height: 20 };
        assert_eq!(
            target.corners(),
            [
                Point::new(0.0, 0.0),
                Point::new(9.0, 0.0),
                Point::new(0.0, 19.0),
                Point::new(9.0, 19.0),
            ]
        );
    }

    #[test]
    fn segment_center_is_midpoint() {
        let seg = LineSegment::new(Point::new(0.0, 10.0), Point::new(5.0, 20.0));
        assert_eq!(seg.center, Point::new(2.5, 15.0));
        assert_eq!(seg.dx(), -5.0);
        assert_eq!(seg.dy(), -10.0);
    }

    #[test]
    fn quad_counts_invalid_corners() {
        let ok = Corner::at(Point::new(1.0, 1.0));
        let quad = CornerQuad::new(ok, Corner::SENTINEL, ok, Corner::SENTINEL);
        assert_eq!(quad.invalid_count(), 2);
        assert!(!quad.is_valid());
        assert_eq!(quad.top_right().point, Point::new(-1.0, -1.0));
    }

    #[test]
    fn paper_size_parses_case_insensitively() {
        assert_eq!("Letter".parse::<PaperSize>(), Ok(PaperSize::Letter));
        assert_eq!("a4".parse::<PaperSize>(), Ok(PaperSize::A4));
        assert!("b5".parse::<PaperSize>().is_err());
    }
}
