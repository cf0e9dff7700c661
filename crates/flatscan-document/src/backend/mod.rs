// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capability trait for the image-processing collaborators the pipeline relies
// on: edge detection, line-segment extraction, homography solving, warping,
// and image I/O.
//
// The pipeline only ever talks to these through `VisionBackend`, so tests can
// substitute doubles with canned segments and trivial transforms.

pub mod imageproc_backend;

use std::path::Path;

use flatscan_core::{Point, Result};
use image::{DynamicImage, GrayImage, RgbImage};

pub use imageproc_backend::ImageprocBackend;

/// Tuning for line-segment detection, derived from the working image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentParams {
    /// Minimum accumulator votes for a line.
    pub vote_threshold: u32,
    /// Radius within which weaker duplicate lines are suppressed.
    pub suppression_radius: u32,
}

impl SegmentParams {
    /// A third of the working width in votes, as for a line spanning a third
    /// of the image.
    pub fn for_working_width(width: u32) -> Self {
        Self {
            vote_threshold: (width / 3).max(1),
            suppression_radius: 8,
        }
    }
}

/// The external image-processing operations used by the scan pipeline.
pub trait VisionBackend {
    /// Projective transform produced by [`compute_homography`](Self::compute_homography).
    type Transform;

    /// Binary edge map of a grayscale image.
    fn edge_detect(&self, gray: &GrayImage) -> GrayImage;

    /// Straight segments found in an edge map, as endpoint pairs.
    fn detect_line_segments(&self, edges: &GrayImage, params: &SegmentParams) -> Vec<(Point, Point)>;

    /// Transform taking each `from` point onto the matching `to` point.
    /// `None` when the source points are degenerate.
    fn compute_homography(&self, from: &[Point; 4], to: &[Point; 4]) -> Option<Self::Transform>;

    /// Resample `image` through `transform` into a raster of exactly `size`.
    fn warp_image(&self, image: &RgbImage, transform: &Self::Transform, size: (u32, u32)) -> RgbImage;

    /// Decode an image file.
    fn read_image(&self, path: &Path) -> Result<DynamicImage>;

    /// Encode an image file; the format follows the extension.
    fn write_image(&self, path: &Path, image: &DynamicImage) -> Result<()>;
}
