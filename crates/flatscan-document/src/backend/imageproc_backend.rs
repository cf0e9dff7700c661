// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Default `VisionBackend` built on the `image` and `imageproc` crates.

use std::path::Path;

use flatscan_core::error::FlatscanError;
use flatscan_core::{Point, Result};
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::contrast::otsu_level;
use imageproc::edges::canny;
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use imageproc::hough::{LineDetectionOptions, PolarLine, detect_lines};
use tracing::{debug, instrument};

use super::{SegmentParams, VisionBackend};

/// Below this a direction component is treated as zero when clipping lines.
const AXIS_EPSILON: f32 = 1e-6;

/// Slack, in pixels, for border crossings that land just outside the image.
const BORDER_SLACK: f32 = 1e-3;

/// Canny + Hough + `Projection` backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageprocBackend;

impl ImageprocBackend {
    pub fn new() -> Self {
        Self
    }
}

impl VisionBackend for ImageprocBackend {
    type Transform = Projection;

    /// Canny with the Otsu level as the high threshold and half of it as the
    /// low threshold.
    fn edge_detect(&self, gray: &GrayImage) -> GrayImage {
        let high = f32::from(otsu_level(gray)).max(1.0);
        let low = high * 0.5;
        debug!(low, high, "Canny thresholds from Otsu level");
        canny(gray, low, high)
    }

    #[instrument(skip(self, edges), fields(width = edges.width(), height = edges.height()))]
    fn detect_line_segments(&self, edges: &GrayImage, params: &SegmentParams) -> Vec<(Point, Point)> {
        let options = LineDetectionOptions {
            vote_threshold: params.vote_threshold,
            suppression_radius: params.suppression_radius,
        };
        let lines = detect_lines(edges, options);
        let segments: Vec<_> = lines
            .iter()
            .filter_map(|line| clip_polar_line(line, edges.width(), edges.height()))
            .collect();
        debug!(
            hough_lines = lines.len(),
            segments = segments.len(),
            "Line segments extracted"
        );
        segments
    }

    fn compute_homography(&self, from: &[Point; 4], to: &[Point; 4]) -> Option<Projection> {
        let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
        if !from.iter().chain(to.iter()).all(finite) {
            return None;
        }
        Projection::from_control_points(from.map(Into::into), to.map(Into::into))
    }

    fn warp_image(&self, image: &RgbImage, transform: &Projection, size: (u32, u32)) -> RgbImage {
        let mut output = RgbImage::new(size.0, size.1);
        warp_into(
            image,
            transform,
            Interpolation::Bilinear,
            Rgb([0u8, 0, 0]),
            &mut output,
        );
        output
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn read_image(&self, path: &Path) -> Result<DynamicImage> {
        let image = image::open(path).map_err(|err| FlatscanError::UnreadableImage {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        debug!(width = image.width(), height = image.height(), "Image decoded");
        Ok(image)
    }

    fn write_image(&self, path: &Path, image: &DynamicImage) -> Result<()> {
        image.save(path).map_err(|err| {
            FlatscanError::ImageError(format!(
                "failed to save image to {}: {}",
                path.display(),
                err
            ))
        })
    }
}

/// Clip a Hough line to the pixel rectangle `[0, width-1] x [0, height-1]`.
///
/// A `PolarLine` `(r, theta)` is the set of points with
/// `x * cos(theta) + y * sin(theta) = r`. Returns the two border crossings
/// farthest apart, or `None` when the line misses the image or only touches
/// a corner.
pub fn clip_polar_line(line: &PolarLine, width: u32, height: u32) -> Option<(Point, Point)> {
    if width == 0 || height == 0 {
        return None;
    }

    let (sin, cos) = (line.angle_in_degrees as f32).to_radians().sin_cos();
    let max_x = (width - 1) as f32;
    let max_y = (height - 1) as f32;
    let in_range = |v: f32, max: f32| v >= -BORDER_SLACK && v <= max + BORDER_SLACK;

    let mut hits: Vec<Point> = Vec::with_capacity(4);
    if sin.abs() > AXIS_EPSILON {
        for x in [0.0, max_x] {
            let y = (line.r - x * cos) / sin;
            if in_range(y, max_y) {
                hits.push(Point::new(x, y.clamp(0.0, max_y)));
            }
        }
    }
    if cos.abs() > AXIS_EPSILON {
        for y in [0.0, max_y] {
            let x = (line.r - y * sin) / cos;
            if in_range(x, max_x) {
                hits.push(Point::new(x.clamp(0.0, max_x), y));
            }
        }
    }

    let mut best: Option<((Point, Point), f32)> = None;
    for (i, a) in hits.iter().enumerate() {
        for b in &hits[i + 1..] {
            let dist = (a.x - b.x).powi(2) + (a.y - b.y).powi(2);
            if best.is_none_or(|(_, d)| dist > d) {
                best = Some(((*a, *b), dist));
            }
        }
    }

    best.filter(|&(_, dist)| dist > 0.0).map(|(pair, _)| pair)
}
