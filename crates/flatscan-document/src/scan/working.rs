// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Working image — the downscaled copy used for edge and line analysis.

use flatscan_core::error::FlatscanError;
use flatscan_core::Result;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbImage};
use tracing::debug;

/// Downscaled analysis copy of an input image.
///
/// `scale` is original size / working size, so a working-space coordinate
/// times `scale` is the matching original-space coordinate.
#[derive(Debug, Clone)]
pub struct WorkingImage {
    /// Colour copy, kept for the debug overlay.
    pub rgb: RgbImage,
    /// Luma copy the edge detector runs on.
    pub gray: GrayImage,
    pub scale: f32,
}

impl WorkingImage {
    /// Scale `image` so its width approaches `analysis_width`, never by a
    /// factor above `max_downscale`. Narrow inputs are scaled up.
    pub fn from_image(image: &DynamicImage, analysis_width: u32, max_downscale: f32) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(FlatscanError::ImageError(format!(
                "cannot analyse an empty {width}x{height} image"
            )));
        }

        let scale = working_scale(width, analysis_width, max_downscale);
        let work_w = ((width as f32 / scale) as u32).max(1);
        let work_h = ((height as f32 / scale) as u32).max(1);

        let rgb = imageops::resize(&image.to_rgb8(), work_w, work_h, FilterType::Triangle);
        let gray = imageops::grayscale(&rgb);
        debug!(width, height, work_w, work_h, scale, "Working image prepared");

        Ok(Self { rgb, gray, scale })
    }

    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    pub fn height(&self) -> u32 {
        self.gray.height()
    }
}

/// `min(max_downscale, width / analysis_width)`.
pub fn working_scale(width: u32, analysis_width: u32, max_downscale: f32) -> f32 {
    (width as f32 / analysis_width.max(1) as f32).min(max_downscale)
}
