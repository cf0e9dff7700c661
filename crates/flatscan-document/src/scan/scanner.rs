// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan pipeline — detect the document outline in a photo and flatten it onto
// a page-sized raster.

use std::path::Path;

use flatscan_core::error::FlatscanError;
use flatscan_core::{CornerQuad, Result, ScanConfig};
use image::{DynamicImage, RgbImage};
use tracing::{debug, info, instrument, warn};

use crate::backend::{ImageprocBackend, SegmentParams, VisionBackend};
use crate::geometry::{
    BoundarySelection, ClassifiedLines, classify_lines, quad_corners, scale_corners,
    select_boundaries,
};
use crate::scan::contrast::stretch_contrast;
use crate::scan::rectify::rectify;
use crate::scan::working::WorkingImage;

/// Everything the pipeline worked out about one image's geometry.
#[derive(Debug, Clone)]
pub struct ScanGeometry {
    /// Every detected segment, split by axis.
    pub lines: ClassifiedLines,
    /// Completed and sorted axis sets plus the chosen boundary lines.
    pub boundary: BoundarySelection,
    /// Corners in working-image coordinates.
    pub analysis_corners: CornerQuad,
    /// Corners in original-image coordinates.
    pub corners: CornerQuad,
    /// Original size / working size.
    pub scale: f32,
}

/// Result of scanning one image.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The flattened page, exactly the configured target size.
    pub page: RgbImage,
    pub geometry: ScanGeometry,
    /// The analysis copy the geometry was measured on.
    pub working: WorkingImage,
}

/// Turns document photos into flat page scans.
///
/// ## Pipeline
///
/// 1. Downscale to the working image and convert to grayscale
/// 2. Edge detection
/// 3. Line-segment detection
/// 4. Classify segments as horizontal or vertical
/// 5. Top up each axis with image-border lines and pick the outermost pair
/// 6. Intersect the four boundary lines to get the corners
/// 7. Scale corners back to the original resolution
/// 8. Warp the original onto the target page
/// 9. Optionally stretch contrast per channel
pub struct Scanner<B = ImageprocBackend> {
    backend: B,
    config: ScanConfig,
}

impl Scanner<ImageprocBackend> {
    /// Scanner on the `imageproc` backend.
    pub fn with_config(config: ScanConfig) -> Self {
        Self::new(ImageprocBackend::new(), config)
    }
}

impl<B: VisionBackend> Scanner<B> {
    pub fn new(backend: B, config: ScanConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Read `path` through the backend and scan it.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn scan_file(&self, path: &Path) -> Result<ScanOutcome> {
        let image = self.backend.read_image(path)?;
        self.scan(&image)
    }

    /// Run the whole pipeline on a decoded image.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn scan(&self, image: &DynamicImage) -> Result<ScanOutcome> {
        let config = &self.config;
        let target = config.target()?;

        let working = WorkingImage::from_image(image, config.analysis_width, config.max_downscale)?;
        let geometry = self.detect(&working);

        let invalid = geometry.corners.invalid_count();
        if invalid > 0 {
            if config.strict_geometry {
                warn!(invalid, "Undefined document corners; rejecting image");
                return Err(FlatscanError::DegenerateGeometry { invalid });
            }
            warn!(invalid, "Undefined document corners; page will not be meaningful");
        }

        let mut page = rectify(&self.backend, &image.to_rgb8(), &geometry.corners, target);
        if config.adjust {
            page = stretch_contrast(&page, config.tolerance);
        }

        info!(
            page_w = page.width(),
            page_h = page.height(),
            adjusted = config.adjust,
            "Document rectified"
        );
        Ok(ScanOutcome {
            page,
            geometry,
            working,
        })
    }

    /// Find the document quadrilateral on the working image.
    pub fn detect(&self, working: &WorkingImage) -> ScanGeometry {
        let (width, height) = (working.width(), working.height());

        let edges = self.backend.edge_detect(&working.gray);
        let segments = self
            .backend
            .detect_line_segments(&edges, &SegmentParams::for_working_width(width));

        let lines = classify_lines(&segments);
        debug!(
            horizontal = lines.horizontals.len(),
            vertical = lines.verticals.len(),
            "Lines classified"
        );

        let boundary = select_boundaries(lines.clone(), width, height);
        let analysis_corners = quad_corners(&boundary.lines);
        let corners = scale_corners(&analysis_corners, working.scale);
        debug!(
            top_left = ?corners.top_left(),
            top_right = ?corners.top_right(),
            bottom_left = ?corners.bottom_left(),
            bottom_right = ?corners.bottom_right(),
            "Document corners computed"
        );

        ScanGeometry {
            lines,
            boundary,
            analysis_corners,
            corners,
            scale: working.scale,
        }
    }
}
