// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FlatscanError, Result};
use crate::types::{PaperSize, TargetRectangle};

/// Highest resolution accepted for the output page.
pub const MAX_PPI: u32 = 2400;

/// Largest output page accepted, in pixels: Legal at [`MAX_PPI`].
pub const MAX_PAGE_PIXELS: u64 = 20_400 * 33_600;

/// Settings shared read-only by every image in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Output resolution in pixels per inch (default 200).
    pub ppi: u32,
    /// Page the document is rectified onto.
    pub paper: PaperSize,
    /// Apply the per-channel contrast stretch to the rectified page.
    pub adjust: bool,
    /// Histogram tail percentage trimmed by the contrast stretch (0..=100).
    pub tolerance: u8,
    /// Write an overlay of the detected geometry next to each output.
    pub debug_overlay: bool,
    /// Abort an image whose corner quadrilateral has undefined corners
    /// instead of warping it anyway.
    pub strict_geometry: bool,
    /// Directory the input paths are mirrored into.
    pub output_dir: PathBuf,
    /// Width the working image is scaled towards for line analysis.
    pub analysis_width: u32,
    /// Upper cap on the original/working scale factor.
    pub max_downscale: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ppi: 200,
            paper: PaperSize::A4,
            adjust: false,
            tolerance: 1,
            debug_overlay: false,
            strict_geometry: false,
            output_dir: PathBuf::from("output"),
            analysis_width: 200,
            max_downscale: 10.0,
        }
    }
}

impl ScanConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// defaults; the result is validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.ppi == 0 || self.ppi > MAX_PPI {
            return Err(FlatscanError::Configuration(format!(
                "ppi must be between 1 and {MAX_PPI}, got {}",
                self.ppi
            )));
        }
        if self.tolerance > 100 {
            return Err(FlatscanError::Configuration(format!(
                "tolerance must be at most 100, got {}",
                self.tolerance
            )));
        }
        if self.analysis_width == 0 {
            return Err(FlatscanError::Configuration(
                "analysis width must be positive".into(),
            ));
        }
        if !(self.max_downscale.is_finite() && self.max_downscale > 0.0) {
            return Err(FlatscanError::Configuration(format!(
                "max downscale must be a positive number, got {}",
                self.max_downscale
            )));
        }
        self.target()?;
        Ok(())
    }

    /// Output page size in pixels. Fails for an empty page or one larger
    /// than [`MAX_PAGE_PIXELS`].
    pub fn target(&self) -> Result<TargetRectangle> {
        let too_large = || {
            FlatscanError::Configuration(format!(
                "page {:?} at {} ppi exceeds {MAX_PAGE_PIXELS} pixels",
                self.paper, self.ppi
            ))
        };
        let target = TargetRectangle::for_paper(self.paper, self.ppi).ok_or_else(too_large)?;
        if target.width == 0 || target.height == 0 {
            return Err(FlatscanError::Configuration(format!(
                "page {:?} at {} ppi has no pixels",
                self.paper, self.ppi
            )));
        }
        if target.pixel_count() > MAX_PAGE_PIXELS {
            return Err(too_large());
        }
        Ok(target)
    }
}
