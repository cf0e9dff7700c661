// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch processing — scan a list of photos one after another, mirroring each
// input path under the output directory. A failing image is recorded and the
// batch moves on.

use std::path::{Component, Path, PathBuf};

use flatscan_core::error::FlatscanError;
use flatscan_core::{CornerQuad, Result, ScanConfig};
use image::DynamicImage;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::backend::{ImageprocBackend, VisionBackend};
use crate::overlay::render_overlay;
use crate::scan::Scanner;

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageStatus {
    /// The page was written.
    Written,
    /// The input could not be decoded.
    Skipped { reason: String },
    /// Scanning or writing failed.
    Failed { reason: String },
}

/// Per-image record in a [`BatchReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ImageOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<PathBuf>,
    #[serde(flatten)]
    pub status: ImageStatus,
    /// Document corners in original-image coordinates, when detection ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corners: Option<CornerQuad>,
}

/// Outcome of a whole batch, one entry per input in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub images: Vec<ImageOutcome>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.images
            .iter()
            .filter(|o| o.status == ImageStatus::Written)
            .count()
    }

    pub fn failures(&self) -> usize {
        self.images.len() - self.written()
    }

    pub fn all_written(&self) -> bool {
        self.failures() == 0
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

/// Destination for `input`: the full input path appended to `output_dir`.
///
/// Root, drive prefix, `.` and `..` components are dropped so the result
/// always stays inside `output_dir`.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let relative: PathBuf = input
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    output_dir.join(relative)
}

/// Where the debug overlay for `output` goes: `<stem>.overlay.png` beside it.
pub fn overlay_path(output: &Path) -> PathBuf {
    output.with_extension("overlay.png")
}

/// Sequential scanner over many files, sharing one read-only configuration.
pub struct BatchProcessor<B = ImageprocBackend> {
    scanner: Scanner<B>,
}

impl BatchProcessor<ImageprocBackend> {
    /// Batch processor on the `imageproc` backend.
    pub fn with_config(config: ScanConfig) -> Result<Self> {
        Self::new(ImageprocBackend::new(), config)
    }
}

impl<B: VisionBackend> BatchProcessor<B> {
    /// Validates `config` up front so a bad setting never starts a batch.
    pub fn new(backend: B, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scanner: Scanner::new(backend, config),
        })
    }

    pub fn config(&self) -> &ScanConfig {
        self.scanner.config()
    }

    /// Scan every input in order. Never aborts early.
    pub fn run(&self, inputs: &[PathBuf]) -> BatchReport {
        self.run_with_progress(inputs, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_start` before each input.
    #[instrument(skip_all, fields(count = inputs.len()))]
    pub fn run_with_progress(
        &self,
        inputs: &[PathBuf],
        mut on_start: impl FnMut(&Path),
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for input in inputs {
            on_start(input);
            let outcome = self.process(input);
            match &outcome.status {
                ImageStatus::Written => {
                    info!(input = %input.display(), output = %outcome.output.display(), "Page written")
                }
                ImageStatus::Skipped { reason } => {
                    warn!(input = %input.display(), %reason, "Skipping unreadable image")
                }
                ImageStatus::Failed { reason } => {
                    error!(input = %input.display(), %reason, "Image failed")
                }
            }
            report.images.push(outcome);
        }

        info!(
            written = report.written(),
            failed = report.failures(),
            "Batch finished"
        );
        report
    }

    /// Scan a single input and write its page (and overlay, if enabled).
    pub fn process(&self, input: &Path) -> ImageOutcome {
        let config = self.scanner.config();
        let output = output_path(&config.output_dir, input);
        let mut record = ImageOutcome {
            input: input.to_path_buf(),
            output: output.clone(),
            overlay: None,
            status: ImageStatus::Written,
            corners: None,
        };

        match self.scan_and_write(input, &output, &mut record) {
            Ok(()) => {}
            Err(err @ FlatscanError::UnreadableImage { .. }) => {
                record.status = ImageStatus::Skipped {
                    reason: err.to_string(),
                };
            }
            Err(err) => {
                record.status = ImageStatus::Failed {
                    reason: err.to_string(),
                };
            }
        }
        record
    }

    fn scan_and_write(&self, input: &Path, output: &Path, record: &mut ImageOutcome) -> Result<()> {
        let backend = self.scanner.backend();
        let outcome = self.scanner.scan_file(input)?;
        record.corners = Some(outcome.geometry.corners);

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let overlay = self
            .scanner
            .config()
            .debug_overlay
            .then(|| render_overlay(&outcome.working, &outcome.geometry));

        backend.write_image(output, &DynamicImage::ImageRgb8(outcome.page))?;

        // Overlay only after the page is on disk.
        if let Some(overlay) = overlay {
            let path = overlay_path(output);
            backend.write_image(&path, &DynamicImage::ImageRgb8(overlay))?;
            record.overlay = Some(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_keeps_full_relative_input() {
        assert_eq!(
            output_path(Path::new("output"), Path::new("photos/2024/receipt.jpg")),
            PathBuf::from("output/photos/2024/receipt.jpg")
        );
    }

    #[test]
    fn output_path_stays_inside_output_dir() {
        assert_eq!(
            output_path(Path::new("out"), Path::new("/home/me/doc.png")),
            PathBuf::from("out/home/me/doc.png")
        );
        assert_eq!(
            output_path(Path::new("out"), Path::new("../shots/./doc.png")),
            PathBuf::from("out/shots/doc.png")
        );
    }

    #[test]
    fn overlay_sits_beside_output() {
        assert_eq!(
            overlay_path(Path::new("out/a/page.jpg")),
            PathBuf::from("out/a/page.overlay.png")
        );
    }

    #[test]
    fn invalid_config_never_starts_a_batch() {
        let config = ScanConfig {
            ppi: 0,
            ..ScanConfig::default()
        };
        assert!(matches!(
            BatchProcessor::with_config(config),
            Err(FlatscanError::Configuration(_))
        ));
    }

    #[test]
    fn report_serializes_status_inline() {
        let report = BatchReport {
            images: vec![ImageOutcome {
                input: PathBuf::from("a.jpg"),
                output: PathBuf::from("out/a.jpg"),
                overlay: None,
                status: ImageStatus::Skipped {
                    reason: "bad header".into(),
                },
                corners: None,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["images"][0]["status"], "skipped");
        assert_eq!(json["images"][0]["reason"], "bad header");
        assert!(json["images"][0].get("corners").is_none());
        assert_eq!(report.failures(), 1);
    }
}
