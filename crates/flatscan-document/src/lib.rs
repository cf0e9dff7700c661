// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// flatscan-document — Document photo rectification for Flatscan.
//
// Provides the geometry pipeline (line classification, boundary selection,
// corner intersection, scale mapping), rectification onto a standard page,
// per-channel contrast stretching, a batch processor, and a debug overlay.
// Image-processing primitives sit behind the `VisionBackend` trait.

pub mod backend;
pub mod batch;
pub mod geometry;
pub mod overlay;
pub mod scan;

// Re-export the primary structs so callers can use `flatscan_document::Scanner` etc.
pub use backend::{ImageprocBackend, SegmentParams, VisionBackend};
pub use batch::{BatchProcessor, BatchReport, ImageOutcome, ImageStatus};
pub use overlay::render_overlay;
pub use scan::{ScanGeometry, ScanOutcome, Scanner, WorkingImage};
