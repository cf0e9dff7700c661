// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Flatscan.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Flatscan operations.
///
/// Every variant is scoped to a single image except `Configuration`, which is
/// raised before a batch starts.
#[derive(Debug, Error)]
pub enum FlatscanError {
    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Configuration(String),

    // -- Image errors --
    #[error("cannot read image {}: {reason}", path.display())]
    UnreadableImage { path: PathBuf, reason: String },

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("degenerate document geometry: {invalid} of 4 corners undefined")]
    DegenerateGeometry { invalid: usize },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FlatscanError>;
