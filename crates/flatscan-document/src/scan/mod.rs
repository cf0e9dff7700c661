// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — working-image preparation, rectification onto the
// target page, and contrast stretching.

pub mod contrast;
pub mod rectify;
pub mod scanner;
pub mod working;

pub use contrast::stretch_contrast;
pub use rectify::rectify;
pub use scanner::{ScanGeometry, ScanOutcome, Scanner};
pub use working::WorkingImage;
