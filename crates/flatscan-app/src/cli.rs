// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface.

use std::path::PathBuf;

use clap::Parser;
use flatscan_core::{PaperSize, Result, ScanConfig};

/// Exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every image was written.
    Success = 0,
    /// At least one image was skipped or failed.
    ImageFailed = 1,
    /// Bad configuration; no image was processed.
    InvalidConfig = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Flatten photos of documents into perspective-corrected page scans
#[derive(Parser, Debug)]
#[command(name = "flatscan")]
#[command(version)]
#[command(about = "Flatten photos of documents into perspective-corrected page scans", long_about = None)]
pub struct Cli {
    /// Input images
    #[arg(required = true, value_name = "IMAGE")]
    pub images: Vec<PathBuf>,

    /// Stretch contrast per channel after rectification
    #[arg(short, long)]
    pub adjust: bool,

    /// Verbosity (-v writes a geometry overlay per image and logs at debug level)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output folder [default: output]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Pixels per inch of the output page [default: 200]
    #[arg(short, long)]
    pub ppi: Option<u32>,

    /// Output page size: a4, a5, letter or legal [default: a4]
    #[arg(long)]
    pub paper: Option<PaperSize>,

    /// Percentage trimmed from each histogram tail by --adjust [default: 1]
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Fail an image whose document corners cannot all be computed
    #[arg(long)]
    pub strict: bool,

    /// JSON configuration file; command-line flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a JSON report of the batch to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Build the scan configuration: config file (or defaults), then flags.
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_json_file(path)?,
            None => ScanConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(ppi) = self.ppi {
            config.ppi = ppi;
        }
        if let Some(paper) = self.paper {
            config.paper = paper;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        config.adjust |= self.adjust;
        config.strict_geometry |= self.strict;
        config.debug_overlay |= self.verbose > 0;

        config.validate()?;
        Ok(config)
    }
}
