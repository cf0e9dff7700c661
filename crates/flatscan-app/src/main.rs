// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flatscan — document photo flattener
//
// Entry point. Parses flags, initialises logging, and runs the batch.

mod cli;

use clap::Parser;
use flatscan_document::BatchProcessor;

use cli::{Cli, ExitCode};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose > 0 { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&cli).into()
}

fn run(cli: &Cli) -> ExitCode {
    let processor = match cli.scan_config().and_then(BatchProcessor::with_config) {
        Ok(processor) => processor,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::InvalidConfig;
        }
    };

    tracing::debug!(config = ?processor.config(), "Flatscan starting");

    let report = processor.run_with_progress(&cli.images, |input| {
        println!("Processing: {}", input.display());
    });

    if let Some(path) = &cli.report {
        if let Err(e) = report.write_json(path) {
            tracing::error!(path = %path.display(), error = %e, "failed to write report");
            return ExitCode::ImageFailed;
        }
    }

    if report.all_written() {
        ExitCode::Success
    } else {
        eprintln!(
            "{} of {} images could not be processed",
            report.failures(),
            report.images.len()
        );
        ExitCode::ImageFailed
    }
}
