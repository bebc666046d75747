// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cardsheet — print sheet generator for trading cards
//
// Entry point. Initialises logging, builds a card session from the job file
// and command line, then paginates and writes the PDF.

mod cli;
mod job;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cardsheet_core::error::{CardsheetError, Result};
use cardsheet_document::{FsImageSource, SheetWriter, output_file_name};
use clap::Parser;
use tracing::{error, info};

use cli::Cli;
use job::JobFile;

/// What a successful run produced.
#[derive(Debug)]
struct RunSummary {
    path: PathBuf,
    pages: usize,
    copies: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Cardsheet starting");

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            println!(
                "{} ({} page(s), {} card(s))",
                summary.path.display(),
                summary.pages,
                summary.copies
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Cardsheet failed: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunSummary> {
    let job = match &cli.job {
        Some(path) => JobFile::load(path)?,
        None => JobFile::default(),
    };

    let config = cli.apply(job.config);
    let cards = job
        .cards
        .into_iter()
        .map(|card| (card.image, card.copies))
        .chain(cli.image_cards());
    let session = job::build_session(config, cards)?;
    if session.is_empty() {
        return Err(CardsheetError::EmptySession);
    }

    let pages = session.paginate()?;
    let config = session.config();

    std::fs::create_dir_all(&cli.out_dir)?;
    let path = cli
        .out_dir
        .join(output_file_name(&cli.product, config.paper, config.dpi));

    let source = FsImageSource::new(image_base_dir(cli));
    SheetWriter::new(cli.product.as_str()).write_to_file(&pages, &source, &path)?;

    info!(path = %path.display(), pages = pages.len(), "Print sheets written");
    Ok(RunSummary {
        path,
        pages: pages.len(),
        copies: session.total_copies(),
    })
}

/// Relative image paths resolve against `--image-dir`, then the job file's
/// directory, then the working directory.
fn image_base_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.image_dir {
        return dir.clone();
    }
    cli.job
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
