// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and how they override a job's settings.

use std::path::PathBuf;

use cardsheet_core::{ColorSpec, FitMode, ImageRef, LayoutConfig, LayoutKind, PaperKind, Rgb};
use cardsheet_document::DEFAULT_PRODUCT;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Card images to print. Append `:N` to print N copies (e.g. `bolt.png:4`).
    pub images: Vec<String>,

    /// JSON job file with `cards` and `config`.
    #[arg(long)]
    pub job: Option<PathBuf>,

    /// Directory image paths are resolved against (default: the job file's
    /// directory, or the current directory).
    #[arg(long)]
    pub image_dir: Option<PathBuf>,

    /// Grid layout: 3x3 (portrait) or 4x2 (landscape).
    #[arg(long)]
    pub layout: Option<LayoutKind>,

    /// Sheet size: a4 or a3 (two grids per sheet).
    #[arg(long)]
    pub paper: Option<PaperKind>,

    /// Output resolution; 300 is the reference scale.
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Image fitting: contain or bleed.
    #[arg(long)]
    pub fit: Option<FitMode>,

    /// Background: white, black, grey, or #RRGGBB.
    #[arg(long)]
    pub background: Option<ColorSpec>,

    /// Crop-mark colour as #RRGGBB.
    #[arg(long)]
    pub mark_color: Option<Rgb>,

    /// Horizontal sheet offset in mm (positive moves right).
    #[arg(long, allow_negative_numbers = true)]
    pub offset_x: Option<f32>,

    /// Vertical sheet offset in mm (positive moves up).
    #[arg(long, allow_negative_numbers = true)]
    pub offset_y: Option<f32>,

    /// Default copy count for images given without `:N`.
    #[arg(long, default_value_t = 1)]
    pub copies: i64,

    /// Directory the PDF is written to.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Product name used in the file name and PDF title.
    #[arg(long, default_value = DEFAULT_PRODUCT)]
    pub product: String,
}

impl Cli {
    /// Apply any settings given on the command line on top of `config`.
    pub fn apply(&self, mut config: LayoutConfig) -> LayoutConfig {
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(paper) = self.paper {
            config.paper = paper;
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(fit) = self.fit {
            config.fit = fit;
        }
        if let Some(background) = &self.background {
            config.background = background.clone();
        }
        if let Some(mark_color) = self.mark_color {
            config.mark_color = mark_color;
        }
        if let Some(offset_x) = self.offset_x {
            config.offset_x_mm = offset_x;
        }
        if let Some(offset_y) = self.offset_y {
            config.offset_y_mm = offset_y;
        }
        config
    }

    /// Positional images paired with their requested copy counts.
    pub fn image_cards(&self) -> Vec<(ImageRef, i64)> {
        self.images
            .iter()
            .map(|arg| parse_image_arg(arg, self.copies))
            .collect()
    }
}

/// Split `path:N` into a path and copy count. Anything that does not end in
/// `:<integer>` is taken as a plain path.
fn parse_image_arg(arg: &str, default_copies: i64) -> (ImageRef, i64) {
    if let Some((path, count)) = arg.rsplit_once(':') {
        if let Ok(copies) = count.parse::<i64>() {
            if !path.is_empty() {
                return (ImageRef::new(path), copies);
            }
        }
    }
    (ImageRef::new(arg), default_copies)
}
