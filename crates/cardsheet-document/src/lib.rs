// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cardsheet-document — Document encoding for Cardsheet.
//
// Turns the page descriptions produced by `cardsheet-core` into a PDF:
// loads and decodes card images, fits them into their cells (contain or
// cover), and draws backgrounds and crop marks.

pub mod image;
pub mod naming;
pub mod pdf;

// Re-export the primary items so callers can use `cardsheet_document::SheetWriter` etc.
pub use image::source::{FsImageSource, ImageSource, MemoryImageSource};
pub use naming::{DEFAULT_PRODUCT, output_file_name};
pub use pdf::writer::SheetWriter;
