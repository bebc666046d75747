// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — loading card images and fitting them into cells.

pub mod fit;
pub mod source;

pub use source::{FsImageSource, ImageSource, MemoryImageSource};
