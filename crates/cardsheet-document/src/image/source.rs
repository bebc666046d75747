// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image sources — resolve an `ImageRef` to encoded image bytes.

use std::collections::HashMap;
use std::path::PathBuf;

use cardsheet_core::error::{CardsheetError, Result};
use cardsheet_core::ImageRef;
use tracing::debug;

/// Resolves image references to encoded bytes (JPEG, PNG, ...).
pub trait ImageSource {
    fn load(&self, image: &ImageRef) -> Result<Vec<u8>>;
}

/// Reads images from the filesystem, relative to a base directory.
///
/// Absolute references ignore the base directory.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    base_dir: PathBuf,
}

impl FsImageSource {
    /// Source rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, image: &ImageRef) -> PathBuf {
        self.base_dir.join(image.as_str())
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, image: &ImageRef) -> Result<Vec<u8>> {
        let path = self.path_for(image);
        let bytes = std::fs::read(&path).map_err(|err| {
            CardsheetError::ImageError(format!("failed to read {}: {}", path.display(), err))
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "Image read");
        Ok(bytes)
    }
}

/// Holds already-loaded image bytes keyed by reference.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageSource {
    images: HashMap<ImageRef, Vec<u8>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: impl Into<ImageRef>, bytes: Vec<u8>) {
        self.images.insert(image.into(), bytes);
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, image: &ImageRef) -> Result<Vec<u8>> {
        self.images
            .get(image)
            .cloned()
            .ok_or_else(|| CardsheetError::ImageError(format!("no image loaded for '{image}'")))
    }
}
