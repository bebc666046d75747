// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Cardsheet.

use thiserror::Error;

use crate::types::CardId;

/// Top-level error type for all Cardsheet operations.
#[derive(Debug, Error)]
pub enum CardsheetError {
    // -- Layout / generation errors --
    /// Unknown layout, paper or colour token, or an out-of-range value such as
    /// a zero DPI. Fatal to the current generation request.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A stored value broke an invariant that the mutation path should have
    /// upheld (e.g. a card with zero copies).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    // -- Session errors --
    #[error("card {0} not found")]
    CardNotFound(CardId),

    #[error("no cards to lay out")]
    EmptySession,

    // -- Document errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CardsheetError {
    /// Shorthand for building a [`CardsheetError::Configuration`].
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Configuration(detail.into())
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CardsheetError>;
