// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cardsheet — layout and pagination engine for trading-card print sheets.
//
// Turns an ordered card list and a layout config into abstract page
// descriptions (placements, fills, crop marks) that a document encoder draws.

pub mod color;
pub mod config;
pub mod error;
pub mod expand;
pub mod layout;
pub mod paginate;
pub mod preview;
pub mod session;
pub mod types;
pub mod units;

pub use color::{ColorSpec, Rgb};
pub use config::LayoutConfig;
pub use error::{CardsheetError, Result};
pub use expand::expand;
pub use paginate::paginate;
pub use preview::PreviewPage;
pub use session::{CardSession, MAX_COPIES};
pub use types::*;
