// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generation settings.

use serde::{Deserialize, Serialize};

use crate::color::{ColorSpec, Rgb};
use crate::error::{CardsheetError, Result};
use crate::types::{FitMode, LayoutKind, PaperKind};

/// Default output resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Settings for one generation run. Immutable while a run is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub layout: LayoutKind,
    pub paper: PaperKind,
    /// Output resolution; every physical measurement scales by `dpi / 300`.
    pub dpi: u32,
    pub fit: FitMode,
    /// Horizontal nudge applied to every grid, positive to the right.
    pub offset_x_mm: f32,
    /// Vertical nudge applied to every grid, positive toward the top edge.
    pub offset_y_mm: f32,
    pub background: ColorSpec,
    pub mark_color: Rgb,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::Grid3x3,
            paper: PaperKind::A4,
            dpi: DEFAULT_DPI,
            fit: FitMode::Contain,
            offset_x_mm: 0.0,
            offset_y_mm: 0.0,
            background: ColorSpec::default(),
            mark_color: Rgb::BLACK,
        }
    }
}

impl LayoutConfig {
    /// Reject values the engine cannot lay out.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(CardsheetError::config("dpi must be positive"));
        }
        if !self.offset_x_mm.is_finite() || !self.offset_y_mm.is_finite() {
            return Err(CardsheetError::config(format!(
                "offset must be finite (got {}, {})",
                self.offset_x_mm, self.offset_y_mm
            )));
        }
        Ok(())
    }
}
