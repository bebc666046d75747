// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout resolution: grid shape, margins, and sheet geometry for each
// layout/paper combination. All values here are in millimetres; the
// pagination engine converts them with `units`.

use crate::types::{LayoutKind, PaperKind};

/// Reference A4 dimensions (portrait).
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Long edge of an A3 sheet.
pub const A3_LONG_EDGE_MM: f32 = 420.0;

/// Gap between the two ganged grids on an A3 sheet.
pub const INTER_GRID_GAP_MM: f32 = 0.4;

/// Trading card size (63 x 88 mm).
pub const CARD_WIDTH_MM: f32 = 63.0;
pub const CARD_HEIGHT_MM: f32 = 88.0;

/// Gap between adjacent cards.
pub const CARD_GAP_MM: f32 = 3.0;

/// Outward image expansion in bleed mode.
pub const BLEED_MM: f32 = 1.5;

/// Length of each crop-mark arm.
pub const CROP_MARK_LENGTH_MM: f32 = 3.0;

/// Crop-mark stroke at the reference resolution, in points.
pub const CROP_MARK_THICKNESS_PT: f32 = 0.5;

/// Direction along which multiple grids are ganged on one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GangAxis {
    /// Grids sit left to right.
    Horizontal,
    /// Grids sit top to bottom.
    Vertical,
}

/// Everything the pagination engine needs to know about a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLayout {
    pub cols: usize,
    pub rows: usize,
    pub margin_top_bottom_mm: f32,
    pub margin_left_right_mm: f32,
    pub grids_per_sheet: usize,
    pub sheet_width_mm: f32,
    pub sheet_height_mm: f32,
    pub sheet_is_landscape: bool,
    /// Size of one grid's region on the sheet.
    pub region_width_mm: f32,
    pub region_height_mm: f32,
    pub gang_axis: GangAxis,
    pub inter_grid_gap_mm: f32,
}

impl ResolvedLayout {
    pub fn capacity_per_grid(&self) -> usize {
        self.cols * self.rows
    }

    pub fn capacity_per_sheet(&self) -> usize {
        self.capacity_per_grid() * self.grids_per_sheet
    }

    /// Bottom-left corner of grid slot `index` on the sheet, in mm.
    ///
    /// Horizontal ganging fills left to right; vertical ganging fills from the
    /// top of the sheet down, so slot 0 is always the visually first region.
    pub fn region_origin_mm(&self, index: usize) -> (f32, f32) {
        let step = index as f32;
        match self.gang_axis {
            GangAxis::Horizontal => (step * (self.region_width_mm + self.inter_grid_gap_mm), 0.0),
            GangAxis::Vertical => (
                0.0,
                self.sheet_height_mm
                    - self.region_height_mm
                    - step * (self.region_height_mm + self.inter_grid_gap_mm),
            ),
        }
    }
}

/// Resolve a layout and paper selector into concrete grid and sheet geometry.
pub fn resolve_layout(layout: LayoutKind, paper: PaperKind) -> ResolvedLayout {
    let (cols, rows, margin_top_bottom_mm, margin_left_right_mm, landscape_region) = match layout
    {
        LayoutKind::Grid3x3 => (3, 3, 8.0, 4.0, false),
        LayoutKind::Grid4x2 => (4, 2, 10.0, 10.0, true),
    };

    // A4-equivalent region for this layout's orientation.
    let (a4_w, a4_h) = if landscape_region {
        (A4_HEIGHT_MM, A4_WIDTH_MM)
    } else {
        (A4_WIDTH_MM, A4_HEIGHT_MM)
    };

    match paper {
        PaperKind::A4 => ResolvedLayout {
            cols,
            rows,
            margin_top_bottom_mm,
            margin_left_right_mm,
            grids_per_sheet: 1,
            sheet_width_mm: a4_w,
            sheet_height_mm: a4_h,
            sheet_is_landscape: landscape_region,
            region_width_mm: a4_w,
            region_height_mm: a4_h,
            gang_axis: GangAxis::Horizontal,
            inter_grid_gap_mm: 0.0,
        },
        PaperKind::A3 => {
            // Two regions share the long edge, split by the inter-grid gap.
            let ganged = (A3_LONG_EDGE_MM - INTER_GRID_GAP_MM) / 2.0;
            if landscape_region {
                ResolvedLayout {
                    cols,
                    rows,
                    margin_top_bottom_mm,
                    margin_left_right_mm,
                    grids_per_sheet: 2,
                    sheet_width_mm: a4_w,
                    sheet_height_mm: A3_LONG_EDGE_MM,
                    sheet_is_landscape: false,
                    region_width_mm: a4_w,
                    region_height_mm: ganged,
                    gang_axis: GangAxis::Vertical,
                    inter_grid_gap_mm: INTER_GRID_GAP_MM,
                }
            } else {
                ResolvedLayout {
                    cols,
                    rows,
                    margin_top_bottom_mm,
                    margin_left_right_mm,
                    grids_per_sheet: 2,
                    sheet_width_mm: A3_LONG_EDGE_MM,
                    sheet_height_mm: a4_h,
                    sheet_is_landscape: true,
                    region_width_mm: ganged,
                    region_height_mm: a4_h,
                    gang_axis: GangAxis::Horizontal,
                    inter_grid_gap_mm: INTER_GRID_GAP_MM,
                }
            }
        }
    }
}
