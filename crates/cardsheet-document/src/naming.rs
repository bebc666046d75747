// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output file naming: `<product>_<paper>_<dpi>DPI.pdf`.

use cardsheet_core::PaperKind;

/// Product prefix used when the caller does not pick one.
pub const DEFAULT_PRODUCT: &str = "TCG_Print_Sheet";

/// File name that records the paper size and resolution of a sheet set.
pub fn output_file_name(product: &str, paper: PaperKind, dpi: u32) -> String {
    let product: String = product
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let product = if product.is_empty() {
        DEFAULT_PRODUCT
    } else {
        product.as_str()
    };
    format!("{product}_{paper}_{dpi}DPI.pdf")
}
