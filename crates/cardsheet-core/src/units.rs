// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Millimetre to output-unit conversion with DPI scaling.
//
// Output units are PDF points (1/72 inch) at the 300 DPI reference. Higher
// DPI settings scale every physical measurement by `dpi / 300`.

/// Reference resolution; a DPI of 300 gives a scale factor of exactly 1.
pub const BASE_DPI: f32 = 300.0;

/// Millimetres per inch.
pub const MM_PER_INCH: f32 = 25.4;

/// PDF points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Scale factor for a requested DPI relative to [`BASE_DPI`].
pub fn dpi_scale(dpi: u32) -> f32 {
    dpi as f32 / BASE_DPI
}

/// Convert millimetres to output units at the given scale factor.
pub fn mm_to_units(mm: f32, dpi_scale: f32) -> f32 {
    (mm / MM_PER_INCH) * POINTS_PER_INCH * dpi_scale
}

/// A converter bound to one scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    scale: f32,
}

impl Units {
    /// Converter for a requested output resolution.
    pub fn for_dpi(dpi: u32) -> Self {
        Self {
            scale: dpi_scale(dpi),
        }
    }

    /// Millimetres to points at this converter's scale.
    pub fn mm(&self, mm: f32) -> f32 {
        mm_to_units(mm, self.scale)
    }

    /// Scale a value that is already in points at the reference resolution.
    pub fn pt(&self, pt: f32) -> f32 {
        pt * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_inch_is_72_points_at_base_dpi() {
        assert!((mm_to_units(25.4, 1.0) - 72.0).abs() < 1e-4);
    }

    #[test]
    fn a4_width_in_points() {
        // 210mm = 595.2756pt
        assert!((mm_to_units(210.0, dpi_scale(300)) - 595.2756).abs() < 1e-3);
    }

    #[test]
    fn doubling_dpi_doubles_length() {
        let base = Units::for_dpi(300);
        let double = Units::for_dpi(600);
        for mm in [1.5, 3.0, 63.0, 88.0, 297.0] {
            assert_eq!(double.mm(mm), base.mm(mm) * 2.0);
        }
    }

    #[test]
    fn zero_dpi_scale_is_zero() {
        assert_eq!(Units::for_dpi(0).mm(10.0), 0.0);
    }
}
