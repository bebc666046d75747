// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background and crop-mark colour resolution.
//
// The "black" background is not a black page: the sheet stays white and only
// the margin-inset content region of each grid is filled black, so trimmed
// cards keep a white border around the black area.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CardsheetError, Result};

/// RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode `#RRGGBB` (the leading `#` is required).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .trim()
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| CardsheetError::config(format!("invalid hex colour '{hex}'")))?;

        let n = u32::from_str_radix(digits, 16)
            .map_err(|err| CardsheetError::config(format!("invalid hex colour '{hex}': {err}")))?;

        Ok(Self::from_bytes(
            ((n >> 16) & 0xff) as u8,
            ((n >> 8) & 0xff) as u8,
            (n & 0xff) as u8,
        ))
    }

    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

impl FromStr for Rgb {
    type Err = CardsheetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = CardsheetError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A background colour as the user wrote it: a named token or a hex triplet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorSpec {
    Named(String),
    Hex(String),
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::Named("white".into())
    }
}

impl FromStr for ColorSpec {
    type Err = CardsheetError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            Rgb::from_hex(trimmed)?;
            Ok(Self::Hex(trimmed.to_ascii_lowercase()))
        } else {
            let token = trimmed.to_ascii_lowercase();
            named_color(&token)
                .ok_or_else(|| CardsheetError::config(format!("unknown colour '{trimmed}'")))?;
            Ok(Self::Named(token))
        }
    }
}

impl TryFrom<String> for ColorSpec {
    type Error = CardsheetError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColorSpec> for String {
    fn from(value: ColorSpec) -> Self {
        match value {
            ColorSpec::Named(name) => name,
            ColorSpec::Hex(hex) => hex,
        }
    }
}

/// The fill the engine should paint, and whether the inverted-black rule applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBackground {
    pub fill: Rgb,
    /// Paint the sheet white and only the margin-inset regions with `fill`.
    pub inverted_black: bool,
}

impl ResolvedBackground {
    /// Colour of the full-sheet fill.
    pub fn sheet_fill(&self) -> Rgb {
        if self.inverted_black {
            Rgb::WHITE
        } else {
            self.fill
        }
    }
}

fn named_color(token: &str) -> Option<Rgb> {
    match token {
        "white" => Some(Rgb::WHITE),
        "black" => Some(Rgb::BLACK),
        "grey" | "gray" => Some(Rgb::from_bytes(0x80, 0x80, 0x80)),
        _ => None,
    }
}

/// Resolve a background selection to a fill colour.
pub fn resolve_background(spec: &ColorSpec) -> Result<ResolvedBackground> {
    match spec {
        ColorSpec::Hex(hex) => Ok(ResolvedBackground {
            fill: Rgb::from_hex(hex)?,
            inverted_black: false,
        }),
        ColorSpec::Named(name) => {
            let token = name.to_ascii_lowercase();
            let fill = named_color(&token)
                .ok_or_else(|| CardsheetError::config(format!("unknown colour '{name}'")))?;
            Ok(ResolvedBackground {
                fill,
                inverted_black: token == "black",
            })
        }
    }
}
