// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: cards, layout selectors, and the page description model
// handed from the pagination engine to a document encoder.
//
// All geometry is in PDF points after DPI scaling, in PDF user space (origin
// at the bottom-left of the sheet, y growing upward).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Rgb;
use crate::error::CardsheetError;

/// Unique identifier for a card in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub Uuid);

impl CardId {
    /// Generate a new random (v4) id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to the source bytes of a card image (a path or URI).
///
/// The layout engine never dereferences it; only the encoder does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    /// Wrap a path or URI.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A user-supplied card image and how many copies of it to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub image: ImageRef,
    /// Always >= 1 when mutated through a session.
    pub copies: u32,
}

impl Card {
    /// A fresh card with a new id and a single copy.
    pub fn new(image: impl Into<ImageRef>) -> Self {
        Self {
            id: CardId::new(),
            image: image.into(),
            copies: 1,
        }
    }
}

/// One printed instance of a [`Card`], produced by copy expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedCard {
    pub card: CardId,
    pub image: ImageRef,
    /// Zero-based index of this instance among the card's copies.
    pub copy_index: u32,
}

// -- Layout selectors ---------------------------------------------------------

/// Card grid arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutKind {
    /// 3 columns x 3 rows on a portrait region.
    #[default]
    #[serde(rename = "grid3x3", alias = "3x3", alias = "9")]
    Grid3x3,
    /// 4 columns x 2 rows on a landscape region.
    #[serde(rename = "grid4x2", alias = "4x2", alias = "8")]
    Grid4x2,
}

impl FromStr for LayoutKind {
    type Err = CardsheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid3x3" | "3x3" | "9" => Ok(Self::Grid3x3),
            "grid4x2" | "4x2" | "8" => Ok(Self::Grid4x2),
            other => Err(CardsheetError::config(format!("unknown layout '{other}'"))),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Grid3x3 => "grid3x3",
            Self::Grid4x2 => "grid4x2",
        })
    }
}

/// Physical sheet size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperKind {
    #[default]
    #[serde(rename = "a4", alias = "A4")]
    A4,
    /// Hosts two A4-equivalent grids.
    #[serde(rename = "a3", alias = "A3")]
    A3,
}

impl FromStr for PaperKind {
    type Err = CardsheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            other => Err(CardsheetError::config(format!("unknown paper size '{other}'"))),
        }
    }
}

impl fmt::Display for PaperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A4 => "A4",
            Self::A3 => "A3",
        })
    }
}

/// How the encoder fits an image into its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Letterbox: preserve aspect ratio inside the card rectangle.
    #[default]
    Contain,
    /// Cover the bleed-expanded rectangle, cropping the image as needed.
    Bleed,
}

impl FromStr for FitMode {
    type Err = CardsheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contain" => Ok(Self::Contain),
            "bleed" | "cover" => Ok(Self::Bleed),
            other => Err(CardsheetError::config(format!("unknown fit mode '{other}'"))),
        }
    }
}

// -- Geometry -----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Rectangle from its bottom-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    // Edges in PDF user space.

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Grow the rectangle by `amount` on all four sides.
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }

    /// Shrink by separate horizontal and vertical insets.
    pub fn inset(&self, horizontal: f32, vertical: f32) -> Self {
        Self {
            x: self.x + horizontal,
            y: self.y + vertical,
            width: self.width - 2.0 * horizontal,
            height: self.height - 2.0 * vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Corner of a card rectangle, named visually (top = higher y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Unit direction pointing away from the card at this corner.
    pub fn outward(&self) -> (f32, f32) {
        match self {
            Self::TopLeft => (-1.0, 1.0),
            Self::TopRight => (1.0, 1.0),
            Self::BottomLeft => (-1.0, -1.0),
            Self::BottomRight => (1.0, -1.0),
        }
    }
}

/// L-shaped cut guide at one card corner: both segments start at the corner
/// and run outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropMark {
    pub corner: Corner,
    pub horizontal: Segment,
    pub vertical: Segment,
}

/// A filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub rect: Rect,
    pub color: Rgb,
}

// -- Page description model ---------------------------------------------------

/// One card instance placed on a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPlacement {
    pub image: ImageRef,
    pub card: CardId,
    /// Nominal card rectangle; crop marks sit on its corners.
    pub card_rect: Rect,
    /// Draw rectangle, including bleed.
    pub dest_rect: Rect,
    pub fit: FitMode,
    pub crop_marks: [CropMark; 4],
}

/// One A4-equivalent card grid within a sheet.
///
/// Holds no cells when it exists only to carry its region's inset fill.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlacement {
    /// Bottom-left of the grid's region on the page.
    pub origin: Point,
    pub region: Rect,
    /// Margin-inset fill painted under the cells, if any.
    pub content_fill: Option<Fill>,
    pub cells: Vec<CellPlacement>,
}

/// One physical output sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescription {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Full-sheet fill, painted first.
    pub background: Rgb,
    pub mark_color: Rgb,
    pub mark_thickness_pt: f32,
    pub sub_grids: Vec<GridPlacement>,
}

impl PageDescription {
    /// All cells on this page in draw order.
    pub fn cells(&self) -> impl Iterator<Item = &CellPlacement> {
        self.sub_grids.iter().flat_map(|grid| grid.cells.iter())
    }

    /// Number of card instances on this page.
    pub fn cell_count(&self) -> usize {
        self.sub_grids.iter().map(|grid| grid.cells.len()).sum()
    }
}
