// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen preview of a page description.
//
// Scales print points to pixels and flips to a top-left origin so a UI can
// draw exactly what the encoder will print.

use crate::color::Rgb;
use crate::types::{CardId, ImageRef, PageDescription, Point, Rect, Segment};

/// Rectangle in screen pixels; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFill {
    pub rect: PixelRect,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCell {
    pub image: ImageRef,
    pub card: CardId,
    pub card_rect: PixelRect,
    pub dest_rect: PixelRect,
    /// Crop-mark arms as `(from, to)` pixel pairs, two per corner.
    pub marks: Vec<(Point, Point)>,
}

/// One sheet scaled to a viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPage {
    pub width_px: f32,
    pub height_px: f32,
    /// Pixels per print point.
    pub scale: f32,
    pub background: Rgb,
    pub mark_color: Rgb,
    pub mark_thickness_px: f32,
    /// Inset fills, in grid order.
    pub fills: Vec<PreviewFill>,
    /// Cells, in the same order the encoder draws them.
    pub cells: Vec<PreviewCell>,
}

impl PreviewPage {
    /// Scale `page` so that its width spans `viewport_width_px`.
    pub fn from_page(page: &PageDescription, viewport_width_px: f32) -> Self {
        let scale = if page.width_pt > 0.0 {
            viewport_width_px / page.width_pt
        } else {
            0.0
        };
        let flip = Flip {
            scale,
            page_height_pt: page.height_pt,
        };

        let fills = page
            .sub_grids
            .iter()
            .filter_map(|grid| grid.content_fill)
            .map(|fill| PreviewFill {
                rect: flip.rect(&fill.rect),
                color: fill.color,
            })
            .collect();

        let cells = page
            .cells()
            .map(|cell| PreviewCell {
                image: cell.image.clone(),
                card: cell.card,
                card_rect: flip.rect(&cell.card_rect),
                dest_rect: flip.rect(&cell.dest_rect),
                marks: cell
                    .crop_marks
                    .iter()
                    .flat_map(|mark| [mark.horizontal, mark.vertical])
                    .map(|segment| flip.segment(&segment))
                    .collect(),
            })
            .collect();

        Self {
            width_px: page.width_pt * scale,
            height_px: page.height_pt * scale,
            scale,
            background: page.background,
            mark_color: page.mark_color,
            mark_thickness_px: page.mark_thickness_pt * scale,
            fills,
            cells,
        }
    }
}

/// PDF user space (bottom-left origin) to screen space (top-left origin).
struct Flip {
    scale: f32,
    page_height_pt: f32,
}

impl Flip {
    fn point(&self, p: &Point) -> Point {
        Point::new(p.x * self.scale, (self.page_height_pt - p.y) * self.scale)
    }

    fn rect(&self, r: &Rect) -> PixelRect {
        PixelRect {
            x: r.x * self.scale,
            y: (self.page_height_pt - r.top()) * self.scale,
            width: r.width * self.scale,
            height: r.height * self.scale,
        }
    }

    fn segment(&self, s: &Segment) -> (Point, Point) {
        (self.point(&s.from), self.point(&s.to))
    }
}
