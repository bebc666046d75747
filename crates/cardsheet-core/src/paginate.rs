// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagination engine — maps an expanded card sequence and a layout config to
// an ordered list of page descriptions.
//
// Cards fill each grid row-major starting at the visual top-left, then the
// next grid slot on the sheet, then a new sheet. Partial grids emit only the
// cells they hold. Grid slots without cards are omitted, except under the
// inverted-black background, where every region on the sheet carries its
// inset fill. The engine never touches image bytes; it only positions
// references.

use tracing::{debug, instrument};

use crate::color::{ResolvedBackground, resolve_background};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::{
    BLEED_MM, CARD_GAP_MM, CARD_HEIGHT_MM, CARD_WIDTH_MM, CROP_MARK_LENGTH_MM,
    CROP_MARK_THICKNESS_PT, ResolvedLayout, resolve_layout,
};
use crate::types::{
    CellPlacement, Corner, CropMark, ExpandedCard, Fill, FitMode, GridPlacement,
    PageDescription, Point, Rect, Segment,
};
use crate::units::Units;

/// Lay out `cards` onto sheets according to `config`.
///
/// Returns one [`PageDescription`] per physical sheet. An empty input yields
/// an empty list; an invalid config fails before any page is produced.
#[instrument(skip_all, fields(
    cards = cards.len(),
    layout = %config.layout,
    paper = %config.paper,
    dpi = config.dpi
))]
pub fn paginate(cards: &[ExpandedCard], config: &LayoutConfig) -> Result<Vec<PageDescription>> {
    config.validate()?;
    let layout = resolve_layout(config.layout, config.paper);
    let background = resolve_background(&config.background)?;
    let geometry = SheetGeometry::new(&layout, config);

    let pages: Vec<PageDescription> = cards
        .chunks(layout.capacity_per_sheet())
        .map(|sheet_cards| geometry.page(sheet_cards, &background, config))
        .collect();

    debug!(
        pages = pages.len(),
        capacity_per_sheet = layout.capacity_per_sheet(),
        "Pagination complete"
    );

    Ok(pages)
}

/// Layout measurements converted to points for one run.
struct SheetGeometry {
    layout: ResolvedLayout,
    units: Units,
    sheet_w: f32,
    sheet_h: f32,
    card_w: f32,
    card_h: f32,
    gap: f32,
    bleed: f32,
    mark_len: f32,
    margin_x: f32,
    margin_y: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SheetGeometry {
    fn new(layout: &ResolvedLayout, config: &LayoutConfig) -> Self {
        let units = Units::for_dpi(config.dpi);
        let bleed_mm = match config.fit {
            FitMode::Bleed => BLEED_MM,
            FitMode::Contain => 0.0,
        };

        Self {
            layout: *layout,
            units,
            sheet_w: units.mm(layout.sheet_width_mm),
            sheet_h: units.mm(layout.sheet_height_mm),
            card_w: units.mm(CARD_WIDTH_MM),
            card_h: units.mm(CARD_HEIGHT_MM),
            gap: units.mm(CARD_GAP_MM),
            bleed: units.mm(bleed_mm),
            mark_len: units.mm(CROP_MARK_LENGTH_MM),
            margin_x: units.mm(layout.margin_left_right_mm),
            margin_y: units.mm(layout.margin_top_bottom_mm),
            offset_x: units.mm(config.offset_x_mm),
            offset_y: units.mm(config.offset_y_mm),
        }
    }

    fn page(
        &self,
        sheet_cards: &[ExpandedCard],
        background: &ResolvedBackground,
        config: &LayoutConfig,
    ) -> PageDescription {
        let capacity = self.layout.capacity_per_grid();
        let slots = if background.inverted_black {
            self.layout.grids_per_sheet
        } else {
            sheet_cards.len().div_ceil(capacity)
        };

        let sub_grids = (0..slots)
            .map(|slot| {
                let start = (slot * capacity).min(sheet_cards.len());
                let end = (start + capacity).min(sheet_cards.len());
                self.grid(slot, &sheet_cards[start..end], background, config.fit)
            })
            .collect();

        PageDescription {
            width_pt: self.sheet_w,
            height_pt: self.sheet_h,
            background: background.sheet_fill(),
            mark_color: config.mark_color,
            mark_thickness_pt: self.units.pt(CROP_MARK_THICKNESS_PT),
            sub_grids,
        }
    }

    fn grid(
        &self,
        slot: usize,
        grid_cards: &[ExpandedCard],
        background: &ResolvedBackground,
        fit: FitMode,
    ) -> GridPlacement {
        let (origin_x_mm, origin_y_mm) = self.layout.region_origin_mm(slot);
        let region = Rect::new(
            self.units.mm(origin_x_mm),
            self.units.mm(origin_y_mm),
            self.units.mm(self.layout.region_width_mm),
            self.units.mm(self.layout.region_height_mm),
        );
        let content = region.inset(self.margin_x, self.margin_y);

        let cols = self.layout.cols;
        let rows = self.layout.rows;
        let total_w = cols as f32 * self.card_w + (cols - 1) as f32 * self.gap;
        let total_h = rows as f32 * self.card_h + (rows - 1) as f32 * self.gap;

        // Block is centred in the margin-inset area, then nudged by the offset.
        let left = content.x + (content.width - total_w) / 2.0 + self.offset_x;
        let top = content.y + (content.height + total_h) / 2.0 + self.offset_y;

        let cells = grid_cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let (row, col) = (i / cols, i % cols);
                let card_rect = Rect::new(
                    left + col as f32 * (self.card_w + self.gap),
                    top - self.card_h - row as f32 * (self.card_h + self.gap),
                    self.card_w,
                    self.card_h,
                );
                CellPlacement {
                    image: card.image.clone(),
                    card: card.card,
                    card_rect,
                    dest_rect: card_rect.expand(self.bleed),
                    fit,
                    crop_marks: crop_marks(&card_rect, self.mark_len),
                }
            })
            .collect();

        let content_fill = background.inverted_black.then_some(Fill {
            rect: content,
            color: background.fill,
        });

        GridPlacement {
            origin: Point::new(region.x, region.y),
            region,
            content_fill,
            cells,
        }
    }
}

/// Four L-shaped marks on the corners of `card`, each arm `len` long and
/// pointing away from the card.
fn crop_marks(card: &Rect, len: f32) -> [CropMark; 4] {
    Corner::ALL.map(|corner| {
        let at = match corner {
            Corner::TopLeft => Point::new(card.left(), card.top()),
            Corner::TopRight => Point::new(card.right(), card.top()),
            Corner::BottomLeft => Point::new(card.left(), card.bottom()),
            Corner::BottomRight => Point::new(card.right(), card.bottom()),
        };
        let (dx, dy) = corner.outward();
        CropMark {
            corner,
            horizontal: Segment {
                from: at,
                to: Point::new(at.x + dx * len, at.y),
            },
            vertical: Segment {
                from: at,
                to: Point::new(at.x, at.y + dy * len),
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorSpec, Rgb};
    use crate::error::CardsheetError;
    use crate::expand::expand;
    use crate::types::{Card, LayoutKind, PaperKind};

    fn cards(copies: &[u32]) -> Vec<Card> {
        copies
            .iter()
            .enumerate()
            .map(|(i, &copies)| Card {
                copies,
                ..Card::new(format!("card-{i}.png"))
            })
            .collect()
    }

    fn config(layout: LayoutKind, paper: PaperKind) -> LayoutConfig {
        LayoutConfig {
            layout,
            paper,
            ..LayoutConfig::default()
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * b.abs().max(1.0)
    }

    #[test]
    fn ten_cards_on_a4_3x3_make_two_pages() {
        let expanded = expand(&cards(&[1; 10])).unwrap();
        let pages = paginate(&expanded, &config(LayoutKind::Grid3x3, PaperKind::A4)).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].cell_count(), 9);
        assert_eq!(pages[1].cell_count(), 1);
        assert_eq!(pages[1].sub_grids.len(), 1);
    }

    #[test]
    fn four_copies_on_a3_fill_one_grid() {
        let expanded = expand(&cards(&[4])).unwrap();
        let pages = paginate(&expanded, &config(LayoutKind::Grid3x3, PaperKind::A3)).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].sub_grids.len(), 1);
        assert_eq!(pages[0].sub_grids[0].cells.len(), 4);
    }

    #[test]
    fn order_and_count_are_preserved() {
        let list = cards(&[3, 1, 7, 2, 5, 1, 4]);
        let expanded = expand(&list).unwrap();
        for layout in [LayoutKind::Grid3x3, LayoutKind::Grid4x2] {
            for paper in [PaperKind::A4, PaperKind::A3] {
                let pages = paginate(&expanded, &config(layout, paper)).unwrap();
                let placed: Vec<_> = pages.iter().flat_map(|p| p.cells()).map(|c| &c.image).collect();
                let wanted: Vec<_> = expanded.iter().map(|e| &e.image).collect();
                assert_eq!(placed, wanted, "{layout} on {paper}");
                assert_eq!(placed.len(), list.iter().map(|c| c.copies as usize).sum::<usize>());
            }
        }
    }

    #[test]
    fn only_the_last_grid_is_under_capacity() {
        let expanded = expand(&cards(&[20, 3])).unwrap();
        for layout in [LayoutKind::Grid3x3, LayoutKind::Grid4x2] {
            for paper in [PaperKind::A4, PaperKind::A3] {
                let resolved = resolve_layout(layout, paper);
                let pages = paginate(&expanded, &config(layout, paper)).unwrap();
                let grids: Vec<_> = pages.iter().flat_map(|p| p.sub_grids.iter()).collect();
                let (last, full) = grids.split_last().unwrap();
                assert!(full.iter().all(|g| g.cells.len() == resolved.capacity_per_grid()));
                assert!(!last.cells.is_empty());
                assert!(last.cells.len() <= resolved.capacity_per_grid());
                assert!(pages.iter().all(|p| p.sub_grids.len() <= resolved.grids_per_sheet));
            }
        }
    }

    #[test]
    fn empty_input_gives_no_pages() {
        let pages = paginate(&[], &LayoutConfig::default()).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn zero_dpi_fails_even_with_cards() {
        let expanded = expand(&cards(&[1])).unwrap();
        let bad = LayoutConfig {
            dpi: 0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            paginate(&expanded, &bad),
            Err(CardsheetError::Configuration(_))
        ));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let expanded = expand(&cards(&[2, 9, 1])).unwrap();
        let cfg = LayoutConfig {
            fit: FitMode::Bleed,
            offset_x_mm: 1.25,
            background: ColorSpec::Named("black".into()),
            ..config(LayoutKind::Grid4x2, PaperKind::A3)
        };
        assert_eq!(paginate(&expanded, &cfg).unwrap(), paginate(&expanded, &cfg).unwrap());
    }

    #[test]
    fn cells_fill_row_major_from_the_top_left() {
        let expanded = expand(&cards(&[9])).unwrap();
        let pages = paginate(&expanded, &LayoutConfig::default()).unwrap();
        let cells = &pages[0].sub_grids[0].cells;
        assert!(cells[0].card_rect.x < cells[1].card_rect.x);
        assert!(cells[1].card_rect.x < cells[2].card_rect.x);
        assert_eq!(cells[0].card_rect.y, cells[2].card_rect.y);
        // Row two sits below row one in PDF (y-up) space.
        assert!(cells[3].card_rect.y < cells[0].card_rect.y);
        assert_eq!(cells[3].card_rect.x, cells[0].card_rect.x);
    }

    #[test]
    fn full_grid_is_centred_on_the_page() {
        let expanded = expand(&cards(&[9])).unwrap();
        let pages = paginate(&expanded, &LayoutConfig::default()).unwrap();
        let page = &pages[0];
        let cells = &page.sub_grids[0].cells;
        let left_gap = cells[0].card_rect.left();
        let right_gap = page.width_pt - cells[2].card_rect.right();
        let top_gap = page.height_pt - cells[0].card_rect.top();
        let bottom_gap = cells[8].card_rect.bottom();
        assert!(close(left_gap, right_gap));
        assert!(close(top_gap, bottom_gap));
    }

    #[test]
    fn a3_grids_are_centred_in_their_own_regions() {
        let expanded = expand(&cards(&[18])).unwrap();
        let pages = paginate(&expanded, &config(LayoutKind::Grid3x3, PaperKind::A3)).unwrap();
        let page = &pages[0];
        assert_eq!(page.sub_grids.len(), 2);
        for grid in &page.sub_grids {
            let first = grid.cells[0].card_rect;
            let last = grid.cells[8].card_rect;
            let left_gap = first.left() - grid.region.left();
            let right_gap = grid.region.right() - last.right();
            assert!(close(left_gap, right_gap));
        }
        assert!(page.sub_grids[1].origin.x > page.sub_grids[0].origin.x);
    }

    #[test]
    fn stacked_4x2_blocks_stay_inside_their_regions() {
        let expanded = expand(&cards(&[16])).unwrap();
        let pages = paginate(&expanded, &config(LayoutKind::Grid4x2, PaperKind::A3)).unwrap();
        let page = &pages[0];
        assert_eq!(page.sub_grids.len(), 2);
        assert!(page.height_pt > page.width_pt);

        let resolved = resolve_layout(LayoutKind::Grid4x2, PaperKind::A3);
        let units = Units::for_dpi(300);
        let content_height =
            resolved.region_height_mm - 2.0 * resolved.margin_top_bottom_mm;
        let block_height = 2.0 * CARD_HEIGHT_MM + CARD_GAP_MM;
        assert!(block_height < content_height, "{block_height} mm vs {content_height} mm");

        for grid in &page.sub_grids {
            let content = grid.region.inset(
                units.mm(resolved.margin_left_right_mm),
                units.mm(resolved.margin_top_bottom_mm),
            );
            for cell in &grid.cells {
                let r = cell.card_rect;
                assert!(r.left() >= content.left() - 1e-3 && r.right() <= content.right() + 1e-3);
                assert!(r.bottom() >= content.bottom() - 1e-3 && r.top() <= content.top() + 1e-3);
            }
        }
        // Slot 0 is the upper region.
        assert!(page.sub_grids[0].region.bottom() > page.sub_grids[1].region.top());
    }

    #[test]
    fn bleed_expands_dest_rect_only() {
        let expanded = expand(&cards(&[1])).unwrap();
        let contain = paginate(&expanded, &LayoutConfig::default()).unwrap();
        let bleed = paginate(
            &expanded,
            &LayoutConfig {
                fit: FitMode::Bleed,
                ..LayoutConfig::default()
            },
        )
        .unwrap();

        let c = &contain[0].sub_grids[0].cells[0];
        let b = &bleed[0].sub_grids[0].cells[0];
        assert_eq!(c.dest_rect, c.card_rect);
        assert_eq!(c.fit, FitMode::Contain);
        assert_eq!(b.card_rect, c.card_rect);
        assert_eq!(b.fit, FitMode::Bleed);

        let bleed_pt = Units::for_dpi(300).mm(BLEED_MM);
        assert!(close(b.dest_rect.x, c.card_rect.x - bleed_pt));
        assert!(close(b.dest_rect.width, c.card_rect.width + 2.0 * bleed_pt));
        assert_eq!(b.crop_marks, c.crop_marks);
    }

    #[test]
    fn crop_marks_point_away_from_each_corner() {
        let expanded = expand(&cards(&[1])).unwrap();
        let pages = paginate(&expanded, &LayoutConfig::default()).unwrap();
        let cell = &pages[0].sub_grids[0].cells[0];
        let r = cell.card_rect;
        let len = Units::for_dpi(300).mm(CROP_MARK_LENGTH_MM);

        let tl = cell.crop_marks.iter().find(|m| m.corner == Corner::TopLeft).unwrap();
        assert_eq!(tl.horizontal.from, Point::new(r.left(), r.top()));
        assert!(close(tl.horizontal.to.x, r.left() - len));
        assert!(close(tl.vertical.to.y, r.top() + len));

        let br = cell.crop_marks.iter().find(|m| m.corner == Corner::BottomRight).unwrap();
        assert_eq!(br.vertical.from, Point::new(r.right(), r.bottom()));
        assert!(close(br.horizontal.to.x, r.right() + len));
        assert!(close(br.vertical.to.y, r.bottom() - len));
    }

    #[test]
    fn doubling_dpi_doubles_every_measurement() {
        let expanded = expand(&cards(&[5, 6])).unwrap();
        let base_cfg = LayoutConfig {
            fit: FitMode::Bleed,
            offset_x_mm: 2.0,
            offset_y_mm: -1.0,
            background: ColorSpec::Named("black".into()),
            ..config(LayoutKind::Grid3x3, PaperKind::A3)
        };
        let hi_cfg = LayoutConfig {
            dpi: 600,
            ..base_cfg.clone()
        };
        let base = paginate(&expanded, &base_cfg).unwrap();
        let hi = paginate(&expanded, &hi_cfg).unwrap();

        assert_eq!(base.len(), hi.len());
        for (b, h) in base.iter().zip(&hi) {
            assert!(close(h.width_pt, 2.0 * b.width_pt));
            assert!(close(h.height_pt, 2.0 * b.height_pt));
            assert!(close(h.mark_thickness_pt, 2.0 * b.mark_thickness_pt));
            for (bg, hg) in b.sub_grids.iter().zip(&h.sub_grids) {
                let (bf, hf) = (bg.content_fill.unwrap().rect, hg.content_fill.unwrap().rect);
                assert!(close(hf.x, 2.0 * bf.x) && close(hf.width, 2.0 * bf.width));
                for (bc, hc) in bg.cells.iter().zip(&hg.cells) {
                    for (bv, hv) in [
                        (bc.dest_rect.x, hc.dest_rect.x),
                        (bc.dest_rect.y, hc.dest_rect.y),
                        (bc.dest_rect.width, hc.dest_rect.width),
                        (bc.card_rect.height, hc.card_rect.height),
                        (bc.crop_marks[0].horizontal.to.x, hc.crop_marks[0].horizontal.to.x),
                    ] {
                        assert!(close(hv, 2.0 * bv), "{hv} != 2 * {bv}");
                    }
                }
            }
        }
    }

    #[test]
    fn inverted_black_keeps_a_white_border() {
        let expanded = expand(&cards(&[3])).unwrap();
        let cfg = LayoutConfig {
            background: ColorSpec::Named("black".into()),
            ..LayoutConfig::default()
        };
        let pages = paginate(&expanded, &cfg).unwrap();
        let page = &pages[0];
        assert_eq!(page.background, Rgb::WHITE);

        let fill = page.sub_grids[0].content_fill.expect("inset fill");
        assert_eq!(fill.color, Rgb::BLACK);
        let units = Units::for_dpi(300);
        assert!(close(fill.rect.x, units.mm(4.0)));
        assert!(close(fill.rect.y, units.mm(8.0)));
        assert!(close(fill.rect.width, page.width_pt - 2.0 * units.mm(4.0)));
        assert!(close(fill.rect.height, page.height_pt - 2.0 * units.mm(8.0)));
    }

    #[test]
    fn inverted_black_fills_every_region_on_a_partial_sheet() {
        let expanded = expand(&cards(&[4])).unwrap();
        let cfg = LayoutConfig {
            background: ColorSpec::Named("black".into()),
            ..config(LayoutKind::Grid3x3, PaperKind::A3)
        };
        let pages = paginate(&expanded, &cfg).unwrap();
        assert_eq!(pages.len(), 1);

        let page = &pages[0];
        assert_eq!(page.background, Rgb::WHITE);
        assert_eq!(page.sub_grids.len(), 2);
        assert_eq!(page.sub_grids[0].cells.len(), 4);
        assert!(page.sub_grids[1].cells.is_empty());
        assert_eq!(page.cell_count(), 4);

        let fills: Vec<Fill> = page.sub_grids.iter().filter_map(|g| g.content_fill).collect();
        assert_eq!(fills.len(), 2);
        assert!(fills.iter().all(|f| f.color == Rgb::BLACK));
        // Mirror-image regions get same-sized fills.
        assert!(close(fills[0].rect.width, fills[1].rect.width));
        assert!(fills[1].rect.left() > fills[0].rect.right());
    }

    #[test]
    fn plain_background_has_no_inset_fill() {
        let expanded = expand(&cards(&[1])).unwrap();
        let cfg = LayoutConfig {
            background: "#336699".parse().unwrap(),
            ..LayoutConfig::default()
        };
        let pages = paginate(&expanded, &cfg).unwrap();
        assert_eq!(pages[0].background, Rgb::from_hex("#336699").unwrap());
        assert!(pages[0].sub_grids[0].content_fill.is_none());
    }

    #[test]
    fn offset_shifts_every_cell_uniformly() {
        let expanded = expand(&cards(&[25])).unwrap();
        let base_cfg = config(LayoutKind::Grid3x3, PaperKind::A3);
        let moved_cfg = LayoutConfig {
            offset_x_mm: 5.0,
            offset_y_mm: -3.0,
            ..base_cfg.clone()
        };
        let base = paginate(&expanded, &base_cfg).unwrap();
        let moved = paginate(&expanded, &moved_cfg).unwrap();

        let units = Units::for_dpi(300);
        let (dx, dy) = (units.mm(5.0), units.mm(-3.0));
        let pairs: Vec<_> = base
            .iter()
            .flat_map(|p| p.cells())
            .zip(moved.iter().flat_map(|p| p.cells()))
            .collect();
        assert_eq!(pairs.len(), 25);
        for (b, m) in pairs {
            assert!(close(m.dest_rect.x - b.dest_rect.x, dx));
            assert!(close(m.dest_rect.y - b.dest_rect.y, dy));
        }
    }
}
