// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — encode page descriptions as a print-ready PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Each page is drawn in a fixed order: sheet background,
// grid inset fills, then every cell's image followed by its crop marks.

use std::collections::HashMap;
use std::path::Path;

use cardsheet_core::error::{CardsheetError, Result};
use cardsheet_core::units::{MM_PER_INCH, POINTS_PER_INCH};
use cardsheet_core::{CellPlacement, FitMode, ImageRef, PageDescription, Rect, Rgb, Segment};
use printpdf::{
    Color, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg,
    Polygon, PolygonRing, Pt, RawImage, RawImageData, RawImageFormat, WindingOrder, XObjectId,
    XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::image::fit;
use crate::image::source::ImageSource;

/// Placing images at 72 DPI makes one pixel one point before scaling.
const PLACEMENT_DPI: f32 = 72.0;

/// Encodes page descriptions into PDF bytes.
pub struct SheetWriter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

/// An image already embedded in the document.
struct Embedded {
    id: XObjectId,
    width: u32,
    height: u32,
}

impl SheetWriter {
    /// Writer that stamps `title` into each document it renders.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Render `pages` to PDF bytes, loading images through `source`.
    ///
    /// Each distinct image is decoded and embedded once per fit mode and
    /// reused for every copy. Cells in one run share a size, so the cover
    /// crop computed for the first copy fits them all.
    #[instrument(skip_all, fields(pages = pages.len(), title = %self.title))]
    pub fn render(&self, pages: &[PageDescription], source: &dyn ImageSource) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(CardsheetError::EmptySession);
        }

        info!("Rendering card sheets to PDF");

        let mut doc = PdfDocument::new(&self.title);
        let mut embedded: HashMap<(ImageRef, FitMode), Embedded> = HashMap::new();
        let mut pdf_pages: Vec<PdfPage> = Vec::with_capacity(pages.len());

        for (index, page) in pages.iter().enumerate() {
            let mut ops: Vec<Op> = Vec::new();

            ops.push(Op::SaveGraphicsState);
            fill_rect(
                &mut ops,
                &Rect::new(0.0, 0.0, page.width_pt, page.height_pt),
                page.background,
            );
            for grid in &page.sub_grids {
                if let Some(fill) = &grid.content_fill {
                    fill_rect(&mut ops, &fill.rect, fill.color);
                }
            }

            ops.push(Op::SetOutlineColor {
                col: pdf_color(page.mark_color),
            });
            ops.push(Op::SetOutlineThickness {
                pt: Pt(page.mark_thickness_pt),
            });

            for cell in page.cells() {
                let key = (cell.image.clone(), cell.fit);
                if !embedded.contains_key(&key) {
                    let image = embed_image(&mut doc, cell, source)?;
                    embedded.insert(key.clone(), image);
                }
                if let Some(image) = embedded.get(&key) {
                    ops.push(place_image(image, cell));
                }
                for mark in &cell.crop_marks {
                    draw_segment(&mut ops, &mark.horizontal);
                    draw_segment(&mut ops, &mark.vertical);
                }
            }
            ops.push(Op::RestoreGraphicsState);

            debug!(
                page = index + 1,
                cells = page.cell_count(),
                grids = page.sub_grids.len(),
                "Page encoded"
            );

            pdf_pages.push(PdfPage::new(
                pt_to_mm(page.width_pt),
                pt_to_mm(page.height_pt),
                ops,
            ));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        info!(
            images = embedded.len(),
            bytes = output.len(),
            warnings = warnings.len(),
            "PDF rendered"
        );

        Ok(output)
    }

    /// Render and write the PDF to `path`.
    pub fn write_to_file(
        &self,
        pages: &[PageDescription],
        source: &dyn ImageSource,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.render(pages, source)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote card sheet PDF to {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for SheetWriter {
    fn default() -> Self {
        Self::new("Card Print Sheet")
    }
}

// -- Drawing helpers ----------------------------------------------------------

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt / POINTS_PER_INCH * MM_PER_INCH)
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(color.r, color.g, color.b, None))
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: printpdf::Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn fill_rect(ops: &mut Vec<Op>, rect: &Rect, color: Rgb) {
    ops.push(Op::SetFillColor {
        col: pdf_color(color),
    });
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    line_point(rect.left(), rect.bottom()),
                    line_point(rect.right(), rect.bottom()),
                    line_point(rect.right(), rect.top()),
                    line_point(rect.left(), rect.top()),
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });
}

fn draw_segment(ops: &mut Vec<Op>, segment: &Segment) {
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                line_point(segment.from.x, segment.from.y),
                line_point(segment.to.x, segment.to.y),
            ],
            is_closed: false,
        },
    });
}

/// Decode the cell's image, crop it for cover fitting if needed, and add it
/// to the document.
fn embed_image(
    doc: &mut PdfDocument,
    cell: &CellPlacement,
    source: &dyn ImageSource,
) -> Result<Embedded> {
    let bytes = source.load(&cell.image)?;
    let decoded = ::image::load_from_memory(&bytes).map_err(|err| {
        CardsheetError::ImageError(format!("failed to decode {}: {}", cell.image, err))
    })?;

    let decoded = match cell.fit {
        FitMode::Contain => decoded,
        FitMode::Bleed => {
            let crop = fit::cover_crop(decoded.width(), decoded.height(), &cell.dest_rect);
            decoded.crop_imm(crop.x, crop.y, crop.width, crop.height)
        }
    };

    // Alpha is kept so transparent corners show the sheet underneath; printpdf
    // writes it as a soft mask.
    let has_alpha = decoded.color().has_alpha();
    let (width, height) = (decoded.width(), decoded.height());
    let (pixels, data_format) = if has_alpha {
        (decoded.to_rgba8().into_raw(), RawImageFormat::RGBA8)
    } else {
        (decoded.to_rgb8().into_raw(), RawImageFormat::RGB8)
    };
    let raw = RawImage {
        pixels: RawImageData::U8(pixels),
        width: width as usize,
        height: height as usize,
        data_format,
        tag: Vec::new(),
    };
    let id = doc.add_image(&raw);

    debug!(image = %cell.image, width, height, has_alpha, fit = ?cell.fit, "Image embedded");

    Ok(Embedded { id, width, height })
}

fn place_image(image: &Embedded, cell: &CellPlacement) -> Op {
    let target = match cell.fit {
        FitMode::Contain => fit::contain(image.width, image.height, &cell.dest_rect),
        FitMode::Bleed => cell.dest_rect,
    };

    Op::UseXobject {
        id: image.id.clone(),
        transform: XObjectTransform {
            translate_x: Some(Pt(target.x)),
            translate_y: Some(Pt(target.y)),
            scale_x: Some(target.width / image.width.max(1) as f32),
            scale_y: Some(target.height / image.height.max(1) as f32),
            dpi: Some(PLACEMENT_DPI),
            rotate: None,
        },
    }
}
