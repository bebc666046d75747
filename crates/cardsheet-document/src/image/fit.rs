// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image fitting — where a decoded image lands inside a cell rectangle.
//
// `contain` letterboxes the whole image inside the rectangle. `cover_crop`
// picks the centred source region whose aspect matches the rectangle, so
// stretching that region fills the rectangle without distortion.

use cardsheet_core::Rect;

/// A pixel region of a source image (top-left origin, as `image` uses).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Largest rectangle with the image's aspect ratio that fits in `rect`,
/// centred in it.
pub fn contain(img_width: u32, img_height: u32, rect: &Rect) -> Rect {
    if img_width == 0 || img_height == 0 {
        return *rect;
    }
    let scale = (rect.width / img_width as f32).min(rect.height / img_height as f32);
    let width = img_width as f32 * scale;
    let height = img_height as f32 * scale;
    Rect::new(
        rect.x + (rect.width - width) / 2.0,
        rect.y + (rect.height - height) / 2.0,
        width,
        height,
    )
}

/// Centred crop of the source whose aspect ratio equals `rect`'s.
pub fn cover_crop(img_width: u32, img_height: u32, rect: &Rect) -> PixelCrop {
    let full = PixelCrop {
        x: 0,
        y: 0,
        width: img_width,
        height: img_height,
    };
    if img_width == 0 || img_height == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return full;
    }

    let target = rect.width / rect.height;
    let source = img_width as f32 / img_height as f32;

    if source > target {
        // Too wide: trim the sides.
        let width = ((img_height as f32 * target).round() as u32).clamp(1, img_width);
        PixelCrop {
            x: (img_width - width) / 2,
            width,
            ..full
        }
    } else {
        // Too tall: trim top and bottom.
        let height = ((img_width as f32 / target).round() as u32).clamp(1, img_height);
        PixelCrop {
            y: (img_height - height) / 2,
            height,
            ..full
        }
    }
}
