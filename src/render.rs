//! Rasterizes a module grid into an RGB image.
//!
//! Cell `k` covers pixels `floor(k * size / 21)` up to `floor((k + 1) * size / 21)`
//! on each axis, so the cells tile the image exactly even when `size` is not a
//! multiple of the grid width.

use std::io::Cursor;
use std::ops::Deref;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use log::{debug, error};

use crate::builder::QR;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{QR_WIDTH, WHITE};

// Raster image
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage(RgbImage);

impl RasterImage {
    pub fn size(&self) -> u32 {
        self.0.width()
    }

    pub fn into_inner(self) -> RgbImage {
        self.0
    }

    /// PNG bytes of the image. PNG has no zero-sized images, so a 0x0 render
    /// fails with `QRError::ImageEncoding`.
    pub fn to_png(&self) -> QRResult<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.0.write_to(&mut buf, ImageFormat::Png).map_err(|e| {
            error!("Failed to encode png: {e}");
            QRError::ImageEncoding
        })?;
        Ok(buf.into_inner())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> QRResult<()> {
        let path = path.as_ref();
        self.0.save_with_format(path, ImageFormat::Png).map_err(|e| {
            error!("Failed to write {}: {e}", path.display());
            QRError::ImageWrite
        })
    }
}

impl Deref for RasterImage {
    type Target = RgbImage;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<RasterImage> for RgbImage {
    fn from(img: RasterImage) -> Self {
        img.0
    }
}

// Render
//------------------------------------------------------------------------------

pub fn render(qr: &QR, pixel_size: u32, foreground: Rgb<u8>) -> RasterImage {
    let mut canvas = RgbImage::new(pixel_size, pixel_size);
    paint(qr, &mut canvas, foreground);
    RasterImage(canvas)
}

/// Paints `qr` over the whole of `canvas`, which must be square.
pub(crate) fn paint(qr: &QR, canvas: &mut RgbImage, foreground: Rgb<u8>) {
    debug_assert_eq!(canvas.width(), canvas.height(), "Canvas is not square");

    let pixel_size = canvas.width();
    debug!("Rendering {}x{} grid at {pixel_size}px", qr.width(), qr.width());

    for pixel in canvas.pixels_mut() {
        *pixel = WHITE;
    }

    let w = qr.width();
    for r in 0..w {
        let (y, h) = cell_span(r, pixel_size);
        if h == 0 {
            continue;
        }
        for c in 0..w {
            let (x, cw) = cell_span(c, pixel_size);
            if cw == 0 || !qr.is_dark(r as i16, c as i16) {
                continue;
            }
            draw_filled_rect_mut(canvas, Rect::at(x as i32, y as i32).of_size(cw, h), foreground);
        }
    }
}

// Start pixel & length of cell `k` along one axis
fn cell_span(k: usize, pixel_size: u32) -> (u32, u32) {
    let edge = |k: usize| (k as u64 * pixel_size as u64 / QR_WIDTH as u64) as u32;
    let start = edge(k);
    (start, edge(k + 1) - start)
}
