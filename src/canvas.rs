use image::{Rgb, RgbImage};
use log::warn;

use crate::builder::QRBuilder;
use crate::common::metadata::{parse_hex_color, BLACK};
use crate::common::{PaddingSource, RngPadding, TextEncoding};
use crate::render::{paint, RasterImage};

// Render options
//------------------------------------------------------------------------------

pub const DEFAULT_PIXEL_SIZE: u32 = 256;

/// Caller-facing options. Invalid values never fail a render: a zero pixel
/// size or an unparsable color falls back to the default.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct RenderOptions {
    pub pixel_size: Option<u32>,
    pub foreground: Option<String>,
    pub encoding: TextEncoding,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel_size(&mut self, pixel_size: u32) -> &mut Self {
        self.pixel_size = Some(pixel_size);
        self
    }

    pub fn foreground(&mut self, color: impl Into<String>) -> &mut Self {
        self.foreground = Some(color.into());
        self
    }

    pub fn encoding(&mut self, encoding: TextEncoding) -> &mut Self {
        self.encoding = encoding;
        self
    }

    pub fn resolved_pixel_size(&self) -> u32 {
        match self.pixel_size {
            None => DEFAULT_PIXEL_SIZE,
            Some(0) => {
                warn!("Pixel size must be positive, using {DEFAULT_PIXEL_SIZE}");
                DEFAULT_PIXEL_SIZE
            }
            Some(sz) => sz,
        }
    }

    pub fn resolved_foreground(&self) -> Rgb<u8> {
        match self.foreground.as_deref() {
            None => BLACK,
            Some(hex) => parse_hex_color(hex).unwrap_or_else(|e| {
                warn!("{e} {hex:?}, using black");
                BLACK
            }),
        }
    }
}


// Entry points
//------------------------------------------------------------------------------

/// Builds the grid for `text` and rasterizes it.
///
/// The output is a decorative 21x21 matrix code: it has no error correction
/// or format information and is not meant to be read by QR scanners.
pub fn encode_and_render(text: &str, options: &RenderOptions) -> RasterImage {
    encode_and_render_with(text, options, &mut RngPadding::thread())
}

pub fn encode_and_render_with(
    text: &str,
    options: &RenderOptions,
    padding: &mut impl PaddingSource,
) -> RasterImage {
    let qr = QRBuilder::new(text).encoding(options.encoding).build_with(padding);
    qr.to_image(options.resolved_pixel_size(), options.resolved_foreground())
}

/// Resizes `canvas` to the requested pixel size and paints the code for
/// `text` into it.
pub fn draw_to_canvas(canvas: &mut RgbImage, text: &str, options: &RenderOptions) {
    let pixel_size = options.resolved_pixel_size();
    if canvas.dimensions() != (pixel_size, pixel_size) {
        *canvas = RgbImage::new(pixel_size, pixel_size);
    }

    let qr = QRBuilder::new(text).encoding(options.encoding).build();
    paint(&qr, canvas, options.resolved_foreground());
}
