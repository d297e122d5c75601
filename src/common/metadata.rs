use std::ops::Not;

use image::Rgb;

use super::error::{QRError, QRResult};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(&self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Foreground & background colors
//------------------------------------------------------------------------------

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Parses `#RRGGBB` or `RRGGBB` (either case) into an RGB pixel.
pub fn parse_hex_color(hex: &str) -> QRResult<Rgb<u8>> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(QRError::InvalidColor);
    }
    let channel =
        |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| QRError::InvalidColor);
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}


// Layout
//------------------------------------------------------------------------------

/// Side length of every grid, independent of input.
pub const QR_WIDTH: usize = 21;

pub const FINDER_WIDTH: i16 = 7;

pub const TIMING_LINE: i16 = 6;

pub const ALIGNMENT_CENTER: i16 = (QR_WIDTH / 2) as i16;

pub const ALIGNMENT_RADIUS: i16 = 2;

/// Number of non-reserved cells, i.e. how many bits of text fit in a grid.
pub const DATA_BIT_CAPACITY: usize = 255;

/// Whether a cell belongs to a finder, timing or alignment area. Only
/// non-negative coordinates are classified.
pub const fn is_reserved(r: i16, c: i16) -> bool {
    let w = QR_WIDTH as i16;
    let far = w - FINDER_WIDTH;

    let in_finder = (r < FINDER_WIDTH && c < FINDER_WIDTH)
        || (r < FINDER_WIDTH && c >= far)
        || (r >= far && c < FINDER_WIDTH);
    let in_timing = r == TIMING_LINE || c == TIMING_LINE;
    let in_alignment = r >= ALIGNMENT_CENTER - ALIGNMENT_RADIUS
        && r <= ALIGNMENT_CENTER + ALIGNMENT_RADIUS
        && c >= ALIGNMENT_CENTER - ALIGNMENT_RADIUS
        && c <= ALIGNMENT_CENTER + ALIGNMENT_RADIUS;

    in_finder || in_timing || in_alignment
}
