use std::ops::Deref;

use image::Rgb;

use crate::common::metadata::*;
use crate::common::{BitStream, DataRegionIter, MaskPattern, PaddingSource};
use crate::render::{render, RasterImage};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// A 21x21 module grid. Coordinates are `(row, col)`; negative values count
/// back from the far edge.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Box<[Module; QR_SIZE]>,
    w: usize,
    data_len: usize,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new() -> Self {
        Self { grid: Box::new([Module::Empty; QR_SIZE]), w: QR_WIDTH, data_len: 0, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &*self.grid
    }

    pub fn width(&self) -> usize {
        self.w
    }

    /// Number of data cells holding text bits rather than padding.
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Width: {}, Data bits: {}/{}, Mask: {:?} }}",
            self.w, self.data_len, DATA_BIT_CAPACITY, self.mask
        )
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    pub fn is_dark(&self, r: i16, c: i16) -> bool {
        matches!(*self.get(r, c), Color::Dark)
    }

    pub fn to_matrix(&self) -> [[bool; QR_WIDTH]; QR_WIDTH] {
        let mut res = [[false; QR_WIDTH]; QR_WIDTH];
        for (i, row) in res.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.is_dark(i as i16, j as i16);
            }
        }
        res
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}

impl Default for QR {
    fn default() -> Self {
        Self::new()
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(0, 0);
        self.draw_finder_pattern_at(0, -FINDER_WIDTH);
        self.draw_finder_pattern_at(-FINDER_WIDTH, 0);
    }

    // (r, c) is the top left corner of the pattern
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        for i in 0..FINDER_WIDTH {
            for j in 0..FINDER_WIDTH {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (0 | 6, _) | (_, 0 | 6) => Module::Func(Color::Dark),
                        (1 | 5, _) | (_, 1 | 5) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        let (off, first, last) = (TIMING_LINE, FINDER_WIDTH + 1, w - FINDER_WIDTH - 2);
        self.draw_line(off, first, off, last);
        self.draw_line(first, off, last, off);
    }

    // Parity follows the absolute index, not the distance from the line start
    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                let m =
                    if j & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(r1, j, m);
            }
        } else {
            for i in r1..=r2 {
                let m =
                    if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(i, c1, m);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_pattern(&mut self) {
        self.draw_alignment_pattern_at(ALIGNMENT_CENTER, ALIGNMENT_CENTER);
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let rad = ALIGNMENT_RADIUS;
        for i in -rad..=rad {
            for j in -rad..=rad {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod alignment_pattern_tests {
    use crate::builder::QR;

    #[test]
    fn test_alignment_pattern() {
        let mut qr = QR::new();
        qr.draw_alignment_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........fffff........\n\
             ........fFFFf........\n\
             ........fFfFf........\n\
             ........fFFFf........\n\
             ........fffff........\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_pattern();
        self.draw_timing_pattern();
        self.reserve_function_area();
    }

    // Timing cells outside the dashed span are reserved but never stamped
    fn reserve_function_area(&mut self) {
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if is_reserved(r, c) && matches!(self.get(r, c), Module::Empty) {
                    self.set(r, c, Module::Func(Color::Light));
                }
            }
        }
    }
}

#[cfg(test)]
mod all_function_patterns_test {
    use crate::builder::{Module, QR};
    use crate::common::metadata::{is_reserved, DATA_BIT_CAPACITY};

    #[test]
    fn test_all_function_patterns() {
        let mut qr = QR::new();
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffff.......fffffff\n\
             fFFFFFf.......fFFFFFf\n\
             fFfffFf.......fFfffFf\n\
             fFfffFf.......fFfffFf\n\
             fFfffFf.......fFfffFf\n\
             fFFFFFf.......fFFFFFf\n\
             fffffffFfFfFfFfffffff\n\
             ......F..............\n\
             ......f.fffff........\n\
             ......F.fFFFf........\n\
             ......f.fFfFf........\n\
             ......F.fFFFf........\n\
             ......f.fffff........\n\
             ......F..............\n\
             fffffff..............\n\
             fFFFFFf..............\n\
             fFfffFf..............\n\
             fFfffFf..............\n\
             fFfffFf..............\n\
             fFFFFFf..............\n\
             fffffff..............\n"
        );
    }

    #[test]
    fn test_function_area_matches_reserved_cells() {
        let mut qr = QR::new();
        qr.draw_all_function_patterns();
        let w = qr.width() as i16;
        for r in 0..w {
            for c in 0..w {
                assert_eq!(matches!(qr.get(r, c), Module::Func(_)), is_reserved(r, c), "{r} {c}");
            }
        }
        let empty = qr.grid().iter().filter(|m| matches!(m, Module::Empty)).count();
        assert_eq!(empty, DATA_BIT_CAPACITY);
    }
}

// Data region
//------------------------------------------------------------------------------

impl QR {
    /// Writes `payload` into the data cells in row-major order, then fills the
    /// rest of the region from `padding`.
    pub fn draw_data_region(&mut self, mut payload: BitStream, padding: &mut impl PaddingSource) {
        self.data_len = payload.len();
        for (r, c) in DataRegionIter::new() {
            debug_assert!(
                matches!(self.get(r, c), Module::Empty),
                "Data cell already written: {r} {c}"
            );
            let bit = payload.next().unwrap_or_else(|| padding.next_bit());
            self.set(r, c, Module::Data(Color::from(bit)));
        }

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after data");
    }

    /// Inverts the data cells selected by `pattern`. Function cells are never
    /// touched, so applying the same pattern twice restores the grid.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) {
                    if let Module::Data(clr) = self.get(r, c) {
                        self.set(r, c, Module::Data(!clr))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod data_region_tests {
    use crate::builder::{Module, QR};
    use crate::common::metadata::Color;
    use crate::common::{BitStream, ConstPadding, MaskPattern, RngPadding, TextEncoding};

    fn unmasked(text: &str, pad: bool) -> QR {
        let mut qr = QR::new();
        qr.draw_all_function_patterns();
        let payload = BitStream::from_text(text, TextEncoding::CodeUnits);
        qr.draw_data_region(payload, &mut ConstPadding(pad));
        qr
    }

    #[test]
    fn test_data_placement() {
        let qr = unmasked("A", false);
        assert_eq!(qr.data_len(), 8);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffDdDDDDDfffffff\n\
             fFFFFFfdDDDDDDfFFFFFf\n\
             fFfffFfDDDDDDDfFfffFf\n\
             fFfffFfDDDDDDDfFfffFf\n\
             fFfffFfDDDDDDDfFfffFf\n\
             fFFFFFfDDDDDDDfFFFFFf\n\
             fffffffFfFfFfFfffffff\n\
             DDDDDDFDDDDDDDDDDDDDD\n\
             DDDDDDfDfffffDDDDDDDD\n\
             DDDDDDFDfFFFfDDDDDDDD\n\
             DDDDDDfDfFfFfDDDDDDDD\n\
             DDDDDDFDfFFFfDDDDDDDD\n\
             DDDDDDfDfffffDDDDDDDD\n\
             DDDDDDFDDDDDDDDDDDDDD\n\
             fffffffDDDDDDDDDDDDDD\n\
             fFFFFFfDDDDDDDDDDDDDD\n\
             fFfffFfDDDDDDDDDDDDDD\n\
             fFfffFfDDDDDDDDDDDDDD\n\
             fFfffFfDDDDDDDDDDDDDD\n\
             fFFFFFfDDDDDDDDDDDDDD\n\
             fffffffDDDDDDDDDDDDDD\n"
        );
    }

    #[test]
    fn test_padding_fills_remainder() {
        let qr = unmasked("", true);
        assert_eq!(qr.data_len(), 0);
        assert!(qr.grid().iter().all(|m| !matches!(m, Module::Data(Color::Light))));
    }

    #[test]
    fn test_mask() {
        let mut qr = unmasked("A", false);
        qr.apply_mask(MaskPattern::OddColumns);
        assert_eq!(qr.mask(), Some(MaskPattern::OddColumns));
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffdddDdDdfffffff\n\
             fFFFFFfDDdDdDdfFFFFFf\n\
             fFfffFfdDdDdDdfFfffFf\n\
             fFfffFfdDdDdDdfFfffFf\n\
             fFfffFfdDdDdDdfFfffFf\n\
             fFFFFFfdDdDdDdfFFFFFf\n\
             fffffffFfFfFfFfffffff\n\
             DdDdDdFdDdDdDdDdDdDdD\n\
             DdDdDdfdfffffdDdDdDdD\n\
             DdDdDdFdfFFFfdDdDdDdD\n\
             DdDdDdfdfFfFfdDdDdDdD\n\
             DdDdDdFdfFFFfdDdDdDdD\n\
             DdDdDdfdfffffdDdDdDdD\n\
             DdDdDdFdDdDdDdDdDdDdD\n\
             fffffffdDdDdDdDdDdDdD\n\
             fFFFFFfdDdDdDdDdDdDdD\n\
             fFfffFfdDdDdDdDdDdDdD\n\
             fFfffFfdDdDdDdDdDdDdD\n\
             fFfffFfdDdDdDdDdDdDdD\n\
             fFFFFFfdDdDdDdDdDdDdD\n\
             fffffffdDdDdDdDdDdDdD\n"
        );
    }

    #[test]
    fn test_mask_is_involution() {
        let mut qr = QR::new();
        qr.draw_all_function_patterns();
        let payload = BitStream::from_text("involution", TextEncoding::CodeUnits);
        qr.draw_data_region(payload, &mut RngPadding::seeded(3));
        let before = qr.to_debug_str();

        qr.apply_mask(MaskPattern::OddColumns);
        assert_ne!(qr.to_debug_str(), before);
        qr.apply_mask(MaskPattern::OddColumns);
        assert_eq!(qr.to_debug_str(), before);
    }
}

// Render
//------------------------------------------------------------------------------

impl QR {
    pub fn to_image(&self, pixel_size: u32, foreground: Rgb<u8>) -> RasterImage {
        render(self, pixel_size, foreground)
    }

    pub fn to_str(&self, module_sz: usize) -> String {
        let total_sz = self.w * module_sz;

        let mut canvas = String::new();
        for i in 0..total_sz {
            for j in 0..total_sz {
                let r = (i / module_sz) as i16;
                let c = (j / module_sz) as i16;
                canvas.push(self.get(r, c).select('█', ' '));
            }
            canvas.push('\n');
        }

        canvas
    }
}


// Global constants
//------------------------------------------------------------------------------

const QR_SIZE: usize = QR_WIDTH * QR_WIDTH;
