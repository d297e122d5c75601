use super::metadata::{is_reserved, QR_WIDTH};

// Iterator for placing data in the data region
//------------------------------------------------------------------------------

/// Row-major walk over every non-reserved cell.
pub struct DataRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

impl DataRegionIter {
    pub const fn new() -> Self {
        Self { r: 0, c: 0, width: QR_WIDTH as i16 }
    }
}

impl Default for DataRegionIter {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for DataRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        while self.r < self.width {
            let res = (self.r, self.c);
            self.c += 1;
            if self.c == self.width {
                self.c = 0;
                self.r += 1;
            }
            if !is_reserved(res.0, res.1) {
                return Some(res);
            }
        }
        None
    }
}

#[cfg(test)]
mod iter_tests {
    use super::DataRegionIter;
    use crate::common::metadata::{is_reserved, DATA_BIT_CAPACITY};

    #[test]
    fn test_data_region_iter_len() {
        assert_eq!(DataRegionIter::new().count(), DATA_BIT_CAPACITY);
    }

    #[test]
    fn test_data_region_iter_order() {
        let head = DataRegionIter::new().take(9).collect::<Vec<_>>();
        let exp = vec![(0, 7), (0, 8), (0, 9), (0, 10), (0, 11), (0, 12), (0, 13), (1, 7), (1, 8)];
        assert_eq!(head, exp);

        let coords = DataRegionIter::new().collect::<Vec<_>>();
        assert!(coords.windows(2).all(|w| w[0] < w[1]));
        assert!(coords.iter().all(|&(r, c)| !is_reserved(r, c)));
        assert_eq!(coords.last(), Some(&(20, 20)));
    }

    #[test]
    fn test_data_region_iter_skips_timing() {
        let row_7 = DataRegionIter::new().filter(|&(r, _)| r == 7).count();
        assert_eq!(row_7, 20);
        assert!(DataRegionIter::new().all(|(r, c)| r != 6 && c != 6));
    }
}
