// Mask pattern
//------------------------------------------------------------------------------

/// Data cells selected by the mask are inverted after placement. Only the
/// column-parity pattern exists; it is not one of the eight standard QR masks.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum MaskPattern {
    #[default]
    OddColumns,
}

mod mask_functions {
    pub fn odd_columns(_: i16, c: i16) -> bool {
        c & 1 == 1
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match self {
            Self::OddColumns => mask_functions::odd_columns,
        }
    }
}

#[cfg(test)]
mod mask_tests {
    use super::MaskPattern;

    #[test]
    fn test_odd_columns() {
        let mask_fn = MaskPattern::OddColumns.mask_function();
        assert!(!mask_fn(0, 0));
        assert!(mask_fn(0, 1));
        assert!(mask_fn(20, 7));
        assert!(!mask_fn(3, 20));
    }
}
