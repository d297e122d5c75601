mod qr;

pub use qr::{Module, QR};

use log::{debug, trace};

use crate::common::{
    BitStream, MaskPattern, PaddingSource, RngPadding, TextEncoding, DATA_BIT_CAPACITY,
};

pub struct QRBuilder<'a> {
    text: &'a str,
    encoding: TextEncoding,
    mask: MaskPattern,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, encoding: TextEncoding::CodeUnits, mask: MaskPattern::OddColumns }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
        self
    }

    pub fn encoding(&mut self, encoding: TextEncoding) -> &mut Self {
        self.encoding = encoding;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = mask;
        self
    }

    pub fn metadata(&self) -> String {
        let encoding = match self.encoding {
            TextEncoding::CodeUnits => "Code units",
            TextEncoding::Charset(charset) => charset.name(),
        };
        format!(
            "{{ Text length: {}, Encoding: {}, Mask: {:?} }}",
            self.text.chars().count(),
            encoding,
            self.mask
        )
    }
}


impl QRBuilder<'_> {
    /// Builds the grid, padding unused data cells from the thread-local
    /// generator. Two builds of the same text differ only in padding.
    pub fn build(&self) -> QR {
        self.build_with(&mut RngPadding::thread())
    }

    pub fn build_with(&self, padding: &mut impl PaddingSource) -> QR {
        debug!("Generating QR {}...", self.metadata());

        trace!("Encoding data...");
        let payload = BitStream::from_text(self.text, self.encoding);
        if payload.is_full() {
            debug!("Text reached data capacity of {DATA_BIT_CAPACITY} bits, remainder dropped");
        }

        let mut qr = QR::new();

        trace!("Drawing function patterns...");
        qr.draw_all_function_patterns();

        trace!("Drawing data region...");
        qr.draw_data_region(payload, padding);

        trace!("Apply mask {:?}...", self.mask);
        qr.apply_mask(self.mask);

        debug!("QR generated: {}, dark cells {}", qr.metadata(), qr.count_dark_modules());

        qr
    }
}
