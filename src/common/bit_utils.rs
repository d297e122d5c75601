use std::mem;

use encoding_rs::Encoding;
use log::warn;
use num_traits::PrimInt;

use super::error::{QRError, QRResult};
use super::metadata::DATA_BIT_CAPACITY;

// Text encoding
//------------------------------------------------------------------------------

/// How characters of the input text are turned into 8-bit groups.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum TextEncoding {
    /// Low byte of every UTF-16 code unit. Lossy above U+00FF, and characters
    /// outside the BMP contribute one byte per surrogate.
    #[default]
    CodeUnits,
    /// Every byte of the text encoded in the given character set. Characters
    /// the charset cannot represent are written as HTML numeric character
    /// references (`&#128512;`); use [`TextEncoding::check`] to reject them.
    Charset(&'static Encoding),
}

impl TextEncoding {
    /// Looks up a charset by its WHATWG label, e.g. `utf-8` or `windows-1251`.
    pub fn for_label(label: &str) -> QRResult<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self::Charset)
            .ok_or(QRError::UnknownCharset)
    }

    /// Fails if any character of `text` has no mapping in the charset.
    /// Code units never fail.
    pub fn check(&self, text: &str) -> QRResult<()> {
        match self {
            Self::CodeUnits => Ok(()),
            Self::Charset(charset) => {
                let (_, _, unmappable) = charset.encode(text);
                if unmappable {
                    return Err(QRError::UnencodableText);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod text_encoding_tests {
    use encoding_rs::{UTF_8, WINDOWS_1251};
    use test_case::test_case;

    use super::TextEncoding;
    use crate::common::error::QRError;

    #[test]
    fn test_for_label() {
        assert_eq!(TextEncoding::for_label("utf-8"), Ok(TextEncoding::Charset(UTF_8)));
        assert_eq!(TextEncoding::for_label(" cp1251 "), Ok(TextEncoding::Charset(WINDOWS_1251)));
        assert_eq!(TextEncoding::for_label("klingon"), Err(QRError::UnknownCharset));
    }

    #[test_case("😀", TextEncoding::CodeUnits, Ok(()); "code units")]
    #[test_case("😀", TextEncoding::Charset(UTF_8), Ok(()); "emoji utf8")]
    #[test_case("Привет", TextEncoding::Charset(WINDOWS_1251), Ok(()); "cyrillic cp1251")]
    #[test_case("😀", TextEncoding::Charset(WINDOWS_1251), Err(QRError::UnencodableText); "emoji cp1251")]
    #[test_case("5 €", TextEncoding::Charset(WINDOWS_1251), Ok(()); "euro cp1251")]
    #[test_case("ok ☃", TextEncoding::Charset(WINDOWS_1251), Err(QRError::UnencodableText); "snowman cp1251")]
    fn test_check(text: &str, encoding: TextEncoding, exp: Result<(), QRError>) {
        assert_eq!(encoding.check(text), exp);
    }
}

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BitStream {
    data: [u8; MAX_PAYLOAD_SIZE],
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(
            capacity <= MAX_PAYLOAD_SIZE << 3,
            "Capacity exceeds payload size: Capacity {capacity}"
        );
        Self { data: [0; MAX_PAYLOAD_SIZE], len: 0, capacity, cursor: 0 }
    }

    /// Encodes as much of `text` as fits in one grid's data region. Anything
    /// beyond that is dropped. Unmappable charset characters are substituted
    /// with numeric character references and logged.
    pub fn from_text(text: &str, encoding: TextEncoding) -> Self {
        let mut bs = Self::new(DATA_BIT_CAPACITY);
        match encoding {
            TextEncoding::CodeUnits => {
                for unit in text.encode_utf16() {
                    if bs.push_bits(unit, 8) < 8 {
                        break;
                    }
                }
            }
            TextEncoding::Charset(charset) => {
                let (bytes, _, unmappable) = charset.encode(text);
                if unmappable {
                    warn!(
                        "Text has characters outside {}, encoding them as character references",
                        charset.name()
                    );
                }
                for &byte in bytes.iter() {
                    if bs.push_bits(byte, 8) < 8 {
                        break;
                    }
                }
            }
        }
        bs
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    /// Pushes the low `size` bits of `bits`, most significant first. Stops at
    /// capacity and returns how many bits were stored.
    pub fn push_bits<T>(&mut self, bits: T, size: usize) -> usize
    where
        T: PrimInt,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Bit count exceeds type width: Size {size}");

        let mut pushed = 0;
        for i in (0..size).rev() {
            if !self.push((bits >> i) & T::one() == T::one()) {
                break;
            }
            pushed += 1;
        }
        pushed
    }

    /// Returns false when the stream is already full.
    pub fn push(&mut self, bit: bool) -> bool {
        if self.is_full() {
            return false;
        }

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
        true
    }
}

#[cfg(test)]
mod bit_stream_push_tests {

    use super::BitStream;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new(40);
        assert_eq!(bs.len(), 0);
        assert!(bs.is_empty());
        bs.push_bits(0u8, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000u8, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000u16, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1111111u8, 7);
        assert_eq!(bs.len(), 19);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new(2);
        assert!(bs.push(false));
        assert_eq!(bs.data[..1], vec![0b00000000]);
        assert!(bs.push(true));
        assert_eq!(bs.data[..1], vec![0b01000000]);
        assert!(!bs.push(true));
        assert_eq!(bs.len(), 2);
    }

    #[test]
    fn test_push_bits() {
        let mut bs = BitStream::new(24);
        bs.push_bits(0b110u8, 3);
        bs.push_bits(0b10010u8, 5);
        bs.push_bits(0xABCDu16, 16);
        assert_eq!(bs.data(), &[0b11010010, 0xAB, 0xCD]);
    }

    #[test]
    fn test_push_bits_truncates_wide_values() {
        let mut bs = BitStream::new(8);
        bs.push_bits(0x0416u16, 8);
        assert_eq!(bs.data(), &[0x16]);
    }

    #[test]
    fn test_push_bits_capacity_overflow() {
        let mut bs = BitStream::new(11);
        assert_eq!(bs.push_bits(0xFFu8, 8), 8);
        assert_eq!(bs.push_bits(0b1010_0000u8, 8), 3);
        assert!(bs.is_full());
        assert_eq!(bs.data(), &[0xFF, 0b10100000]);
    }
}

// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }
}

// Iterator for bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take()
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const MAX_PAYLOAD_SIZE: usize = (DATA_BIT_CAPACITY + 7) >> 3;
