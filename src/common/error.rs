use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Input
    EmptyData,
    InvalidColor,
    UnknownCharset,
    UnencodableText,

    // Batch
    InvalidGroupSize,
    GroupExceedsLimit,

    // Output
    ImageEncoding,
    ImageWrite,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            // Input
            Self::EmptyData => "Empty data",
            Self::InvalidColor => "Invalid color",
            Self::UnknownCharset => "Unknown character set",
            Self::UnencodableText => "Text has characters outside the character set",

            // Batch
            Self::InvalidGroupSize => "Rows per code must be at least 1",
            Self::GroupExceedsLimit => "Rows per code cannot exceed the row limit",

            // Output
            Self::ImageEncoding => "Failed to encode image",
            Self::ImageWrite => "Failed to write image",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_display() {
        assert_eq!(QRError::EmptyData.to_string(), "Empty data");
        assert_eq!(
            QRError::GroupExceedsLimit.to_string(),
            "Rows per code cannot exceed the row limit"
        );
    }
}
