pub mod bit_utils;
pub mod error;
pub mod iter;
pub mod mask;
pub mod metadata;
pub mod padding;

pub use bit_utils::*;
pub use error::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
pub use padding::*;
