//! # qrcanvas
//!
//! A Rust library for drawing decorative QR-style matrix codes: a fixed 21x21
//! grid with finder, timing and alignment markers, text bits laid out row by
//! row and random padding in the remaining cells.
//!
//! The codes look like QR codes but carry no error correction, mode header or
//! format information, so real QR scanners will not read them. They are meant
//! for visual use only.
//!
//! ## Features
//!
//! - **Grid Generation**: Build the 21x21 module grid for any text, with injectable padding
//! - **Rendering**: Rasterize a grid to an RGB image of any pixel size, or into an existing canvas
//! - **Batch Mode**: Split table rows into groups and render one code per group
//! - **Character Sets**: Lossy UTF-16 code unit bytes by default, or any `encoding_rs` charset
//!
//! ## Quick Start
//!
//! ### Render Text
//!
//! ```rust
//! use qrcanvas::{encode_and_render, RenderOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = encode_and_render("Hello, World!", &RenderOptions::new());
//! assert_eq!(img.dimensions(), (256, 256));
//!
//! let png = img.to_png()?;
//! assert!(png.starts_with(b"\x89PNG"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrcanvas::{QRBuilder, RngPadding, TextEncoding, MaskPattern};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, World!")
//!     .encoding(TextEncoding::for_label("utf-8")?) // Defaults to TextEncoding::CodeUnits
//!     .mask(MaskPattern::OddColumns)                // Only pattern available
//!     .build_with(&mut RngPadding::seeded(42));     // Reproducible padding
//!
//! let img = qr.to_image(420, qrcanvas::parse_hex_color("#1a2b3c")?);
//! assert_eq!(img.size(), 420);
//! # Ok(())
//! # }
//! ```
//!
//! ### Batch Rendering
//!
//! ```rust
//! use qrcanvas::{render_batch, BatchConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = vec![vec!["1".to_string(), "Alice".to_string()]; 25];
//! let items = render_batch(&rows, BatchConfig::new().rows_per_code(10))?;
//!
//! assert_eq!(items.len(), 3);
//! assert_eq!(items[2].file_name, "qr-code-3-rows-21-25.png");
//! # Ok(())
//! # }
//! ```
//!
//! ## Grid Layout
//!
//! - **Finder patterns**: 7x7 squares at the top left, top right and bottom left corners
//! - **Timing patterns**: alternating cells on row 6 and column 6 between the finders
//! - **Alignment pattern**: 5x5 ring centered at (10, 10)
//! - **Data region**: the 255 remaining cells, filled row-major and masked on odd columns

pub mod batch;
pub mod builder;
pub mod canvas;
pub mod common;
pub mod render;

pub use batch::{
    estimate_code_count, partition, render_batch, BatchConfig, BatchItem, RowGroup,
    DEFAULT_MAX_ROWS, DEFAULT_ROWS_PER_CODE,
};
pub use builder::{Module, QRBuilder, QR};
pub use canvas::{
    draw_to_canvas, encode_and_render, encode_and_render_with, RenderOptions, DEFAULT_PIXEL_SIZE,
};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{
    is_reserved, parse_hex_color, Color, BLACK, DATA_BIT_CAPACITY, QR_WIDTH, WHITE,
};
pub use common::padding::{ConstPadding, PaddingSource, RngPadding};
pub use common::TextEncoding;
pub use render::{render, RasterImage};
