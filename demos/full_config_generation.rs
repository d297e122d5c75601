use std::error::Error;

use qrcanvas::{parse_hex_color, MaskPattern, QRBuilder, RngPadding, TextEncoding};

fn main() -> Result<(), Box<dyn Error>> {
    let data = "This example shows all available configuration options.";

    let qr = QRBuilder::new(data)
        .encoding(TextEncoding::for_label("utf-8")?) // Character set - if not provided, low byte of each UTF-16 unit
        .mask(MaskPattern::OddColumns)               // Mask pattern - only one is available
        .build_with(&mut RngPadding::seeded(7));     // Padding source - if not provided, thread-local random

    // Convert to image and save
    let img = qr.to_image(420, parse_hex_color("#1f3a5f")?); // 20px per cell
    img.save("configured_qr.png")?;

    println!("Configured code saved to: configured_qr.png");
    println!("QR metadata: {}", qr.metadata());
    println!("{}", qr.to_str(1));

    Ok(())
}
