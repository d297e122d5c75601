use std::error::Error;

use qrcanvas::{encode_and_render, RenderOptions};

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - only text, 256px black on white
    let img = encode_and_render("Hello, World!", &RenderOptions::new());

    img.save("simple_qr.png")?;

    println!("Simple code saved to: simple_qr.png");
    Ok(())
}
