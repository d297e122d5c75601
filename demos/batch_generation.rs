use std::error::Error;
use std::fs;
use std::path::Path;

use qrcanvas::{estimate_code_count, render_batch, BatchConfig, RenderOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let rows = (1..=42)
        .map(|i| vec![format!("SKU-{i:04}"), format!("Item {i}"), format!("{}", i * 3)])
        .collect::<Vec<_>>();

    let mut opts = RenderOptions::new();
    opts.pixel_size(210).foreground("#8b0000");
    let mut config = BatchConfig::new();
    config.rows_per_code(10).max_rows(40).options(opts);

    println!(
        "Rendering {} codes",
        estimate_code_count(rows.len(), config.rows_per_code, config.max_rows)
    );

    let out_dir = Path::new("batch_qr");
    fs::create_dir_all(out_dir)?;
    for item in render_batch(&rows, &config)? {
        item.image.save(out_dir.join(&item.file_name))?;
        println!("Rows {}-{} saved to: {}", item.start_row, item.end_row, item.file_name);
    }

    Ok(())
}
