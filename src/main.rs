use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use qrcanvas::{
    estimate_code_count, render_batch, BatchConfig, PaddingSource, QRBuilder, QRError,
    RenderOptions, RngPadding, TextEncoding, DEFAULT_MAX_ROWS, DEFAULT_PIXEL_SIZE,
    DEFAULT_ROWS_PER_CODE,
};

#[derive(Parser)]
#[command(name = "qrcanvas")]
#[command(author, version, about = "Draw decorative QR-style matrix codes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a single code for the given text
    Encode {
        /// Text to encode
        #[arg(value_name = "TEXT")]
        text: String,

        /// Image width and height in pixels
        #[arg(short, long, default_value_t = DEFAULT_PIXEL_SIZE)]
        size: u32,

        /// Foreground color as #RRGGBB
        #[arg(short, long, default_value = "#000000")]
        color: String,

        /// Output PNG file
        #[arg(short, long, default_value = "qr-code.png")]
        output: PathBuf,

        /// Seed for reproducible padding
        #[arg(long)]
        seed: Option<u64>,

        /// Character set label (e.g. utf-8), defaults to UTF-16 code unit bytes
        #[arg(long)]
        charset: Option<String>,

        /// Also print the grid to the terminal
        #[arg(short, long)]
        print: bool,
    },

    /// Render one code per group of rows from a tab-separated file
    Batch {
        /// Input file, one row per line with tab-separated cells
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Rows encoded in each code
        #[arg(short, long, default_value_t = DEFAULT_ROWS_PER_CODE)]
        rows_per_code: usize,

        /// Maximum number of rows read from the input
        #[arg(short, long, default_value_t = DEFAULT_MAX_ROWS)]
        max_rows: usize,

        /// Image width and height in pixels
        #[arg(short, long, default_value_t = DEFAULT_PIXEL_SIZE)]
        size: u32,

        /// Foreground color as #RRGGBB
        #[arg(short, long, default_value = "#000000")]
        color: String,

        /// Output directory
        #[arg(short, long, default_value = "qr-codes")]
        output: PathBuf,

        /// Seed for reproducible padding, offset by the group index
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode { text, size, color, output, seed, charset, print } => {
            let encoding = match charset {
                Some(label) => TextEncoding::for_label(&label)?,
                None => TextEncoding::CodeUnits,
            };
            let mut opts = RenderOptions::new();
            opts.pixel_size(size).foreground(color).encoding(encoding);

            match seed {
                Some(seed) => encode(&text, &opts, &output, print, &mut RngPadding::seeded(seed)),
                None => encode(&text, &opts, &output, print, &mut RngPadding::thread()),
            }
        }
        Command::Batch { input, rows_per_code, max_rows, size, color, output, seed } => {
            let mut opts = RenderOptions::new();
            opts.pixel_size(size).foreground(color);
            let mut config = BatchConfig::new();
            config.rows_per_code(rows_per_code).max_rows(max_rows).options(opts);
            if let Some(seed) = seed {
                config.seed(seed);
            }

            batch(&input, &config, &output)
        }
    }
}

fn encode(
    text: &str,
    opts: &RenderOptions,
    output: &Path,
    print: bool,
    padding: &mut impl PaddingSource,
) -> Result<(), Box<dyn Error>> {
    if text.trim().is_empty() {
        return Err(QRError::EmptyData.into());
    }
    opts.encoding.check(text)?;

    let qr = QRBuilder::new(text).encoding(opts.encoding).build_with(padding);
    if print {
        println!("{}", qr.to_str(1));
    }

    let img = qr.to_image(opts.resolved_pixel_size(), opts.resolved_foreground());
    img.save(output)?;
    info!("Saved {}x{} code to {}", img.width(), img.height(), output.display());

    Ok(())
}

fn batch(input: &Path, config: &BatchConfig, out_dir: &Path) -> Result<(), Box<dyn Error>> {
    config.validate()?;

    let rows = read_rows(input)?;
    if rows.is_empty() {
        return Err(QRError::EmptyData.into());
    }
    info!(
        "Read {} rows from {}, expecting {} codes",
        rows.len(),
        input.display(),
        estimate_code_count(rows.len(), config.rows_per_code, config.max_rows)
    );

    let items = render_batch(&rows, config)?;

    fs::create_dir_all(out_dir)?;
    for item in &items {
        item.image.save(out_dir.join(&item.file_name))?;
    }
    info!("Wrote {} codes to {}", items.len(), out_dir.display());

    Ok(())
}

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_rows(&content))
}

// Rows without a single non-empty cell are skipped
fn parse_rows(content: &str) -> Vec<Vec<String>> {
    content
        .lines()
        .map(|line| line.split('\t').map(|cell| cell.trim().to_string()).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}
