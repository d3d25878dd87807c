//! # Impresora CLI
//!
//! Command-line interface for ESC/POS receipt printers.
//!
//! ## Usage
//!
//! ```bash
//! # Print two lines of text
//! impresora text "Hola" "Mundo"
//!
//! # Print an image as 24-dot bands, or as one raster command
//! impresora image logo.png
//! impresora image --raster dwdh logo.png
//!
//! # QR code on a QsPrinter, shown as hex instead of printed
//! impresora --model qsprinter --hex qr "https://example.com"
//!
//! # EAN13 barcode (check digit added automatically)
//! impresora barcode --kind ean13 400638133393
//! ```
//!
//! Set `RUST_LOG=debug` to see transfers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use impresora::{
    CommandEncoder, ImpresoraError, PrinterModel, PrinterOptions,
    encoder::{BarcodeOptions, QrOptions},
    protocol::{
        barcode::{barcode1d::BarcodeType, qr::QrLevel},
        commands::Hardware,
        graphics::{BitmapDensity, RasterMode},
        text::Alignment,
    },
    render::MonoImage,
    transport::{DeviceTransport, device::DEFAULT_DEVICE},
};

/// Impresora - ESC/POS receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "impresora")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer device node
    #[arg(long, global = true, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Print the job as hex instead of sending it
    #[arg(long, global = true)]
    hex: bool,

    /// JSON file with printer options
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Code page for text (e.g. Cp858, Cp850, ASCII, UTF-8)
    #[arg(long, global = true)]
    encoding: Option<String>,

    /// Printable columns, overriding the font's width
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Printer model (generic, qsprinter)
    #[arg(long, global = true)]
    model: Option<PrinterModel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print lines of text
    Text {
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Print an image file
    Image {
        path: PathBuf,

        /// Bit image density (s8, d8, s24, d24)
        #[arg(long, default_value = "d24")]
        density: BitmapDensity,

        /// Use one raster command with this scaling (normal, dw, dh, dwdh)
        #[arg(long)]
        raster: Option<RasterMode>,
    },

    /// Print a QR code
    Qr {
        data: String,

        /// Module size in dots
        #[arg(long)]
        size: Option<u8>,

        /// Symbol version
        #[arg(long)]
        version: Option<u8>,

        /// Error correction level (l, m, q, h)
        #[arg(long, default_value = "l")]
        level: QrLevel,
    },

    /// Print a 1D barcode
    Barcode {
        code: String,

        /// Symbology (EAN13, EAN8, UPC-A, CODE128, ...)
        #[arg(long, default_value = "EAN13")]
        kind: BarcodeType,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ImpresoraError> {
    let options = resolve_options(&cli)?;
    log::debug!("Printer options: {:?}", options);

    let mut enc = CommandEncoder::with_options(options);
    enc.hardware(Hardware::Init).align(Alignment::Center);

    match &cli.command {
        Commands::Text { lines } => {
            enc.align(Alignment::Left);
            for line in lines {
                enc.text(line)?;
            }
        }
        Commands::Image {
            path,
            density,
            raster,
        } => {
            let image = MonoImage::open(path)?;
            log::info!(
                "Loaded {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            match raster {
                Some(mode) => enc.raster(&image, *mode)?,
                None => enc.image(&image, *density)?,
            };
        }
        Commands::Qr {
            data,
            size,
            version,
            level,
        } => {
            let options = QrOptions {
                version: *version,
                level: *level,
                size: *size,
            };
            enc.qrcode(data, &options)?;
        }
        Commands::Barcode { code, kind } => {
            enc.barcode(code, *kind, &BarcodeOptions::default())?;
        }
    }

    enc.cut(true, 3);

    if cli.hex {
        print_hex(enc.as_bytes());
        return Ok(());
    }

    let mut device = DeviceTransport::open(&cli.device).await?;
    let len = enc.len();
    enc.close(&mut device).await?;
    println!("Sent {} bytes to {}", len, cli.device.display());
    Ok(())
}

/// Config file first, then individual flags on top.
fn resolve_options(cli: &Cli) -> Result<PrinterOptions, ImpresoraError> {
    let mut options = match &cli.config {
        Some(path) => PrinterOptions::from_json_file(path)?,
        None => PrinterOptions::default(),
    };
    if let Some(encoding) = &cli.encoding {
        options.encoding = encoding.clone();
    }
    if let Some(width) = cli.width {
        options.width = Some(width);
    }
    if let Some(model) = cli.model {
        options.model = model;
    }
    Ok(options)
}

fn print_hex(bytes: &[u8]) {
    for (i, row) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = row.iter().map(|b| format!("{:02x}", b)).collect();
        println!("{:08x}  {}", i * 16, hex.join(" "));
    }
}
