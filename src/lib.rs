//! # Impresora - ESC/POS Receipt Printer Library
//!
//! Impresora builds ESC/POS print jobs for thermal receipt printers. It
//! provides:
//!
//! - **Command encoder**: text, tables, barcodes, QR codes, images, cuts
//! - **Rasterizer**: pixel grids to bit image bands and raster rows
//! - **Model variants**: generic ESC/POS and QsPrinter firmware
//! - **Transport**: character device nodes and an in-memory recorder
//!
//! ## Quick Start
//!
//! ```no_run
//! use impresora::{
//!     encoder::{CommandEncoder, QrOptions},
//!     protocol::{commands::Hardware, text::Alignment},
//!     transport::DeviceTransport,
//! };
//!
//! # async fn run() -> impresora::Result<()> {
//! let mut printer = DeviceTransport::open("/dev/usb/lp0").await?;
//!
//! let mut enc = CommandEncoder::new();
//! enc.hardware(Hardware::Init)
//!     .align(Alignment::Center)
//!     .text("Gracias por su compra")?
//!     .qrcode("https://example.com/ticket/42", &QrOptions::default())?
//!     .cut(true, 3);
//!
//! enc.close(&mut printer).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`encoder`] | Stateful command encoder |
//! | [`protocol`] | ESC/POS command builders and code pages |
//! | [`render`] | Image binarization and bit packing |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Session options and model variants |
//! | [`error`] | Error types |

pub mod encoder;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use encoder::CommandEncoder;
pub use error::{ImpresoraError, Result};
pub use printer::{PrinterModel, PrinterOptions};
pub use transport::{DeviceTransport, MemoryTransport, Transport};
