//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! spoken by most thermal receipt printers. Every function returns the exact
//! bytes for one command; the stateful [`crate::encoder::CommandEncoder`]
//! strings them together.
//!
//! ## Module Structure
//!
//! - [`commands`]: Initialization, spacing, margins, cutting, peripherals
//! - [`text`]: Alignment, fonts, size and emphasis
//! - [`barcode`]: 1D barcodes and the generic QR command
//! - [`qsprinter`]: QsPrinter vendor extensions
//! - [`graphics`]: Bit image and raster image commands
//! - [`codepage`]: Text transcoding
//!
//! ## Usage Example
//!
//! ```
//! use impresora::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::bold_on());
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold_off());
//! data.extend(commands::cut_partial());
//! ```

pub mod barcode;
pub mod codepage;
pub mod commands;
pub mod graphics;
pub mod qsprinter;
pub mod text;
