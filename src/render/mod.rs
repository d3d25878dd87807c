//! # Rendering Module
//!
//! Turns decoded pixels into the monochrome layouts the image commands
//! take.
//!
//! ## Modules
//!
//! - [`bitmap`]: Binarization, bit image bands and raster rows
//!
//! ## Usage Example
//!
//! ```
//! use impresora::render::bitmap::{MonoImage, PixelGrid};
//! use impresora::protocol::graphics::BitmapDensity;
//!
//! // 16×24 opaque black square
//! let grid = PixelGrid::new(16, 24, 4, [0, 0, 0, 255].repeat(16 * 24)).unwrap();
//! let image = MonoImage::from_pixels(&grid);
//!
//! let bands = image.to_bitmap(BitmapDensity::D24);
//! assert_eq!(bands.rows.len(), 1);
//! assert_eq!(bands.rows[0].len(), 16 * 3);
//! ```

pub mod bitmap;

pub use bitmap::{MonoImage, PixelGrid};
