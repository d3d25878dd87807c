//! # Image Binarization and Bit Packing
//!
//! Converts a decoded pixel grid into the monochrome byte layouts the image
//! commands expect.
//!
//! ## Pipeline
//!
//! ```text
//! PixelGrid ──binarize──► BinaryMask ──pack_bitmap──► PackedBitmap (ESC *)
//!                                     └─pack_raster──► RasterBitmap (GS v 0)
//! ```
//!
//! ## Ink Rule
//!
//! A pixel is printed when it is not fully transparent and each of its red,
//! green and blue channels is below 200:
//!
//! ```text
//! ink = alpha != 0 && r < 200 && g < 200 && b < 200
//! ```
//!
//! This is a per-channel cut, not a luminance threshold: a saturated red
//! (255, 0, 0) stays white.

use image::RgbaImage;

use crate::error::{ImpresoraError, Result};
use crate::protocol::graphics::BitmapDensity;

/// Channel value at or above which a channel counts as "light".
pub const INK_THRESHOLD: u8 = 200;

/// A decoded image: `width × height` pixels of `channels` bytes each.
///
/// | Channels | Layout |
/// |----------|--------|
/// | 1 | gray |
/// | 2 | gray, alpha |
/// | 3 | red, green, blue |
/// | 4 | red, green, blue, alpha |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wrap raw pixel data.
    ///
    /// # Errors
    ///
    /// [`ImpresoraError::InvalidArgument`] if `channels` is not 1-4, the
    /// dimensions overflow `usize`, or `data.len() != width * height * channels`.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(ImpresoraError::invalid(format!(
                "pixel grid must have 1 to 4 channels, got {channels}"
            )));
        }
        let Some(expected) = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
        else {
            return Err(ImpresoraError::invalid(format!(
                "pixel grid {width}x{height}x{channels} is too large"
            )));
        };
        if data.len() != expected {
            return Err(ImpresoraError::invalid(format!(
                "pixel data length mismatch: expected {expected} ({width}x{height}x{channels}), got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Value of one channel of the pixel at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.data[(y * self.width + x) * self.channels + channel]
    }

    /// The pixel at (x, y) expanded to RGBA.
    fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        let base = (y * self.width + x) * self.channels;
        let px = &self.data[base..base + self.channels];
        match *px {
            [v] => [v, v, v, 0xFF],
            [v, a] => [v, v, v, a],
            [r, g, b] => [r, g, b, 0xFF],
            [r, g, b, a] => [r, g, b, a],
            _ => unreachable!("channel count validated in PixelGrid::new"),
        }
    }
}

impl From<&RgbaImage> for PixelGrid {
    fn from(img: &RgbaImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            channels: 4,
            data: img.as_raw().clone(),
        }
    }
}

impl From<RgbaImage> for PixelGrid {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        Self {
            width,
            height,
            channels: 4,
            data: img.into_raw(),
        }
    }
}

/// One "is this pixel ink" flag per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl BinaryMask {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the pixel at (x, y) is printed.
    #[inline]
    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    /// Flat view, index = `y * width + x`.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

/// Bit image data: one row of bytes per band of `density` dot rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    pub rows: Vec<Vec<u8>>,
    /// Dot rows per band (8 or 24)
    pub density: usize,
}

/// Raster data: `width_bytes` bytes for each of `height` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBitmap {
    pub width_bytes: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Decide ink per pixel.
///
/// ## Example
///
/// ```
/// use impresora::render::bitmap::{binarize, PixelGrid};
///
/// // black, white, transparent black, red
/// let grid = PixelGrid::new(4, 1, 4, vec![
///     0, 0, 0, 255,
///     255, 255, 255, 255,
///     0, 0, 0, 0,
///     255, 0, 0, 255,
/// ]).unwrap();
///
/// assert_eq!(binarize(&grid).as_slice(), &[true, false, false, false]);
/// ```
pub fn binarize(grid: &PixelGrid) -> BinaryMask {
    let mut bits = Vec::with_capacity(grid.width * grid.height);
    for y in 0..grid.height {
        for x in 0..grid.width {
            let [r, g, b, a] = grid.rgba(x, y);
            bits.push(a != 0 && r < INK_THRESHOLD && g < INK_THRESHOLD && b < INK_THRESHOLD);
        }
    }
    BinaryMask {
        width: grid.width,
        height: grid.height,
        bits,
    }
}

/// Pack a mask into bit image bands.
///
/// The image is cut into bands of `density.dots()` rows (8 or 24). Each
/// band becomes one row of `width × dots / 8` bytes: for every column,
/// `dots / 8` bytes whose bits, MSB first, are the dots from the top of the
/// band down. Rows past the bottom of the image are blank.
///
/// ## Example
///
/// ```
/// use impresora::protocol::graphics::BitmapDensity;
/// use impresora::render::bitmap::{binarize, pack_bitmap, PixelGrid};
///
/// // 1×3 column: ink, blank, ink
/// let grid = PixelGrid::new(1, 3, 1, vec![0, 255, 0]).unwrap();
/// let packed = pack_bitmap(&binarize(&grid), BitmapDensity::S8);
///
/// assert_eq!(packed.rows, vec![vec![0b1010_0000]]);
/// ```
pub fn pack_bitmap(mask: &BinaryMask, density: BitmapDensity) -> PackedBitmap {
    let dots = density.dots();
    let bytes_per_column = density.bytes_per_column();
    let bands = mask.height.div_ceil(dots);
    let mut rows = Vec::with_capacity(bands);

    for band in 0..bands {
        let mut line = vec![0u8; mask.width * bytes_per_column];
        for x in 0..mask.width {
            for b in 0..dots {
                let y = band * dots + b;
                if y < mask.height && mask.is_ink(x, y) {
                    line[x * bytes_per_column + (b >> 3)] |= 0x80 >> (b & 0x7);
                }
            }
        }
        rows.push(line);
    }

    PackedBitmap {
        rows,
        density: dots,
    }
}

/// Pack a mask row by row, 8 horizontal dots per byte (MSB = leftmost).
///
/// ## Example
///
/// ```
/// use impresora::render::bitmap::{binarize, pack_raster, PixelGrid};
///
/// // 12×1, all ink: pads to 2 bytes
/// let grid = PixelGrid::new(12, 1, 1, vec![0; 12]).unwrap();
/// let raster = pack_raster(&binarize(&grid));
///
/// assert_eq!(raster.width_bytes, 2);
/// assert_eq!(raster.data, vec![0xFF, 0xF0]);
/// ```
pub fn pack_raster(mask: &BinaryMask) -> RasterBitmap {
    let width_bytes = mask.width.div_ceil(8);
    let mut data = vec![0u8; width_bytes * mask.height];

    for y in 0..mask.height {
        for x in 0..mask.width {
            if mask.is_ink(x, y) {
                data[y * width_bytes + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }

    RasterBitmap {
        width_bytes,
        height: mask.height,
        data,
    }
}

/// A binarized image ready for the image commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoImage {
    mask: BinaryMask,
}

impl MonoImage {
    /// Binarize a pixel grid.
    pub fn from_pixels(grid: &PixelGrid) -> Self {
        Self {
            mask: binarize(grid),
        }
    }

    /// Load and decode an image file, then binarize it.
    ///
    /// # Errors
    ///
    /// [`ImpresoraError::Image`] if the file cannot be read or decoded.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let rgba = image::open(path.as_ref())?.to_rgba8();
        Ok(Self::from_pixels(&PixelGrid::from(rgba)))
    }

    pub fn width(&self) -> usize {
        self.mask.width
    }

    pub fn height(&self) -> usize {
        self.mask.height
    }

    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    /// Bit image bands for the given density class.
    pub fn to_bitmap(&self, density: BitmapDensity) -> PackedBitmap {
        pack_bitmap(&self.mask, density)
    }

    pub fn to_raster(&self) -> RasterBitmap {
        pack_raster(&self.mask)
    }
}

impl From<&PixelGrid> for MonoImage {
    fn from(grid: &PixelGrid) -> Self {
        Self::from_pixels(grid)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_grid(width: usize, height: usize, px: [u8; 4]) -> PixelGrid {
        let data = px.iter().copied().cycle().take(width * height * 4).collect();
        PixelGrid::new(width, height, 4, data).unwrap()
    }

    #[test]
    fn test_pixel_grid_validation() {
        assert!(PixelGrid::new(2, 2, 4, vec![0; 16]).is_ok());
        assert!(PixelGrid::new(2, 2, 4, vec![0; 15]).is_err());
        assert!(PixelGrid::new(2, 2, 0, vec![]).is_err());
        assert!(PixelGrid::new(1, 1, 5, vec![0; 5]).is_err());
    }

    #[test]
    fn test_pixel_grid_dimension_overflow() {
        // usize::MAX / 2 * 2 * 4 wraps; must not slip past the length check
        let err = PixelGrid::new(usize::MAX / 2 + 1, 2, 4, vec![]).unwrap_err();
        assert!(matches!(err, ImpresoraError::InvalidArgument(_)));

        let err = PixelGrid::new(usize::MAX, usize::MAX, 1, vec![0]).unwrap_err();
        assert!(matches!(err, ImpresoraError::InvalidArgument(_)));
    }

    #[test]
    fn test_pixel_grid_get() {
        let grid = PixelGrid::new(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.get(1, 0, 2), 6);
        assert_eq!(grid.get(0, 0, 1), 2);
    }

    #[test]
    fn test_threshold_edges() {
        // 199 is ink, 200 is not
        let grid = PixelGrid::new(
            2,
            1,
            4,
            vec![199, 199, 199, 255, 200, 199, 199, 255],
        )
        .unwrap();
        assert_eq!(binarize(&grid).as_slice(), &[true, false]);
    }

    #[test]
    fn test_saturated_colors_are_not_ink() {
        // Pure red and pure blue are dark by luminance but not by the channel rule
        let grid = PixelGrid::new(2, 1, 3, vec![255, 0, 0, 0, 0, 255]).unwrap();
        assert_eq!(binarize(&grid).as_slice(), &[false, false]);
    }

    #[test]
    fn test_alpha_gate() {
        let faint = rgba_grid(3, 1, [0, 0, 0, 1]);
        assert!(binarize(&faint).as_slice().iter().all(|&b| b));

        let clear = rgba_grid(3, 1, [0, 0, 0, 0]);
        assert!(binarize(&clear).as_slice().iter().all(|&b| !b));
    }

    #[test]
    fn test_gray_alpha_channels() {
        let grid = PixelGrid::new(2, 1, 2, vec![10, 255, 10, 0]).unwrap();
        assert_eq!(binarize(&grid).as_slice(), &[true, false]);
    }

    #[test]
    fn test_bitmap_dimensions() {
        for (w, h) in [(1, 1), (8, 24), (17, 25), (64, 100), (3, 48)] {
            let mask = binarize(&rgba_grid(w, h, [0, 0, 0, 255]));
            for density in [BitmapDensity::S8, BitmapDensity::D24] {
                let dots = density.dots();
                let packed = pack_bitmap(&mask, density);
                assert_eq!(packed.density, dots);
                assert_eq!(packed.rows.len(), h.div_ceil(dots), "{w}x{h} @ {dots}");
                for row in &packed.rows {
                    assert_eq!(row.len(), w * dots / 8);
                }
            }
        }
    }

    #[test]
    fn test_bitmap_all_black() {
        let mask = binarize(&rgba_grid(16, 48, [0, 0, 0, 255]));
        let packed = pack_bitmap(&mask, BitmapDensity::D24);
        assert_eq!(packed.rows.len(), 2);
        assert!(packed.rows.iter().flatten().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_bitmap_all_transparent() {
        let mask = binarize(&rgba_grid(16, 30, [0, 0, 0, 0]));
        let packed = pack_bitmap(&mask, BitmapDensity::D24);
        assert!(packed.rows.iter().flatten().all(|&b| b == 0x00));
    }

    #[test]
    fn test_bitmap_partial_band_is_zero_padded() {
        // 1 column, 10 rows of ink, packed at 24: rows 10-23 blank
        let mask = binarize(&rgba_grid(1, 10, [0, 0, 0, 255]));
        let packed = pack_bitmap(&mask, BitmapDensity::D24);
        assert_eq!(packed.rows, vec![vec![0xFF, 0xC0, 0x00]]);
    }

    #[test]
    fn test_bitmap_column_layout() {
        // Only the top-left pixel and the pixel at (1, 9) are ink
        let mut data = vec![255u8; 2 * 24];
        data[0] = 0;
        data[9 * 2 + 1] = 0;
        let mask = binarize(&PixelGrid::new(2, 24, 1, data).unwrap());
        let packed = pack_bitmap(&mask, BitmapDensity::D24);

        assert_eq!(packed.rows[0], vec![0x80, 0x00, 0x00, 0x00, 0x40, 0x00]);
    }

    #[test]
    fn test_raster_layout() {
        // 10×2: row 0 all ink, row 1 only the last pixel
        let mut data = vec![0u8; 10];
        data.extend(vec![255u8; 9]);
        data.push(0);
        let mask = binarize(&PixelGrid::new(10, 2, 1, data).unwrap());
        let raster = pack_raster(&mask);

        assert_eq!(raster.width_bytes, 2);
        assert_eq!(raster.height, 2);
        assert_eq!(raster.data, vec![0xFF, 0xC0, 0x00, 0x40]);
    }

    #[test]
    fn test_mono_image_from_rgba_image() {
        let img = RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 255]));
        let mono = MonoImage::from_pixels(&PixelGrid::from(&img));

        assert_eq!(mono.width(), 8);
        assert_eq!(mono.height(), 8);
        let bitmap = mono.to_bitmap(BitmapDensity::S8);
        assert_eq!(bitmap.rows, vec![vec![0xFF; 8]]);
        assert_eq!(mono.to_raster().data, vec![0xFF; 8]);
    }

    #[test]
    fn test_packing_is_deterministic() {
        let mask = binarize(&rgba_grid(13, 29, [10, 20, 30, 255]));
        assert_eq!(pack_bitmap(&mask, BitmapDensity::D24), pack_bitmap(&mask, BitmapDensity::D24));
        assert_eq!(pack_raster(&mask), pack_raster(&mask));
    }
}
