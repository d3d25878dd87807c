//! # ESC/POS Graphics Commands
//!
//! This module implements the two image command families.
//!
//! ## Graphics Modes Overview
//!
//! | Mode | Command | Description |
//! |------|---------|-------------|
//! | Bit image | ESC * m | One band of 8 or 24 dot rows per command |
//! | Raster | GS v 0 m | Whole image, row-major |
//!
//! ## Bit Image Layout
//!
//! A bit image band is sent column by column. Each column is `density / 8`
//! bytes; bit 7 of the first byte is the top dot:
//!
//! ```text
//! 24-dot band, column x:
//!   byte 0  rows 0-7    (bit 7 = row 0)
//!   byte 1  rows 8-15
//!   byte 2  rows 16-23
//! ```
//!
//! ## Raster Layout
//!
//! Raster data is row-major, each byte holding 8 horizontal dots with bit 7
//! the leftmost:
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! ```

use std::str::FromStr;

use super::commands::{ESC, GS, u16_le};
use crate::error::ImpresoraError;

// ============================================================================
// BIT IMAGE MODE (ESC *)
// ============================================================================

/// Bit image density classes
///
/// | Density | m | Dots per column | Horizontal |
/// |---------|---|-----------------|------------|
/// | S8 | 0 | 8 | single |
/// | D8 | 1 | 8 | double |
/// | S24 | 32 | 24 | single |
/// | D24 | 33 | 24 | double |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitmapDensity {
    S8,
    D8,
    S24,
    #[default]
    D24,
}

impl BitmapDensity {
    /// The `m` operand of `ESC * m`.
    pub const fn mode(self) -> u8 {
        match self {
            BitmapDensity::S8 => 0x00,
            BitmapDensity::D8 => 0x01,
            BitmapDensity::S24 => 0x20,
            BitmapDensity::D24 => 0x21,
        }
    }

    /// Dot rows packed per band: 8 or 24.
    pub const fn dots(self) -> usize {
        match self {
            BitmapDensity::S8 | BitmapDensity::D8 => 8,
            BitmapDensity::S24 | BitmapDensity::D24 => 24,
        }
    }

    /// Bytes sent per column of a band.
    pub const fn bytes_per_column(self) -> usize {
        self.dots() / 8
    }
}

impl FromStr for BitmapDensity {
    type Err = ImpresoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s8" => Ok(Self::S8),
            "d8" => Ok(Self::D8),
            "s24" => Ok(Self::S24),
            "d24" => Ok(Self::D24),
            other => Err(ImpresoraError::invalid(format!(
                "unknown bitmap density '{other}'"
            ))),
        }
    }
}

/// # Select Bit-Image Mode (ESC * m nL nH d1...dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC * m nL nH d1...dk |
/// | Hex     | 1B 2A m nL nH d1...dk |
///
/// ## Parameters
///
/// - `m`: density (see [`BitmapDensity`])
/// - `nL, nH`: number of columns, little-endian
/// - `d1...dk`: `columns × density / 8` bytes
///
/// ## Example
///
/// ```
/// use impresora::protocol::graphics::{bit_image, BitmapDensity};
///
/// // 2 columns of 24 dots = 6 bytes
/// let cmd = bit_image(BitmapDensity::D24, &[0xFF; 6]);
/// assert_eq!(&cmd[..5], &[0x1B, 0x2A, 0x21, 2, 0]);
/// ```
pub fn bit_image(density: BitmapDensity, band: &[u8]) -> Vec<u8> {
    let columns = band.len() / density.bytes_per_column();
    debug_assert!(
        columns <= u16::MAX as usize,
        "Bit image band too wide: {} columns",
        columns
    );
    debug_assert!(
        band.len() % density.bytes_per_column() == 0,
        "Band length {} is not a multiple of {}",
        band.len(),
        density.bytes_per_column()
    );

    let [nl, nh] = u16_le(columns as u16);
    let mut cmd = Vec::with_capacity(5 + band.len());
    cmd.push(ESC);
    cmd.push(b'*');
    cmd.push(density.mode());
    cmd.push(nl);
    cmd.push(nh);
    cmd.extend_from_slice(band);
    cmd
}

// ============================================================================
// RASTER MODE (GS v 0)
// ============================================================================

/// Raster scaling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterMode {
    #[default]
    Normal = 0,
    DoubleWidth = 1,
    DoubleHeight = 2,
    /// Double width and double height
    Quadruple = 3,
}

impl FromStr for RasterMode {
    type Err = ImpresoraError;

    /// `dhdw`, `dwh` and `dhw` are accepted as spellings of `dwdh`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "dw" => Ok(Self::DoubleWidth),
            "dh" => Ok(Self::DoubleHeight),
            "dwdh" | "dhdw" | "dwh" | "dhw" => Ok(Self::Quadruple),
            other => Err(ImpresoraError::invalid(format!(
                "unknown raster mode '{other}'"
            ))),
        }
    }
}

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: scaling (see [`RasterMode`])
/// - `xL, xH`: width in **bytes**, little-endian
/// - `yL, yH`: height in dots, little-endian
/// - `d1...dk`: `width_bytes × height` bytes
pub fn raster(mode: RasterMode, width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() == width_bytes as usize * height as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        width_bytes as usize * height as usize,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(mode as u8);
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_modes() {
        assert_eq!(BitmapDensity::S8.mode(), 0x00);
        assert_eq!(BitmapDensity::D8.mode(), 0x01);
        assert_eq!(BitmapDensity::S24.mode(), 0x20);
        assert_eq!(BitmapDensity::D24.mode(), 0x21);
        assert_eq!(BitmapDensity::D8.dots(), 8);
        assert_eq!(BitmapDensity::S24.bytes_per_column(), 3);
    }

    #[test]
    fn test_density_parse() {
        assert_eq!("D24".parse::<BitmapDensity>().unwrap(), BitmapDensity::D24);
        assert_eq!("s8".parse::<BitmapDensity>().unwrap(), BitmapDensity::S8);
        assert!("d16".parse::<BitmapDensity>().is_err());
    }

    #[test]
    fn test_bit_image_header() {
        let band = vec![0xAA; 300];
        let cmd = bit_image(BitmapDensity::S8, &band);

        assert_eq!(&cmd[..3], &[0x1B, 0x2A, 0x00]);
        // 300 columns = 0x012C
        assert_eq!(cmd[3], 0x2C);
        assert_eq!(cmd[4], 0x01);
        assert_eq!(&cmd[5..], &band[..]);
    }

    #[test]
    fn test_bit_image_24_counts_columns() {
        let cmd = bit_image(BitmapDensity::S24, &[0u8; 30]);
        assert_eq!(cmd[3], 10);
        assert_eq!(cmd.len(), 5 + 30);
    }

    #[test]
    fn test_raster_header() {
        let data = vec![0xFF; 72 * 100];
        let cmd = raster(RasterMode::Normal, 72, 100, &data);

        assert_eq!(&cmd[..4], &[0x1D, 0x76, 0x30, 0x00]);
        assert_eq!(cmd[4], 72); // xL
        assert_eq!(cmd[5], 0); // xH
        assert_eq!(cmd[6], 100); // yL
        assert_eq!(cmd[7], 0); // yH
        assert_eq!(cmd.len(), 8 + 72 * 100);
    }

    #[test]
    fn test_raster_large_height() {
        let height: u16 = 500;
        let data = vec![0x00; 2 * height as usize];
        let cmd = raster(RasterMode::Quadruple, 2, height, &data);

        assert_eq!(cmd[3], 3);
        // 500 = 0x01F4 -> [0xF4, 0x01] in little-endian
        assert_eq!(cmd[6], 0xF4);
        assert_eq!(cmd[7], 0x01);
    }

    #[test]
    fn test_raster_mode_aliases() {
        for alias in ["dwdh", "dhdw", "dwh", "dhw"] {
            assert_eq!(alias.parse::<RasterMode>().unwrap(), RasterMode::Quadruple);
        }
        assert_eq!("dw".parse::<RasterMode>().unwrap(), RasterMode::DoubleWidth);
        assert!("triple".parse::<RasterMode>().is_err());
    }
}
