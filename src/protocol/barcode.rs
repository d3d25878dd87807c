//! # ESC/POS Barcode Commands
//!
//! This module implements the 1D barcode command family (`GS k`) with its
//! setup commands, and the generic 2D symbol command used for QR codes.
//!
//! ## 1D Barcode Sequence
//!
//! A barcode is printed by sending the setup commands followed by the
//! symbol itself:
//!
//! ```text
//! GS w n     module width
//! GS h n     bar height in dots
//! GS f n     HRI font
//! GS H n     HRI position
//! GS k m d1...dk NUL
//! ```
//!
//! ```
//! use impresora::protocol::barcode::barcode1d::{self, BarcodeType, HriPosition};
//!
//! let mut data = Vec::new();
//! data.extend(barcode1d::width(Some(2)));
//! data.extend(barcode1d::height(Some(80)));
//! data.extend(barcode1d::hri_position(HriPosition::Below));
//! data.extend(barcode1d::select(BarcodeType::Code39));
//! data.extend(b"12345\0");
//! ```
//!
//! ## QR Codes
//!
//! The default QR path uses the 2D symbol command (`GS Z` + `ESC Z`), which
//! takes version, level and module size inline with the payload. Printers
//! with a different 2D command family live in [`super::qsprinter`].

use super::commands::{ESC, GS};

// ============================================================================
// 1D BARCODE COMMANDS (GS k)
// ============================================================================

/// 1D Barcode command builders
pub mod barcode1d {
    use std::str::FromStr;

    use super::GS;
    use crate::error::ImpresoraError;

    /// 1D Barcode symbologies
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BarcodeType {
        /// UPC-A (11-12 digits)
        UpcA,
        /// UPC-E (compressed UPC-A)
        UpcE,
        /// EAN-13 / JAN-13 (12 digits + check digit)
        Ean13,
        /// EAN-8 / JAN-8 (7 digits + check digit)
        Ean8,
        /// Code39 (A-Z, 0-9, space, -.$/%+)
        Code39,
        /// ITF (Interleaved 2 of 5, numeric pairs)
        Itf,
        /// NW-7 / Codabar
        Nw7,
        /// Code93 (full ASCII)
        Code93,
        /// Code128 (full ASCII)
        Code128,
    }

    impl BarcodeType {
        /// The `m` operand of `GS k m`.
        ///
        /// The first seven symbologies use the NUL-terminated form
        /// (`m` = 0..6). Code93 and Code128 only exist in the second
        /// command family (`m` = 72, 73).
        pub const fn opcode(self) -> u8 {
            match self {
                BarcodeType::UpcA => 0x00,
                BarcodeType::UpcE => 0x01,
                BarcodeType::Ean13 => 0x02,
                BarcodeType::Ean8 => 0x03,
                BarcodeType::Code39 => 0x04,
                BarcodeType::Itf => 0x05,
                BarcodeType::Nw7 => 0x06,
                BarcodeType::Code93 => b'H',
                BarcodeType::Code128 => b'I',
            }
        }

        /// Symbologies that only encode digits.
        pub const fn is_numeric(self) -> bool {
            matches!(
                self,
                BarcodeType::UpcA
                    | BarcodeType::UpcE
                    | BarcodeType::Ean13
                    | BarcodeType::Ean8
                    | BarcodeType::Itf
            )
        }

        /// Exact payload length required before the check digit, if any.
        pub const fn required_digits(self) -> Option<usize> {
            match self {
                BarcodeType::Ean13 => Some(12),
                BarcodeType::Ean8 => Some(7),
                _ => None,
            }
        }

        /// Symbologies whose check digit the host computes.
        pub const fn has_parity(self) -> bool {
            matches!(self, BarcodeType::Ean13 | BarcodeType::Ean8)
        }

        /// Symbologies in the `m = 65..` family, which carry an explicit
        /// payload length byte.
        pub const fn has_length_prefix(self) -> bool {
            matches!(self, BarcodeType::Code93 | BarcodeType::Code128)
        }
    }

    impl FromStr for BarcodeType {
        type Err = ImpresoraError;

        /// Parses `UPC_A`, `UPC-A`, `EAN13`, ... (case-insensitive).
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let name = s.trim().to_ascii_uppercase().replace('-', "_");
            match name.as_str() {
                "" => Err(ImpresoraError::invalid("barcode type is required")),
                "UPC_A" => Ok(Self::UpcA),
                "UPC_E" => Ok(Self::UpcE),
                "EAN13" => Ok(Self::Ean13),
                "EAN8" => Ok(Self::Ean8),
                "CODE39" => Ok(Self::Code39),
                "ITF" => Ok(Self::Itf),
                "NW7" => Ok(Self::Nw7),
                "CODE93" => Ok(Self::Code93),
                "CODE128" => Ok(Self::Code128),
                _ => Err(ImpresoraError::invalid(format!(
                    "unknown barcode type '{s}'"
                ))),
            }
        }
    }

    /// HRI (Human Readable Interpretation) position
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum HriPosition {
        /// No HRI text printed
        Off = 0,
        /// HRI above barcode
        Above = 1,
        /// HRI below barcode (default)
        #[default]
        Below = 2,
        /// HRI both above and below
        Both = 3,
    }

    impl FromStr for HriPosition {
        type Err = ImpresoraError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "off" => Ok(Self::Off),
                "abv" | "above" => Ok(Self::Above),
                "blw" | "below" => Ok(Self::Below),
                "bth" | "both" => Ok(Self::Both),
                other => Err(ImpresoraError::invalid(format!(
                    "unknown HRI position '{other}'"
                ))),
            }
        }
    }

    /// HRI font selection
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum HriFont {
        #[default]
        A = 0,
        B = 1,
    }

    /// # Set Barcode Width (GS w n)
    ///
    /// Widths 1-5 map to module widths of 2-6 dots. Anything else (or
    /// `None`) selects the narrowest setting, `GS w 1`.
    ///
    /// | Width | Hex |
    /// |-------|-----|
    /// | default | 1D 77 01 |
    /// | 1 | 1D 77 02 |
    /// | 5 | 1D 77 06 |
    pub fn width(width: Option<u8>) -> Vec<u8> {
        match width {
            Some(w @ 1..=5) => vec![GS, b'w', w + 1],
            _ => vec![GS, b'w', 0x01],
        }
    }

    /// Default bar height used when none (or 0) is requested: 100 dots.
    pub const DEFAULT_HEIGHT: u8 = 0x64;

    /// # Set Barcode Height (GS h n)
    ///
    /// `None` and `Some(0)` fall back to [`DEFAULT_HEIGHT`].
    pub fn height(height: Option<u8>) -> Vec<u8> {
        match height {
            Some(h @ 1..=255) => vec![GS, b'h', h],
            _ => vec![GS, b'h', DEFAULT_HEIGHT],
        }
    }

    /// # Select HRI Font (GS f n)
    pub fn hri_font(font: HriFont) -> Vec<u8> {
        vec![GS, b'f', font as u8]
    }

    /// # Select HRI Position (GS H n)
    pub fn hri_position(position: HriPosition) -> Vec<u8> {
        vec![GS, b'H', position as u8]
    }

    /// # Select Symbology (GS k m)
    ///
    /// Only the command prefix; the caller appends the payload and the
    /// terminator.
    pub fn select(barcode_type: BarcodeType) -> Vec<u8> {
        vec![GS, b'k', barcode_type.opcode()]
    }

    /// Compute the EAN/UPC check digit for a string of ASCII digits.
    ///
    /// Digits are weighted 3, 1, 3, 1, ... starting from the rightmost one;
    /// the check digit brings the weighted sum up to a multiple of 10.
    ///
    /// ## Example
    ///
    /// ```
    /// use impresora::protocol::barcode::barcode1d::parity_digit;
    ///
    /// assert_eq!(parity_digit("400638133393"), b'1');
    /// assert_eq!(parity_digit("9638507"), b'4');
    /// ```
    pub fn parity_digit(digits: &str) -> u8 {
        let sum: u32 = digits
            .bytes()
            .rev()
            .enumerate()
            .map(|(i, d)| {
                let value = u32::from(d.wrapping_sub(b'0'));
                if i % 2 == 0 { value * 3 } else { value }
            })
            .sum();
        let check = (10 - sum % 10) % 10;
        b'0' + check as u8
    }
}

// ============================================================================
// QR CODE COMMANDS (GS Z / ESC Z)
// ============================================================================

/// QR Code command builders for the generic 2D symbol command
pub mod qr {
    use std::str::FromStr;

    use super::{ESC, GS};
    use crate::error::ImpresoraError;
    use crate::protocol::commands::u16_le;

    /// Default symbol version
    pub const DEFAULT_VERSION: u8 = 3;

    /// Default module size in dots
    pub const DEFAULT_SIZE: u8 = 6;

    /// QR Code error correction level
    ///
    /// | Level | Recovery |
    /// |-------|----------|
    /// | L | ~7% |
    /// | M | ~15% |
    /// | Q | ~25% |
    /// | H | ~30% |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrLevel {
        #[default]
        L = 0,
        M = 1,
        Q = 2,
        H = 3,
    }

    impl QrLevel {
        /// ASCII letter used as the level operand of `ESC Z`.
        pub const fn letter(self) -> u8 {
            match self {
                QrLevel::L => b'L',
                QrLevel::M => b'M',
                QrLevel::Q => b'Q',
                QrLevel::H => b'H',
            }
        }
    }

    impl FromStr for QrLevel {
        type Err = ImpresoraError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "l" => Ok(Self::L),
                "m" => Ok(Self::M),
                "q" => Ok(Self::Q),
                "h" => Ok(Self::H),
                other => Err(ImpresoraError::invalid(format!(
                    "unknown QR error correction level '{other}'"
                ))),
            }
        }
    }

    /// # Print QR Symbol (GS Z 2, ESC Z v r n nL nH d1...dk)
    ///
    /// ## Protocol Details
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS Z 2 ESC Z v r n nL nH d1...dk |
    /// | Hex     | 1D 5A 02 1B 5A v r n nL nH d1...dk |
    ///
    /// ## Parameters
    ///
    /// - `v`: symbol version
    /// - `r`: error correction level letter (`L`, `M`, `Q`, `H`)
    /// - `n`: module size in dots
    /// - `nL, nH`: payload length, little-endian
    ///
    /// ## Example
    ///
    /// ```
    /// use impresora::protocol::barcode::qr::{self, QrLevel};
    ///
    /// let cmd = qr::symbol(b"hi", 3, QrLevel::L, 6);
    /// assert_eq!(cmd, vec![0x1D, 0x5A, 0x02, 0x1B, 0x5A, 3, b'L', 6, 2, 0, b'h', b'i']);
    /// ```
    pub fn symbol(data: &[u8], version: u8, level: QrLevel, size: u8) -> Vec<u8> {
        debug_assert!(
            data.len() <= u16::MAX as usize,
            "QR payload must fit a 16-bit length, got {}",
            data.len()
        );

        let [nl, nh] = u16_le(data.len() as u16);
        let mut cmd = Vec::with_capacity(10 + data.len());
        cmd.extend_from_slice(&[GS, b'Z', 0x02]);
        cmd.extend_from_slice(&[ESC, b'Z']);
        cmd.push(version);
        cmd.push(level.letter());
        cmd.push(size);
        cmd.push(nl);
        cmd.push(nh);
        cmd.extend_from_slice(data);
        cmd
    }
}

// ============================================================================
// TESTS
// ============================================================================
