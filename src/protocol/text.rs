//! # ESC/POS Text Formatting Commands
//!
//! This module implements text formatting commands: alignment, font
//! selection, character size and the emphasis toggles (bold, italic,
//! underline).
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | **Emphasized** text |
//! | Italic | ESC 4 / ESC 5 | *Slanted* text |
//! | Underline | ESC - n | 1-dot or 2-dot underline |
//! | Size | GS ! n | 1x-8x width and height |
//!
//! ## Font Selection
//!
//! | Font | Columns (80mm) |
//! |------|----------------|
//! | Font A | 48 chars |
//! | Font B | 56 chars |
//! | Font C | 56 chars |

use std::str::FromStr;

use super::commands::{ESC, GS};
use crate::error::ImpresoraError;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl FromStr for Alignment {
    type Err = ImpresoraError;

    /// Accepts the short driver names (`lt`, `ct`, `rt`) and the long ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lt" | "left" => Ok(Self::Left),
            "ct" | "center" => Ok(Self::Center),
            "rt" | "right" => Ok(Self::Right),
            other => Err(ImpresoraError::invalid(format!(
                "unknown alignment '{other}'"
            ))),
        }
    }
}

/// # Select Justification (ESC a n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// ## Parameters
///
/// - `n = 0`: Left alignment (default)
/// - `n = 1`: Center alignment
/// - `n = 2`: Right alignment
///
/// ## Example
///
/// ```
/// use impresora::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots
    #[default]
    A = 0,
    /// Font B: 9×17 dots
    B = 1,
    /// Font C: vendor specific, same column count as B
    C = 2,
}

impl Font {
    /// Number of characters that fit on one 80mm line with this font.
    pub const fn columns(self) -> usize {
        match self {
            Font::A => 48,
            Font::B | Font::C => 56,
        }
    }
}

impl FromStr for Font {
    type Err = ImpresoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            other => Err(ImpresoraError::invalid(format!("unknown font '{other}'"))),
        }
    }
}

/// # Select Character Font (ESC M n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC M n |
/// | Hex     | 1B 4D n |
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Normal Character Mode (ESC ! 0)
///
/// Clears the print mode byte: font A, no double width/height, no emphasis
/// or underline from print mode.
#[inline]
pub fn normal() -> Vec<u8> {
    vec![ESC, b'!', 0x00]
}

/// # Select Character Size (GS ! n)
///
/// Width and height multipliers from 1 to 8 (out-of-range values are
/// clamped). The operand packs `(width - 1)` in the high nibble and
/// `(height - 1)` in the low nibble.
///
/// ## Example
///
/// ```
/// use impresora::protocol::text::custom_size;
///
/// // Double width, double height
/// assert_eq!(custom_size(2, 2), vec![0x1D, 0x21, 0x11]);
/// ```
pub fn custom_size(width: u8, height: u8) -> Vec<u8> {
    let width = width.clamp(1, 8);
    let height = height.clamp(1, 8);
    vec![GS, b'!', ((width - 1) << 4) | (height - 1)]
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// Bold on (`ESC E 1`)
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E', 0x01]
}

/// Bold off (`ESC E 0`)
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'E', 0x00]
}

/// Italic on (`ESC 4`)
#[inline]
pub fn italic_on() -> Vec<u8> {
    vec![ESC, b'4']
}

/// Italic off (`ESC 5`)
#[inline]
pub fn italic_off() -> Vec<u8> {
    vec![ESC, b'5']
}

/// Underline weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underline {
    #[default]
    Off = 0,
    /// 1-dot underline
    Single = 1,
    /// 2-dot underline
    Double = 2,
}

impl TryFrom<u8> for Underline {
    type Error = ImpresoraError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::Single),
            2 => Ok(Self::Double),
            n => Err(ImpresoraError::invalid(format!(
                "underline level must be 0, 1 or 2, got {n}"
            ))),
        }
    }
}

impl From<bool> for Underline {
    fn from(on: bool) -> Self {
        if on { Self::Single } else { Self::Off }
    }
}

/// # Underline Mode (ESC - n)
pub fn underline(weight: Underline) -> Vec<u8> {
    vec![ESC, b'-', weight as u8]
}

/// Star Line Mode "select emphasized printing" (`ESC E`, no operand)
#[inline]
pub fn star_emphasize() -> Vec<u8> {
    vec![ESC, b'E']
}

/// Star Line Mode "cancel emphasized printing" (`ESC F`)
#[inline]
pub fn star_cancel_emphasize() -> Vec<u8> {
    vec![ESC, b'F']
}

// ============================================================================
// TEXT STYLE
// ============================================================================

/// Combined emphasis state: bold, italic and underline weight.
///
/// Can be parsed from the compact token form used by receipt templates:
/// `normal`, or any concatenation of `b`, `i` and `u`/`u2` in that order
/// (`b`, `i`, `u`, `u2`, `bi`, `biu`, `biu2`, `bu`, `bu2`, `iu`, `iu2`).
///
/// ## Example
///
/// ```
/// use impresora::protocol::text::{TextStyle, Underline};
///
/// let parsed: TextStyle = "biu2".parse().unwrap();
/// assert_eq!(parsed, TextStyle::new(true, true, Underline::Double));
/// assert_eq!(parsed.to_bytes(), TextStyle::new(true, true, Underline::Double).to_bytes());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: Underline,
}

impl TextStyle {
    /// Style with every toggle off.
    pub const NORMAL: Self = Self {
        bold: false,
        italic: false,
        underline: Underline::Off,
    };

    pub fn new(bold: bool, italic: bool, underline: Underline) -> Self {
        Self {
            bold,
            italic,
            underline,
        }
    }

    /// Emit all three toggles, always in bold / italic / underline order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut cmds = Vec::with_capacity(8);
        cmds.extend(if self.bold { bold_on() } else { bold_off() });
        cmds.extend(if self.italic { italic_on() } else { italic_off() });
        cmds.extend(underline(self.underline));
        cmds
    }
}

impl FromStr for TextStyle {
    type Err = ImpresoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.to_ascii_lowercase();
        let style = match token.as_str() {
            "normal" => Self::NORMAL,
            "b" => Self::new(true, false, Underline::Off),
            "i" => Self::new(false, true, Underline::Off),
            "u" => Self::new(false, false, Underline::Single),
            "u2" => Self::new(false, false, Underline::Double),
            "bi" => Self::new(true, true, Underline::Off),
            "biu" => Self::new(true, true, Underline::Single),
            "biu2" => Self::new(true, true, Underline::Double),
            "bu" => Self::new(true, false, Underline::Single),
            "bu2" => Self::new(true, false, Underline::Double),
            "iu" => Self::new(false, true, Underline::Single),
            "iu2" => Self::new(false, true, Underline::Double),
            _ => {
                return Err(ImpresoraError::invalid(format!(
                    "unknown style token '{s}'"
                )));
            }
        };
        Ok(style)
    }
}

// ============================================================================
// TESTS
// ============================================================================
