//! # ESC/POS Protocol Commands
//!
//! This module implements the basic ESC/POS command set: initialization,
//! hardware control, feed control, spacing, margins, paper cutting, the cash
//! drawer pulse and a few vendor extras (color ribbon, buzzer, Star cut).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `FF`, `CR`, `HT`, `VT`
//! - Two bytes: `ESC @`, `ESC 2`
//! - Multi-byte with parameters: `ESC 3 n`, `GS V m`, `ESC p m t1 t2`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`
//!
//! ## Reference
//!
//! Based on the Epson "ESC/POS Application Programming Guide" command
//! tables, which most thermal receipt printers clone.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for barcodes, 2D symbols, raster images, character size and cutting.
pub const GS: u8 = 0x1D;

/// FS (File Separator) - Kanji / extended command prefix
pub const FS: u8 = 0x1C;

/// NUL - Terminates barcode payloads
pub const NUL: u8 = 0x00;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Print and eject in page mode
pub const FF: u8 = 0x0C;

/// CR (Carriage Return)
pub const CR: u8 = 0x0D;

/// HT (Horizontal Tab) - Advance to next tab position
pub const HT: u8 = 0x09;

/// VT (Vertical Tab)
pub const VT: u8 = 0x0B;

/// End-of-line marker appended after text lines and bitmap bands
pub const EOL: &[u8] = b"\n";

// ============================================================================
// INITIALIZATION AND HARDWARE
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use impresora::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// Hardware control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hardware {
    /// `ESC @` - clear buffer, reset modes
    Init,
    /// `ESC = 1` - select the printer as the peripheral device
    Select,
    /// `ESC ? LF NUL` - reset
    Reset,
}

/// # Hardware Control
///
/// | Command | Hex |
/// |---------|-----|
/// | Init    | 1B 40 |
/// | Select  | 1B 3D 01 |
/// | Reset   | 1B 3F 0A 00 |
pub fn hardware(hw: Hardware) -> Vec<u8> {
    match hw {
        Hardware::Init => init(),
        Hardware::Select => vec![ESC, b'=', 0x01],
        Hardware::Reset => vec![ESC, b'?', LF, NUL],
    }
}

// ============================================================================
// FEED CONTROL
// ============================================================================

/// Feed control sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedControl {
    /// Print and line feed
    Lf,
    /// Print and feed paper without spacing between lines
    Glf,
    /// Form feed
    Ff,
    /// Carriage return
    Cr,
    /// Horizontal tab
    Ht,
    /// Vertical tab
    Vt,
}

/// # Feed Control Sequence
///
/// | Control | Hex   |
/// |---------|-------|
/// | LF      | 0A    |
/// | GLF     | 4A 00 |
/// | FF      | 0C    |
/// | CR      | 0D    |
/// | HT      | 09    |
/// | VT      | 0B    |
///
/// `GLF` is sent without an `ESC` prefix, matching the ESC/POS driver tables
/// most firmware clones ship with.
pub fn control(ctrl: FeedControl) -> Vec<u8> {
    match ctrl {
        FeedControl::Lf => vec![LF],
        FeedControl::Glf => vec![b'J', 0x00],
        FeedControl::Ff => vec![FF],
        FeedControl::Cr => vec![CR],
        FeedControl::Ht => vec![HT],
        FeedControl::Vt => vec![VT],
    }
}

// ============================================================================
// LINE AND CHARACTER SPACING
// ============================================================================

/// # Select Default Line Spacing (ESC 2)
///
/// Restores the firmware's default line spacing (about 1/6 inch).
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 2 |
/// | Hex     | 1B 32 |
#[inline]
pub fn line_spacing_default() -> Vec<u8> {
    vec![ESC, b'2']
}

/// # Set Line Spacing (ESC 3 n)
///
/// Sets line spacing to `n` motion units. Bitmap images are sent with
/// `n = 0` so consecutive bands touch.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC 3 n  |
/// | Hex     | 1B 33 n  |
#[inline]
pub fn line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

/// # Reset Character Spacing (ESC SP 0)
#[inline]
pub fn char_spacing_default() -> Vec<u8> {
    vec![ESC, b' ', 0x00]
}

/// # Set Right-Side Character Spacing (ESC SP n)
#[inline]
pub fn char_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b' ', n]
}

// ============================================================================
// MARGINS
// ============================================================================

/// Bottom margin (`ESC O n`)
#[inline]
pub fn margin_bottom(n: u8) -> Vec<u8> {
    vec![ESC, b'O', n]
}

/// Left margin (`ESC l n`)
#[inline]
pub fn margin_left(n: u8) -> Vec<u8> {
    vec![ESC, b'l', n]
}

/// Right margin (`ESC Q n`)
#[inline]
pub fn margin_right(n: u8) -> Vec<u8> {
    vec![ESC, b'Q', n]
}

// ============================================================================
// CHARACTER CODE TABLE
// ============================================================================

/// # Select Character Code Table (ESC t n)
///
/// Selects the printer-side code page. The page number is firmware
/// specific (Epson uses 19 for PC858, for example), so it is passed through
/// unchecked.
#[inline]
pub fn character_code_table(n: u8) -> Vec<u8> {
    vec![ESC, b't', n]
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Full Cut (GS V 0)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0x00]
}

/// # Partial Cut (GS V 1)
///
/// Leaves a small "hinge" connecting the receipt to the roll. Not every
/// cutter supports it; those that don't perform a full cut.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 1   |
/// | Hex     | 1D 56 01 |
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', 0x01]
}

/// # Star Line Mode Full Cut (ESC d 2)
///
/// Star printers running in Star Line emulation ignore `GS V`; this feeds to
/// the cutter and cuts.
#[inline]
pub fn star_full_cut() -> Vec<u8> {
    vec![ESC, b'd', 0x02]
}

// ============================================================================
// PERIPHERALS
// ============================================================================

/// Cash drawer connector pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CashDrawerPin {
    /// Drawer kick-out connector pin 2
    #[default]
    Pin2,
    /// Drawer kick-out connector pin 5
    Pin5,
}

/// # Generate Pulse (ESC p m t1 t2)
///
/// Kicks the cash drawer with a 50ms on / 240ms off pulse.
///
/// | Pin | Hex |
/// |-----|-----|
/// | 2   | 1B 70 00 19 78 |
/// | 5   | 1B 70 01 19 78 |
pub fn cash_drawer(pin: CashDrawerPin) -> Vec<u8> {
    let m = match pin {
        CashDrawerPin::Pin2 => 0x00,
        CashDrawerPin::Pin5 => 0x01,
    };
    vec![ESC, b'p', m, 0x19, 0x78]
}

/// # Buzzer (ESC B n t)
///
/// Sounds the buzzer `times` times, each `duration × 100` ms long.
#[inline]
pub fn beep(times: u8, duration: u8) -> Vec<u8> {
    vec![ESC, b'B', times, duration]
}

/// Print color on two-color printers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintColor {
    /// Primary color (black)
    #[default]
    Primary,
    /// Secondary color (usually red)
    Secondary,
}

/// # Select Print Color (ESC r n)
pub fn color(color: PrintColor) -> Vec<u8> {
    match color {
        PrintColor::Primary => vec![ESC, b'r', 0x00],
        PrintColor::Secondary => vec![ESC, b'r', 0x01],
    }
}

/// # White/Black Reverse Printing (GS B n)
///
/// The operand is the ASCII digit `'1'` / `'0'`, which firmware treats the
/// same as the binary values since only the low bit is read.
pub fn reverse_colors(reverse: bool) -> Vec<u8> {
    vec![GS, b'B', if reverse { b'1' } else { b'0' }]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use impresora::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_hardware() {
        assert_eq!(hardware(Hardware::Init), vec![0x1B, 0x40]);
        assert_eq!(hardware(Hardware::Select), vec![0x1B, 0x3D, 0x01]);
        assert_eq!(hardware(Hardware::Reset), vec![0x1B, 0x3F, 0x0A, 0x00]);
    }

    #[test]
    fn test_control() {
        assert_eq!(control(FeedControl::Lf), vec![0x0A]);
        assert_eq!(control(FeedControl::Glf), vec![0x4A, 0x00]);
        assert_eq!(control(FeedControl::Ff), vec![0x0C]);
        assert_eq!(control(FeedControl::Cr), vec![0x0D]);
        assert_eq!(control(FeedControl::Ht), vec![0x09]);
        assert_eq!(control(FeedControl::Vt), vec![0x0B]);
    }

    #[test]
    fn test_line_spacing() {
        assert_eq!(line_spacing_default(), vec![0x1B, 0x32]);
        assert_eq!(line_spacing(0), vec![0x1B, 0x33, 0x00]);
        assert_eq!(line_spacing(30), vec![0x1B, 0x33, 30]);
    }

    #[test]
    fn test_char_spacing() {
        assert_eq!(char_spacing_default(), vec![0x1B, 0x20, 0x00]);
        assert_eq!(char_spacing(4), vec![0x1B, 0x20, 0x04]);
    }

    #[test]
    fn test_margins() {
        assert_eq!(margin_bottom(5), vec![0x1B, 0x4F, 5]);
        assert_eq!(margin_left(6), vec![0x1B, 0x6C, 6]);
        assert_eq!(margin_right(7), vec![0x1B, 0x51, 7]);
    }

    #[test]
    fn test_cuts() {
        assert_eq!(cut_full(), vec![0x1D, 0x56, 0x00]);
        assert_eq!(cut_partial(), vec![0x1D, 0x56, 0x01]);
        assert_eq!(star_full_cut(), vec![0x1B, 0x64, 0x02]);
    }

    #[test]
    fn test_cash_drawer() {
        assert_eq!(
            cash_drawer(CashDrawerPin::Pin2),
            vec![0x1B, 0x70, 0x00, 0x19, 0x78]
        );
        assert_eq!(
            cash_drawer(CashDrawerPin::Pin5),
            vec![0x1B, 0x70, 0x01, 0x19, 0x78]
        );
    }

    #[test]
    fn test_color_and_reverse() {
        assert_eq!(color(PrintColor::Primary), vec![0x1B, 0x72, 0x00]);
        assert_eq!(color(PrintColor::Secondary), vec![0x1B, 0x72, 0x01]);
        assert_eq!(reverse_colors(true), vec![0x1D, 0x42, 0x31]);
        assert_eq!(reverse_colors(false), vec![0x1D, 0x42, 0x30]);
    }

    #[test]
    fn test_beep_and_code_table() {
        assert_eq!(beep(2, 3), vec![0x1B, 0x42, 2, 3]);
        assert_eq!(character_code_table(19), vec![0x1B, 0x74, 19]);
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
    }
}
