//! # QsPrinter Extension Commands
//!
//! QsPrinter-family firmware (as of v7.5) lacks the barcode width and HRI
//! font commands and replaces the generic 2D symbol command with a
//! store-then-print `GS ( k` family. Barcodes must be bracketed by a
//! vendor "barcode mode" toggle.
//!
//! ## QR Sequence
//!
//! ```text
//! ESC # # Q P I X n          module size (1-24)
//! GS ( k 3 0 '1' 'C' v       version (1-16)
//! GS ( k 3 0 '1' 'E' r       error correction ('0'-'3')
//! GS ( k pL pH '1' 'P' '0' d1...dk   store payload
//! GS ( k pL pH '1' 'Q' '0'           print stored symbol
//! ```
//!
//! where `pL pH` is the payload length plus [`QR_LEN_OFFSET`].

use super::barcode::qr::QrLevel;
use super::commands::{ESC, GS, u16_le};

/// Barcode height used when none is requested (162 dots)
pub const BARCODE_HEIGHT_DEFAULT: u8 = 0xA2;

/// Smallest QR module size in dots
pub const QR_SIZE_MIN: u8 = 1;
/// Largest QR module size in dots
pub const QR_SIZE_MAX: u8 = 24;
/// QR module size used when none is requested
pub const QR_SIZE_DEFAULT: u8 = 12;

/// Smallest QR version
pub const QR_VERSION_MIN: u8 = 1;
/// Largest QR version
pub const QR_VERSION_MAX: u8 = 16;
/// QR version used when none is requested
pub const QR_VERSION_DEFAULT: u8 = 3;

/// Bytes the firmware counts in the store/print length field besides the
/// payload itself (`'1' 'P' '0'`).
pub const QR_LEN_OFFSET: u16 = 3;

/// Largest payload the symbol buffer accepts, in bytes
pub const QR_MAX_PAYLOAD: usize = 2710;

/// Enter barcode mode (`GS E C 1`)
#[inline]
pub fn barcode_mode_on() -> Vec<u8> {
    vec![GS, b'E', b'C', 0x01]
}

/// Leave barcode mode (`GS E C 0`)
#[inline]
pub fn barcode_mode_off() -> Vec<u8> {
    vec![GS, b'E', b'C', 0x00]
}

/// Default barcode height (`GS h 162`)
#[inline]
pub fn barcode_height_default() -> Vec<u8> {
    vec![GS, b'h', BARCODE_HEIGHT_DEFAULT]
}

/// Set QR module size (`ESC # # Q P I X n`)
pub fn qr_size(size: u8) -> Vec<u8> {
    vec![ESC, b'#', b'#', b'Q', b'P', b'I', b'X', size]
}

/// Set QR version (`GS ( k 3 0 1 C v`)
pub fn qr_version(version: u8) -> Vec<u8> {
    vec![GS, b'(', b'k', 0x03, 0x00, b'1', b'C', version]
}

/// Set QR error correction (`GS ( k 3 0 1 E r`), `r` = `'0'` for L up to
/// `'3'` for H.
pub fn qr_level(level: QrLevel) -> Vec<u8> {
    vec![GS, b'(', b'k', 0x03, 0x00, b'1', b'E', 48 + level as u8]
}

/// Store the QR payload in the symbol buffer.
pub fn qr_store(data: &[u8]) -> Vec<u8> {
    let [pl, ph] = u16_le(store_len(data));
    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[GS, b'(', b'k', pl, ph, b'1', b'P', b'0']);
    cmd.extend_from_slice(data);
    cmd
}

/// Print the stored QR symbol. The length field repeats the one sent with
/// [`qr_store`].
pub fn qr_print(data: &[u8]) -> Vec<u8> {
    let [pl, ph] = u16_le(store_len(data));
    vec![GS, b'(', b'k', pl, ph, b'1', b'Q', b'0']
}

fn store_len(data: &[u8]) -> u16 {
    debug_assert!(
        data.len() <= QR_MAX_PAYLOAD,
        "QR payload exceeds {} bytes",
        QR_MAX_PAYLOAD
    );
    data.len() as u16 + QR_LEN_OFFSET
}

/// Clamp a requested module size into the supported range; `None` and 0
/// select the default.
pub fn clamp_qr_size(size: Option<u8>) -> u8 {
    match size {
        None | Some(0) => QR_SIZE_DEFAULT,
        Some(s) => s.clamp(QR_SIZE_MIN, QR_SIZE_MAX),
    }
}

/// Clamp a requested version into the supported range; `None` and 0 select
/// the default.
pub fn clamp_qr_version(version: Option<u8>) -> u8 {
    match version {
        None | Some(0) => QR_VERSION_DEFAULT,
        Some(v) => v.clamp(QR_VERSION_MIN, QR_VERSION_MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barcode_mode() {
        assert_eq!(barcode_mode_on(), vec![0x1D, 0x45, 0x43, 0x01]);
        assert_eq!(barcode_mode_off(), vec![0x1D, 0x45, 0x43, 0x00]);
        assert_eq!(barcode_height_default(), vec![0x1D, 0x68, 0xA2]);
    }

    #[test]
    fn test_qr_setup() {
        assert_eq!(
            qr_size(12),
            vec![0x1B, 0x23, 0x23, 0x51, 0x50, 0x49, 0x58, 12]
        );
        assert_eq!(
            qr_version(3),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 3]
        );
        assert_eq!(
            qr_level(QrLevel::L),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 48]
        );
        assert_eq!(qr_level(QrLevel::H)[7], 51);
    }

    #[test]
    fn test_qr_store_and_print() {
        let store = qr_store(b"abc");
        assert_eq!(
            store,
            vec![0x1D, 0x28, 0x6B, 6, 0, 0x31, 0x50, 0x30, b'a', b'b', b'c']
        );
        assert_eq!(
            qr_print(b"abc"),
            vec![0x1D, 0x28, 0x6B, 6, 0, 0x31, 0x51, 0x30]
        );
    }

    #[test]
    fn test_clamping() {
        assert_eq!(clamp_qr_size(None), 12);
        assert_eq!(clamp_qr_size(Some(0)), 12);
        assert_eq!(clamp_qr_size(Some(40)), 24);
        assert_eq!(clamp_qr_size(Some(5)), 5);
        assert_eq!(clamp_qr_version(None), 3);
        assert_eq!(clamp_qr_version(Some(30)), 16);
        assert_eq!(clamp_qr_version(Some(1)), 1);
    }
}
