//! # Code Page Transcoding
//!
//! Converts Unicode strings to the single-byte code page the printer has
//! selected (`ESC t n`). The encoder never transcodes on its own: it calls a
//! [`Transcoder`] with the session's code page name, so applications can
//! plug in any encoder they like.
//!
//! [`BuiltinTranscoder`] covers the Western European pages most receipt
//! printers ship with:
//!
//! | Name | Notes |
//! |------|-------|
//! | `Cp858` | CP850 with `€` at 0xD5 (default) |
//! | `Cp850` | DOS Latin-1 |
//! | `ASCII` | 7-bit only |
//! | `UTF-8` | passthrough, for printers with a UTF-8 page |
//!
//! Characters with no mapping are replaced with `?` and logged.

use crate::error::{ImpresoraError, Result};

/// Default code page name
pub const CP858: &str = "Cp858";

/// Simplified Chinese code page name. Not handled by [`BuiltinTranscoder`].
pub const GB18030: &str = "GB18030";

/// Turns text into printer bytes for a named code page.
pub trait Transcoder: Send + Sync {
    /// Encode `text` using the code page called `codepage`.
    ///
    /// # Errors
    ///
    /// Returns [`ImpresoraError::Encoding`] if the code page is unknown or
    /// the text cannot be represented.
    fn encode(&self, text: &str, codepage: &str) -> Result<Vec<u8>>;
}

impl<F> Transcoder for F
where
    F: Fn(&str, &str) -> Result<Vec<u8>> + Send + Sync,
{
    fn encode(&self, text: &str, codepage: &str) -> Result<Vec<u8>> {
        self(text, codepage)
    }
}

/// Transcoder for the code pages in the module table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTranscoder;

impl Transcoder for BuiltinTranscoder {
    fn encode(&self, text: &str, codepage: &str) -> Result<Vec<u8>> {
        let name: String = codepage
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match name.as_str() {
            "cp858" | "ibm858" => Ok(encode_single_byte(text, &CP858_HIGH, codepage)),
            "cp850" | "ibm850" => Ok(encode_single_byte(text, &CP850_HIGH, codepage)),
            "ascii" | "usascii" => Ok(encode_single_byte(text, &[], codepage)),
            "utf8" => Ok(text.as_bytes().to_vec()),
            _ => Err(ImpresoraError::Encoding(format!(
                "unsupported code page '{codepage}'"
            ))),
        }
    }
}

/// Encode with ASCII passthrough and a table for bytes 0x80 upwards.
fn encode_single_byte(s: &str, high: &[char], codepage: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        if (ch as u32) < 0x80 {
            out.push(ch as u8);
        } else if let Some(pos) = high.iter().position(|&c| c == ch) {
            out.push(0x80 + pos as u8);
        } else {
            log::warn!(
                "{}: unmapped character '{}' (U+{:04X}), replacing with '?'",
                codepage,
                ch,
                ch as u32
            );
            out.push(b'?');
        }
    }
    out
}

/// CP850 upper half, indexed by `byte - 0x80`.
const CP850_HIGH: [char; 128] = [
    // 0x80
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', 'ø', '£', 'Ø', '×', 'ƒ',
    // 0xA0
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '®', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0
    '░', '▒', '▓', '│', '┤', 'Á', 'Â', 'À', '©', '╣', '║', '╗', '╝', '¢', '¥', '┐',
    // 0xC0
    '└', '┴', '┬', '├', '─', '┼', 'ã', 'Ã', '╚', '╔', '╩', '╦', '╠', '═', '╬', '¤',
    // 0xD0
    'ð', 'Ð', 'Ê', 'Ë', 'È', 'ı', 'Í', 'Î', 'Ï', '┘', '┌', '█', '▄', '¦', 'Ì', '▀',
    // 0xE0
    'Ó', 'ß', 'Ô', 'Ò', 'õ', 'Õ', 'µ', 'þ', 'Þ', 'Ú', 'Û', 'Ù', 'ý', 'Ý', '¯', '´',
    // 0xF0
    '\u{AD}', '±', '‗', '¾', '¶', '§', '÷', '¸', '°', '¨', '·', '¹', '³', '²', '■', '\u{A0}',
];

/// CP858: CP850 with the dotless `ı` at 0xD5 swapped for `€`.
const CP858_HIGH: [char; 128] = {
    let mut table = CP850_HIGH;
    table[0xD5 - 0x80] = '€';
    table
};
