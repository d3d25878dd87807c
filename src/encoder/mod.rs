//! # Command Encoder
//!
//! [`CommandEncoder`] accumulates a print job in memory, one ESC/POS
//! directive per call, and hands the finished buffer to a [`Transport`] on
//! [`flush`](CommandEncoder::flush).
//!
//! ## Example
//!
//! ```
//! use impresora::encoder::{BarcodeOptions, CommandEncoder};
//! use impresora::protocol::barcode::barcode1d::BarcodeType;
//! use impresora::protocol::text::Alignment;
//!
//! let mut enc = CommandEncoder::new();
//! enc.hardware(impresora::protocol::commands::Hardware::Init)
//!     .align(Alignment::Center)
//!     .style_token("b")?
//!     .text("CAFE LUNA")?
//!     .style_token("normal")?
//!     .draw_line('-')?
//!     .barcode("400638133393", BarcodeType::Ean13, &BarcodeOptions::default())?
//!     .cut(true, 3);
//!
//! assert!(enc.as_bytes().starts_with(&[0x1B, 0x40]));
//! # Ok::<(), impresora::ImpresoraError>(())
//! ```
//!
//! ## Session State
//!
//! | State | Set by | Used by |
//! |-------|--------|---------|
//! | font | [`font`](CommandEncoder::font) | line width (48 for A, 56 for B/C) |
//! | width override | [`PrinterOptions::width`] | line width, wins over the font |
//! | encoding | [`encoding`](CommandEncoder::encoding) | every text operation |
//! | model | [`model`](CommandEncoder::model) | barcode and QR framing |
//!
//! ## Errors
//!
//! Arguments are validated before anything is appended: a rejected call
//! leaves the buffer exactly as it was.

pub mod table;

use std::fmt;

use crate::error::{ImpresoraError, Result};
use crate::printer::{PrinterModel, PrinterOptions};
use crate::protocol::barcode::barcode1d::{self, BarcodeType, HriFont, HriPosition};
use crate::protocol::barcode::qr::{self, QrLevel};
use crate::protocol::codepage::{BuiltinTranscoder, Transcoder};
use crate::protocol::commands::{self, CashDrawerPin, EOL, FeedControl, Hardware, NUL, PrintColor};
use crate::protocol::graphics::{self, BitmapDensity, RasterMode};
use crate::protocol::qsprinter;
use crate::protocol::text::{self, Alignment, Font, TextStyle};
use crate::render::bitmap::MonoImage;
use crate::transport::Transport;

pub use table::{CellSize, TableCell, TableOptions};

use table::Segment;

/// Options for [`CommandEncoder::barcode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeOptions {
    /// Module width 1..=5; anything else selects the printer default
    pub width: Option<u8>,
    /// Bar height in dots 1..=255; `None` or 0 selects the model default
    pub height: Option<u8>,
    pub position: HriPosition,
    pub font: HriFont,
    /// Append the computed check digit to EAN13/EAN8 payloads
    pub include_parity: bool,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            position: HriPosition::Below,
            font: HriFont::A,
            include_parity: true,
        }
    }
}

/// Options for [`CommandEncoder::qrcode`].
///
/// `None` picks the model's default: version 3 everywhere, module size 6 on
/// generic printers and 12 on QsPrinter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QrOptions {
    pub version: Option<u8>,
    pub level: QrLevel,
    pub size: Option<u8>,
}

/// # ESC/POS Command Encoder
///
/// Append-only byte buffer plus the session state text and symbol
/// operations depend on. Infallible operations return `&mut Self`;
/// operations that validate input return `Result<&mut Self>`.
pub struct CommandEncoder {
    buffer: Vec<u8>,
    font: Font,
    width_override: Option<usize>,
    encoding: String,
    model: PrinterModel,
    transcoder: Box<dyn Transcoder>,
}

impl Default for CommandEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEncoder")
            .field("len", &self.buffer.len())
            .field("font", &self.font)
            .field("width", &self.width())
            .field("encoding", &self.encoding)
            .field("model", &self.model)
            .finish()
    }
}

impl CommandEncoder {
    /// Encoder with default options and the built-in transcoder.
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            font: Font::A,
            width_override: options.width,
            encoding: options.encoding,
            model: options.model,
            transcoder: Box::new(BuiltinTranscoder),
        }
    }

    /// Replace the code page transcoder.
    ///
    /// ```
    /// use impresora::encoder::CommandEncoder;
    ///
    /// let mut enc = CommandEncoder::new()
    ///     .with_transcoder(|text: &str, _cp: &str| -> impresora::Result<Vec<u8>> {
    ///         Ok(text.to_uppercase().into_bytes())
    ///     });
    /// enc.pure_text("abc")?;
    /// assert_eq!(enc.as_bytes(), b"ABC");
    /// # Ok::<(), impresora::ImpresoraError>(())
    /// ```
    pub fn with_transcoder(mut self, transcoder: impl Transcoder + 'static) -> Self {
        self.transcoder = Box::new(transcoder);
        self
    }

    // ========================================================================
    // SESSION STATE
    // ========================================================================

    /// Printable columns on a line.
    pub fn width(&self) -> usize {
        self.width_override.unwrap_or(self.font.columns())
    }

    pub fn current_font(&self) -> Font {
        self.font
    }

    pub fn current_encoding(&self) -> &str {
        &self.encoding
    }

    pub fn current_model(&self) -> PrinterModel {
        self.model
    }

    /// Select the code page used by text operations.
    pub fn encoding(&mut self, name: impl Into<String>) -> &mut Self {
        self.encoding = name.into();
        self
    }

    /// Select the command set variant. Writes nothing.
    pub fn model(&mut self, model: PrinterModel) -> &mut Self {
        self.model = model;
        self
    }

    /// Select a font (`ESC M n`) and update the line width.
    pub fn font(&mut self, font: Font) -> &mut Self {
        self.buffer.extend(text::font(font));
        self.font = font;
        self
    }

    // ========================================================================
    // TEXT
    // ========================================================================

    fn encode(&self, content: &str, encoding: Option<&str>) -> Result<Vec<u8>> {
        let codepage = encoding.unwrap_or(&self.encoding);
        self.transcoder.encode(content, codepage)
    }

    /// Encoded text followed by a line feed.
    pub fn text(&mut self, content: &str) -> Result<&mut Self> {
        self.println(content)
    }

    /// Like [`text`](Self::text) with a one-off code page.
    pub fn text_with(&mut self, content: &str, encoding: &str) -> Result<&mut Self> {
        let mut bytes = self.encode(content, Some(encoding))?;
        bytes.extend_from_slice(EOL);
        self.buffer.extend(bytes);
        Ok(self)
    }

    /// Encoded text without a line feed.
    pub fn pure_text(&mut self, content: &str) -> Result<&mut Self> {
        let bytes = self.encode(content, None)?;
        self.buffer.extend(bytes);
        Ok(self)
    }

    pub fn pure_text_with(&mut self, content: &str, encoding: &str) -> Result<&mut Self> {
        let bytes = self.encode(content, Some(encoding))?;
        self.buffer.extend(bytes);
        Ok(self)
    }

    /// Encoded text followed by a line feed, in the session code page.
    pub fn println(&mut self, content: &str) -> Result<&mut Self> {
        let mut bytes = self.encode(content, None)?;
        bytes.extend_from_slice(EOL);
        self.buffer.extend(bytes);
        Ok(self)
    }

    /// Append bytes as they are.
    pub fn print(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    pub fn new_line(&mut self) -> &mut Self {
        self.buffer.extend_from_slice(EOL);
        self
    }

    /// `n` line feeds.
    pub fn empty_lines(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.buffer.extend_from_slice(EOL);
        }
        self
    }

    /// A full-width rule made of `ch`.
    pub fn draw_line(&mut self, ch: char) -> Result<&mut Self> {
        let rule: String = std::iter::repeat_n(ch, self.width()).collect();
        self.println(&rule)
    }

    // ========================================================================
    // FORMATTING
    // ========================================================================

    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.buffer.extend(text::align(alignment));
        self
    }

    /// Bold, italic and underline, always all three.
    pub fn style(&mut self, style: TextStyle) -> &mut Self {
        self.buffer.extend(style.to_bytes());
        self
    }

    /// [`style`](Self::style) from a token such as `"bu2"` or `"normal"`.
    pub fn style_token(&mut self, token: &str) -> Result<&mut Self> {
        let style: TextStyle = token.parse()?;
        Ok(self.style(style))
    }

    /// Character size multipliers, each clamped to 1..=8.
    pub fn text_size(&mut self, width: u8, height: u8) -> &mut Self {
        self.buffer.extend(text::custom_size(width, height));
        self
    }

    /// `None` restores the default spacing (`ESC 2`).
    pub fn line_spacing(&mut self, dots: Option<u8>) -> &mut Self {
        match dots {
            Some(n) => self.buffer.extend(commands::line_spacing(n)),
            None => self.buffer.extend(commands::line_spacing_default()),
        }
        self
    }

    /// Character spacing; `None` restores 0.
    pub fn spacing(&mut self, dots: Option<u8>) -> &mut Self {
        match dots {
            Some(n) => self.buffer.extend(commands::char_spacing(n)),
            None => self.buffer.extend(commands::char_spacing_default()),
        }
        self
    }

    pub fn character_code_table(&mut self, table: u8) -> &mut Self {
        self.buffer.extend(commands::character_code_table(table));
        self
    }

    pub fn margin_bottom(&mut self, size: u8) -> &mut Self {
        self.buffer.extend(commands::margin_bottom(size));
        self
    }

    pub fn margin_left(&mut self, size: u8) -> &mut Self {
        self.buffer.extend(commands::margin_left(size));
        self
    }

    pub fn margin_right(&mut self, size: u8) -> &mut Self {
        self.buffer.extend(commands::margin_right(size));
        self
    }

    pub fn control(&mut self, ctrl: FeedControl) -> &mut Self {
        self.buffer.extend(commands::control(ctrl));
        self
    }

    pub fn hardware(&mut self, hw: Hardware) -> &mut Self {
        self.buffer.extend(commands::hardware(hw));
        self
    }

    pub fn color(&mut self, color: PrintColor) -> &mut Self {
        self.buffer.extend(commands::color(color));
        self
    }

    pub fn reverse_colors(&mut self, reverse: bool) -> &mut Self {
        self.buffer.extend(commands::reverse_colors(reverse));
        self
    }

    pub fn beep(&mut self, times: u8, duration: u8) -> &mut Self {
        self.buffer.extend(commands::beep(times, duration));
        self
    }

    /// Star emphasized printing on (`ESC E`).
    pub fn emphasize(&mut self) -> &mut Self {
        self.buffer.extend(text::star_emphasize());
        self
    }

    pub fn cancel_emphasize(&mut self) -> &mut Self {
        self.buffer.extend(text::star_cancel_emphasize());
        self
    }

    // ========================================================================
    // TABLES
    // ========================================================================

    /// Equal-width columns, one line. Cells longer than their column push
    /// the rest of the line right.
    pub fn table<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<&mut Self> {
        if cells.is_empty() {
            return Err(ImpresoraError::invalid("table needs at least one cell"));
        }

        let cell_width = self.width() / cells.len();
        let mut line = String::with_capacity(self.width());
        for cell in cells {
            let cell = cell.as_ref();
            line.push_str(cell);
            let pad = cell_width.saturating_sub(cell.chars().count());
            line.extend(std::iter::repeat_n(' ', pad));
        }

        self.println(&line)
    }

    /// Table with per-cell widths, alignment and style. See
    /// [`table`](self::table) for the layout rules.
    pub fn table_custom(&mut self, cells: &[TableCell], options: &TableOptions) -> Result<&mut Self> {
        let (size_w, size_h) = options.size;
        if !(1..=8).contains(&size_w) || !(1..=8).contains(&size_h) {
            return Err(ImpresoraError::invalid(format!(
                "table character size must be 1..=8, got {size_w}x{size_h}"
            )));
        }

        let lines = table::layout(cells, self.width(), size_w)?;
        let encoding = options.encoding.as_deref();
        let scaled = size_w > 1 || size_h > 1;

        let mut out = Vec::new();
        for line in lines {
            if scaled {
                out.extend(text::custom_size(size_w, size_h));
            }
            for segment in line {
                match segment {
                    Segment::Text(t) => out.extend(self.encode(&t, encoding)?),
                    Segment::Raw(bytes) => out.extend(bytes),
                }
            }
            if scaled {
                out.extend(text::normal());
            }
            out.extend_from_slice(EOL);
        }

        self.buffer.extend(out);
        Ok(self)
    }

    // ========================================================================
    // BARCODES
    // ========================================================================

    /// Print a 1D barcode.
    ///
    /// EAN13 takes exactly 12 digits and EAN8 exactly 7; the check digit is
    /// computed here and appended when `include_parity` is set.
    pub fn barcode(
        &mut self,
        code: &str,
        kind: BarcodeType,
        options: &BarcodeOptions,
    ) -> Result<&mut Self> {
        validate_barcode(code, kind)?;

        let model = self.model;
        let mut cmd = Vec::with_capacity(32 + code.len());

        if model.wraps_barcode_mode() {
            cmd.extend(qsprinter::barcode_mode_on());
        }
        if model.has_barcode_width() {
            cmd.extend(barcode1d::width(options.width));
        }
        match (options.height, model) {
            (Some(h @ 1..=255), _) => cmd.extend(barcode1d::height(Some(h))),
            (_, PrinterModel::QsPrinter) => cmd.extend(qsprinter::barcode_height_default()),
            (_, PrinterModel::Generic) => cmd.extend(barcode1d::height(None)),
        }
        if model.has_barcode_font() {
            cmd.extend(barcode1d::hri_font(options.font));
        }
        cmd.extend(barcode1d::hri_position(options.position));
        cmd.extend(barcode1d::select(kind));

        if kind.has_length_prefix() {
            cmd.push(code.len() as u8);
        }
        cmd.extend_from_slice(code.as_bytes());
        if kind.has_parity() && options.include_parity {
            cmd.push(barcode1d::parity_digit(code));
        }
        cmd.push(NUL);

        if model.wraps_barcode_mode() {
            cmd.extend(qsprinter::barcode_mode_off());
        }

        self.buffer.extend(cmd);
        Ok(self)
    }

    /// [`barcode`](Self::barcode) with the symbology given by name
    /// (`"EAN13"`, `"UPC-A"`, `"code128"`, ...).
    pub fn barcode_named(
        &mut self,
        code: &str,
        kind: &str,
        options: &BarcodeOptions,
    ) -> Result<&mut Self> {
        let kind: BarcodeType = kind.parse()?;
        self.barcode(code, kind, options)
    }

    /// Print a QR code using the model's native 2D symbol command.
    pub fn qrcode(&mut self, content: &str, options: &QrOptions) -> Result<&mut Self> {
        let data = content.as_bytes();

        if self.model.uses_qr_store() {
            if data.is_empty() || data.len() > qsprinter::QR_MAX_PAYLOAD {
                return Err(ImpresoraError::invalid(format!(
                    "QR payload must be 1 to {} bytes, got {}",
                    qsprinter::QR_MAX_PAYLOAD,
                    data.len()
                )));
            }
            let mut cmd = Vec::with_capacity(48 + data.len());
            cmd.extend(qsprinter::qr_size(qsprinter::clamp_qr_size(options.size)));
            cmd.extend(qsprinter::qr_version(qsprinter::clamp_qr_version(options.version)));
            cmd.extend(qsprinter::qr_level(options.level));
            cmd.extend(qsprinter::qr_store(data));
            cmd.extend(qsprinter::qr_print(data));
            self.buffer.extend(cmd);
        } else {
            if data.len() > u16::MAX as usize {
                return Err(ImpresoraError::invalid(format!(
                    "QR payload must be at most {} bytes, got {}",
                    u16::MAX,
                    data.len()
                )));
            }
            self.buffer.extend(qr::symbol(
                data,
                options.version.unwrap_or(qr::DEFAULT_VERSION),
                options.level,
                options.size.unwrap_or(qr::DEFAULT_SIZE),
            ));
        }
        Ok(self)
    }

    // ========================================================================
    // IMAGES
    // ========================================================================

    /// Print an image as bit image bands (`ESC *`).
    ///
    /// Line spacing is set to 0 so bands butt together, and restored to the
    /// default afterwards.
    pub fn image(&mut self, image: &MonoImage, density: BitmapDensity) -> Result<&mut Self> {
        if image.width() > u16::MAX as usize {
            return Err(ImpresoraError::invalid(format!(
                "image is {} dots wide, the maximum is {}",
                image.width(),
                u16::MAX
            )));
        }

        let bitmap = image.to_bitmap(density);
        self.line_spacing(Some(0));
        for band in &bitmap.rows {
            self.buffer.extend(graphics::bit_image(density, band));
            self.buffer.extend_from_slice(EOL);
        }
        self.line_spacing(None);
        Ok(self)
    }

    /// Print an image in one raster command (`GS v 0`).
    pub fn raster(&mut self, image: &MonoImage, mode: RasterMode) -> Result<&mut Self> {
        let raster = image.to_raster();
        let (Ok(width_bytes), Ok(height)) =
            (u16::try_from(raster.width_bytes), u16::try_from(raster.height))
        else {
            return Err(ImpresoraError::invalid(format!(
                "raster image {}x{} exceeds the 16-bit size fields",
                image.width(),
                image.height()
            )));
        };

        self.buffer
            .extend(graphics::raster(mode, width_bytes, height, &raster.data));
        Ok(self)
    }

    // ========================================================================
    // PAPER AND PERIPHERALS
    // ========================================================================

    /// Feed `feed` lines, then cut.
    pub fn cut(&mut self, partial: bool, feed: usize) -> &mut Self {
        self.empty_lines(feed);
        if partial {
            self.buffer.extend(commands::cut_partial());
        } else {
            self.buffer.extend(commands::cut_full());
        }
        self
    }

    /// Star full cut (`ESC d 2`).
    pub fn star_full_cut(&mut self) -> &mut Self {
        self.buffer.extend(commands::star_full_cut());
        self
    }

    pub fn cashdraw(&mut self, pin: CashDrawerPin) -> &mut Self {
        self.buffer.extend(commands::cash_drawer(pin));
        self
    }

    // ========================================================================
    // RAW ACCESS
    // ========================================================================

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.print(bytes)
    }

    /// Append bytes written as hex, e.g. `"1d:77:06"` or `"1D 77 06"`.
    pub fn raw_hex(&mut self, hex: &str) -> Result<&mut Self> {
        let bytes = parse_hex(hex)?;
        self.buffer.extend(bytes);
        Ok(self)
    }

    // ========================================================================
    // BUFFER
    // ========================================================================

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop everything buffered so far.
    pub fn reset(&mut self) -> &mut Self {
        self.buffer.clear();
        self
    }

    /// Take the buffer, leaving the encoder empty.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    /// Send the buffer as one transfer and clear it.
    ///
    /// The buffer is emptied before the transfer, so the bytes of a failed
    /// flush are gone. An empty buffer still produces a (zero-length)
    /// transfer.
    pub async fn flush<T>(&mut self, transport: &mut T) -> Result<()>
    where
        T: Transport + ?Sized,
    {
        let data = self.take_bytes();
        log::debug!("Flushing {} bytes", data.len());

        transport.transfer(&data).await.map_err(|e| match e {
            ImpresoraError::Transfer(_) => e,
            other => ImpresoraError::Transfer(other.to_string()),
        })
    }

    /// Flush, then close the transport.
    pub async fn close<T>(&mut self, transport: &mut T) -> Result<()>
    where
        T: Transport + ?Sized,
    {
        self.flush(transport).await?;
        transport.close().await
    }
}

fn validate_barcode(code: &str, kind: BarcodeType) -> Result<()> {
    if code.is_empty() {
        return Err(ImpresoraError::invalid("barcode payload is empty"));
    }
    if !code.is_ascii() {
        return Err(ImpresoraError::invalid(format!(
            "barcode payload '{code}' contains non-ASCII characters"
        )));
    }
    if kind.is_numeric() && !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ImpresoraError::invalid(format!(
            "{kind:?} barcode payload must be digits, got '{code}'"
        )));
    }
    if let Some(n) = kind.required_digits() {
        if code.len() != n {
            return Err(ImpresoraError::invalid(format!(
                "{kind:?} barcode requires {n} digits, got {}",
                code.len()
            )));
        }
    }
    if kind.has_length_prefix() && code.len() > u8::MAX as usize {
        return Err(ImpresoraError::invalid(format!(
            "{kind:?} barcode payload is {} bytes, the maximum is 255",
            code.len()
        )));
    }
    Ok(())
}

fn parse_hex(hex: &str) -> Result<Vec<u8>> {
    let digits = hex
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ImpresoraError::invalid(format!("invalid hex digit '{c}'")))
        })
        .collect::<Result<Vec<u8>>>()?;

    if digits.len() % 2 != 0 {
        return Err(ImpresoraError::invalid(format!(
            "hex string has an odd number of digits ({})",
            digits.len()
        )));
    }

    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::Underline;
    use crate::render::bitmap::PixelGrid;
    use crate::transport::MemoryTransport;

    fn encoder() -> CommandEncoder {
        CommandEncoder::new()
    }

    #[test]
    fn test_text_appends_eol() {
        let mut enc = encoder();
        enc.text("hola").unwrap();
        assert_eq!(enc.as_bytes(), b"hola\n");
    }

    #[test]
    fn test_pure_text_has_no_eol() {
        let mut enc = encoder();
        enc.pure_text("hola").unwrap();
        assert_eq!(enc.as_bytes(), b"hola");
    }

    #[test]
    fn test_text_uses_session_encoding() {
        let mut enc = encoder();
        enc.text("€").unwrap();
        assert_eq!(enc.as_bytes(), &[0xD5, b'\n']);

        let mut enc = encoder();
        enc.encoding("UTF-8").text("€").unwrap();
        assert_eq!(enc.as_bytes(), &[0xE2, 0x82, 0xAC, b'\n']);
    }

    #[test]
    fn test_text_with_overrides_encoding() {
        let mut enc = encoder();
        enc.text_with("ñ", "UTF-8").unwrap();
        assert_eq!(enc.as_bytes(), "ñ\n".as_bytes());
        assert_eq!(enc.current_encoding(), "Cp858");
    }

    #[test]
    fn test_unknown_encoding_leaves_buffer() {
        let mut enc = encoder();
        enc.print(b"x");
        let err = enc.text_with("hi", "GB18030").unwrap_err();
        assert!(matches!(err, ImpresoraError::Encoding(_)));
        assert_eq!(enc.as_bytes(), b"x");
    }

    #[test]
    fn test_injected_transcoder_handles_gb18030() {
        let mut enc = CommandEncoder::new().with_transcoder(|text: &str, cp: &str| -> Result<Vec<u8>> {
            if cp == "GB18030" {
                Ok(std::iter::once(0xD6).chain(text.bytes()).collect())
            } else {
                Err(ImpresoraError::Encoding(cp.to_string()))
            }
        });
        enc.encoding("GB18030").pure_text("a").unwrap();
        assert_eq!(enc.as_bytes(), &[0xD6, b'a']);
    }

    #[test]
    fn test_empty_lines_and_new_line() {
        let mut enc = encoder();
        enc.empty_lines(3).new_line();
        assert_eq!(enc.as_bytes(), b"\n\n\n\n");

        let mut enc = encoder();
        enc.empty_lines(0);
        assert!(enc.is_empty());
    }

    #[test]
    fn test_width_follows_font() {
        let mut enc = encoder();
        assert_eq!(enc.width(), 48);
        enc.font(Font::B);
        assert_eq!(enc.width(), 56);
        assert_eq!(enc.as_bytes(), &[0x1B, 0x4D, 0x01]);
        enc.font(Font::A);
        assert_eq!(enc.width(), 48);
    }

    #[test]
    fn test_width_override_wins() {
        let mut enc = CommandEncoder::with_options(PrinterOptions::default().with_width(32));
        assert_eq!(enc.width(), 32);
        enc.font(Font::C);
        assert_eq!(enc.width(), 32);
    }

    #[test]
    fn test_draw_line() {
        let mut enc = CommandEncoder::with_options(PrinterOptions::default().with_width(5));
        enc.draw_line('=').unwrap();
        assert_eq!(enc.as_bytes(), b"=====\n");
    }

    #[test]
    fn test_table_even_columns() {
        let mut enc = CommandEncoder::with_options(PrinterOptions::default().with_width(12));
        enc.table(&["a", "bb", "ccc"]).unwrap();
        assert_eq!(enc.as_bytes(), b"a   bb  ccc \n");
    }

    #[test]
    fn test_table_long_cell_never_negative_padding() {
        let mut enc = CommandEncoder::with_options(PrinterOptions::default().with_width(8));
        enc.table(&["abcdef", "x"]).unwrap();
        assert_eq!(enc.as_bytes(), b"abcdefx   \n");
    }

    #[test]
    fn test_table_rejects_empty() {
        let mut enc = encoder();
        let empty: [&str; 0] = [];
        assert!(enc.table(&empty).is_err());
        assert!(enc.is_empty());
    }

    #[test]
    fn test_table_custom_size_wrap() {
        let mut enc = CommandEncoder::with_options(PrinterOptions::default().with_width(8));
        let options = TableOptions {
            size: (2, 1),
            encoding: None,
        };
        enc.table_custom(&[TableCell::new("ab")], &options).unwrap();

        let mut expected = vec![0x1D, 0x21, 0x10];
        expected.extend(b"ab  ");
        expected.extend([0x1B, 0x21, 0x00]);
        expected.push(b'\n');
        assert_eq!(enc.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_table_custom_rejects_zero_size() {
        let mut enc = encoder();
        let options = TableOptions {
            size: (0, 1),
            encoding: None,
        };
        assert!(enc.table_custom(&[TableCell::new("a")], &options).is_err());
        assert!(enc.is_empty());
    }

    #[test]
    fn test_style_token() {
        let mut a = encoder();
        a.style_token("BIU2").unwrap();
        let mut b = encoder();
        b.style(TextStyle::new(true, true, Underline::Double));
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(
            a.as_bytes(),
            &[0x1B, 0x45, 0x01, 0x1B, 0x34, 0x1B, 0x2D, 0x02]
        );
    }

    #[test]
    fn test_style_token_rejects_unknown() {
        let mut enc = encoder();
        assert!(enc.style_token("bold").is_err());
        assert!(enc.is_empty());
    }

    #[test]
    fn test_line_spacing_and_spacing() {
        let mut enc = encoder();
        enc.line_spacing(None)
            .line_spacing(Some(0))
            .spacing(None)
            .spacing(Some(4));
        assert_eq!(
            enc.as_bytes(),
            &[0x1B, 0x32, 0x1B, 0x33, 0x00, 0x1B, 0x20, 0x00, 0x1B, 0x20, 0x04]
        );
    }

    #[test]
    fn test_ean13_with_parity() {
        let mut enc = encoder();
        enc.barcode("400638133393", BarcodeType::Ean13, &BarcodeOptions::default())
            .unwrap();

        let mut expected = vec![
            0x1D, 0x77, 0x01, // width default
            0x1D, 0x68, 0x64, // height default
            0x1D, 0x66, 0x00, // HRI font A
            0x1D, 0x48, 0x02, // HRI below
            0x1D, 0x6B, 0x02, // EAN13
        ];
        expected.extend(b"4006381333931");
        expected.push(0x00);
        assert_eq!(enc.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_ean13_without_parity() {
        let mut enc = encoder();
        let options = BarcodeOptions {
            include_parity: false,
            ..BarcodeOptions::default()
        };
        enc.barcode("400638133393", BarcodeType::Ean13, &options).unwrap();
        assert!(enc.as_bytes().ends_with(b"400638133393\x00"));
    }

    #[test]
    fn test_ean_length_checked() {
        let mut enc = encoder();
        let opts = BarcodeOptions::default();
        assert!(enc.barcode("40063813339", BarcodeType::Ean13, &opts).is_err());
        assert!(enc.barcode("4006381333931", BarcodeType::Ean13, &opts).is_err());
        assert!(enc.barcode("12345678", BarcodeType::Ean8, &opts).is_err());
        assert!(enc.is_empty());
    }

    #[test]
    fn test_numeric_barcode_rejects_letters() {
        let mut enc = encoder();
        let err = enc
            .barcode("12AB", BarcodeType::Itf, &BarcodeOptions::default())
            .unwrap_err();
        assert!(matches!(err, ImpresoraError::InvalidArgument(_)));
        assert!(enc.is_empty());
    }

    #[test]
    fn test_code128_length_prefix() {
        let mut enc = encoder();
        let options = BarcodeOptions {
            width: Some(2),
            height: Some(50),
            position: HriPosition::Off,
            font: HriFont::B,
            include_parity: true,
        };
        enc.barcode("ABC", BarcodeType::Code128, &options).unwrap();
        assert_eq!(
            enc.as_bytes(),
            &[
                0x1D, 0x77, 0x03, 0x1D, 0x68, 50, 0x1D, 0x66, 0x01, 0x1D, 0x48, 0x00, 0x1D,
                0x6B, b'I', 3, b'A', b'B', b'C', 0x00,
            ]
        );
    }

    #[test]
    fn test_code128_odd_length_keeps_prefix() {
        let mut enc = encoder();
        enc.barcode("ABCDEFGHIJK", BarcodeType::Code128, &BarcodeOptions::default())
            .unwrap();
        let bytes = enc.as_bytes();
        let pos = bytes.windows(3).position(|w| w == [0x1D, 0x6B, b'I']).unwrap();
        assert_eq!(bytes[pos + 3], 11);
    }

    #[test]
    fn test_code128_too_long() {
        let mut enc = encoder();
        let code = "A".repeat(256);
        assert!(
            enc.barcode(&code, BarcodeType::Code128, &BarcodeOptions::default())
                .is_err()
        );
    }

    #[test]
    fn test_barcode_named() {
        let mut a = encoder();
        a.barcode_named("012345678905", "UPC-A", &BarcodeOptions::default())
            .unwrap();
        let mut b = encoder();
        b.barcode("012345678905", BarcodeType::UpcA, &BarcodeOptions::default())
            .unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());

        let mut c = encoder();
        assert!(c.barcode_named("1", "", &BarcodeOptions::default()).is_err());
        assert!(c.barcode_named("1", "PDF417", &BarcodeOptions::default()).is_err());
        assert!(c.is_empty());
    }

    #[test]
    fn test_qsprinter_barcode_framing() {
        let mut enc = encoder();
        enc.model(PrinterModel::QsPrinter);
        enc.barcode("9638507", BarcodeType::Ean8, &BarcodeOptions::default())
            .unwrap();

        let mut expected = vec![
            0x1D, 0x45, 0x43, 0x01, // mode on
            0x1D, 0x68, 0xA2, // QsPrinter height default
            0x1D, 0x48, 0x02, // HRI below
            0x1D, 0x6B, 0x03, // EAN8
        ];
        expected.extend(b"96385074");
        expected.push(0x00);
        expected.extend([0x1D, 0x45, 0x43, 0x00]);
        assert_eq!(enc.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_qr_generic_defaults() {
        let mut enc = encoder();
        enc.qrcode("hi", &QrOptions::default()).unwrap();
        assert_eq!(
            enc.as_bytes(),
            &[0x1D, 0x5A, 0x02, 0x1B, 0x5A, 3, b'L', 6, 2, 0, b'h', b'i']
        );
    }

    #[test]
    fn test_qr_length_is_utf8_bytes() {
        let mut enc = encoder();
        enc.qrcode("ñ", &QrOptions::default()).unwrap();
        assert_eq!(&enc.as_bytes()[8..10], &[2, 0]);
    }

    #[test]
    fn test_qr_qsprinter() {
        let mut enc = encoder();
        enc.model(PrinterModel::QsPrinter);
        let options = QrOptions {
            version: Some(40),
            level: QrLevel::M,
            size: Some(0),
        };
        enc.qrcode("ab", &options).unwrap();

        let mut expected = vec![0x1B, 0x23, 0x23, 0x51, 0x50, 0x49, 0x58, 12];
        expected.extend([0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 16]);
        expected.extend([0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 49]);
        expected.extend([0x1D, 0x28, 0x6B, 5, 0, 0x31, 0x50, 0x30, b'a', b'b']);
        expected.extend([0x1D, 0x28, 0x6B, 5, 0, 0x31, 0x51, 0x30]);
        assert_eq!(enc.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_qr_qsprinter_payload_bounds() {
        let mut enc = encoder();
        enc.model(PrinterModel::QsPrinter);
        assert!(enc.qrcode("", &QrOptions::default()).is_err());
        assert!(enc.qrcode(&"x".repeat(2711), &QrOptions::default()).is_err());
        assert!(enc.is_empty());
        assert!(enc.qrcode(&"x".repeat(2710), &QrOptions::default()).is_ok());
    }

    #[test]
    fn test_image_frames_bands() {
        let grid = PixelGrid::new(2, 9, 1, vec![0; 18]).unwrap();
        let image = MonoImage::from_pixels(&grid);

        let mut enc = encoder();
        enc.image(&image, BitmapDensity::S8).unwrap();

        let expected = [
            0x1B, 0x33, 0x00, // line spacing 0
            0x1B, 0x2A, 0x00, 2, 0, 0xFF, 0xFF, b'\n', // band 0
            0x1B, 0x2A, 0x00, 2, 0, 0x80, 0x80, b'\n', // band 1
            0x1B, 0x32, // default spacing
        ];
        assert_eq!(enc.as_bytes(), &expected);
    }

    #[test]
    fn test_raster() {
        let grid = PixelGrid::new(9, 1, 1, vec![0; 9]).unwrap();
        let image = MonoImage::from_pixels(&grid);

        let mut enc = encoder();
        enc.raster(&image, RasterMode::Quadruple).unwrap();
        assert_eq!(
            enc.as_bytes(),
            &[0x1D, 0x76, 0x30, 0x03, 2, 0, 1, 0, 0xFF, 0x80]
        );
    }

    #[test]
    fn test_cut() {
        let mut enc = encoder();
        enc.cut(true, 2);
        assert_eq!(enc.as_bytes(), &[b'\n', b'\n', 0x1D, 0x56, 0x01]);

        let mut enc = encoder();
        enc.cut(false, 0);
        assert_eq!(enc.as_bytes(), &[0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_cashdraw() {
        let mut enc = encoder();
        enc.cashdraw(CashDrawerPin::Pin5);
        assert_eq!(enc.as_bytes(), &[0x1B, 0x70, 0x01, 0x19, 0x78]);
    }

    #[test]
    fn test_raw_hex() {
        let mut enc = encoder();
        enc.raw_hex("1d:77:06").unwrap().raw_hex("1D 6B 02").unwrap();
        assert_eq!(enc.as_bytes(), &[0x1D, 0x77, 0x06, 0x1D, 0x6B, 0x02]);
    }

    #[test]
    fn test_raw_hex_rejects_bad_input() {
        let mut enc = encoder();
        assert!(enc.raw_hex("1d7").is_err());
        assert!(enc.raw_hex("zz").is_err());
        assert!(enc.is_empty());
    }

    #[test]
    fn test_take_and_reset() {
        let mut enc = encoder();
        enc.print(b"abc");
        assert_eq!(enc.len(), 3);
        assert_eq!(enc.take_bytes(), b"abc");
        assert!(enc.is_empty());

        enc.print(b"x").reset();
        assert!(enc.is_empty());
    }

    #[tokio::test]
    async fn test_flush_clears_buffer() {
        let mut enc = encoder();
        let mut transport = MemoryTransport::new();
        enc.text("a").unwrap();
        enc.flush(&mut transport).await.unwrap();
        enc.flush(&mut transport).await.unwrap();

        assert_eq!(transport.transfers(), &[b"a\n".to_vec(), Vec::new()]);
        assert!(enc.is_empty());
    }

    #[tokio::test]
    async fn test_failed_flush_drops_bytes() {
        let mut enc = encoder();
        let mut transport = MemoryTransport::failing("paper out");
        enc.text("a").unwrap();
        let err = enc.flush(&mut transport).await.unwrap_err();

        assert!(matches!(err, ImpresoraError::Transfer(_)));
        assert!(enc.is_empty());
    }

    #[tokio::test]
    async fn test_close_flushes_then_closes() {
        let mut enc = encoder();
        let mut transport = MemoryTransport::new();
        enc.text("bye").unwrap();
        enc.close(&mut transport).await.unwrap();

        assert_eq!(transport.bytes(), b"bye\n");
        assert!(transport.is_closed());
    }
}
