//! # Table Layout
//!
//! Lays out a row of cells as fixed-width text. Cells that do not fit their
//! column are cut, and what was cut is printed in a follow-up row with the
//! same columns, until every cell fits.
//!
//! ```text
//! width 22, cells [auto "Espresso doppio", auto right "3.50"]
//!
//! Espresso do       3.50
//! ppio
//! ```
//!
//! ## Column Widths
//!
//! | Size | Width |
//! |------|-------|
//! | `Auto` | `base / cells` |
//! | `Fraction(f)` | `floor(base × f)` |
//! | `Cols(n)` | `n / size_w`; no leftover distribution |
//!
//! `base` is the printable width divided by the horizontal character size.
//! Any width left over by the even split goes to the last right-aligned
//! cell (as leading padding), or else to the first cell that is not
//! centered (as trailing padding). A row of centered cells drops it.

use crate::error::{ImpresoraError, Result};
use crate::protocol::text::{Alignment, TextStyle};

/// How wide a cell is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CellSize {
    /// Even share of the line
    #[default]
    Auto,
    /// Fraction of the line (0.25 = a quarter)
    Fraction(f64),
    /// Absolute column count, before character scaling
    Cols(usize),
}

/// A cell of a custom table row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub text: String,
    pub size: CellSize,
    pub align: Alignment,
    pub style: Option<TextStyle>,
}

impl TableCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn fraction(mut self, f: f64) -> Self {
        self.size = CellSize::Fraction(f);
        self
    }

    pub fn cols(mut self, n: usize) -> Self {
        self.size = CellSize::Cols(n);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Options for [`CommandEncoder::table_custom`](super::CommandEncoder::table_custom).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Character size multipliers `(width, height)`, each 1..=8
    pub size: (u8, u8),
    /// Code page override for this table
    pub encoding: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            size: (1, 1),
            encoding: None,
        }
    }
}

/// A piece of a laid-out line: text still to be transcoded, or raw command
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Padding {
    Leading,
    Trailing,
}

/// Lay out `cells` on a line `width` columns wide, returning one segment
/// list per printed line (overflow rows included).
pub(crate) fn layout(cells: &[TableCell], width: usize, size_w: u8) -> Result<Vec<Vec<Segment>>> {
    if cells.is_empty() {
        return Err(ImpresoraError::invalid("table needs at least one cell"));
    }
    if size_w == 0 {
        return Err(ImpresoraError::invalid("table character width must be at least 1"));
    }

    let base_width = width / size_w as usize;
    let even = base_width / cells.len();
    let has_cols = cells.iter().any(|c| matches!(c.size, CellSize::Cols(_)));
    let leftover = if has_cols { 0 } else { base_width % cells.len() };

    let widths = cells
        .iter()
        .map(|c| column_width(c.size, base_width, even, size_w))
        .collect::<Result<Vec<_>>>()?;

    for (cell, &w) in cells.iter().zip(&widths) {
        if w == 0 && !cell.text.is_empty() {
            return Err(ImpresoraError::invalid(format!(
                "cell '{}' has no room on a {}-column line",
                cell.text, width
            )));
        }
    }

    let leftover_at = cells
        .iter()
        .rposition(|c| c.align == Alignment::Right)
        .map(|i| (i, Padding::Leading))
        .or_else(|| {
            cells
                .iter()
                .position(|c| c.align != Alignment::Center)
                .map(|i| (i, Padding::Trailing))
        });

    let mut lines = Vec::new();
    let mut texts: Vec<String> = cells.iter().map(|c| c.text.clone()).collect();

    loop {
        let mut line = Vec::new();
        let mut remainders = Vec::with_capacity(cells.len());

        for (i, cell) in cells.iter().enumerate() {
            let (shown, rest) = split_chars(&texts[i], widths[i]);
            let gap = widths[i] - shown.chars().count();

            let (mut lead, mut trail) = match cell.align {
                Alignment::Left => (0, gap),
                Alignment::Center => (gap - gap / 2, gap / 2),
                Alignment::Right => (gap, 0),
            };
            match leftover_at {
                Some((at, Padding::Leading)) if at == i => lead += leftover,
                Some((at, Padding::Trailing)) if at == i => trail += leftover,
                _ => {}
            }

            push_text(&mut line, &" ".repeat(lead));
            if !shown.is_empty() {
                match cell.style {
                    Some(style) => {
                        line.push(Segment::Raw(style.to_bytes()));
                        line.push(Segment::Text(shown.to_string()));
                        line.push(Segment::Raw(TextStyle::NORMAL.to_bytes()));
                    }
                    None => push_text(&mut line, shown),
                }
            }
            push_text(&mut line, &" ".repeat(trail));

            remainders.push(rest.to_string());
        }

        lines.push(line);

        if remainders.iter().all(String::is_empty) {
            break;
        }
        texts = remainders;
    }

    Ok(lines)
}

fn column_width(size: CellSize, base_width: usize, even: usize, size_w: u8) -> Result<usize> {
    match size {
        CellSize::Auto => Ok(even),
        CellSize::Fraction(f) if f.is_finite() && f >= 0.0 => {
            Ok((base_width as f64 * f).floor() as usize)
        }
        CellSize::Fraction(f) => Err(ImpresoraError::invalid(format!(
            "cell width fraction must be a non-negative number, got {f}"
        ))),
        CellSize::Cols(n) => Ok(n / size_w as usize),
    }
}

/// Split after the first `n` characters.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

/// Append text, merging with a preceding text segment.
fn push_text(line: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(last)) = line.last_mut() {
        last.push_str(text);
    } else {
        line.push(Segment::Text(text.to_string()));
    }
}

// ============================================================================
// TESTS
// ============================================================================
