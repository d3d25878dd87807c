//! # Printer Models
//!
//! Most ESC/POS clones accept the same command set. A few deviate, and the
//! encoder asks the selected [`PrinterModel`] what it supports instead of
//! special-casing model names.
//!
//! | Model | Barcode width | HRI font | Barcode mode wrap | QR path |
//! |-------|---------------|----------|-------------------|---------|
//! | Generic | yes | yes | no | `GS Z` / `ESC Z` |
//! | QsPrinter | no | no | yes | `GS ( k` store + print |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ImpresoraError;

/// Printer model variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterModel {
    /// Standard ESC/POS command set
    #[default]
    Generic,
    /// QsPrinter firmware (v7.5 command table)
    QsPrinter,
}

impl PrinterModel {
    /// Whether `GS w` (module width) is understood.
    pub const fn has_barcode_width(self) -> bool {
        matches!(self, PrinterModel::Generic)
    }

    /// Whether `GS f` (HRI font) is understood.
    pub const fn has_barcode_font(self) -> bool {
        matches!(self, PrinterModel::Generic)
    }

    /// Whether barcodes must be wrapped in the vendor barcode mode toggle.
    pub const fn wraps_barcode_mode(self) -> bool {
        matches!(self, PrinterModel::QsPrinter)
    }

    /// Whether QR codes go through the store-then-print symbol buffer.
    pub const fn uses_qr_store(self) -> bool {
        matches!(self, PrinterModel::QsPrinter)
    }
}

impl FromStr for PrinterModel {
    type Err = ImpresoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "generic" | "escpos" => Ok(Self::Generic),
            "qsprinter" => Ok(Self::QsPrinter),
            other => Err(ImpresoraError::invalid(format!(
                "unknown printer model '{other}'"
            ))),
        }
    }
}

impl fmt::Display for PrinterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrinterModel::Generic => write!(f, "generic"),
            PrinterModel::QsPrinter => write!(f, "qsprinter"),
        }
    }
}
