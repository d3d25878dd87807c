//! # Printer Options
//!
//! Session defaults for a [`CommandEncoder`](crate::encoder::CommandEncoder).
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `encoding` | `Cp858` | Code page name handed to the transcoder |
//! | `width` | none | Column count override; wins over the font's width |
//! | `model` | `generic` | Command set variant |
//!
//! Options can be loaded from JSON; missing fields take their defaults:
//!
//! ```
//! use impresora::printer::{PrinterModel, PrinterOptions};
//!
//! let opts: PrinterOptions = serde_json::from_str(r#"{ "width": 42, "model": "qsprinter" }"#).unwrap();
//! assert_eq!(opts.encoding, "Cp858");
//! assert_eq!(opts.width, Some(42));
//! assert_eq!(opts.model, PrinterModel::QsPrinter);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::PrinterModel;
use crate::error::{ImpresoraError, Result};
use crate::protocol::codepage::CP858;

/// Encoder session options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterOptions {
    /// Code page name for text output
    pub encoding: String,

    /// Printable columns, overriding the font's column count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,

    /// Command set variant
    pub model: PrinterModel,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            encoding: CP858.to_string(),
            width: None,
            model: PrinterModel::Generic,
        }
    }
}

impl PrinterOptions {
    /// Read options from a JSON file.
    ///
    /// # Errors
    ///
    /// [`ImpresoraError::Io`] if the file cannot be read,
    /// [`ImpresoraError::InvalidArgument`] if it is not valid options JSON.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let opts = serde_json::from_str(&raw).map_err(|e| {
            ImpresoraError::invalid(format!("Invalid config {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded printer options from {}", path.display());
        Ok(opts)
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_model(mut self, model: PrinterModel) -> Self {
        self.model = model;
        self
    }
}
