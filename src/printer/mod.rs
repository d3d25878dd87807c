//! # Printer Module
//!
//! Session options and model variants.
//!
//! ## Modules
//!
//! - [`config`]: Encoder session options (JSON-loadable)
//! - [`model`]: Model variants and their command capabilities

pub mod config;
pub mod model;

pub use config::PrinterOptions;
pub use model::PrinterModel;
