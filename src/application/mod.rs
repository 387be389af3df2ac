//! Application layer: services and use cases
//!
//! This layer orchestrates the conversion core for single requests and batches.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{BatchEntry, BatchReport, Conversion, ConversionRequest, ConversionService};
