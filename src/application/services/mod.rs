//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod conversion;

pub use conversion::{BatchEntry, BatchReport, Conversion, ConversionRequest, ConversionService};
