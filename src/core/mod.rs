//! Core conversion logic, independent of any presentation layer

pub mod amount;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod format;
pub mod log;

// Re-export main types for cleaner imports
pub use amount::{parse_amount, try_parse_amount};
pub use constants::{ConversionConstants, update_constants};
pub use conversion::{ConversionResult, ResultKind, convert, convert_text};
pub use format::format_decimal;
