//! Utility modules
//!
//! This module contains error types and result types shared by every
//! conversion stage.

pub mod error;

// Re-export commonly used items
pub use error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};
