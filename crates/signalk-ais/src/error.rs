//! Errors raised around the conversion: configuration and self-test failures.
//!
//! Missing or malformed vessel data is never an error; builders simply
//! produce nothing.

use signalk_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while configuring or verifying a conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Plugin configuration could not be loaded.
    #[error("Failed to load conversion options: {0}")]
    Config(#[from] ConfigError),

    /// A built-in test case produced different output than expected.
    #[error("Self-test {index} of {title} failed: expected {expected}, got {actual}")]
    SelfTest {
        title: String,
        index: usize,
        expected: serde_json::Value,
        actual: serde_json::Value,
    },

    /// Field-sets could not be rendered as JSON.
    #[error("Failed to serialize field-sets: {0}")]
    Json(#[from] serde_json::Error),
}
