//! Error types for group encoding operations.

use crate::group::GroupSlot;
use thiserror::Error;

/// Result type for encoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors that can occur while building or serializing RDS groups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    /// Invalid field value that cannot be encoded.
    #[error("Invalid field value: {field} = {value}")]
    InvalidFieldValue {
        /// Name of the field with invalid value.
        field: &'static str,
        /// String representation of the invalid value.
        value: String,
    },

    /// A frequency lies outside the FM, LF and MF bands.
    #[error("Invalid alternate frequency: {0}")]
    FrequencyOutOfRange(f64),

    /// The group type/variant combination has no builder.
    #[error("Unsupported group type: {0}")]
    UnsupportedGroup(GroupSlot),

    /// `encode` was called before any configuration was supplied.
    #[error("Session has no configuration")]
    NotConfigured,
}
