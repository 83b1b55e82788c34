//! Binary encoding support for RDS groups.
//!
//! Groups are written as four 26-bit blocks, most significant bit first.
//! This module holds the bit writer used for that packing and the
//! `Encodable` trait implemented by assembled groups.

/// Error types for encoding operations.
pub mod error;

/// Bit-level writer for encoding binary data.
pub mod writer;

/// Trait definitions for encodable types.
pub mod traits;

pub use error::{EncodingError, EncodingResult};
pub use traits::Encodable;
pub use writer::BitWriter;

#[cfg(feature = "base64")]
pub use traits::TextEncodable;
