//! # rds
//!
//! A Rust library for encoding RDS/RBDS (Radio Data System) groups.
//!
//! Station metadata (programme identifier, programme type, traffic flags,
//! programme service name, RadioText, alternate frequencies, clock time and
//! paging data) is turned into 104-bit groups of four 26-bit blocks, ready
//! to be fed to a 57 kHz subcarrier modulator.
//!
//! ## Features
//!
//! - Type 0A/0B (basic tuning), 2A/2B (RadioText), 4A (clock time) and 8A
//!   (paging) groups
//! - Checkword generation and block validation
//! - XML configuration documents with best-effort diagnostics
//! - Injectable clocks for reproducible clock-time groups
//! - Optional JSON serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rds::config::parse_config_str;
//! use rds::session::EncodingSession;
//! use rds::time::FixedClock;
//!
//! let xml = r#"<rds>
//!   <group type="0A"/>
//!   <field name="PI">54A8</field>
//!   <field name="PS">RUSTY FM</field>
//! </rds>"#;
//!
//! let loaded = parse_config_str(xml)?;
//! assert!(loaded.is_clean());
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), 0.0);
//! let mut session = EncodingSession::with_clock(clock);
//! session.configure(loaded.configuration);
//! session.encode()?;
//!
//! for buffer in session.buffers() {
//!     assert_eq!(buffer.len(), 13);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Cargo Features
//!
//! - `crc-table` (default): table-driven checkwords via the `crc` crate
//! - `serde` (default): `Serialize` for configurations and encoded groups
//! - `base64`: base64 and hex renderings of encoded groups
//! - `cli`: the `rdsencode` command-line tool

#![warn(missing_docs)]

/// Alternate frequency codes.
pub mod af;
/// Block assembly and group serialization.
pub mod block;
/// Character set mapping for PS and RadioText.
pub mod charset;
/// Checkword computation.
pub mod checkword;
/// Station configuration.
pub mod config;
/// Bit-level encoding support.
pub mod encoding;
/// Group types and information word builders.
pub mod group;
/// Encoding sessions.
pub mod session;
/// Clock-time fields and clocks.
pub mod time;

#[cfg(test)]
mod tests;

pub use block::{EncodedGroup, GroupBuffer};
pub use config::{Configuration, ConfigurationBuilder, LoadedConfig};
pub use encoding::{EncodingError, EncodingResult};
pub use group::{GroupSlot, Variant};
pub use session::{EncodingSession, SessionState};
pub use time::{Clock, FixedClock, SystemClock};
