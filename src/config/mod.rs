//! Station configuration consumed by the encoder.
//!
//! A [`Configuration`] is either assembled in code with
//! [`ConfigurationBuilder`] or loaded from an XML document with
//! [`xml::load_config`]. Loading is best-effort: rejected values are
//! reported as diagnostics and the rest of the document still applies.

/// Builder with validating setters.
pub mod builder;
/// Error types for configuration loading.
pub mod error;
/// XML configuration documents.
pub mod xml;

pub use builder::ConfigurationBuilder;
pub use error::{BuilderResult, ConfigError, ParseError};
pub use xml::{load_config, parse_config_str};

use crate::group::ActiveGroups;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Length of the programme service name in characters.
pub const PS_LEN: usize = 8;

/// Maximum RadioText length in characters.
pub const RADIOTEXT_LEN: usize = 64;

/// Radio paging fields carried by type 8A groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Paging {
    /// Data delay, 3 bits.
    pub data_delay: u8,
    /// Paging extent, 3 bits.
    pub extent: u8,
    /// Event code, 11 bits.
    pub event: u16,
    /// Location code, 16 bits.
    pub location: u16,
}

/// Everything the encoder needs to know about a station.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Configuration {
    /// Programme identification code.
    pub program_identifier: u16,
    /// Traffic programme flag.
    pub traffic_program: bool,
    /// Traffic announcement flag.
    pub traffic_announcement: bool,
    /// Music (true) / speech (false) switch.
    pub music_speech: bool,
    /// Decoder identification: artificial head recording.
    pub artificial_head: bool,
    /// Decoder identification: compressed audio.
    pub compressed: bool,
    /// Programme type is static.
    pub static_pty: bool,
    /// Programme type code, 0–31.
    pub program_type: u8,
    /// Two alternate frequency slots, in MHz (FM) or kHz (LF/MF).
    pub alternate_frequencies: [Option<f64>; 2],
    /// Programme service name in the RDS character set.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_rds_text"))]
    pub program_service_name: [u8; PS_LEN],
    /// RadioText in the RDS character set, space padded.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_rds_text"))]
    pub radiotext: [u8; RADIOTEXT_LEN],
    /// Radio paging fields.
    pub paging: Paging,
    /// Group slots requested by the configuration.
    pub groups: ActiveGroups,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            program_identifier: 0,
            traffic_program: false,
            traffic_announcement: false,
            music_speech: false,
            artificial_head: false,
            compressed: false,
            static_pty: false,
            program_type: 0,
            alternate_frequencies: [None, None],
            program_service_name: [b' '; PS_LEN],
            radiotext: [b' '; RADIOTEXT_LEN],
            paging: Paging::default(),
            groups: ActiveGroups::new(),
        }
    }
}

#[cfg(feature = "serde")]
fn serialize_rds_text<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&crate::charset::rds_string(value.as_ref()))
}

/// A configuration together with the diagnostics raised while loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// The resulting configuration.
    pub configuration: Configuration,
    /// Values that were rejected, in document order.
    pub diagnostics: Vec<ConfigError>,
}

impl LoadedConfig {
    /// Returns true if every value in the document was accepted.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
