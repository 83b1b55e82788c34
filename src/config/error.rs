//! Error types for configuration loading.

use thiserror::Error;

/// Result type for the typed builder setters.
pub type BuilderResult<T> = Result<T, ConfigError>;

/// A rejected configuration value.
///
/// These never abort loading: the offending field keeps its previous value
/// and the error is kept as a diagnostic next to the configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A text field has the wrong number of characters.
    #[error("invalid {field} string length: {actual} (expected {expected})")]
    InvalidLength {
        /// The field being set.
        field: &'static str,
        /// Human-readable description of the accepted lengths.
        expected: &'static str,
        /// Number of characters supplied.
        actual: usize,
    },

    /// A value could not be parsed or is outside its domain.
    #[error("unrecognized {field} value: {value}")]
    InvalidValue {
        /// The field being set.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// An alternate frequency outside the FM, LF and MF bands.
    #[error("invalid alternate frequency for {field}: {value}")]
    FrequencyOutOfRange {
        /// `AF1` or `AF2`.
        field: &'static str,
        /// The rejected frequency.
        value: f64,
    },

    /// A field name outside the known vocabulary.
    #[error("unrecognized field type: {0}")]
    UnknownField(String),

    /// A group token that is not `<0-15><A|B>`.
    #[error("invalid group type: {0}")]
    UnknownGroup(String),

    /// An element other than `rds`, `group` or `field`.
    #[error("invalid node name: {0}")]
    UnknownElement(String),

    /// An element is missing a required attribute.
    #[error("<{element}> without '{attribute}' attribute")]
    MissingAttribute {
        /// Element name.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
    },
}

/// Errors that prevent a configuration document from being used at all.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the document.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("Failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The root element is not `rds`.
    #[error("invalid XML root element: {0}")]
    InvalidRoot(String),

    /// The document has no root element.
    #[error("document has no root element")]
    MissingRoot,
}
