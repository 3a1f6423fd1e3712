//! Error types for waymark

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Waymark error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Location permission denied or revoked
    #[error("location permission missing")]
    PermissionMissing,

    /// No location fix has been produced yet
    #[error("no location fix available yet")]
    NoFixYet,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration file serialization error
    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Unknown location source kind in configuration
    #[error("Unknown location source: {0}")]
    UnknownSource(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
