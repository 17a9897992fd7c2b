//! Error types for DipaIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// DipaIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Interface setup failed; also surfaced as the `Failed` lifecycle state
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Operation requires the `Operating` state
    #[error("Interface not operating")]
    NotOperating,

    /// A single discovery call failed; reported only through that call's
    /// completion and never changes the interface state
    #[error("Beacon API error: {0}")]
    Api(String),

    /// Configuration named an adapter type with no implementation
    #[error("Unknown adapter type: {0}")]
    UnknownAdapter(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}
