//! Error types for DishaNav

use thiserror::Error;

/// DishaNav error type
#[derive(Error, Debug)]
pub enum DishaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(#[from] marga_graph::GraphError),

    #[error("Beacon interface error: {0}")]
    Beacon(#[from] dipa_io::Error),

    #[error("Planning error: {0}")]
    Plan(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for DishaError {
    fn from(e: toml::de::Error) -> Self {
        DishaError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for DishaError {
    fn from(e: toml::ser::Error) -> Self {
        DishaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DishaError>;
