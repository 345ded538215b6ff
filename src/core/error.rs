//! Error types for the knoll scene

use thiserror::Error;

/// Main error type. Only loading and validating inputs can fail;
/// the per-frame simulation resolves every edge case internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Input script error: {0}")]
    Script(#[from] knoll_protocol::ProtocolError),
}
