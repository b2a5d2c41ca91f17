use thiserror::Error;

/// Library-wide error type.
///
/// The variants map one-to-one onto the HTTP statuses the server answers
/// with, so handlers can translate errors without inspecting messages.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable process configuration (absent API token, bad port).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider understood the request but does not know the target
    /// (unknown city, invalid station uid).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller sent a payload that cannot be coerced into the expected shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport or decode failure while talking to the upstream provider.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, Error>;
