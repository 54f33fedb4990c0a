/// Convenience result type used across teaforge.
pub type TeaResult<T> = Result<T, TeaError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum TeaError {
    /// A required external identifier (manifest CID, gateway, origin) is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// A gateway or manifest fetch failed; `status` carries the HTTP status when one was received.
    #[error("fetch error: {message}")]
    Fetch {
        /// HTTP status code, when the request reached the server.
        status: Option<u16>,
        /// Human-readable failure description including the requested location.
        message: String,
    },

    /// Image or SVG bytes failed to decode/rasterize.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid user-provided or manifest data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TeaError {
    /// Build a [`TeaError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TeaError::Fetch`] value.
    pub fn fetch(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            status,
            message: msg.into(),
        }
    }

    /// Build a [`TeaError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`TeaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TeaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
