/// Convenience result type used across camstamp.
pub type StampResult<T> = Result<T, StampError>;

/// Top-level error taxonomy used by the compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// An off-screen pixel surface could not be allocated or finalized.
    #[error("render surface error: {0}")]
    RenderSurface(String),

    /// The watermark resource could not be read or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// Caller-supplied values outside the accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Errors while encoding or writing a finished photo.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Build a [`StampError::RenderSurface`] value.
    pub fn render_surface(msg: impl Into<String>) -> Self {
        Self::RenderSurface(msg.into())
    }

    /// Build a [`StampError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`StampError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`StampError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StampError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
