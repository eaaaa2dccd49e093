/// Convenience result type used across the resampler.
pub type ResizeResult<T> = Result<T, ResizeError>;

/// Top-level error taxonomy returned by every resize entry point.
///
/// All variants are produced before the first destination pixel is written, so a failed call
/// never leaves partial output behind.
#[derive(thiserror::Error, Debug)]
pub enum ResizeError {
    /// Invalid channel count, alpha index, region, scale or enum name.
    #[error("configuration error: {0}")]
    Config(String),

    /// Pixel buffers or strides that do not match the declared geometry.
    #[error("buffer error: {0}")]
    Buffer(String),

    /// Caller-supplied scratch memory too small, or the allocator refused the request.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Errors when serializing or deserializing configuration values.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl ResizeError {
    /// Build a [`ResizeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ResizeError::Buffer`] value.
    pub fn buffer(msg: impl Into<String>) -> Self {
        Self::Buffer(msg.into())
    }

    /// Build a [`ResizeError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`ResizeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ResizeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
