/// Convenience result type used across traytint.
pub type TrayTintResult<T> = Result<T, TrayTintError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// `InvalidInput`, `DecodeFailure` and `EmptyResult` are recoverable: callers keep whatever icon
/// they were displaying before the failed call.
#[derive(thiserror::Error, Debug)]
pub enum TrayTintError {
    /// Missing, zero-width or zero-height source, or an out-of-range argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A bitmap could not be turned into a concrete pixel buffer.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// Decomposition or compositing produced nothing to show.
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterizer failures (device loss, readback, surface limits).
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrayTintError {
    /// Build a [`TrayTintError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`TrayTintError::DecodeFailure`] value.
    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Build a [`TrayTintError::EmptyResult`] value.
    pub fn empty_result(msg: impl Into<String>) -> Self {
        Self::EmptyResult(msg.into())
    }

    /// Build a [`TrayTintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrayTintError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Whether the caller should simply keep its previous icon.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::DecodeFailure(_) | Self::EmptyResult(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
