/// Convenience result type used across subpersp.
pub type SubperspResult<T> = Result<T, SubperspError>;

/// Top-level error taxonomy used by solver and tool APIs.
///
/// None of these are fatal for an interactive session: the tool treats every error as
/// "discard this frame" and keeps the last valid state.
#[derive(thiserror::Error, Debug)]
pub enum SubperspError {
    /// Invalid caller-provided data (alignment codes, settings, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry that cannot be solved (crossed quads, singular systems).
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// A solved quantity came out as NaN or infinite.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    /// A persisted ambient plane descriptor could not be parsed.
    #[error("malformed ambient plane: {0}")]
    MalformedPlane(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SubperspError {
    /// Build a [`SubperspError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SubperspError::Degenerate`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::Degenerate(msg.into())
    }

    /// Build a [`SubperspError::MalformedPlane`] value.
    pub fn malformed_plane(msg: impl Into<String>) -> Self {
        Self::MalformedPlane(msg.into())
    }

    /// Build a [`SubperspError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
