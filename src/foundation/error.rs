/// Convenience result type used across the carousel.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Error taxonomy for configuration boundaries.
///
/// Runtime navigation and animation never fail: missing render targets and redundant
/// navigation are skipped. Errors only surface while loading or validating decks, timings and
/// event scripts.
#[derive(thiserror::Error, Debug)]
pub enum CarouselError {
    /// Invalid user-provided deck or slide data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation timing or easing configuration.
    #[error("animation error: {0}")]
    Animation(String),

    /// Invalid runtime configuration (interval, viewport, script).
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CarouselError {
    /// Build a [`CarouselError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CarouselError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`CarouselError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CarouselError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CarouselError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
