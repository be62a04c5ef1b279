/// Convenience result type used across the crate.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy.
///
/// Only construction-time paths return these. Per-frame work degrades instead of failing.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Timeline configuration is structurally inconsistent.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// A capability probe could not answer.
    #[error("capability error: {0}")]
    Capability(String),

    /// Static poster or visual composition failed.
    #[error("render error: {0}")]
    Render(String),

    /// Contact submission was rejected or could not be delivered.
    #[error("contact error: {0}")]
    Contact(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`MotionError::Capability`] value.
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    /// Build a [`MotionError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MotionError::Contact`] value.
    pub fn contact(msg: impl Into<String>) -> Self {
        Self::Contact(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
