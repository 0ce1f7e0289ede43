/// Convenience result type used across pastekit.
pub type PasteResult<T> = Result<T, PasteError>;

/// Error taxonomy for composite generation.
///
/// Every failure is local to a single composite call: nothing is retried and no partially
/// modified background is handed back.
#[derive(thiserror::Error, Debug)]
pub enum PasteError {
    /// Source rectangle has no area, or the perspective system is singular.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Background or object failed to decode, or has zero area.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A configured probability, scale or range is out of bounds.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Errors when serializing or deserializing configs and records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PasteError {
    /// Build a [`PasteError::DegenerateGeometry`] value.
    pub fn degenerate_geometry(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`PasteError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build a [`PasteError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PasteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
