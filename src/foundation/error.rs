/// Convenience result type used across mergeviz.
pub type MergeVizResult<T> = Result<T, MergeVizError>;

/// Top-level error taxonomy used by the sort engine, stages and renderers.
#[derive(thiserror::Error, Debug)]
pub enum MergeVizError {
    /// Two elements cannot be ordered against each other.
    #[error("comparison error: {0}")]
    Comparison(String),

    /// A sequence and its paired visual group disagree, or a transform pairs groups of
    /// different lengths.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid user-provided values, configuration or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A stage request could not be carried out.
    #[error("stage error: {0}")]
    Stage(String),

    /// Errors while evaluating, rasterizing or encoding frames.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MergeVizError {
    /// Build a [`MergeVizError::Comparison`] value.
    pub fn comparison(msg: impl Into<String>) -> Self {
        Self::Comparison(msg.into())
    }

    /// Build a [`MergeVizError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`MergeVizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MergeVizError::Stage`] value.
    pub fn stage(msg: impl Into<String>) -> Self {
        Self::Stage(msg.into())
    }

    /// Build a [`MergeVizError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MergeVizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MergeVizError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
