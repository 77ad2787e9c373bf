//! Error types for the log layout

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Positional arguments left over after classification
    #[error("Invalid leftover arguments: {leftover}")]
    InvalidArguments { leftover: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LayoutError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LayoutError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a leftover-arguments error from the inspected leftovers
    pub fn invalid_arguments(leftover: impl Into<String>) -> Self {
        LayoutError::InvalidArguments {
            leftover: leftover.into(),
        }
    }

    /// Whether this error must cross the formatter boundary instead of
    /// being absorbed by the fault tiers.
    pub fn is_configuration(&self) -> bool {
        matches!(self, LayoutError::InvalidConfiguration { .. })
    }

    /// Name of the variant, used as the class name when a failure is rendered.
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutError::InvalidConfiguration { .. } => "InvalidConfiguration",
            LayoutError::InvalidArguments { .. } => "InvalidArguments",
            LayoutError::JsonError(_) => "JsonError",
        }
    }
}
