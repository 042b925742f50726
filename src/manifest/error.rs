//! Manifest error types

/// Manifest error types
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to load stack manifest from {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    LoadError {
        path: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Malformed provider descriptor at providers[{index}]: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    MalformedDescriptor {
        index: usize,
        reason: String,
        hint: Option<String>,
    },

    #[error("Invalid component name '{name}' at providers[{index}]")]
    InvalidComponentName { name: String, index: usize },

    #[error("Unknown component '{name}'{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    UnknownComponent { name: String, hint: Option<String> },

    #[error("Stack manifest not found: {id}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    NotFound { id: String, hint: Option<String> },

    #[error("Invalid YAML manifest: {0}")]
    YamlError(String),

    #[error("Invalid JSON manifest: {0}")]
    JsonError(String),

    #[error("Internal manifest error: {0}")]
    Internal(String),
}

impl ManifestError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            ManifestError::LoadError { ref mut hint, .. } => *hint = hint_val,
            ManifestError::MalformedDescriptor { ref mut hint, .. } => *hint = hint_val,
            ManifestError::UnknownComponent { ref mut hint, .. } => *hint = hint_val,
            ManifestError::NotFound { ref mut hint, .. } => *hint = hint_val,
            _ => (),
        }
        self
    }

    /// Position of the offending entry, when the error concerns one.
    pub fn index(&self) -> Option<usize> {
        match self {
            ManifestError::MalformedDescriptor { index, .. }
            | ManifestError::InvalidComponentName { index, .. } => Some(*index),
            _ => None,
        }
    }
}
