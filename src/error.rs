//! Error types for markup parsing, backend calls and settings

use thiserror::Error;

/// Failure reported by an external rendering backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for BackendError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for BackendError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Errors turning backend output into a node tree
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("Failed to parse markup: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("Markup has no <svg> root element (found <{0}>)")]
    NotSvg(String),
    #[error("Markup contains no <svg> element")]
    MissingSvg,
}

/// Why one state of the fallback chain did not produce a diagram
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Markup(#[from] MarkupError),
}

/// Errors reading a stored settings record
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}
