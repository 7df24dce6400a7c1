//! Error types for syntax highlighting operations.

/// Result type for syntax highlighting operations.
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Errors that can occur during syntax highlighting.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
  #[error("Highlighting failed: {0}")]
  HighlightingFailed(String),
}

impl From<syntect::Error> for SyntaxError {
  fn from(e: syntect::Error) -> Self {
    Self::HighlightingFailed(e.to_string())
  }
}
