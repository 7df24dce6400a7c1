//! Provides a trait-based architecture for syntax highlighting so the code
//! block highlighter does not depend on a particular backend.
//!
//! The bundled backend is **Syntect**, using Sublime Text syntax definitions
//! with two-face added for extended syntax definitions.

pub mod error;
mod syntect;
pub mod types;

pub use error::{SyntaxError, SyntaxResult};
pub use self::syntect::{SyntectHighlighter, create_syntect_manager};
pub use types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager};

/// Create the default syntax manager.
#[must_use]
pub fn create_default_manager() -> SyntaxManager {
  create_syntect_manager()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_syntax_config_default() {
    let config = SyntaxConfig::default();
    assert_eq!(config.language_aliases["js"], "javascript");
    assert_eq!(config.default_language, "javascript");
    assert_eq!(config.markup_language, "html");
  }

  #[test]
  fn test_syntect_highlighter() {
    let highlighter = SyntectHighlighter::default();
    assert_eq!(highlighter.name(), "Syntect");
    assert!(!highlighter.supported_languages().is_empty());
    assert!(highlighter.supports_language("javascript"));
    assert!(highlighter.supports_language("html"));
    assert!(!highlighter.supports_language("definitely-not-a-language"));
  }

  #[test]
  fn test_syntect_emits_classes() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("var answer = 42;", "javascript")
      .expect("Failed to highlight code");
    assert!(html.contains("<span class=\""));
    assert!(html.contains("answer"));
    assert!(!html.contains("style="));
  }

  #[test]
  fn test_unknown_language_renders_plain_text() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("a < b", "definitely-not-a-language")
      .expect("plain text fallback");
    assert!(html.contains("a &lt; b"));
  }

  #[test]
  fn test_language_resolution() {
    let manager = create_default_manager();

    assert_eq!(manager.resolve_language("js"), "javascript");
    assert_eq!(manager.resolve_language("py"), "python");
    assert_eq!(manager.resolve_language("rust"), "rust");

    assert!(manager.is_known_language("js"));
    assert!(manager.is_known_language("xml"));
    assert!(!manager.is_known_language("example"));
    assert!(!manager.is_known_language(""));
  }
}
