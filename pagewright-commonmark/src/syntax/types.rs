//! Core types and traits for syntax highlighting.

use std::collections::HashMap;

use super::error::SyntaxResult;

/// Trait for syntax highlighting backends.
///
/// Implementations produce HTML in which tokens are wrapped in `<span>`
/// elements carrying CSS classes (no inline styles), so pages can be themed
/// from a stylesheet.
pub trait SyntaxHighlighter: Send + Sync {
  /// Get the name of this highlighter backend
  fn name(&self) -> &'static str;

  /// Get a list of supported language names and tokens, lowercased
  fn supported_languages(&self) -> Vec<String>;

  /// Check if a language is supported
  fn supports_language(&self, language: &str) -> bool {
    self
      .supported_languages()
      .iter()
      .any(|lang| lang.eq_ignore_ascii_case(language))
  }

  /// Highlight code with the specified language.
  ///
  /// Unsupported languages are rendered as escaped plain text by
  /// implementations rather than rejected.
  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String>;
}

/// Configuration for syntax highlighting
#[derive(Debug, Clone)]
pub struct SyntaxConfig {
  /// Language aliases for mapping common names to supported languages
  pub language_aliases: HashMap<String, String>,

  /// Language assumed when nothing else identifies a block
  pub default_language: String,

  /// Language assumed for blocks that look like markup
  pub markup_language: String,
}

impl Default for SyntaxConfig {
  fn default() -> Self {
    let mut language_aliases = HashMap::new();

    // Common aliases
    language_aliases.insert("js".to_string(), "javascript".to_string());
    language_aliases.insert("ts".to_string(), "typescript".to_string());
    language_aliases.insert("py".to_string(), "python".to_string());
    language_aliases.insert("rb".to_string(), "ruby".to_string());
    language_aliases.insert("sh".to_string(), "bash".to_string());
    language_aliases.insert("shell".to_string(), "bash".to_string());
    language_aliases.insert("yml".to_string(), "yaml".to_string());
    language_aliases.insert("md".to_string(), "markdown".to_string());

    Self {
      language_aliases,
      default_language: "javascript".to_string(),
      markup_language: "html".to_string(),
    }
  }
}

/// High-level syntax highlighting manager.
///
/// Owns a backend and answers the two questions the code block highlighter
/// asks: "is this a language we know?" and "highlight this as that".
pub struct SyntaxManager {
  highlighter: Box<dyn SyntaxHighlighter>,
  config:      SyntaxConfig,
}

impl SyntaxManager {
  /// Create a new syntax manager with the given highlighter and config
  #[must_use]
  pub fn new(
    highlighter: Box<dyn SyntaxHighlighter>,
    config: SyntaxConfig,
  ) -> Self {
    Self {
      highlighter,
      config,
    }
  }

  /// Get the configuration
  #[must_use]
  pub const fn config(&self) -> &SyntaxConfig {
    &self.config
  }

  /// Resolve a language name using aliases
  #[must_use]
  pub fn resolve_language(&self, language: &str) -> String {
    self
      .config
      .language_aliases
      .get(language)
      .cloned()
      .unwrap_or_else(|| language.to_string())
  }

  /// Whether `language` (or what it aliases to) can be highlighted.
  #[must_use]
  pub fn is_known_language(&self, language: &str) -> bool {
    !language.is_empty()
      && self
        .highlighter
        .supports_language(&self.resolve_language(language))
  }

  /// Highlight code with alias resolution. Unknown languages fall back to
  /// plain text inside the backend.
  ///
  /// # Errors
  ///
  /// Propagates backend failures.
  pub fn highlight_code(
    &self,
    code: &str,
    language: &str,
  ) -> SyntaxResult<String> {
    let resolved_language = self.resolve_language(language);
    self.highlighter.highlight(code, &resolved_language)
  }
}
