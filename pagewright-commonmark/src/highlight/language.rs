//! Working out which language a code block is written in.
use crate::syntax::SyntaxManager;

/// Class prefixes that mark a language token (`lang-js`, comrak's
/// `language-js`).
const CLASS_PREFIXES: &[&str] = &["lang-", "language-"];

/// Pick the language to highlight a block with.
///
/// In order of precedence: a `data-lang` naming a known language, the first
/// class token naming a known language once its prefix is stripped, markup if
/// the source opens with a tag, and finally the configured default. Names
/// nothing recognises are skipped, never an error.
#[must_use]
pub fn detect_language(
  syntax: &SyntaxManager,
  data_lang: Option<&str>,
  class: Option<&str>,
  source: &str,
) -> String {
  if let Some(lang) = data_lang.filter(|lang| syntax.is_known_language(lang))
  {
    return lang.to_string();
  }

  if let Some(lang) = class.and_then(|class| language_from_class(syntax, class))
  {
    return lang.to_string();
  }

  let trimmed = source.trim_start();
  if trimmed.starts_with('<') || trimmed.starts_with("&lt;") {
    return syntax.config().markup_language.clone();
  }

  syntax.config().default_language.clone()
}

/// The first class token that names a highlightable language. Purely
/// presentational classes such as `example` are skipped.
fn language_from_class<'a>(
  syntax: &SyntaxManager,
  class: &'a str,
) -> Option<&'a str> {
  class
    .split_ascii_whitespace()
    .map(|token| {
      CLASS_PREFIXES
        .iter()
        .find_map(|prefix| token.strip_prefix(*prefix))
        .unwrap_or(token)
    })
    .find(|token| syntax.is_known_language(token))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::syntax::create_default_manager;

  #[test]
  fn test_data_lang_wins() {
    let syntax = create_default_manager();
    assert_eq!(
      detect_language(&syntax, Some("css"), Some("lang-python"), "<p>"),
      "css"
    );
  }

  #[test]
  fn test_empty_data_lang_is_ignored() {
    let syntax = create_default_manager();
    assert_eq!(
      detect_language(&syntax, Some(""), Some("lang-python"), "x"),
      "python"
    );
  }

  #[test]
  fn test_unknown_data_lang_falls_through() {
    let syntax = create_default_manager();
    assert_eq!(
      detect_language(&syntax, Some("nonsense"), Some("lang-css"), "a {}"),
      "css"
    );
    assert_eq!(
      detect_language(&syntax, Some("nonsense"), None, "<p>hi</p>"),
      "html"
    );
    assert_eq!(
      detect_language(&syntax, Some("nonsense"), None, "var a = 1;"),
      "javascript"
    );
  }

  #[test]
  fn test_class_tokens() {
    let syntax = create_default_manager();
    assert_eq!(
      detect_language(&syntax, None, Some("example lang-css"), "a {}"),
      "css"
    );
    assert_eq!(
      detect_language(&syntax, None, Some("language-rust"), "fn main() {}"),
      "rust"
    );
    assert_eq!(
      detect_language(&syntax, None, Some("python"), "print(1)"),
      "python"
    );
  }

  #[test]
  fn test_presentational_class_falls_through() {
    let syntax = create_default_manager();
    assert_eq!(
      detect_language(&syntax, None, Some("example"), "<div></div>"),
      "html"
    );
    assert_eq!(
      detect_language(&syntax, None, Some("example"), "var a;"),
      "javascript"
    );
  }

  #[test]
  fn test_markup_sniffing() {
    let syntax = create_default_manager();
    assert_eq!(detect_language(&syntax, None, None, "  \n<ul>"), "html");
    assert_eq!(detect_language(&syntax, None, None, "&lt;ul&gt;"), "html");
    assert_eq!(detect_language(&syntax, None, None, "$( 'ul' )"), "javascript");
  }
}
