//! Integration tests for syntax highlighting functionality.

use pagewright_commonmark::{
  CodeBlockHighlighter,
  syntax::{
    SyntaxConfig,
    SyntaxHighlighter,
    SyntaxManager,
    SyntaxResult,
    create_default_manager,
  },
};

/// Backend that tags every token the same way, for checking the seam.
struct UpperCase;

impl SyntaxHighlighter for UpperCase {
  fn name(&self) -> &'static str {
    "UpperCase"
  }

  fn supported_languages(&self) -> Vec<String> {
    vec!["shout".to_string()]
  }

  fn highlight(&self, code: &str, _language: &str) -> SyntaxResult<String> {
    Ok(format!("<span class=\"loud\">{}</span>", code.to_uppercase()))
  }
}

#[test]
fn test_default_manager_knows_common_languages() {
  let manager = create_default_manager();
  for language in ["javascript", "js", "html", "css", "python", "rust", "bash"] {
    assert!(
      manager.is_known_language(language),
      "{language} should be highlightable"
    );
  }
}

#[test]
fn test_custom_backend_behind_highlighter() {
  let manager = SyntaxManager::new(Box::new(UpperCase), SyntaxConfig {
    default_language: "shout".to_string(),
    ..SyntaxConfig::default()
  });
  assert!(manager.is_known_language("shout"));
  assert!(!manager.is_known_language("javascript"));

  let highlighter = CodeBlockHighlighter::new(manager);
  let html = highlighter
    .process("<pre><code class=\"example\">hello</code></pre>")
    .expect("highlighting succeeds");
  assert!(html.contains("syntaxhighlighter shout"));
  assert!(html.contains("<span class=\"loud\">HELLO</span>"));
}

#[test]
fn test_class_based_output() {
  let manager = create_default_manager();
  let html = manager
    .highlight_code("fn main() {}\n", "rust")
    .expect("Failed to highlight code");
  assert!(html.contains("<span class=\""));
  assert!(!html.contains("style="));
}
