//! Syntect-based syntax highlighting backend enhanced with two-face.
//!
//! Uses Sublime Text syntax definitions (TextMate grammars) from the
//! two-face bundle and emits class-based markup through
//! [`ClassedHTMLGenerator`], one scope per `<span>`.

use std::sync::OnceLock;

use syntect::{
  html::{ClassStyle, ClassedHTMLGenerator},
  parsing::{SyntaxReference, SyntaxSet},
  util::LinesWithEndings,
};

use super::{
  error::SyntaxResult,
  types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager},
};

/// Canonical language names that some bundled grammars only register by
/// extension (two-face ships JavaScript as "JavaScript (Babel)", for one).
const NAME_TO_EXTENSION: &[(&str, &str)] = &[
  ("javascript", "js"),
  ("typescript", "ts"),
  ("python", "py"),
  ("ruby", "rb"),
  ("bash", "sh"),
  ("shell", "sh"),
  ("markdown", "md"),
  ("yaml", "yml"),
];

/// Syntect-based syntax highlighter
pub struct SyntectHighlighter {
  class_style: ClassStyle,
}

impl SyntectHighlighter {
  /// Create a new Syntect highlighter with the given class naming style.
  #[must_use]
  pub const fn new(class_style: ClassStyle) -> Self {
    Self { class_style }
  }

  /// Get the syntect SyntaxSet.
  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
  }

  fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    let syntax_set = Self::syntax_set();
    syntax_set
      .find_syntax_by_token(language)
      .or_else(|| {
        NAME_TO_EXTENSION
          .iter()
          .find(|(name, _)| name.eq_ignore_ascii_case(language))
          .and_then(|(_, ext)| syntax_set.find_syntax_by_extension(ext))
      })
  }
}

impl Default for SyntectHighlighter {
  fn default() -> Self {
    Self::new(ClassStyle::Spaced)
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn supported_languages(&self) -> Vec<String> {
    Self::syntax_set()
      .syntaxes()
      .iter()
      .flat_map(|syntax| {
        std::iter::once(syntax.name.to_lowercase())
          .chain(syntax.file_extensions.iter().map(|ext| ext.to_lowercase()))
      })
      .collect()
  }

  fn supports_language(&self, language: &str) -> bool {
    Self::find_syntax(language).is_some()
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = Self::find_syntax(language)
      .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
      syntax,
      syntax_set,
      self.class_style,
    );
    for line in LinesWithEndings::from(code) {
      generator.parse_html_for_line_which_includes_newline(line)?;
    }

    Ok(generator.finalize())
  }
}

/// Create a Syntect-based syntax manager with the default configuration
#[must_use]
pub fn create_syntect_manager() -> SyntaxManager {
  SyntaxManager::new(
    Box::new(SyntectHighlighter::default()),
    SyntaxConfig::default(),
  )
}
