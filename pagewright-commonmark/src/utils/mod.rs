use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[^A-Za-z0-9_]+").unwrap_or_else(|e| {
    log::error!("Failed to compile NON_WORD_RE regex: {e}");
    never_matching_regex()
  })
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<[^>]+>").unwrap_or_else(|e| {
    log::error!("Failed to compile TAG_RE regex: {e}");
    never_matching_regex()
  })
});

/// Slugify a string for use as an anchor ID.
///
/// Runs of non-word characters collapse into a single dash, leading and
/// trailing dashes are trimmed and the result is lowercased. Identical input
/// always yields the identical slug; no attempt is made to make slugs unique
/// within a document.
#[must_use]
pub fn slugify(text: &str) -> String {
  NON_WORD_RE
    .replace_all(text, "-")
    .trim_matches('-')
    .to_lowercase()
}

/// Remove every tag from an HTML snippet, leaving entities untouched.
#[must_use]
pub fn strip_tags(html: &str) -> String {
  TAG_RE.replace_all(html, "").into_owned()
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(clippy::unwrap_used, reason = "Pattern is a compile-time constant")]
    Regex::new(r"^\b$").unwrap()
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slugify_punctuation() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("  --Leading and trailing--  "), "leading-and-trailing");
  }

  #[test]
  fn test_slugify_is_deterministic() {
    let text = "The `render()` API & friends";
    assert_eq!(slugify(text), slugify(text));
    assert_eq!(slugify(text), "the-render-api-friends");
  }

  #[test]
  fn test_slugify_keeps_underscores_and_digits() {
    assert_eq!(slugify("snake_case 2.0"), "snake_case-2-0");
  }

  #[test]
  fn test_strip_tags() {
    assert_eq!(
      strip_tags("Use <code>foo</code> &amp; <em>bar</em>"),
      "Use foo &amp; bar"
    );
  }

  #[test]
  fn test_never_matching_regex() {
    let re = never_matching_regex();
    assert!(!re.is_match(""));
    assert!(!re.is_match("anything"));
  }
}
