//! `@partial(...)` inclusion.
//!
//! A partial is an HTML fragment stored in its own file and shown verbatim,
//! escaped, inside a page; usually as the body of a code sample. Live markup
//! that should not appear in the sample can be fenced off:
//!
//! ```html
//! <!-- @placeholder-start(more items) -->
//! <li>two</li>
//! <li>three</li>
//! <!-- @placeholder-end -->
//! ```
//!
//! The fenced region is collapsed to `<!-- more items -->` before escaping.
use std::{
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use log::debug;
use regex::{Captures, Regex};

use crate::utils::never_matching_regex;

static PARTIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"@partial\(([^)\n]+)\)").unwrap_or_else(|e| {
    log::error!("Failed to compile PARTIAL_RE regex: {e}");
    never_matching_regex()
  })
});

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<!-- @placeholder-start\((.+?)\) -->[\s\S]+?@placeholder-end -->")
    .unwrap_or_else(|e| {
      log::error!("Failed to compile PLACEHOLDER_RE regex: {e}");
      never_matching_regex()
    })
});

/// Errors raised while expanding partials.
#[derive(Debug, thiserror::Error)]
pub enum PartialError {
  #[error("Failed to read partial {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Replace every `@partial(<path>)` directive with the escaped contents of
/// the referenced file. Relative paths resolve against `base_dir`.
///
/// # Errors
///
/// Returns [`PartialError::Read`] for the first partial that cannot be read.
pub fn expand_partials(
  content: &str,
  base_dir: &Path,
) -> Result<String, PartialError> {
  let mut output = String::with_capacity(content.len());
  let mut last = 0;

  for caps in PARTIAL_RE.captures_iter(content) {
    let Some(directive) = caps.get(0) else {
      continue;
    };
    let path = base_dir.join(caps[1].trim());
    debug!("Including partial: {}", path.display());

    let partial = fs::read_to_string(&path)
      .map_err(|source| PartialError::Read { path, source })?;

    output.push_str(&content[last..directive.start()]);
    output.push_str(&escape_partial(&partial));
    last = directive.end();
  }

  output.push_str(&content[last..]);
  Ok(output)
}

/// Escape partial contents for display inside a page.
///
/// Placeholder regions are collapsed first, then `&`, `<`, `>`, `"` and `'`
/// are replaced in that order so entities introduced by the later
/// substitutions are never escaped twice.
#[must_use]
pub fn escape_partial(text: &str) -> String {
  PLACEHOLDER_RE
    .replace_all(text, |caps: &Captures| format!("<!-- {} -->", &caps[1]))
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
    .replace('\'', "&#039;")
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_escape_order() {
    assert_eq!(
      escape_partial(r#"<a href="x">Tom & 'Jerry'</a>"#),
      "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
    );
  }

  #[test]
  fn test_existing_entities_are_escaped_once() {
    assert_eq!(escape_partial("&lt;"), "&amp;lt;");
  }

  #[test]
  fn test_placeholder_is_collapsed() {
    let input = "<ul>\n<!-- @placeholder-start(more items) -->\n<li>two</li>\n\
                 <!-- @placeholder-end -->\n</ul>";
    assert_eq!(
      escape_partial(input),
      "&lt;ul&gt;\n&lt;!-- more items --&gt;\n&lt;/ul&gt;"
    );
  }

  #[test]
  fn test_multiple_placeholders_stay_separate() {
    let input = "<!-- @placeholder-start(a) -->x<!-- @placeholder-end -->\
                 keep\
                 <!-- @placeholder-start(b) -->y<!-- @placeholder-end -->";
    assert_eq!(
      escape_partial(input),
      "&lt;!-- a --&gt;keep&lt;!-- b --&gt;"
    );
  }

  #[test]
  fn test_expand_partials_reads_relative_to_base() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    fs::write(dir.path().join("snippet.html"), "<b>hi</b>\n")
      .expect("Failed to write partial in test");

    let out = expand_partials(
      "<pre><code>@partial(snippet.html)</code></pre>",
      dir.path(),
    )
    .expect("partial should expand");

    assert_eq!(out, "<pre><code>&lt;b&gt;hi&lt;/b&gt;\n</code></pre>");
  }

  #[test]
  fn test_missing_partial_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let err = expand_partials("@partial(nope.html)", dir.path()).unwrap_err();
    let PartialError::Read { path, .. } = err;
    assert!(path.ends_with("nope.html"));
  }

  #[test]
  fn test_content_without_directives_is_untouched() {
    let dir = tempdir().expect("Failed to create temp dir in test");
    let text = "<p>partial(not a directive)</p>";
    assert_eq!(
      expand_partials(text, dir.path()).expect("nothing to expand"),
      text
    );
  }
}
