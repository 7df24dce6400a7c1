//! Post-processing of highlighter output.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::utils::never_matching_regex;

/// A line's leading run of tags and tabs.
static LEADING_TABS_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^((?:<[^>]+>|\t)+)").unwrap_or_else(|e| {
    log::error!("Failed to compile LEADING_TABS_RE regex: {e}");
    never_matching_regex()
  })
});

/// Replace leading tabs on every line by `indent`.
///
/// Tags opened at the start of a line are skipped over, so tabs that follow
/// an opening `<span>` are replaced too.
#[must_use]
pub fn fix_markup(html: &str, indent: &str) -> String {
  LEADING_TABS_RE
    .replace_all(html, |caps: &Captures| caps[1].replace('\t', indent))
    .into_owned()
}

/// Make every line of highlighted markup self-contained.
///
/// Spans that are still open at a newline are closed before it and opened
/// again, attributes included, right after it. A `/* ... */` comment that
/// covers three lines therefore ends up as three comment spans.
#[must_use]
pub fn split_multiline_spans(html: &str) -> String {
  let mut out = String::with_capacity(html.len());
  let mut open: Vec<&str> = Vec::new();
  let mut rest = html;

  while let Some(pos) = rest.find(['<', '\n']) {
    out.push_str(&rest[..pos]);
    rest = &rest[pos..];

    if rest.starts_with('\n') {
      for _ in &open {
        out.push_str("</span>");
      }
      out.push('\n');
      for tag in &open {
        out.push_str(tag);
      }
      rest = &rest[1..];
      continue;
    }

    let Some(end) = rest.find('>') else {
      break;
    };
    let tag = &rest[..=end];
    if tag.starts_with("</span") {
      open.pop();
    } else if tag.starts_with("<span") && !tag.ends_with("/>") {
      open.push(tag);
    }
    out.push_str(tag);
    rest = &rest[end + 1..];
  }

  out.push_str(rest);
  out
}
