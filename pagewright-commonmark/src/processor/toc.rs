//! Table of contents synthesis.
use std::fmt::Write;

use crate::types::Heading;

/// Spaces of indentation per nesting level in the generated outline.
const INDENT_WIDTH: usize = 2;

/// One line of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
  pub depth: u8,
  pub text:  String,
  pub id:    String,
}

/// Ordered outline of a document's headings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOfContents {
  entries: Vec<TocEntry>,
}

impl TableOfContents {
  #[must_use]
  pub const fn new() -> Self {
    Self {
      entries: Vec::new(),
    }
  }

  /// Record a heading. Entries keep the order they are pushed in.
  pub fn push(&mut self, heading: &Heading) {
    self.entries.push(TocEntry {
      depth: heading.depth,
      text:  heading.toc_text.clone(),
      id:    heading.toc_id.clone(),
    });
  }

  #[must_use]
  pub fn entries(&self) -> &[TocEntry] {
    &self.entries
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Render the outline as a nested Markdown bullet list.
  ///
  /// Each entry is indented by `INDENT_WIDTH * (depth - 1)` spaces and links
  /// to its heading anchor.
  #[must_use]
  pub fn to_markdown(&self) -> String {
    let mut out = String::new();
    for entry in &self.entries {
      let indent = usize::from(entry.depth.saturating_sub(1)) * INDENT_WIDTH;
      // Writing to a String never fails
      let _ = writeln!(
        out,
        "{:indent$}* [{}](#{})",
        "",
        escape_link_text(&entry.text),
        entry.id
      );
    }
    out
  }
}

fn escape_link_text(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(c, '\\' | '[' | ']') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}
