//! Types for pagewright-commonmark public API and internal use.
use serde::{Deserialize, Serialize};

use crate::processor::toc::TableOfContents;

/// A heading found while rendering with anchors enabled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading level (1-6).
  pub depth:    u8,
  /// Inline content rendered to HTML.
  pub text:     String,
  /// `text` with every tag stripped.
  pub toc_text: String,
  /// Anchor id derived from `toc_text`.
  pub toc_id:   String,
}

/// Result of Markdown processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML output.
  pub html: String,

  /// Headings in document order. Empty when anchors were not requested.
  pub headings: Vec<Heading>,

  /// The outline that was prepended to `html`, if one was requested.
  pub toc: Option<TableOfContents>,
}
