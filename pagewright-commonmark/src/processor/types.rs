//! Type definitions for the Markdown processor.
//!
//! # Examples
//!
//! ```
//! use pagewright_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   gfm: true,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown (GFM) extensions.
  pub gfm: bool,

  /// Pass raw HTML in the source through to the output.
  pub raw_html: bool,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:      true,
      raw_html: true,
    }
  }
}

/// Per-document rendering switches, usually derived from front matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
  /// Rewrite headings into self-linking anchors.
  pub generate_links: bool,

  /// Prepend an outline of the headings. Only honoured together with
  /// `generate_links`.
  pub generate_toc: bool,
}

impl RenderOptions {
  /// Anchored headings, no outline.
  #[must_use]
  pub const fn linked() -> Self {
    Self {
      generate_links: true,
      generate_toc:   false,
    }
  }

  /// Anchored headings plus an outline.
  #[must_use]
  pub const fn with_toc() -> Self {
    Self {
      generate_links: true,
      generate_toc:   true,
    }
  }
}

/// Main Markdown processor.
///
/// Holds no per-document state, so a single instance can render any number
/// of documents.
#[derive(Debug, Clone, Default)]
pub struct MarkdownProcessor {
  pub(crate) options: MarkdownOptions,
}
