//! Markdown processing module.
//!
//! - [`core`]: processor implementation and the heading rewrite
//! - [`toc`]: outline synthesis from collected headings
//! - [`types`]: configuration structures and the processor type
pub mod core;
pub mod toc;
pub mod types;

pub use self::core::anchored_heading_html;

pub use toc::{TableOfContents, TocEntry};
pub use types::{MarkdownOptions, MarkdownProcessor, RenderOptions};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_gfm_can_be_disabled() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      gfm: false,
      ..Default::default()
    });
    let result = processor.render("~~gone~~\n", RenderOptions::default());
    assert!(!result.html.contains("<del>"));

    let gfm = MarkdownProcessor::default();
    let result = gfm.render("~~gone~~\n", RenderOptions::default());
    assert!(result.html.contains("<del>gone</del>"));
  }

  #[test]
  fn test_raw_html_passthrough() {
    let processor = MarkdownProcessor::default();
    let result =
      processor.render("<div class=\"x\">hi</div>\n", RenderOptions::default());
    assert_eq!(result.html, "<div class=\"x\">hi</div>\n");
  }
}
