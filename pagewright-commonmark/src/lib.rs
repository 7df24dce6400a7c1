//! # pagewright-commonmark
//!
//! The document transformation half of pagewright: front matter extraction,
//! Markdown rendering with heading anchors and an optional outline, partial
//! inclusion, and line-numbered syntax highlighting of code blocks.
//!
//! Nothing here touches the output directory. The only filesystem access is
//! reading partials (and, if asked, a custom code block template).
//!
//! ## Quick Start
//!
//! ```rust
//! use pagewright_commonmark::{
//!   CodeBlockHighlighter,
//!   MarkdownProcessor,
//!   RenderOptions,
//!   frontmatter,
//! };
//!
//! let source = "---\ntitle: Hello\n---\n# Hello\n\n```js\nvar a;\n```\n";
//! let front = frontmatter::extract(source).expect("valid front matter");
//! assert_eq!(front.metadata["title"], "Hello");
//!
//! let body = front.metadata["content"].as_str().unwrap_or_default();
//! let result = MarkdownProcessor::default().render(body, RenderOptions::linked());
//! assert_eq!(result.headings[0].toc_id, "hello");
//!
//! let html = CodeBlockHighlighter::default()
//!   .process(&result.html)
//!   .expect("highlighting succeeds");
//! assert!(html.contains("syntaxhighlighter"));
//! ```

pub mod frontmatter;
pub mod highlight;
pub mod partials;
pub mod processor;
pub mod syntax;
mod types;
pub mod utils;

pub use crate::{
  frontmatter::{FrontMatter, FrontMatterError, Metadata, MetadataFormat},
  highlight::{CodeBlockHighlighter, CodeBlockTemplate, HighlightError},
  partials::{PartialError, escape_partial, expand_partials},
  processor::{
    MarkdownOptions,
    MarkdownProcessor,
    RenderOptions,
    TableOfContents,
  },
  types::{Heading, MarkdownResult},
};
