//! Core implementation of the Markdown processor.
//!
//! Rendering happens on the comrak AST: headings are swapped for raw output
//! nodes carrying their anchors, and the optional outline is parsed into the
//! same arena and spliced in front of the first block.
use std::sync::LazyLock;

use comrak::{
  Arena,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use log::trace;
use regex::Regex;

use super::{
  toc::TableOfContents,
  types::{MarkdownOptions, MarkdownProcessor, RenderOptions},
};
use crate::{
  types::{Heading, MarkdownResult},
  utils,
};

/// Matches the `<hN>` wrapper comrak puts around a rendered heading.
static HEADING_WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)^\s*<h[1-6][^>]*>(.*)</h[1-6]>\s*$").unwrap_or_else(|e| {
    log::error!("Failed to compile HEADING_WRAPPER_RE regex: {e}");
    utils::never_matching_regex()
  })
});

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Render a Markdown body to HTML.
  ///
  /// With `generate_links` every heading becomes a self-linking anchor and is
  /// reported in [`MarkdownResult::headings`]. With `generate_toc` as well,
  /// an outline of those headings is prepended to the document.
  #[must_use]
  pub fn render(&self, markdown: &str, render: RenderOptions) -> MarkdownResult {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, markdown, &options);

    let mut headings = Vec::new();
    let mut toc = None;

    if render.generate_links {
      headings = anchor_headings(root, &options);
      trace!("Anchored {} headings", headings.len());

      if render.generate_toc {
        let mut outline = TableOfContents::new();
        for heading in &headings {
          outline.push(heading);
        }
        if !outline.is_empty() {
          let outline_md = outline.to_markdown();
          let fragment = parse_document(&arena, &outline_md, &options);
          prepend_blocks(root, fragment);
        }
        toc = Some(outline);
      }
    }

    MarkdownResult {
      html: format_node(root, &options),
      headings,
      toc,
    }
  }

  /// Build comrak options from `MarkdownOptions`.
  fn comrak_options(&self) -> Options<'static> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    options.render.r#unsafe = self.options.raw_html;
    // Anchors are produced by the heading rewrite below
    options.extension.header_ids = None;
    options
  }
}

fn format_node<'a>(node: &'a AstNode<'a>, options: &Options) -> String {
  let mut html_output = String::new();
  comrak::format_html(node, options, &mut html_output).unwrap_or_default();
  html_output
}

/// Render a heading's inline content, without the `<hN>` wrapper.
fn inline_html<'a>(heading: &'a AstNode<'a>, options: &Options) -> String {
  let rendered = format_node(heading, options);
  HEADING_WRAPPER_RE
    .captures(&rendered)
    .and_then(|caps| caps.get(1))
    .map_or_else(|| rendered.trim().to_string(), |m| m.as_str().to_string())
}

/// Replace every heading under `root` with its anchored HTML and return the
/// headings in document order.
fn anchor_headings<'a>(
  root: &'a AstNode<'a>,
  options: &Options,
) -> Vec<Heading> {
  let targets: Vec<_> = root
    .descendants()
    .filter(|node| matches!(node.data.borrow().value, NodeValue::Heading(_)))
    .collect();

  let mut headings = Vec::with_capacity(targets.len());
  for node in targets {
    let depth = match node.data.borrow().value {
      NodeValue::Heading(NodeHeading { level, .. }) => level,
      _ => continue,
    };

    let text = inline_html(node, options);
    let toc_text = utils::strip_tags(&text);
    let heading = Heading {
      depth,
      toc_id: utils::slugify(&toc_text),
      toc_text,
      text,
    };

    let children: Vec<_> = node.children().collect();
    for child in children {
      child.detach();
    }
    // Raw nodes are written verbatim even when source HTML is suppressed
    node.data.borrow_mut().value =
      NodeValue::Raw(anchored_heading_html(&heading));

    headings.push(heading);
  }

  headings
}

/// The markup a heading is rewritten to.
#[must_use]
pub fn anchored_heading_html(heading: &Heading) -> String {
  let Heading {
    depth,
    text,
    toc_id: id,
    ..
  } = heading;
  format!(
    "<h{depth} class=\"toc-linked\"><a href=\"#{id}\" id=\"{id}\" \
     class=\"icon-link toc-link\"><span \
     class=\"visuallyhidden\">link</span></a> {text}</h{depth}>\n"
  )
}

/// Move every block of `fragment` to the front of `root`, keeping their
/// order.
fn prepend_blocks<'a>(root: &'a AstNode<'a>, fragment: &'a AstNode<'a>) {
  let blocks: Vec<_> = fragment.children().collect();
  for block in blocks.into_iter().rev() {
    root.prepend(block);
  }
}
