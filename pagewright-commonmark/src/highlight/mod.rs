//! Code block highlighting for rendered HTML.
//!
//! Every `<pre><code>` block in a page is decoded, outdented, highlighted and
//! re-rendered through a line-numbered template. The `<pre>` is replaced in
//! place; everything else in the page is left as it was.
//!
//! ```
//! use pagewright_commonmark::CodeBlockHighlighter;
//!
//! let highlighter = CodeBlockHighlighter::default();
//! let html = highlighter
//!   .process("<pre><code data-linenum=\"3\">var a = 1;</code></pre>")
//!   .unwrap();
//! assert!(html.contains("line number3"));
//! ```
mod language;
mod linenum;
mod markup;
mod outdent;
mod template;

use std::{io, path::PathBuf};

use kuchikikiki::{NodeRef, parse_html};
use log::trace;
use markup5ever::{LocalName, local_name};
use tendril::TendrilSink;

pub use self::{
  language::detect_language,
  linenum::LineNumbering,
  markup::{fix_markup, split_multiline_spans},
  outdent::outdent,
  template::CodeBlockTemplate,
};
use crate::syntax::{SyntaxError, SyntaxManager, create_default_manager};

/// Leading tabs in highlighted output are replaced by this.
const INDENT_UNIT: &str = "  ";

/// Errors raised while highlighting code blocks.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
  #[error("Syntax highlighting failed: {0}")]
  Syntax(#[from] SyntaxError),

  #[error("Code block template error: {0}")]
  Template(#[from] tera::Error),

  #[error("Failed to read code block template {}: {source}", path.display())]
  TemplateRead {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to serialize highlighted HTML: {0}")]
  Serialize(#[from] io::Error),
}

/// Rewrites the code blocks of a page.
pub struct CodeBlockHighlighter {
  syntax:   SyntaxManager,
  template: CodeBlockTemplate,
}

impl Default for CodeBlockHighlighter {
  fn default() -> Self {
    Self::new(create_default_manager())
  }
}

impl CodeBlockHighlighter {
  /// Create a highlighter using the built-in block template.
  #[must_use]
  pub fn new(syntax: SyntaxManager) -> Self {
    Self {
      syntax,
      template: CodeBlockTemplate::default(),
    }
  }

  /// Replace the block template.
  #[must_use]
  pub fn with_template(mut self, template: CodeBlockTemplate) -> Self {
    self.template = template;
    self
  }

  /// Highlight every `pre > code` block in `html`.
  ///
  /// Fragments come back as fragments; input that starts with a doctype or
  /// an `<html>` tag is serialized as a whole document.
  ///
  /// # Errors
  ///
  /// Returns an error if a block cannot be highlighted or rendered. Blocks
  /// naming an unknown language use the default language instead.
  pub fn process(&self, html: &str) -> Result<String, HighlightError> {
    let document = parse_html().one(html);

    // Collect first; the DOM is rewritten below
    let blocks: Vec<NodeRef> = document
      .select("pre > code")
      .map(|codes| codes.map(|code| code.as_node().clone()).collect())
      .unwrap_or_default();
    trace!("Found {} code blocks", blocks.len());

    for code in blocks {
      let Some(pre) = code.parent() else {
        continue;
      };
      if pre.parent().is_none() {
        // A sibling block already replaced this <pre>
        continue;
      }

      let rendered = self.render_block(&code)?;
      let fragment = parse_html().one(rendered.as_str());
      for node in content_nodes(&fragment) {
        pre.insert_before(node);
      }
      pre.detach();
    }

    let mut out = Vec::new();
    if is_full_document(html) {
      document.serialize(&mut out)?;
    } else {
      for node in content_nodes(&document) {
        node.serialize(&mut out)?;
      }
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
  }

  fn render_block(&self, code: &NodeRef) -> Result<String, HighlightError> {
    let (data_lang, class, linenum) = code.as_element().map_or_else(
      || (None, None, None),
      |element| {
        let attributes = element.attributes.borrow();
        let get = |name: &str| attributes.get(name).map(ToString::to_string);
        (get("data-lang"), get("class"), get("data-linenum"))
      },
    );

    let mut inner = Vec::new();
    for child in code.children() {
      child.serialize(&mut inner)?;
    }
    let inner = String::from_utf8_lossy(&inner);
    let source =
      html_escape::decode_html_entities(&outdent(&inner)).into_owned();

    let language = detect_language(
      &self.syntax,
      data_lang.as_deref(),
      class.as_deref(),
      &source,
    );
    trace!("Highlighting code block as {language}");

    let highlighted = self.syntax.highlight_code(&source, &language)?;
    let fixed = split_multiline_spans(&fix_markup(&highlighted, INDENT_UNIT));
    let lines: Vec<&str> = fixed.split('\n').collect();

    self.template.render(
      &lines,
      LineNumbering::from_attribute(linenum.as_deref()),
      &language,
    )
  }
}

fn is_full_document(html: &str) -> bool {
  let head: String = html
    .trim_start()
    .chars()
    .take("<!doctype".len())
    .collect::<String>()
    .to_ascii_lowercase();
  head.starts_with("<!doctype") || head.starts_with("<html")
}

fn is_element(node: &NodeRef, name: &LocalName) -> bool {
  node
    .as_element()
    .is_some_and(|element| element.name.local == *name)
}

/// The nodes a parsed fragment consists of, in source order.
///
/// The HTML parser always builds a full document; this unwraps the implied
/// `<html>`, `<head>` and `<body>` again. Whitespace ahead of the first
/// element never reaches the tree, so it is not part of the result.
fn content_nodes(document: &NodeRef) -> Vec<NodeRef> {
  let mut nodes = Vec::new();
  for node in document.children() {
    if node.as_doctype().is_some() {
      continue;
    }
    if !is_element(&node, &local_name!("html")) {
      nodes.push(node);
      continue;
    }
    for section in node.children() {
      if is_element(&section, &local_name!("head"))
        || is_element(&section, &local_name!("body"))
      {
        nodes.extend(section.children());
      } else {
        nodes.push(section);
      }
    }
  }
  nodes
}

#[cfg(test)]
mod tests {
  use super::*;

  fn process(html: &str) -> String {
    CodeBlockHighlighter::default()
      .process(html)
      .expect("highlighting should succeed")
  }

  #[test]
  fn test_fragment_stays_a_fragment() {
    let html = process("<p>Hello <em>there</em></p>");
    assert_eq!(html, "<p>Hello <em>there</em></p>");
  }

  #[test]
  fn test_leading_whitespace_before_fragment_is_dropped() {
    assert_eq!(process("\n\n<p>x</p>\n"), "<p>x</p>\n");
  }

  #[test]
  fn test_full_document_is_kept_whole() {
    let html = process(
      "<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></\
       body></html>",
    );
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>t</title>"));
    assert!(html.contains("<body><p>x</p></body>"));
  }

  #[test]
  fn test_block_is_replaced() {
    let html = process(
      "<p>before</p><pre><code class=\"lang-css\">a { color: red; \
       }</code></pre><p>after</p>",
    );
    assert!(!html.contains("<pre>"));
    assert!(html.starts_with("<p>before</p>"));
    assert!(html.ends_with("<p>after</p>"));
    assert!(html.contains("class=\"syntaxhighlighter css\""));
    assert!(html.contains("<span class=\""));
    assert!(!html.contains("class=\"gutter\""));
  }

  #[test]
  fn test_entities_are_decoded_before_highlighting() {
    let html = process("<pre><code>&lt;p&gt;hi&lt;/p&gt;</code></pre>");
    assert!(html.contains("syntaxhighlighter html"));
    // Re-escaped exactly once by the highlighter
    assert!(html.contains("&lt;"));
    assert!(!html.contains("&amp;lt;"));
  }

  #[test]
  fn test_line_numbers_and_outdent() {
    let html = process(
      "<pre><code data-lang=\"javascript\" data-linenum=\"10\">\n\t\tvar \
       a;\n\t\tvar b;\n</code></pre>",
    );
    assert!(html.contains("class=\"gutter\""));
    assert!(html.contains("line number10 index0 alt1\">10</div>"));
    assert!(html.contains("line number11 index1 alt2\">11</div>"));
    assert!(!html.contains("line number12"));
    assert!(!html.contains("\tvar"));
  }

  #[test]
  fn test_multiline_comment_lines_each_carry_a_span() {
    let html = process(
      "<pre><code data-lang=\"javascript\">/* one\ntwo\nthree \
       */</code></pre>",
    );
    let rows: Vec<&str> = html
      .split("<code>")
      .skip(1)
      .map(|row| row.split("</code>").next().unwrap_or_default())
      .collect();
    assert_eq!(rows.len(), 3);
    for row in rows {
      assert!(row.contains("comment"), "row lost its comment span: {row}");
      assert_eq!(row.matches("<span").count(), row.matches("</span>").count());
    }
  }

  #[test]
  fn test_unknown_data_lang_uses_default_language() {
    let html =
      process("<pre><code data-lang=\"nonsense\">var a = 1;</code></pre>");
    assert!(html.contains("class=\"syntaxhighlighter javascript\""));
    assert!(!html.contains("nonsense"));
    assert!(!html.contains("text plain"));
  }

  #[test]
  fn test_custom_template() {
    let template =
      CodeBlockTemplate::from_source("<ol>{% for row in rows %}<li>{{ \
                                      row.line | safe }}</li>{% endfor \
                                      %}</ol>")
        .expect("template compiles");
    let highlighter = CodeBlockHighlighter::default().with_template(template);
    let html = highlighter
      .process("<pre><code data-lang=\"text\">a\nb</code></pre>")
      .expect("highlight");
    assert!(html.starts_with("<ol><li>"));
    assert_eq!(html.matches("<li>").count(), 2);
  }

  #[test]
  fn test_code_outside_pre_is_untouched() {
    let html = process("<p><code>inline</code></p>");
    assert_eq!(html, "<p><code>inline</code></p>");
  }
}
