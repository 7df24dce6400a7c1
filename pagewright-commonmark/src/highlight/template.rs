use std::{fs, path::Path};

use serde::Serialize;
use tera::{Context, Tera};

use super::{HighlightError, linenum::LineNumbering};

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/code-block.html");

// The .html suffix turns on tera's autoescaping for everything but the
// already highlighted lines.
const TEMPLATE_NAME: &str = "code-block.html";

/// One rendered source line.
#[derive(Debug, Serialize)]
struct Row<'a> {
  number: i64,
  index:  usize,
  alt:    u8,
  line:   &'a str,
}

/// The markup a highlighted block is wrapped in.
pub struct CodeBlockTemplate {
  tera: Tera,
}

impl CodeBlockTemplate {
  /// Compile a template from source.
  ///
  /// # Errors
  ///
  /// Returns an error if the template does not parse.
  pub fn from_source(source: &str) -> Result<Self, HighlightError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, source)?;
    Ok(Self { tera })
  }

  /// Compile the template stored at `path`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or does not parse.
  pub fn from_file(path: &Path) -> Result<Self, HighlightError> {
    let source = fs::read_to_string(path).map_err(|source| {
      HighlightError::TemplateRead {
        path: path.to_path_buf(),
        source,
      }
    })?;
    Self::from_source(&source)
  }

  /// Render `lines` as one block, numbered from `numbering.start`.
  ///
  /// # Errors
  ///
  /// Returns an error if rendering fails.
  pub fn render(
    &self,
    lines: &[&str],
    numbering: LineNumbering,
    language: &str,
  ) -> Result<String, HighlightError> {
    let rows: Vec<Row<'_>> = lines
      .iter()
      .enumerate()
      .map(|(index, line)| Row {
        number: i64::try_from(index)
          .map_or(numbering.start, |i| numbering.start.saturating_add(i)),
        index,
        alt: if index % 2 == 0 { 1 } else { 2 },
        line,
      })
      .collect();

    let mut context = Context::new();
    context.insert("rows", &rows);
    context.insert("gutter", &numbering.gutter);
    context.insert("language", language);

    Ok(self.tera.render(TEMPLATE_NAME, &context)?)
  }
}

impl Default for CodeBlockTemplate {
  fn default() -> Self {
    let mut tera = Tera::default();
    if let Err(e) = tera.add_raw_template(TEMPLATE_NAME, DEFAULT_TEMPLATE) {
      log::error!("Failed to compile the built-in code block template: {e}");
    }
    Self { tera }
  }
}
