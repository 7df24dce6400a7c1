//! Assembling one published page from one source document.
use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{debug, error, warn};
use pagewright_commonmark::{
  CodeBlockHighlighter,
  CodeBlockTemplate,
  MarkdownProcessor,
  Metadata,
  RenderOptions,
  expand_partials,
  frontmatter,
  syntax::create_default_manager,
};
use serde_json::{Value, json};

use crate::{config::Config, error::PageError, tasks::BuildContext};

/// Published pages land under `<output_dir>/posts/page/`.
pub const PAGES_SUBDIR: &str = "posts/page";

const CUSTOM_FIELDS: &str = "customFields";
const TOC_FIELD: &str = "toc";
const NO_HEADING_LINKS_FIELD: &str = "noHeadingLinks";

/// A source file as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  pub path:     PathBuf,
  pub raw_text: String,
}

impl Document {
  #[must_use]
  pub const fn new(path: PathBuf, raw_text: String) -> Self {
    Self { path, raw_text }
  }

  /// Read a document from disk.
  ///
  /// # Errors
  ///
  /// Returns [`PageError::Read`] if the file cannot be read.
  pub fn read(path: &Path) -> Result<Self, PageError> {
    let raw_text =
      fs::read_to_string(path).map_err(|source| PageError::Read {
        path: path.to_path_buf(),
        source,
      })?;
    Ok(Self::new(path.to_path_buf(), raw_text))
  }

  /// Whether the body is Markdown (as opposed to ready-made HTML).
  #[must_use]
  pub fn is_markdown(&self) -> bool {
    self.path.extension().is_some_and(|ext| ext == "md")
  }
}

/// A page ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedPage {
  pub metadata: Metadata,
  pub content:  String,
  pub target:   PathBuf,
}

impl PublishedPage {
  /// The on-disk form: the metadata as JSON in a `<script>` element, a
  /// newline, then the content.
  ///
  /// # Errors
  ///
  /// Returns an error if the metadata cannot be serialized.
  pub fn to_html(&self) -> Result<String, PageError> {
    // A literal "</" would close the <script> element early
    let json = serde_json::to_string(&self.metadata)?.replace("</", "<\\/");
    Ok(format!("<script>{json}</script>\n{}", self.content))
  }

  /// Write the page to its target, creating parent directories as needed.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization or any filesystem operation fails.
  pub fn write(&self) -> Result<(), PageError> {
    let html = self.to_html()?;
    let write_error = |source| {
      PageError::Write {
        path: self.target.clone(),
        source,
      }
    };
    if let Some(parent) = self.target.parent() {
      fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(&self.target, html).map_err(write_error)
  }
}

/// Hook run on every document's metadata before its body is transformed.
///
/// The metadata still carries the body under `content` at this point.
pub trait PagePreprocessor {
  fn preprocess(&self, metadata: &mut Metadata, path: &Path);
}

/// The default hook: leaves metadata untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl PagePreprocessor for NoopPreprocessor {
  fn preprocess(&self, _metadata: &mut Metadata, _path: &Path) {}
}

/// JavaScript-style truthiness of an optional metadata value.
///
/// Missing values, `null`, `false`, `0` and `""` are falsy; everything else,
/// including empty arrays and objects, is truthy.
#[must_use]
pub fn truthy(value: Option<&Value>) -> bool {
  match value {
    None | Some(Value::Null) => false,
    Some(Value::Bool(b)) => *b,
    Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
    Some(Value::String(s)) => !s.is_empty(),
    Some(Value::Array(_) | Value::Object(_)) => true,
  }
}

/// Builds [`PublishedPage`]s from [`Document`]s.
pub struct PageBuilder {
  source_dir:   PathBuf,
  partials_dir: PathBuf,
  processor:    MarkdownProcessor,
  highlighter:  Option<CodeBlockHighlighter>,
  preprocessor: Box<dyn PagePreprocessor>,
}

impl PageBuilder {
  /// Create a builder for the given configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the configured code block template cannot be
  /// loaded.
  pub fn new(config: &Config) -> Result<Self, PageError> {
    let highlighter = if config.highlight {
      let highlighter = CodeBlockHighlighter::new(create_default_manager());
      Some(match &config.code_template {
        Some(path) => {
          highlighter.with_template(CodeBlockTemplate::from_file(path)?)
        },
        None => highlighter,
      })
    } else {
      None
    };

    Ok(Self {
      source_dir: config.source_dir.clone(),
      partials_dir: config.partials_dir.clone(),
      processor: MarkdownProcessor::default(),
      highlighter,
      preprocessor: Box::new(NoopPreprocessor),
    })
  }

  /// Replace the metadata hook.
  #[must_use]
  pub fn with_preprocessor(
    mut self,
    preprocessor: Box<dyn PagePreprocessor>,
  ) -> Self {
    self.preprocessor = preprocessor;
    self
  }

  /// Where the page built from `source` is written below `output_dir`.
  ///
  /// # Errors
  ///
  /// Returns [`PageError::OutsideSource`] if `source` is not inside the
  /// source directory.
  pub fn target_path(
    &self,
    source: &Path,
    output_dir: &Path,
  ) -> Result<PathBuf, PageError> {
    let relative = source.strip_prefix(&self.source_dir).map_err(|_| {
      PageError::OutsideSource {
        path:       source.to_path_buf(),
        source_dir: self.source_dir.clone(),
      }
    })?;
    Ok(output_dir.join(PAGES_SUBDIR).join(relative).with_extension("html"))
  }

  /// Build one page of the batch described by `context`.
  ///
  /// Returns `Ok(None)` when the document's metadata header is invalid; the
  /// problem is logged and the caller should count it and move on.
  ///
  /// # Errors
  ///
  /// Returns an error for problems that should stop the whole batch: an
  /// unreadable partial, a highlighting failure or a path outside the source
  /// directory.
  pub fn build_page(
    &self,
    context: &BuildContext,
    document: &Document,
  ) -> Result<Option<PublishedPage>, PageError> {
    let path = &document.path;
    debug!("Processing {}", path.display());

    let target = self.target_path(path, &context.output_dir)?;

    let mut front = match frontmatter::extract(&document.raw_text) {
      Ok(front) => front,
      Err(e) => {
        error!("Invalid metadata for {}: {e}", path.display());
        return Ok(None);
      },
    };

    self.preprocessor.preprocess(&mut front.metadata, path);

    let mut content = front.take_content();
    let mut metadata = front.metadata;

    if document.is_markdown() {
      let toc = truthy(metadata.get(TOC_FIELD));
      let render = RenderOptions {
        generate_links: toc
          || !truthy(metadata.get(NO_HEADING_LINKS_FIELD)),
        generate_toc:   toc,
      };
      content = self.processor.render(&content, render).html;
      metadata.shift_remove(NO_HEADING_LINKS_FIELD);
      metadata.shift_remove(TOC_FIELD);
    }

    content = expand_partials(&content, &self.partials_dir)?;

    if let Some(highlighter) = &self.highlighter {
      content = highlighter.process(&content)?;
    }

    append_source_path(&mut metadata, path);

    Ok(Some(PublishedPage {
      metadata,
      content,
      target,
    }))
  }
}

/// Record where a page came from in its `customFields` list.
fn append_source_path(metadata: &mut Metadata, path: &Path) {
  let entry = json!({
    "key": "source_path",
    "value": path.to_string_lossy(),
  });

  if let Some(Value::Array(fields)) = metadata.get_mut(CUSTOM_FIELDS) {
    fields.push(entry);
    return;
  }

  if truthy(metadata.get(CUSTOM_FIELDS)) {
    warn!(
      "Replacing non-list {CUSTOM_FIELDS} in {} with a list",
      path.display()
    );
  }
  metadata.insert(CUSTOM_FIELDS.to_string(), Value::Array(vec![entry]));
}
