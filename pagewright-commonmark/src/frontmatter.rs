//! Front matter extraction.
//!
//! A source document may start with a metadata header in one of two
//! encodings:
//!
//! - **YAML**, fenced by `---` lines:
//!
//!   ```text
//!   ---
//!   title: Getting Started
//!   toc: true
//!   ---
//!   # Getting Started
//!   ```
//!
//! - **JSON**, either a bare leading object or wrapped in a `<script>` element
//!   (the shape a published page carries, so pages can be fed back in).
//!
//! Both decode into the same [`Metadata`] record.

use serde_json::{Map, Value};

/// Metadata decoded from a document header.
pub type Metadata = Map<String, Value>;

/// Field the content body is attached under right after extraction.
pub const CONTENT_FIELD: &str = "content";

const YAML_DELIMITER: &str = "---\n";
const YAML_CLOSING: &str = "\n---\n";
/// A closing delimiter on the last line, with nothing after it.
const YAML_CLOSING_AT_END: &str = "\n---";
const SCRIPT_OPEN: &str = "<script>";
const SCRIPT_CLOSE: &str = "</script>";

/// Errors raised while decoding a metadata header.
///
/// All of these are scoped to a single document: callers are expected to log
/// them and move on to the next document.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
  #[error("YAML front matter is not terminated by a `---` line")]
  Unterminated,
  #[error("Invalid YAML front matter: {0}")]
  Yaml(#[from] serde_yaml_ng::Error),
  #[error("Invalid JSON front matter: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Front matter must be a mapping, found {0}")]
  NotAMapping(&'static str),
  #[error("JSON front matter opened with <script> but never closed")]
  UnclosedScript,
}

/// Encoding of a metadata header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
  /// `---` fenced YAML block.
  Yaml,
  /// Leading JSON object, optionally wrapped in `<script>`.
  Json,
}

impl MetadataFormat {
  /// Pick the header encoding with a cheap prefix check on the raw text.
  #[must_use]
  pub fn detect(text: &str) -> Self {
    if text.starts_with(YAML_DELIMITER) {
      Self::Yaml
    } else {
      Self::Json
    }
  }
}

/// A document split into its metadata record and content body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
  /// Decoded metadata. Carries the body under [`CONTENT_FIELD`] until
  /// [`FrontMatter::take_content`] is called.
  pub metadata: Metadata,
  /// Which encoding the header used.
  pub format:   MetadataFormat,
}

impl FrontMatter {
  /// Remove the content body from the record and return it.
  pub fn take_content(&mut self) -> String {
    // shift_remove keeps the remaining keys in header order
    match self.metadata.shift_remove(CONTENT_FIELD) {
      Some(Value::String(content)) => content,
      Some(other) => other.to_string(),
      None => String::new(),
    }
  }
}

/// Split raw document text into metadata and content.
///
/// # Errors
///
/// Returns [`FrontMatterError`] when the header is present but cannot be
/// decoded.
pub fn extract(text: &str) -> Result<FrontMatter, FrontMatterError> {
  let format = MetadataFormat::detect(text);
  let (mut metadata, content) = match format {
    MetadataFormat::Yaml => extract_yaml(text)?,
    MetadataFormat::Json => extract_json(text)?,
  };

  metadata.insert(CONTENT_FIELD.to_string(), Value::String(content));
  Ok(FrontMatter { metadata, format })
}

fn extract_yaml(text: &str) -> Result<(Metadata, String), FrontMatterError> {
  // The search starts on the opening delimiter's newline so an empty header
  // (`---\n---\n`) closes immediately.
  let search_from = YAML_DELIMITER.len() - 1;
  let rest = &text[search_from..];
  let (close, body_start) = match rest.find(YAML_CLOSING) {
    Some(offset) => {
      let close = offset + search_from;
      (close, close + YAML_CLOSING.len())
    },
    None if rest.ends_with(YAML_CLOSING_AT_END) => {
      (text.len() - YAML_CLOSING_AT_END.len(), text.len())
    },
    None => return Err(FrontMatterError::Unterminated),
  };

  let header = text.get(YAML_DELIMITER.len()..close).unwrap_or_default();
  let content = &text[body_start..];

  let value: Value = if header.trim().is_empty() {
    Value::Null
  } else {
    serde_yaml_ng::from_str(header)?
  };

  Ok((into_mapping(value)?, content.to_string()))
}

fn extract_json(text: &str) -> Result<(Metadata, String), FrontMatterError> {
  if let Some(rest) = text.strip_prefix(SCRIPT_OPEN) {
    let close = rest.find(SCRIPT_CLOSE).ok_or(FrontMatterError::UnclosedScript)?;
    let value: Value = serde_json::from_str(&rest[..close])?;
    let content = strip_one_newline(&rest[close + SCRIPT_CLOSE.len()..]);
    return Ok((into_mapping(value)?, content.to_string()));
  }

  let trimmed = text.trim_start();
  if !trimmed.starts_with('{') {
    return Ok((Metadata::new(), text.to_string()));
  }

  let mut stream = serde_json::Deserializer::from_str(trimmed).into_iter::<Value>();
  let value = match stream.next() {
    Some(value) => value?,
    None => Value::Null,
  };
  let content = strip_one_newline(&trimmed[stream.byte_offset()..]);

  Ok((into_mapping(value)?, content.to_string()))
}

fn strip_one_newline(text: &str) -> &str {
  text
    .strip_prefix("\r\n")
    .or_else(|| text.strip_prefix('\n'))
    .unwrap_or(text)
}

fn into_mapping(value: Value) -> Result<Metadata, FrontMatterError> {
  match value {
    Value::Object(map) => Ok(map),
    Value::Null => Ok(Metadata::new()),
    Value::Bool(_) => Err(FrontMatterError::NotAMapping("a boolean")),
    Value::Number(_) => Err(FrontMatterError::NotAMapping("a number")),
    Value::String(_) => Err(FrontMatterError::NotAMapping("a string")),
    Value::Array(_) => Err(FrontMatterError::NotAMapping("a sequence")),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_yaml_header_and_body_are_split_exactly() {
    let text = "---\ntitle: Test\ntags:\n  - a\n  - b\n---\n# Hello\n\nbody\n";
    let mut fm = extract(text).expect("valid front matter");

    assert_eq!(fm.format, MetadataFormat::Yaml);
    assert_eq!(fm.take_content(), "# Hello\n\nbody\n");
    assert_eq!(
      Value::Object(fm.metadata),
      json!({ "title": "Test", "tags": ["a", "b"] })
    );
  }

  #[test]
  fn test_yaml_key_order_is_preserved() {
    let text = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\n";
    let mut fm = extract(text).expect("valid front matter");
    fm.take_content();
    let keys: Vec<_> = fm.metadata.keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
  }

  #[test]
  fn test_empty_yaml_header() {
    let mut fm = extract("---\n---\nbody").expect("empty header is valid");
    assert_eq!(fm.take_content(), "body");
    assert!(fm.metadata.is_empty());
  }

  #[test]
  fn test_closing_delimiter_on_last_line() {
    let mut fm = extract("---\ntitle: X\n---").expect("header is closed");
    assert_eq!(fm.take_content(), "");
    assert_eq!(fm.metadata["title"], "X");

    let mut fm = extract("---\n---").expect("empty header is closed");
    assert_eq!(fm.take_content(), "");
    assert!(fm.metadata.is_empty());
  }

  #[test]
  fn test_malformed_yaml_is_an_error() {
    let err = extract("---\ntitle: [unclosed\n---\nbody")
      .expect_err("invalid header");
    assert!(matches!(err, FrontMatterError::Yaml(_)));
  }

  #[test]
  fn test_unterminated_yaml_is_an_error() {
    let err = extract("---\ntitle: Test\n# no closing line\n")
      .expect_err("invalid header");
    assert!(matches!(err, FrontMatterError::Unterminated));
  }

  #[test]
  fn test_scalar_yaml_is_not_a_mapping() {
    let err = extract("---\njust a string\n---\nbody")
      .expect_err("invalid header");
    assert!(matches!(err, FrontMatterError::NotAMapping("a string")));
  }

  #[test]
  fn test_script_wrapped_json_header() {
    let text = "<script>{\"title\":\"Page\"}</script>\n<p>Hi</p>";
    let mut fm = extract(text).expect("valid json header");
    assert_eq!(fm.format, MetadataFormat::Json);
    assert_eq!(fm.take_content(), "<p>Hi</p>");
    assert_eq!(fm.metadata["title"], "Page");
  }

  #[test]
  fn test_bare_json_header() {
    let text = "{\n  \"title\": \"Bare\"\n}\n<h1>Bare</h1>\n";
    let mut fm = extract(text).expect("valid json header");
    assert_eq!(fm.take_content(), "<h1>Bare</h1>\n");
    assert_eq!(fm.metadata["title"], "Bare");
  }

  #[test]
  fn test_no_header_keeps_whole_text() {
    let text = "<p>No metadata here</p>\n";
    let mut fm = extract(text).expect("headerless text is valid");
    assert_eq!(fm.take_content(), text);
    assert!(fm.metadata.is_empty());
  }

  #[test]
  fn test_malformed_json_is_an_error() {
    let err = extract("{ \"title\": }\nbody")
      .expect_err("invalid header");
    assert!(matches!(err, FrontMatterError::Json(_)));
  }
}
