use std::fmt;

/// Error type for template operations.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration in TOML, commented so a fresh project knows what
/// each key does.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# Pagewright configuration

# Directory holding the .md and .html page sources
source_dir = "pages"

# Directory whose files are copied verbatim into <output_dir>/resources/
# resources_dir = "resources"

# Pages are written to <output_dir>/posts/page/
output_dir = "dist/wordpress"

# Directory that @partial(...) paths are resolved against
partials_dir = "."

# Syntax highlight <pre><code> blocks
highlight = true

# Template used to render highlighted code blocks (tera syntax).
# The built-in one renders a line-numbered table.
# code_template = "templates/code-block.html"
"#;

/// Default configuration in JSON. JSON has no comments, so optional keys are
/// simply left out.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "source_dir": "pages",
  "output_dir": "dist/wordpress",
  "partials_dir": ".",
  "highlight": true
}
"#;

/// Default configuration for `format` (`toml` or `json`).
///
/// # Errors
///
/// Returns [`TemplateError::UnsupportedFormat`] for any other format.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
