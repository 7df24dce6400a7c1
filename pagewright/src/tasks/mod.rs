//! Batch tasks run by the CLI.
pub mod pages;
pub mod resources;

use std::path::{Path, PathBuf};

pub use pages::build_pages;
pub use resources::build_resources;

/// State shared by the documents of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
  /// Root of the published output.
  pub output_dir:  PathBuf,
  /// Documents skipped so far.
  pub error_count: usize,
}

impl BuildContext {
  #[must_use]
  pub fn new(output_dir: &Path) -> Self {
    Self {
      output_dir:  output_dir.to_path_buf(),
      error_count: 0,
    }
  }

  /// Record a skipped document.
  pub const fn record_error(&mut self) {
    self.error_count += 1;
  }

  #[must_use]
  pub const fn has_errors(&self) -> bool {
    self.error_count > 0
  }
}
