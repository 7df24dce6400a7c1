use std::{io, path::PathBuf};

use pagewright_commonmark::{HighlightError, PartialError};
use thiserror::Error;

/// Fatal failure while building a single page.
///
/// Problems that only make one page unusable (a bad metadata header) are not
/// errors: the page builder reports them as a skip instead.
#[derive(Debug, Error)]
pub enum PageError {
  #[error("Failed to read {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(transparent)]
  Partial(#[from] PartialError),

  #[error(transparent)]
  Highlight(#[from] HighlightError),

  #[error("Failed to serialize page metadata: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error(
    "{} is not under the source directory {}",
    path.display(),
    source_dir.display()
  )]
  OutsideSource {
    path:       PathBuf,
    source_dir: PathBuf,
  },
}

/// A task that did not complete.
#[derive(Debug, Error)]
pub enum TaskError {
  #[error("Task \"{task}\" failed.")]
  Failed {
    task:   &'static str,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
  },
}

impl TaskError {
  /// A task that ran to the end but had per-document errors.
  #[must_use]
  pub const fn failed(task: &'static str) -> Self {
    Self::Failed { task, source: None }
  }

  /// A task stopped by a fatal error.
  #[must_use]
  pub fn aborted<E>(task: &'static str, error: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Failed {
      task,
      source: Some(Box::new(error)),
    }
  }
}
