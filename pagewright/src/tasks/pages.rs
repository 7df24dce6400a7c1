use std::path::{Path, PathBuf};

use log::{debug, error, info, trace, warn};
use walkdir::WalkDir;

use super::BuildContext;
use crate::{
  config::Config,
  error::{PageError, TaskError},
  page::{Document, PageBuilder},
};

pub const TASK_NAME: &str = "build-pages";

/// Collect every `.md` and `.html` file under `source_dir`, in path order.
#[must_use]
pub fn collect_page_sources(source_dir: &Path) -> Vec<PathBuf> {
  let files: Vec<PathBuf> = WalkDir::new(source_dir)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_file())
    .map(walkdir::DirEntry::into_path)
    .filter(|path| {
      path
        .extension()
        .is_some_and(|ext| ext == "md" || ext == "html")
    })
    .collect();

  trace!("Found {} page sources", files.len());
  files
}

/// Build and write every page under the configured source directory.
///
/// Documents with invalid metadata are skipped and counted; the task still
/// fails at the end if any were. Any other error stops the batch at once,
/// leaving pages already written in place.
///
/// # Errors
///
/// Returns [`TaskError`] if a page failed fatally or any page was skipped.
pub fn build_pages(config: &Config) -> Result<BuildContext, TaskError> {
  build_pages_with(config, &abort_on_error(PageBuilder::new(config))?)
}

/// [`build_pages`] with a caller-supplied [`PageBuilder`].
///
/// # Errors
///
/// See [`build_pages`].
pub fn build_pages_with(
  config: &Config,
  builder: &PageBuilder,
) -> Result<BuildContext, TaskError> {
  let mut context = BuildContext::new(&config.output_dir);
  let mut built = 0_usize;

  for path in collect_page_sources(&config.source_dir) {
    match abort_on_error(build_one(builder, &context, &path))? {
      Some(target) => {
        debug!("Wrote {}", target.display());
        built += 1;
      },
      None => context.record_error(),
    }
  }

  if context.has_errors() {
    error!("{} page(s) could not be built", context.error_count);
    warn!("Task \"{TASK_NAME}\" failed.");
    return Err(TaskError::failed(TASK_NAME));
  }

  info!("Built {built} pages.");
  Ok(context)
}

fn build_one(
  builder: &PageBuilder,
  context: &BuildContext,
  path: &Path,
) -> Result<Option<PathBuf>, PageError> {
  let document = Document::read(path)?;
  let Some(page) = builder.build_page(context, &document)? else {
    return Ok(None);
  };
  page.write()?;
  Ok(Some(page.target))
}

fn abort_on_error<T>(result: Result<T, PageError>) -> Result<T, TaskError> {
  result.map_err(|e| {
    error!("{e}");
    warn!("Task \"{TASK_NAME}\" failed.");
    TaskError::aborted(TASK_NAME, e)
  })
}
