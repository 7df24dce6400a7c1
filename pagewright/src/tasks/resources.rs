use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::{config::Config, error::TaskError};

pub const TASK_NAME: &str = "build-resources";

/// Resources land under `<output_dir>/resources/`.
pub const RESOURCES_SUBDIR: &str = "resources";

/// Copy every file under the resources directory into the output, keeping
/// its path relative to that directory.
///
/// Returns the number of files copied. Without a configured resources
/// directory there is nothing to do.
///
/// # Errors
///
/// Returns [`TaskError`] as soon as a file cannot be copied.
pub fn build_resources(config: &Config) -> Result<usize, TaskError> {
  let Some(resources_dir) = &config.resources_dir else {
    info!("No resources directory configured, skipping resources");
    return Ok(0);
  };

  let destination = config.output_dir.join(RESOURCES_SUBDIR);
  let options = fs_extra::file::CopyOptions::new().overwrite(true);
  let mut copied = 0_usize;

  for entry in WalkDir::new(resources_dir)
    .follow_links(true)
    .sort_by_file_name()
  {
    let entry = entry.map_err(abort)?;
    if !entry.file_type().is_file() {
      continue;
    }

    let target = resource_target(resources_dir, entry.path(), &destination);
    debug!("Copying {} to {}", entry.path().display(), target.display());

    if let Some(parent) = target.parent() {
      std::fs::create_dir_all(parent).map_err(abort)?;
    }
    fs_extra::file::copy(entry.path(), &target, &options).map_err(abort)?;
    copied += 1;
  }

  info!("Built {copied} resources.");
  Ok(copied)
}

fn resource_target(
  resources_dir: &Path,
  path: &Path,
  destination: &Path,
) -> PathBuf {
  let relative = path.strip_prefix(resources_dir).unwrap_or(path);
  destination.join(relative)
}

fn abort<E>(error: E) -> TaskError
where
  E: std::error::Error + Send + Sync + 'static,
{
  error!("{error}");
  warn!("Task \"{TASK_NAME}\" failed.");
  TaskError::aborted(TASK_NAME, error)
}
