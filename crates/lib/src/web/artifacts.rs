use std::path::PathBuf;

use tracing::info;

use super::WebError;
use crate::config::Project;
use crate::util::fs::{copy_dir_all, remove_dir_if_exists};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleCopy {
  pub dest: PathBuf,
  pub files: u64,
}

/// Replace `<build>/<webuiSubDirName>` with the bundler output.
///
/// The output directory is checked before the destination is cleared, so a
/// failed bundle never wipes the previous copy.
pub fn copy_bundle(project: &Project) -> Result<BundleCopy, WebError> {
  let output = project.bundle_output_dir();
  if !output.is_dir() {
    return Err(WebError::OutputMissing { path: output });
  }

  let dest = project.bundle_dest_dir();
  info!(path = %dest.display(), "removing previous bundle");
  remove_dir_if_exists(&dest).map_err(|source| WebError::Io {
    path: dest.clone(),
    source,
  })?;

  let files = copy_dir_all(&output, &dest).map_err(|source| WebError::Io {
    path: dest.clone(),
    source,
  })?;
  info!(from = %output.display(), to = %dest.display(), files, "copied bundle");

  Ok(BundleCopy { dest, files })
}
