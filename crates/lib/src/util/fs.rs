//! Filesystem helpers for moving build artifacts around.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Recursively copy the contents of `src` into `dst`, creating `dst`.
///
/// Symlinks are followed; the copy holds regular files only. Returns the
/// number of files copied.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<u64> {
  fs::create_dir_all(dst)?;

  let mut copied = 0;
  for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
    let entry = entry.map_err(io::Error::other)?;
    let relative = entry
      .path()
      .strip_prefix(src)
      .map_err(io::Error::other)?;
    let target = dst.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target)?;
    } else {
      fs::copy(entry.path(), &target)?;
      copied += 1;
    }
  }

  Ok(copied)
}

/// Remove a directory tree. A missing directory is not an error.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<()> {
  match fs::remove_dir_all(path) {
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    other => other,
  }
}
