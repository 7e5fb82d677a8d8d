//! Webview loader placement.
//!
//! On Windows the WebView2 loader DLL must sit next to the executable. CMake
//! fetches the WebView2 NuGet package into the build tree's `_deps` cache;
//! this module finds the loader for the target architecture there and copies
//! it beside the executable. Every other target needs nothing.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::Project;

/// FetchContent cache directory inside the build tree.
pub const DEPS_DIR: &str = "_deps";
/// Source directory of the fetched WebView2 package.
pub const WEBVIEW_PACKAGE_DIR: &str = "microsoft_web_webview2-src";
pub const WEBVIEW_LOADER_DLL: &str = "WebView2Loader.dll";

#[derive(Debug, Error)]
#[error("failed to copy {} to {}", from.display(), to.display())]
pub struct DynLibError {
  pub from: PathBuf,
  pub to: PathBuf,
  pub source: std::io::Error,
}

/// What happened to the loader DLL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DllCopy {
  /// The target OS does not ship a loader.
  NotRequired,
  /// The fetched package (or the DLL inside it) was not found.
  SourceMissing(PathBuf),
  /// The destination already held a loader; nothing copied.
  AlreadyPresent(PathBuf),
  Copied(PathBuf),
}

/// Expected location of the fetched loader for the target architecture.
pub fn webview_loader_source(project: &Project) -> PathBuf {
  project
    .native_build_dir()
    .join(DEPS_DIR)
    .join(WEBVIEW_PACKAGE_DIR)
    .join("runtimes")
    .join(project.config().target_architecture.windows_runtime())
    .join("native")
    .join(WEBVIEW_LOADER_DLL)
}

/// Where the loader has to end up.
pub fn webview_loader_dest(project: &Project) -> PathBuf {
  project.native_build_dir().join(WEBVIEW_LOADER_DLL)
}

/// Copy the webview loader next to the executable.
///
/// A missing source is logged and reported as [`DllCopy::SourceMissing`];
/// only a failing copy is an error.
pub fn copy_webview_loader(project: &Project) -> Result<DllCopy, DynLibError> {
  if !project.config().target_os.needs_webview_loader() {
    return Ok(DllCopy::NotRequired);
  }

  let package = project.native_build_dir().join(DEPS_DIR).join(WEBVIEW_PACKAGE_DIR);
  if !package.is_dir() {
    warn!(path = %package.display(), "webview package not found, skipping loader copy");
    return Ok(DllCopy::SourceMissing(package));
  }

  let source = webview_loader_source(project);
  if !source.is_file() {
    warn!(path = %source.display(), "webview loader not found, skipping loader copy");
    return Ok(DllCopy::SourceMissing(source));
  }

  let dest = webview_loader_dest(project);
  if dest.exists() {
    info!(path = %dest.display(), "webview loader already present");
    return Ok(DllCopy::AlreadyPresent(dest));
  }

  fs::copy(&source, &dest).map_err(|e| DynLibError {
    from: source.clone(),
    to: dest.clone(),
    source: e,
  })?;
  info!(path = %dest.display(), "copied webview loader");

  Ok(DllCopy::Copied(dest))
}
