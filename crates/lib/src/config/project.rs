use std::path::{Path, PathBuf};

use super::BuildConfig;
use crate::platform::Platform;

/// A loaded configuration anchored at a project root.
///
/// Every relative path in [`BuildConfig`] resolves against `root`.
#[derive(Debug, Clone)]
pub struct Project {
  root: PathBuf,
  config: BuildConfig,
}

impl Project {
  pub fn new(root: impl Into<PathBuf>, config: BuildConfig) -> Self {
    Self {
      root: root.into(),
      config,
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  pub fn platform(&self) -> Platform {
    self.config.platform()
  }

  /// Native project source directory (contains `CMakeLists.txt`).
  pub fn native_source_dir(&self) -> PathBuf {
    self.root.join(&self.config.native.directory.source)
  }

  /// Native build directory (CMake binary dir).
  pub fn native_build_dir(&self) -> PathBuf {
    self.root.join(&self.config.native.directory.build)
  }

  /// Path of the native executable inside the build directory.
  pub fn executable_path(&self) -> PathBuf {
    let name = self.config.target_os.executable_name(&self.config.native.target_name);
    self.native_build_dir().join(name)
  }

  /// Destination of the bundled front-end inside the build directory.
  pub fn bundle_dest_dir(&self) -> PathBuf {
    self
      .native_build_dir()
      .join(&self.config.native.directory.webui_sub_dir_name)
  }

  pub fn index_template(&self) -> PathBuf {
    self.root.join(&self.config.web.build.index_template)
  }

  pub fn index_html(&self) -> PathBuf {
    self.root.join(&self.config.web.build.index_html)
  }

  /// Bundler output directory.
  pub fn bundle_output_dir(&self) -> PathBuf {
    self.root.join(&self.config.web.build.output)
  }
}
