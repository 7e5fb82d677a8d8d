//! Dev-mode launch of the native executable.
//!
//! The executable is started detached with `--run-dev <devServerPort>
//! <bridgePort>`: it serves the bridge on the second port and points its
//! webview at the bundler dev server on the first. Nothing waits for it to
//! come up; the bundler dev server is started right after, even when the
//! executable could not be spawned.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use crate::config::Project;
use crate::exec::{CommandSpec, Runner};

/// Flag the native host recognises as "run against a dev server".
pub const RUN_DEV_FLAG: &str = "--run-dev";

#[derive(Debug, Error)]
pub enum DevError {
  #[error("target executable not found: {}", path.display())]
  ExecutableMissing { path: PathBuf },
}

/// Command that starts the executable in dev mode.
pub fn dev_command(project: &Project) -> CommandSpec {
  let debug = project.config().web.debug;
  CommandSpec::new(project.executable_path().to_string_lossy())
    .arg(RUN_DEV_FLAG)
    .arg(debug.node_server.to_string())
    .arg(debug.webui_server.to_string())
    .current_dir(project.native_build_dir())
}

/// Start the built executable without waiting for it.
///
/// Only a missing executable is an error. A spawn failure is logged and
/// yields `Ok(None)` so the dev server still starts.
pub fn launch_executable<R: Runner>(project: &Project, runner: &R) -> Result<Option<PathBuf>, DevError> {
  let path = project.executable_path();
  if !path.is_file() {
    return Err(DevError::ExecutableMissing { path });
  }
  info!(path = %path.display(), "target executable found");

  match runner.launch(&dev_command(project)) {
    Ok(()) => Ok(Some(path)),
    Err(e) => {
      let cause = std::error::Error::source(&e).map(ToString::to_string).unwrap_or_default();
      error!(path = %path.display(), error = %e, cause = %cause, "failed to launch target executable");
      Ok(None)
    }
  }
}
