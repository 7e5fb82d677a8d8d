//! Web asset pipeline.
//!
//! Generates `index.html` from the template, runs the bundler and, for
//! production builds, copies the bundle into the native build directory where
//! the executable serves it from.

mod artifacts;
pub mod template;

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::config::Project;
use crate::context::Mode;
use crate::dev::{DevError, launch_executable};
use crate::exec::{CommandSpec, ExecError, Runner, run_checked};

pub use artifacts::{BundleCopy, copy_bundle};
pub use template::{BRIDGE_SCRIPT, bridge_tag, generate_index_html};

#[derive(Debug, Error)]
pub enum WebError {
  #[error("index template not found: {}", path.display())]
  TemplateMissing { path: PathBuf },

  #[error("bundler output not found: {}", path.display())]
  OutputMissing { path: PathBuf },

  #[error("bundler failed")]
  Bundler(#[source] ExecError),

  #[error(transparent)]
  Dev(#[from] DevError),

  #[error("io error at {}", path.display())]
  Io { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Clone)]
pub struct WebReport {
  pub index_html: PathBuf,
  /// Executable started before the dev server (dev mode). `None` when it
  /// could not be spawned.
  pub launched: Option<PathBuf>,
  /// Bundle copied into the build directory (build mode).
  pub bundle: Option<BundleCopy>,
}

/// Bundler command for `mode`, run from the project root.
pub fn bundler_command(project: &Project, mode: Mode) -> CommandSpec {
  let commands = &project.config().web.build.commands;
  let line = match mode {
    Mode::Dev => &commands.dev,
    Mode::Build => &commands.build,
  };
  CommandSpec::shell(line).current_dir(project.root())
}

/// Run the web side of the pipeline for `mode`.
pub async fn build_web<R: Runner>(project: &Project, runner: &R, mode: Mode) -> Result<WebReport, WebError> {
  info!(mode = %mode, "building web project");
  let index_html = generate_index_html(project, mode)?;

  let launched = match mode {
    Mode::Dev => {
      let launched = launch_executable(project, runner)?;
      info!("starting bundler dev server");
      launched
    }
    Mode::Build => None,
  };

  run_checked(runner, &bundler_command(project, mode))
    .await
    .map_err(WebError::Bundler)?;
  info!("bundler finished");

  let bundle = match mode {
    Mode::Build => Some(copy_bundle(project)?),
    Mode::Dev => None,
  };

  Ok(WebReport {
    index_html,
    launched,
    bundle,
  })
}
