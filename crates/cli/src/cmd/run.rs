//! Implementation of the `webui dev` and `webui build` modes.
//!
//! Loads the build configuration, runs the pipeline for the selected mode
//! and prints a summary.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use webui_build::config::{BuildConfig, DEFAULT_CONFIG_PATH, Project};
use webui_build::context::{Mode, RunContext};
use webui_build::exec::SystemRunner;
use webui_build::native::DllCopy;
use webui_build::pipeline::{self, PipelineReport};

use crate::output::{format_elapsed, print_info, print_stat, print_success, print_warning};

/// Run the pipeline for `ctx`.
///
/// `root` defaults to the current directory and `config` to
/// `<root>/scripts/webui.config.json`. A relative `config` is taken relative
/// to the current directory, like any other command-line path.
pub fn cmd_run(root: Option<&Path>, config: Option<&Path>, ctx: &RunContext) -> Result<()> {
  let root = resolve_root(root)?;
  let config_path = config
    .map(Path::to_path_buf)
    .unwrap_or_else(|| root.join(DEFAULT_CONFIG_PATH));
  debug!(root = %root.display(), config = %config_path.display(), "resolved project");

  let config = BuildConfig::load(&config_path).context("Failed to load build configuration")?;
  let project = Project::new(root, config);

  for param in &ctx.ignored {
    print_warning(&format!("Unknown param: {}", param));
  }
  print_info(&format!(
    "Running {} for {} in {}",
    ctx.mode,
    project.platform(),
    project.root().display()
  ));

  let started = Instant::now();
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt
    .block_on(pipeline::run(&project, &SystemRunner::new(), ctx))
    .with_context(|| format!("{} failed", ctx.mode))?;

  print_summary(&report);
  let verb = match ctx.mode {
    Mode::Dev => "Dev session finished",
    Mode::Build => "Build succeeded",
  };
  print_success(&format!("{} in {}", verb, format_elapsed(started.elapsed())));

  Ok(())
}

fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
  let root = match root {
    Some(path) => path.to_path_buf(),
    None => std::env::current_dir().context("Failed to determine current directory")?,
  };
  dunce::canonicalize(&root).with_context(|| format!("Project root not found: {}", root.display()))
}

fn print_summary(report: &PipelineReport) {
  println!();
  match &report.native {
    Some(native) => {
      print_stat("Native build", native.variant.as_str());
      print_stat("Project regenerated", if native.regenerated { "yes" } else { "no" });
      let loader = match &native.loader {
        DllCopy::NotRequired => "not required".to_string(),
        DllCopy::SourceMissing(path) => format!("not found ({})", path.display()),
        DllCopy::AlreadyPresent(path) => format!("already present ({})", path.display()),
        DllCopy::Copied(path) => format!("copied ({})", path.display()),
      };
      print_stat("Webview loader", &loader);
    }
    None => print_stat("Native build", "skipped"),
  }

  print_stat("Index page", &report.web.index_html.display().to_string());
  if let Some(exe) = &report.web.launched {
    print_stat("Launched", &exe.display().to_string());
  }
  if let Some(bundle) = &report.web.bundle {
    print_stat(
      "Bundle",
      &format!("{} file(s) -> {}", bundle.files, bundle.dest.display()),
    );
  }
}
