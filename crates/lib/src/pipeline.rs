//! The full build pipeline.
//!
//! Phases run strictly in order and the first failure ends the run:
//! native build (unless skipped), then the web pipeline.

use thiserror::Error;
use tracing::info;

use crate::config::Project;
use crate::context::RunContext;
use crate::exec::Runner;
use crate::native::{NativeError, NativeOptions, NativeReport, build_native};
use crate::web::{WebError, WebReport, build_web};

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("native build failed")]
  Native(#[from] NativeError),

  #[error("web build failed")]
  Web(#[from] WebError),
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
  /// `None` when the native phase was skipped.
  pub native: Option<NativeReport>,
  pub web: WebReport,
}

pub async fn run<R: Runner>(project: &Project, runner: &R, ctx: &RunContext) -> Result<PipelineReport, PipelineError> {
  info!(mode = %ctx.mode, platform = %project.platform(), "starting build");

  let native = if ctx.build_native {
    let options = NativeOptions {
      mode: Some(ctx.mode),
      regenerate: ctx.regenerate,
    };
    Some(build_native(project, runner, options).await?)
  } else {
    info!("skipping native build");
    None
  };

  let web = build_web(project, runner, ctx.mode).await?;

  Ok(PipelineReport { native, web })
}
