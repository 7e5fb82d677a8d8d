//! Per-invocation run context.
//!
//! The command line is `<mode> [params...]`. Modes and params are matched
//! case-insensitively; unknown params are reported back to the caller and
//! otherwise ignored.

use std::fmt;

use thiserror::Error;

/// Param that skips the native build phase.
pub const PARAM_NO_NATIVE: &str = "no-cpp";
/// Param that skips regenerating the native project.
pub const PARAM_NO_RELOAD: &str = "no-reload";

/// Selected run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
  /// Debug native build, bundler dev server, executable launched against it.
  Dev,
  /// Release native build, production bundle copied beside the executable.
  Build,
}

impl Mode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Mode::Dev => "dev",
      Mode::Build => "build",
    }
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
  #[error("no mode given")]
  MissingMode,

  #[error("unknown mode: {0}")]
  UnknownMode(String),
}

/// What the invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
  Help,
  Run(RunContext),
}

/// Read-only context for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
  pub mode: Mode,
  /// Run the native build phase.
  pub build_native: bool,
  /// Regenerate the native project before building it.
  pub regenerate: bool,
  /// Params that were not recognised and have been ignored.
  pub ignored: Vec<String>,
}

impl RunContext {
  pub fn new(mode: Mode) -> Self {
    Self {
      mode,
      build_native: true,
      regenerate: true,
      ignored: Vec::new(),
    }
  }
}

/// Interpret the mode argument and trailing params.
pub fn parse_invocation<S: AsRef<str>>(mode: Option<&str>, params: &[S]) -> Result<Invocation, UsageError> {
  let raw = mode.ok_or(UsageError::MissingMode)?;
  let mode = match raw.trim().to_ascii_lowercase().as_str() {
    "help" => return Ok(Invocation::Help),
    "dev" => Mode::Dev,
    "build" => Mode::Build,
    _ => return Err(UsageError::UnknownMode(raw.to_string())),
  };

  let mut ctx = RunContext::new(mode);
  for param in params {
    let param = param.as_ref();
    let normalized = param.trim().trim_start_matches("--").to_ascii_lowercase();
    match normalized.as_str() {
      PARAM_NO_NATIVE => ctx.build_native = false,
      PARAM_NO_RELOAD => ctx.regenerate = false,
      _ => ctx.ignored.push(param.to_string()),
    }
  }

  Ok(Invocation::Run(ctx))
}
