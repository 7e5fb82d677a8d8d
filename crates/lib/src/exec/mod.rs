//! External process execution.
//!
//! Every tool this crate drives (CMake, the bundler, the built executable) is
//! an opaque collaborator: we build a [`CommandSpec`], hand it to a
//! [`Runner`], and only look at the exit status that comes back.

mod system;

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use system::SystemRunner;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
  /// The process could not be started at all.
  #[error("failed to spawn `{cmd}`")]
  Spawn { cmd: String, source: std::io::Error },

  /// The process ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  Failed { cmd: String, code: Option<i32> },
}

/// A program invocation: program, argv and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  program: String,
  args: Vec<String>,
  cwd: Option<PathBuf>,
}

impl CommandSpec {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
    }
  }

  /// A command line interpreted by the platform shell.
  pub fn shell(line: &str) -> Self {
    let (shell, args) = shell_invocation();
    Self::new(shell).args(args).arg(line)
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn get_args(&self) -> &[String] {
    &self.args
  }

  pub fn cwd(&self) -> Option<&Path> {
    self.cwd.as_deref()
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", quote(&self.program))?;
    for arg in &self.args {
      write!(f, " {}", quote(arg))?;
    }
    Ok(())
  }
}

fn quote(s: &str) -> String {
  if s.is_empty() || s.contains(char::is_whitespace) {
    format!("\"{}\"", s)
  } else {
    s.to_string()
  }
}

/// Where a process's output went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
  /// Streamed straight to our own stdout/stderr.
  Inherited,
  Captured { stdout: String, stderr: String },
}

/// Outcome of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
  /// Exit code, `None` if the process was killed by a signal.
  pub code: Option<i32>,
  pub output: OutputMode,
}

impl ProcessResult {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Executes external commands.
pub trait Runner {
  /// Run `cmd` to completion with inherited stdio.
  fn run(&self, cmd: &CommandSpec) -> impl Future<Output = Result<ProcessResult, ExecError>> + Send;

  /// Start `cmd` without waiting for it. Output is collected in the
  /// background and logged when the process exits.
  fn launch(&self, cmd: &CommandSpec) -> Result<(), ExecError>;
}

/// Run `cmd` and turn a non-zero exit into [`ExecError::Failed`].
pub async fn run_checked<R: Runner>(runner: &R, cmd: &CommandSpec) -> Result<ProcessResult, ExecError> {
  let result = runner.run(cmd).await?;
  if !result.success() {
    return Err(ExecError::Failed {
      cmd: cmd.to_string(),
      code: result.code,
    });
  }
  Ok(result)
}

/// Shell and leading arguments used for [`CommandSpec::shell`].
///
/// Bundler commands are `npm`/`pnpm` scripts, which on Windows are `.cmd`
/// shims that only `cmd.exe` resolves.
fn shell_invocation() -> (&'static str, [&'static str; 1]) {
  #[cfg(unix)]
  {
    ("/bin/sh", ["-c"])
  }

  #[cfg(windows)]
  {
    ("cmd.exe", ["/C"])
  }
}
