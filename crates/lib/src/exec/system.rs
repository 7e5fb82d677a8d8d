use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use super::{CommandSpec, ExecError, OutputMode, ProcessResult, Runner};

/// Runs commands as real child processes on the tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
  pub fn new() -> Self {
    Self
  }
}

fn to_command(cmd: &CommandSpec) -> Command {
  let mut command = Command::new(cmd.program());
  command.args(cmd.get_args());
  if let Some(dir) = cmd.cwd() {
    command.current_dir(dir);
  }
  command
}

impl Runner for SystemRunner {
  async fn run(&self, cmd: &CommandSpec) -> Result<ProcessResult, ExecError> {
    info!(cmd = %cmd, "executing command");

    let status = to_command(cmd)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .status()
      .await
      .map_err(|source| ExecError::Spawn {
        cmd: cmd.to_string(),
        source,
      })?;

    debug!(cmd = %cmd, code = ?status.code(), "command exited");

    Ok(ProcessResult {
      code: status.code(),
      output: OutputMode::Inherited,
    })
  }

  fn launch(&self, cmd: &CommandSpec) -> Result<(), ExecError> {
    info!(cmd = %cmd, "launching detached process");

    let child = to_command(cmd)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(false)
      .spawn()
      .map_err(|source| ExecError::Spawn {
        cmd: cmd.to_string(),
        source,
      })?;

    let label = cmd.to_string();
    tokio::spawn(async move {
      match child.wait_with_output().await {
        Ok(output) => {
          let result = ProcessResult {
            code: output.status.code(),
            output: OutputMode::Captured {
              stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
              stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
          };
          report_detached(&label, &result);
        }
        Err(e) => error!(cmd = %label, error = %e, "detached process failed"),
      }
    });

    Ok(())
  }
}

fn report_detached(label: &str, result: &ProcessResult) {
  if let OutputMode::Captured { stdout, stderr } = &result.output {
    let stdout = stdout.trim();
    let stderr = stderr.trim();
    if !stdout.is_empty() {
      info!(cmd = %label, stdout = %stdout, "detached process output");
    }
    if !stderr.is_empty() {
      warn!(cmd = %label, stderr = %stderr, "detached process stderr");
    }
  }

  if result.success() {
    info!(cmd = %label, "detached process exited");
  } else {
    error!(cmd = %label, code = ?result.code, "detached process exited with failure");
  }
}
