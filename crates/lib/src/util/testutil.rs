//! Test utilities for webui-build.
//!
//! Provides a sample configuration, a temporary project layout and a
//! [`RecordingRunner`] that records commands instead of running them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use crate::config::{BuildConfig, Project};
use crate::exec::{CommandSpec, ExecError, OutputMode, ProcessResult, Runner};

pub const SAMPLE_CONFIG: &str = r#"{
  "targetOs": "Windows",
  "targetArchitecture": "X64",
  "cpp": {
    "targetName": "app",
    "defaultBuildTargetType": "RelWithDebInfo",
    "directory": {
      "source": "src-cpp",
      "build": "build",
      "webuiSubDirName": "webui"
    },
    "buildSystem": {
      "path": "cmake",
      "options": {
        "WEBUI_USE_TLS": false,
        "CMAKE_CXX_STANDARD": 20,
        "VCPKG_TARGET_TRIPLET": "x64-windows",
        "CMAKE_EXPORT_COMPILE_COMMANDS": true
      }
    },
    "generator": { "name": "Ninja", "path": "ninja" },
    "compiler": { "name": "clang++", "path": "clang++" },
    "buildArgs": [
      { "key": "--parallel", "value": "8" },
      { "key": "--verbose", "value": "" }
    ]
  },
  "node": {
    "build": {
      "indexTemplate": "index.template.html",
      "indexHtml": "index.html",
      "output": "dist",
      "subStrings": { "webuiBridge": "<!-- webui-bridge -->" },
      "commands": {
        "dev": "npm run dev",
        "build": "npm run build"
      }
    },
    "debug": {
      "nodeServer": 5173,
      "webuiServer": 8081
    }
  }
}"#;

pub const SAMPLE_TEMPLATE: &str = "<!doctype html>\n<html>\n<head>\n  <!-- webui-bridge -->\n</head>\n<body><div id=\"app\"></div></body>\n</html>\n";

pub fn sample_config() -> BuildConfig {
  BuildConfig::parse(SAMPLE_CONFIG, Path::new("sample.json")).unwrap()
}

/// A project rooted in a fresh temporary directory.
pub struct TestProject {
  pub temp: TempDir,
  pub project: Project,
}

impl TestProject {
  /// Empty project root using `config`.
  pub fn new(config: BuildConfig) -> Self {
    let temp = TempDir::new().unwrap();
    let project = Project::new(temp.path(), config);
    Self { temp, project }
  }

  /// Sample config with the native source dir and HTML template in place.
  pub fn with_layout() -> Self {
    let test = Self::new(sample_config());
    fs::create_dir_all(test.project.native_source_dir()).unwrap();
    test.write("src-cpp/CMakeLists.txt", "project(app)\n");
    test.write("index.template.html", SAMPLE_TEMPLATE);
    test
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  /// Write a file relative to the project root, creating parents.
  pub fn write(&self, relative: &str, content: &str) {
    let path = self.path(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }
}

/// A command seen by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  Run(CommandSpec),
  Launch(CommandSpec),
}

/// Runner that records commands and answers with scripted exit codes.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  calls: Mutex<Vec<Call>>,
  failures: Vec<(String, i32)>,
  fail_launch: bool,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Exit with `code` for any run whose command line contains `needle`.
  pub fn failing_on(mut self, needle: &str, code: i32) -> Self {
    self.failures.push((needle.to_string(), code));
    self
  }

  /// Make every launch fail to spawn.
  pub fn failing_launch(mut self) -> Self {
    self.fail_launch = true;
    self
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().unwrap().clone()
  }

  pub fn runs(&self) -> Vec<CommandSpec> {
    self
      .calls()
      .into_iter()
      .filter_map(|call| match call {
        Call::Run(cmd) => Some(cmd),
        Call::Launch(_) => None,
      })
      .collect()
  }

  pub fn launches(&self) -> Vec<CommandSpec> {
    self
      .calls()
      .into_iter()
      .filter_map(|call| match call {
        Call::Launch(cmd) => Some(cmd),
        Call::Run(_) => None,
      })
      .collect()
  }

  /// Whether any run's command line contains `needle`.
  pub fn ran(&self, needle: &str) -> bool {
    self.runs().iter().any(|cmd| cmd.to_string().contains(needle))
  }
}

impl Runner for RecordingRunner {
  async fn run(&self, cmd: &CommandSpec) -> Result<ProcessResult, ExecError> {
    self.calls.lock().unwrap().push(Call::Run(cmd.clone()));

    let line = cmd.to_string();
    let code = self
      .failures
      .iter()
      .find(|(needle, _)| line.contains(needle.as_str()))
      .map_or(0, |(_, code)| *code);

    Ok(ProcessResult {
      code: Some(code),
      output: OutputMode::Inherited,
    })
  }

  fn launch(&self, cmd: &CommandSpec) -> Result<(), ExecError> {
    self.calls.lock().unwrap().push(Call::Launch(cmd.clone()));
    if self.fail_launch {
      return Err(ExecError::Spawn {
        cmd: cmd.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "scripted failure"),
      });
    }
    Ok(())
  }
}
