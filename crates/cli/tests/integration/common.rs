//! Shared test helpers for CLI integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{Value, json};
use tempfile::TempDir;

pub const TEMPLATE: &str = "<html><head><!-- webui-bridge --></head><body></body></html>\n";

/// Bundler build that produces a two-file bundle in `dist/`.
pub const BUNDLE_CMD: &str =
  "mkdir -p dist/assets && echo '<html></html>' > dist/index.html && echo app > dist/assets/app.js";

/// Isolated project directory.
///
/// Each test gets a project root with a native source dir, an HTML template
/// and a fake `cmake` that appends its arguments to `cmake.log`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_file("src-cpp/CMakeLists.txt", "project(app)\n");
    env.write_file("index.template.html", TEMPLATE);
    env.write_script("tools/cmake.sh", &format!("echo \"$@\" >> '{}'", env.path("cmake.log").display()));
    env
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative: &str, content: &str) {
    let path = self.path(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  /// Write an executable `/bin/sh` script relative to the project root.
  pub fn write_script(&self, relative: &str, body: &str) -> PathBuf {
    self.write_file(relative, &format!("#!/bin/sh\n{}\n", body));
    let path = self.path(relative);
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  pub fn read(&self, relative: &str) -> String {
    fs::read_to_string(self.path(relative)).unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
  }

  /// Lines the fake cmake was called with, empty if it never ran.
  pub fn cmake_calls(&self) -> Vec<String> {
    fs::read_to_string(self.path("cmake.log"))
      .map(|log| log.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Baseline config targeting Linux with the fake cmake.
  pub fn config(&self) -> Value {
    json!({
      "targetOs": "linux",
      "targetArchitecture": "x64",
      "cpp": {
        "targetName": "app",
        "directory": { "source": "src-cpp", "build": "build", "webuiSubDirName": "webui" },
        "buildSystem": {
          "path": self.path("tools/cmake.sh").to_string_lossy(),
          "options": { "WEBUI_BUILD_EXAMPLES": false }
        },
        "generator": { "name": "Ninja", "path": "ninja" },
        "compiler": { "name": "c++", "path": "c++" },
        "buildArgs": [{ "key": "--parallel", "value": "2" }]
      },
      "node": {
        "build": {
          "indexTemplate": "index.template.html",
          "indexHtml": "index.html",
          "output": "dist",
          "subStrings": { "webuiBridge": "<!-- webui-bridge -->" },
          "commands": { "dev": "true", "build": BUNDLE_CMD }
        },
        "debug": { "nodeServer": 5173, "webuiServer": 8081 }
      }
    })
  }

  pub fn write_config(&self, config: &Value) {
    self.write_file("scripts/webui.config.json", &serde_json::to_string_pretty(config).unwrap());
  }

  /// Command for the webui binary rooted at this project.
  pub fn webui_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("webui");
    cmd.current_dir(self.root());
    cmd.env("WEBUI_ROOT", self.root());
    cmd.env_remove("WEBUI_CONFIG");
    cmd
  }
}
