//! Build configuration.
//!
//! The configuration is a JSON document (conventionally
//! `scripts/webui.config.json`) describing the target platform, the native
//! toolchain and the web bundler. It is read once per invocation and never
//! mutated afterwards; every component receives it through a [`Project`].

mod project;

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::platform::{Arch, Os, Platform};

pub use project::Project;

/// Conventional location of the config file relative to the project root.
pub const DEFAULT_CONFIG_PATH: &str = "scripts/webui.config.json";

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {}", path.display())]
  Parse {
    path: PathBuf,
    source: serde_json::Error,
  },

  #[error("invalid config {}: {message}", path.display())]
  Invalid { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
  #[serde(default = "Os::host")]
  pub target_os: Os,

  #[serde(default = "Arch::host")]
  pub target_architecture: Arch,

  #[serde(rename = "cpp")]
  pub native: NativeConfig,

  #[serde(rename = "node")]
  pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeConfig {
  /// CMake target, also the stem of the produced executable.
  pub target_name: String,

  /// Build type used when the run mode does not pick one.
  #[serde(default = "default_build_type")]
  pub default_build_target_type: String,

  pub directory: DirectoryConfig,
  pub build_system: BuildSystemConfig,
  pub generator: GeneratorConfig,
  pub compiler: CompilerConfig,

  /// Extra arguments for `cmake --build`, in order.
  #[serde(default)]
  pub build_args: Vec<BuildArg>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryConfig {
  pub source: PathBuf,
  pub build: PathBuf,
  /// Subdirectory of the build directory receiving the bundled front-end.
  #[serde(default = "default_webui_dir")]
  pub webui_sub_dir_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSystemConfig {
  pub path: String,
  /// `-D` cache entries, in config order.
  #[serde(default, deserialize_with = "ordered_options")]
  pub options: Vec<(String, OptionValue)>,
}

fn ordered_options<'de, D>(deserializer: D) -> Result<Vec<(String, OptionValue)>, D::Error>
where
  D: Deserializer<'de>,
{
  struct OptionsVisitor;

  impl<'de> Visitor<'de> for OptionsVisitor {
    type Value = Vec<(String, OptionValue)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("a map of CMake cache options")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
      let mut options = Vec::with_capacity(map.size_hint().unwrap_or(0));
      while let Some(entry) = map.next_entry::<String, OptionValue>()? {
        options.push(entry);
      }
      Ok(options)
    }
  }

  deserializer.deserialize_map(OptionsVisitor)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
  pub name: String,
  pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerConfig {
  #[serde(default)]
  pub name: String,
  pub path: String,
}

/// One `cmake --build` argument. An empty value passes the flag alone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildArg {
  pub key: String,
  #[serde(default)]
  pub value: String,
}

/// Value of a `-D` cache entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
  Bool(bool),
  Number(serde_json::Number),
  Text(String),
}

impl fmt::Display for OptionValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OptionValue::Bool(true) => f.write_str("ON"),
      OptionValue::Bool(false) => f.write_str("OFF"),
      OptionValue::Number(n) => write!(f, "{}", n),
      OptionValue::Text(s) => f.write_str(s),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebConfig {
  pub build: WebBuildConfig,
  pub debug: DebugConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebBuildConfig {
  pub index_template: PathBuf,
  pub index_html: PathBuf,
  /// Bundler output directory.
  pub output: PathBuf,
  pub sub_strings: SubStrings,
  pub commands: BundlerCommands,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubStrings {
  /// Marker in the HTML template replaced by the bridge script tag.
  pub webui_bridge: String,
}

/// Shell lines run for each mode, e.g. `npm run dev`.
#[derive(Debug, Clone, Deserialize)]
pub struct BundlerCommands {
  pub dev: String,
  pub build: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugConfig {
  /// Port of the bundler dev server the webview navigates to.
  pub node_server: u16,
  /// Port of the host bridge serving `webui.js`.
  pub webui_server: u16,
}

fn default_build_type() -> String {
  "Debug".to_string()
}

fn default_webui_dir() -> String {
  "webui".to_string()
}

impl BuildConfig {
  /// Read and validate the config file at `path`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&content, path)
  }

  /// Parse and validate config content. `origin` is only used in errors.
  pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
    let config: BuildConfig = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
      path: origin.to_path_buf(),
      source,
    })?;
    config.validate().map_err(|message| ConfigError::Invalid {
      path: origin.to_path_buf(),
      message,
    })?;
    Ok(config)
  }

  pub fn platform(&self) -> Platform {
    Platform::new(self.target_architecture, self.target_os)
  }

  fn validate(&self) -> Result<(), String> {
    let required = [
      ("cpp.targetName", &self.native.target_name),
      ("cpp.buildSystem.path", &self.native.build_system.path),
      ("cpp.generator.name", &self.native.generator.name),
      ("cpp.directory.webuiSubDirName", &self.native.directory.webui_sub_dir_name),
      ("node.build.subStrings.webuiBridge", &self.web.build.sub_strings.webui_bridge),
      ("node.build.commands.dev", &self.web.build.commands.dev),
      ("node.build.commands.build", &self.web.build.commands.build),
    ];
    for (key, value) in required {
      if value.trim().is_empty() {
        return Err(format!("{} must not be empty", key));
      }
    }

    // The copied bundle replaces <build>/<name>; a nested or parent path
    // would clear something other than the bundle directory.
    let mut components = Path::new(&self.native.directory.webui_sub_dir_name).components();
    let single_name = matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none();
    if !single_name {
      return Err("cpp.directory.webuiSubDirName must be a single directory name".to_string());
    }

    if self.web.debug.node_server == 0 || self.web.debug.webui_server == 0 {
      return Err("node.debug ports must be non-zero".to_string());
    }

    Ok(())
  }
}
