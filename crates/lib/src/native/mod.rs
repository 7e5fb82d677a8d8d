//! Native build driver.
//!
//! Wraps CMake in two phases:
//! 1. generate the build tree (`cmake -S <src> -B <build> -G <gen> -D...`),
//!    only when regeneration is requested
//! 2. build the target (`cmake --build <build> --target <name> ...`)
//!
//! After a successful build the webview loader DLL is placed next to the
//! executable on targets that need it (see [`dynlib`]).

pub mod dynlib;

use std::fmt;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Project;
use crate::context::Mode;
use crate::exec::{CommandSpec, ExecError, Runner, run_checked};

pub use dynlib::{DllCopy, DynLibError, copy_webview_loader};

#[derive(Debug, Error)]
pub enum NativeError {
  #[error("native project directory not found: {}", path.display())]
  SourceMissing { path: PathBuf },

  #[error("failed to create build directory {}", path.display())]
  CreateBuildDir { path: PathBuf, source: std::io::Error },

  #[error("generating native project failed")]
  Generate(#[source] ExecError),

  #[error("building native project failed")]
  Build(#[source] ExecError),

  #[error(transparent)]
  DynLib(#[from] DynLibError),
}

/// CMake build type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildVariant {
  Debug,
  Release,
  /// Configured fallback such as `RelWithDebInfo`.
  Custom(String),
}

impl BuildVariant {
  /// `dev` builds Debug, `build` builds Release, anything else uses `default`.
  pub fn for_mode(mode: Option<Mode>, default: &str) -> Self {
    match mode {
      Some(Mode::Dev) => BuildVariant::Debug,
      Some(Mode::Build) => BuildVariant::Release,
      None => match default {
        "Debug" => BuildVariant::Debug,
        "Release" => BuildVariant::Release,
        other => BuildVariant::Custom(other.to_string()),
      },
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      BuildVariant::Debug => "Debug",
      BuildVariant::Release => "Release",
      BuildVariant::Custom(name) => name,
    }
  }
}

impl fmt::Display for BuildVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy)]
pub struct NativeOptions {
  /// Run mode, or `None` to use the configured default build type.
  pub mode: Option<Mode>,
  pub regenerate: bool,
}

#[derive(Debug, Clone)]
pub struct NativeReport {
  pub variant: BuildVariant,
  pub regenerated: bool,
  pub loader: DllCopy,
}

/// The project generation command.
pub fn generate_command(project: &Project, variant: &BuildVariant) -> CommandSpec {
  let native = &project.config().native;

  let mut cmd = CommandSpec::new(&native.build_system.path)
    .arg("-S")
    .arg(project.native_source_dir().to_string_lossy())
    .arg("-B")
    .arg(project.native_build_dir().to_string_lossy())
    .arg("-G")
    .arg(&native.generator.name)
    .arg(format!("-DCMAKE_MAKE_PROGRAM={}", native.generator.path))
    .arg(format!("-DCMAKE_BUILD_TYPE={}", variant))
    .arg(format!("-DCMAKE_CXX_COMPILER={}", native.compiler.path));

  for (key, value) in &native.build_system.options {
    cmd = cmd.arg(format!("-D{}={}", key, value));
  }

  cmd.current_dir(project.root())
}

/// The build command. Extra arguments with an empty value are passed as a
/// bare flag.
pub fn build_command(project: &Project) -> CommandSpec {
  let native = &project.config().native;

  let mut cmd = CommandSpec::new(&native.build_system.path)
    .arg("--build")
    .arg(project.native_build_dir().to_string_lossy())
    .arg("--target")
    .arg(&native.target_name);

  for arg in &native.build_args {
    cmd = cmd.arg(&arg.key);
    if !arg.value.is_empty() {
      cmd = cmd.arg(&arg.value);
    }
  }

  cmd.current_dir(project.root())
}

/// Generate (optionally) and build the native project, then place the
/// webview loader.
pub async fn build_native<R: Runner>(
  project: &Project,
  runner: &R,
  options: NativeOptions,
) -> Result<NativeReport, NativeError> {
  let native = &project.config().native;
  let variant = BuildVariant::for_mode(options.mode, &native.default_build_target_type);
  let source_dir = project.native_source_dir();
  let build_dir = project.native_build_dir();

  info!(name = %native.target_name, variant = %variant, "building native target");

  if !source_dir.is_dir() {
    return Err(NativeError::SourceMissing { path: source_dir });
  }

  fs::create_dir_all(&build_dir).map_err(|source| NativeError::CreateBuildDir {
    path: build_dir.clone(),
    source,
  })?;

  debug!(
    build_system = %native.build_system.path,
    generator = %native.generator.path,
    compiler = %native.compiler.name,
    "native toolchain"
  );

  info!("phase 1/2: generating project");
  if options.regenerate {
    let cmd = generate_command(project, &variant);
    run_checked(runner, &cmd).await.map_err(NativeError::Generate)?;
    info!("generated native project");
  } else {
    info!("skipping project generation");
  }

  info!("phase 2/2: building project");
  run_checked(runner, &build_command(project))
    .await
    .map_err(NativeError::Build)?;
  info!(name = %native.target_name, "built native project");

  let loader = copy_webview_loader(project)?;

  Ok(NativeReport {
    variant,
    regenerated: options.regenerate,
    loader,
  })
}
