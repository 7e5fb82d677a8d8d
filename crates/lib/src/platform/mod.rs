pub mod arch;
pub mod os;

use std::fmt;

use thiserror::Error;

pub use arch::Arch;
pub use os::Os;

#[derive(Debug, Error)]
pub enum PlatformError {
  #[error("unknown target OS: {0}")]
  UnknownOs(String),

  #[error("unknown target architecture: {0}")]
  UnknownArch(String),
}

/// Target platform of the native build (e.g. "x64-windows")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}
