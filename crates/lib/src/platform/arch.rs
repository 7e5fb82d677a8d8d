use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::PlatformError;

/// CPU architectures, named the way the webview runtime packages name them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X64,
  X86,
  Arm64,
}

impl Arch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86_64" => Some(Self::X64),
      "x86" => Some(Self::X86),
      "aarch64" => Some(Self::Arm64),
      _ => None,
    }
  }

  /// Host architecture, falling back to x64 on unsupported hosts
  pub fn host() -> Self {
    Self::current().unwrap_or(Self::X64)
  }

  /// Returns the lowercase string identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X64 => "x64",
      Self::X86 => "x86",
      Self::Arm64 => "arm64",
    }
  }

  /// Runtime identifier directory used by NuGet packages (e.g. `win-x64`).
  pub fn windows_runtime(&self) -> String {
    format!("win-{}", self.as_str())
  }
}

impl FromStr for Arch {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "x64" | "x86_64" | "amd64" => Ok(Self::X64),
      "x86" | "i686" | "i386" | "win32" => Ok(Self::X86),
      "arm64" | "aarch64" => Ok(Self::Arm64),
      _ => Err(PlatformError::UnknownArch(s.to_string())),
    }
  }
}

impl<'de> Deserialize<'de> for Arch {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
