use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::PlatformError;

/// Target operating systems a native project can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Host OS, falling back to Linux naming on unsupported hosts
  pub fn host() -> Self {
    Self::current().unwrap_or(Self::Linux)
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Suffix appended to executable file names on this OS.
  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Windows => ".exe",
      Self::Linux | Self::MacOs => "",
    }
  }

  /// File name of an executable built from `stem`.
  pub fn executable_name(&self, stem: &str) -> String {
    format!("{}{}", stem, self.exe_suffix())
  }

  /// Whether the webview runtime loader has to ship next to the executable.
  pub fn needs_webview_loader(&self) -> bool {
    matches!(self, Self::Windows)
  }
}

impl FromStr for Os {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "linux" => Ok(Self::Linux),
      "macos" | "darwin" | "osx" => Ok(Self::MacOs),
      "windows" | "win32" | "win" => Ok(Self::Windows),
      _ => Err(PlatformError::UnknownOs(s.to_string())),
    }
  }
}

impl<'de> Deserialize<'de> for Os {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
