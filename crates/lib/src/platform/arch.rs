use std::fmt;

use super::os::Os;

/// CPU architectures binwheel has a well-known wheel platform tag for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
}

impl Arch {
  pub const ALL: [Arch; 2] = [Arch::X86_64, Arch::Aarch64];

  /// Host architecture, if it has a well-known tag.
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86_64" => Some(Self::X86_64),
      "aarch64" => Some(Self::Aarch64),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
    }
  }

  /// Architecture name as spelled in platform tags of `os`.
  ///
  /// Windows tags use `amd64`/`arm64`, macOS uses `arm64` for Apple silicon.
  pub fn wheel_name(&self, os: Os) -> &'static str {
    match (os, self) {
      (Os::Windows, Self::X86_64) => "amd64",
      (Os::Windows | Os::MacOs, Self::Aarch64) => "arm64",
      (_, arch) => arch.as_str(),
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wheel_names_follow_os_conventions() {
    assert_eq!(Arch::X86_64.wheel_name(Os::Linux), "x86_64");
    assert_eq!(Arch::Aarch64.wheel_name(Os::Linux), "aarch64");
    assert_eq!(Arch::X86_64.wheel_name(Os::MacOs), "x86_64");
    assert_eq!(Arch::Aarch64.wheel_name(Os::MacOs), "arm64");
    assert_eq!(Arch::X86_64.wheel_name(Os::Windows), "amd64");
    assert_eq!(Arch::Aarch64.wheel_name(Os::Windows), "arm64");
  }
}
