use std::fmt;

use super::arch::Arch;

/// Operating systems binwheel has a well-known wheel platform tag for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  pub const ALL: [Os; 3] = [Os::Linux, Os::MacOs, Os::Windows];

  /// Host operating system, if it has a well-known tag.
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "macos",
      Self::Windows => "windows",
    }
  }

  /// Platform tag of wheels targeting this OS on `arch`.
  ///
  /// Linux wheels carry the compressed `manylinux_2_17` / `manylinux2014` pair
  /// so both old and new installers accept them. macOS wheels declare the
  /// oldest release shipping for `arch`.
  pub fn platform_tag(&self, arch: Arch) -> String {
    let arch_name = arch.wheel_name(*self);
    match self {
      Self::Linux => format!("manylinux_2_17_{arch_name}.manylinux2014_{arch_name}"),
      Self::MacOs => match arch {
        Arch::X86_64 => format!("macosx_10_12_{arch_name}"),
        Arch::Aarch64 => format!("macosx_11_0_{arch_name}"),
      },
      Self::Windows => format!("win_{arch_name}"),
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
