//! Wheel platform identifiers.
//!
//! A [`PlatformIdentifier`] names one python/abi/platform combination and
//! renders the compatibility tag that ends up in wheel filenames and in the
//! `WHEEL` metadata file (e.g. `py3-none-manylinux_2_17_x86_64.manylinux2014_x86_64`).

pub mod arch;
pub mod os;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use arch::Arch;
use os::Os;

/// Python tag used when none is given; the wrappers are plain python 3.
pub const DEFAULT_PYTHON_TAG: &str = "py3";

/// ABI tag used when none is given; the wheels carry no extension modules.
pub const DEFAULT_ABI_TAG: &str = "none";

/// Errors that can occur when parsing a platform identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
  #[error("platform tag is empty")]
  Empty,

  #[error("invalid character '{character}' in platform tag '{tag}'")]
  InvalidCharacter { tag: String, character: char },

  #[error("empty member in compressed platform tag '{0}'")]
  EmptyMember(String),
}

/// Identifies one target platform/ABI combination of a wheel.
///
/// Equality, hashing and ordering are defined by the three tag components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct PlatformIdentifier {
  python_tag: String,
  abi_tag: String,
  platform_tag: String,
}

impl PlatformIdentifier {
  /// Create an identifier for a raw platform tag.
  ///
  /// `-` is normalized to `_`, and so is a `.` inside a version number, so
  /// `linux-x86_64` and `macosx-11.0-arm64` become `linux_x86_64` and
  /// `macosx_11_0_arm64`. A `.` followed by a letter separates the members of
  /// a compressed tag set and is kept, so
  /// `manylinux_2_17_x86_64.manylinux2014_x86_64` parses unchanged.
  pub fn new(platform: &str) -> Result<Self, PlatformError> {
    Ok(Self {
      python_tag: DEFAULT_PYTHON_TAG.to_string(),
      abi_tag: DEFAULT_ABI_TAG.to_string(),
      platform_tag: normalize_tag(platform)?,
    })
  }

  /// Identifier for a well-known OS/architecture pair.
  pub fn well_known(os: Os, arch: Arch) -> Self {
    Self {
      python_tag: DEFAULT_PYTHON_TAG.to_string(),
      abi_tag: DEFAULT_ABI_TAG.to_string(),
      platform_tag: os.platform_tag(arch),
    }
  }

  /// Detect the well-known identifier of the current platform
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self::well_known(Os::current()?, Arch::current()?))
  }

  /// Replace the python tag (default `py3`).
  pub fn with_python_tag(mut self, python_tag: &str) -> Result<Self, PlatformError> {
    self.python_tag = normalize_tag(python_tag)?;
    Ok(self)
  }

  /// Replace the ABI tag (default `none`).
  pub fn with_abi_tag(mut self, abi_tag: &str) -> Result<Self, PlatformError> {
    self.abi_tag = normalize_tag(abi_tag)?;
    Ok(self)
  }

  pub fn python_tag(&self) -> &str {
    &self.python_tag
  }

  pub fn abi_tag(&self) -> &str {
    &self.abi_tag
  }

  pub fn platform_tag(&self) -> &str {
    &self.platform_tag
  }

  /// Returns the full compatibility tag (`{python}-{abi}-{platform}`)
  pub fn tag(&self) -> String {
    format!("{}-{}-{}", self.python_tag, self.abi_tag, self.platform_tag)
  }
}

impl fmt::Display for PlatformIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.tag())
  }
}

impl FromStr for PlatformIdentifier {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<String> for PlatformIdentifier {
  type Error = PlatformError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(&value)
  }
}

/// Normalize one tag component. Tags only carry ASCII alphanumerics and `_`,
/// plus `.` between the members of a compressed tag set.
fn normalize_tag(raw: &str) -> Result<String, PlatformError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(PlatformError::Empty);
  }

  let mut normalized = String::with_capacity(trimmed.len());
  let mut chars = trimmed.chars().peekable();
  while let Some(c) = chars.next() {
    match c {
      '.' if chars.peek().is_some_and(|next| next.is_ascii_alphabetic()) => normalized.push('.'),
      '-' | '.' => normalized.push('_'),
      c if c.is_ascii_alphanumeric() || c == '_' => normalized.push(c),
      c => {
        return Err(PlatformError::InvalidCharacter {
          tag: raw.to_string(),
          character: c,
        });
      }
    }
  }

  if normalized.split('.').any(str::is_empty) {
    return Err(PlatformError::EmptyMember(raw.to_string()));
  }

  Ok(normalized)
}
