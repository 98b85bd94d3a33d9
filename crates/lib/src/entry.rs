//! Logical file entries placed inside a wheel archive.

/// Permission bits for ordinary, non-executable files.
pub const DEFAULT_PERMISSIONS: u32 = 0o644;

/// Permission bits for executable payloads.
pub const EXECUTABLE_PERMISSIONS: u32 = 0o755;

/// One file inside a wheel: archive-relative path, raw content, and unix permission bits.
///
/// Paths always use `/` separators. Path validity is checked by the archive writer,
/// which rejects empty, absolute, backslashed and duplicate paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
  pub path: String,
  pub content: Vec<u8>,
  pub permissions: u32,
}

impl FileEntry {
  /// Create an entry with [`DEFAULT_PERMISSIONS`].
  pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
    Self {
      path: path.into(),
      content: content.into(),
      permissions: DEFAULT_PERMISSIONS,
    }
  }

  /// Create an entry with [`EXECUTABLE_PERMISSIONS`].
  pub fn executable(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
    Self::new(path, content).with_permissions(EXECUTABLE_PERMISSIONS)
  }

  pub fn with_permissions(mut self, permissions: u32) -> Self {
    self.permissions = permissions;
    self
  }

  pub fn is_executable(&self) -> bool {
    self.permissions & 0o111 != 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_entry_is_not_executable() {
    let entry = FileEntry::new("pkg/__init__.py", b"".to_vec());
    assert_eq!(entry.permissions, 0o644);
    assert!(!entry.is_executable());
  }

  #[test]
  fn executable_entry() {
    let entry = FileEntry::executable("pkg/bin/tool", b"BINARY".to_vec());
    assert_eq!(entry.permissions, 0o755);
    assert!(entry.is_executable());
  }
}
