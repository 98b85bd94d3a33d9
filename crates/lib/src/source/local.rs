//! Binary source reading pre-built executables from the local filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::{BinarySource, SourceError};
use crate::entry::FileEntry;
use crate::platform::PlatformIdentifier;

/// Reads one local file per platform and places it at `binary_path` as an executable.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
  files: BTreeMap<PlatformIdentifier, PathBuf>,
  binary_path: String,
}

impl LocalFileSource {
  pub fn new(binary_path: impl Into<String>) -> Self {
    Self {
      files: BTreeMap::new(),
      binary_path: binary_path.into(),
    }
  }

  /// Map `platform` to the executable at `path`.
  pub fn with_file(mut self, platform: PlatformIdentifier, path: impl Into<PathBuf>) -> Self {
    self.files.insert(platform, path.into());
    self
  }
}

impl BinarySource for LocalFileSource {
  fn generate_fileset(&self, platform: &PlatformIdentifier) -> Result<Vec<FileEntry>, SourceError> {
    let path = self
      .files
      .get(platform)
      .ok_or_else(|| SourceError::UnsupportedPlatform(platform.clone()))?;

    let content = fs::read(path).map_err(|source| SourceError::Io {
      path: path.clone(),
      source,
    })?;
    debug!(path = ?path, size = content.len(), "read local binary");

    Ok(vec![FileEntry::executable(self.binary_path.clone(), content)])
  }
}
