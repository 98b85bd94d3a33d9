use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::metadata::MetadataError;
use crate::platform::PlatformIdentifier;
use crate::source::{BinarySource, SourceError};
use crate::util::hash::ContentHash;

/// Everything needed to build one wheel per target platform.
///
/// The spec is read-only for the orchestrator; each platform build derives its
/// own entry list from it.
pub struct WheelSpec {
  /// Distribution name, also used as the console script name.
  pub name: String,
  pub version: String,
  /// Python package holding the wrappers and, usually, the executable.
  pub package: String,
  /// Executable path relative to the package directory.
  pub executable: String,
  pub summary: String,
  /// Long description, rendered as the METADATA body.
  pub description: String,
  pub license: Option<String>,
  pub classifiers: Vec<String>,
  /// Ordered `(label, url)` pairs.
  pub project_urls: Vec<(String, String)>,
  pub requires_python: Option<String>,
  /// Declare a console script named after the distribution.
  pub add_to_path: bool,
  pub platforms: Vec<PlatformIdentifier>,
  pub source: Box<dyn BinarySource>,
}

impl WheelSpec {
  /// Create a spec with empty descriptive metadata and no platforms.
  pub fn new(
    name: impl Into<String>,
    version: impl Into<String>,
    package: impl Into<String>,
    executable: impl Into<String>,
    source: Box<dyn BinarySource>,
  ) -> Self {
    Self {
      name: name.into(),
      version: version.into(),
      package: package.into(),
      executable: executable.into(),
      summary: String::new(),
      description: String::new(),
      license: None,
      classifiers: Vec::new(),
      project_urls: Vec::new(),
      requires_python: None,
      add_to_path: false,
      platforms: Vec::new(),
      source,
    }
  }

  /// Distribution name as used in file names (`-` and `.` become `_`).
  pub fn normalized_name(&self) -> String {
    self.name.replace(['-', '.'], "_")
  }

  /// Name of the dist-info directory, e.g. `my_tool-1.0.0.dist-info`.
  pub fn dist_info_dir(&self) -> String {
    format!("{}-{}.dist-info", self.normalized_name(), self.version)
  }

  /// Wheel file name for `platform`, e.g. `my_tool-1.0.0-py3-none-win_amd64.whl`.
  pub fn wheel_filename(&self, platform: &PlatformIdentifier) -> String {
    format!("{}-{}-{}.whl", self.normalized_name(), self.version, platform.tag())
  }
}

impl fmt::Debug for WheelSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WheelSpec")
      .field("name", &self.name)
      .field("version", &self.version)
      .field("package", &self.package)
      .field("executable", &self.executable)
      .field("add_to_path", &self.add_to_path)
      .field("platforms", &self.platforms)
      .finish_non_exhaustive()
  }
}

/// Options for a build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  /// Append a `RECORD` manifest to every wheel.
  pub write_record: bool,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self { write_record: true }
  }
}

/// Outcome of building the wheel of one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
  pub platform: PlatformIdentifier,
  pub file_path: PathBuf,
  /// SHA-256 of the finished wheel file.
  pub checksum: ContentHash,
  /// Size of the finished wheel file in bytes.
  pub size: u64,
}

/// Errors that can occur while building wheels.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to create output directory {}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The binary source failed for a platform.
  #[error("binary source failed for {platform}")]
  Source {
    platform: PlatformIdentifier,
    #[source]
    source: SourceError,
  },

  /// A METADATA value cannot be rendered.
  #[error("invalid wheel metadata")]
  Metadata(#[source] MetadataError),

  #[error("failed to write wheel {}", path.display())]
  Archive {
    path: PathBuf,
    #[source]
    source: ArchiveError,
  },

  /// The finished wheel could not be read back for its checksum and size.
  #[error("failed to read back wheel {}", path.display())]
  ReadBack {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}
