//! Binary sources supplying the platform-specific payload of a wheel.
//!
//! A [`BinarySource`] turns a [`PlatformIdentifier`] into the ordered list of
//! [`FileEntry`] values that carry the embedded executable. The build
//! orchestrator is agnostic to where the bytes come from.
//!
//! # Submodules
//!
//! - [`github`] - Fetch release assets from a GitHub-style release host
//! - [`local`] - Read pre-built binaries from the local filesystem
//! - [`transport`] - Blocking HTTP transport used by remote sources

pub mod github;
pub mod local;
pub mod transport;

use std::path::PathBuf;

use thiserror::Error;

use crate::entry::FileEntry;
use crate::platform::PlatformIdentifier;

pub use github::GithubReleaseSource;
pub use local::LocalFileSource;
pub use transport::{HttpTransport, ReqwestTransport, TransportError};

/// Errors that can occur while generating a platform payload.
#[derive(Debug, Error)]
pub enum SourceError {
  /// The source has no payload configured for the requested platform.
  ///
  /// This is a configuration error and is raised before any I/O happens.
  #[error("unsupported wheel platform: {0}")]
  UnsupportedPlatform(PlatformIdentifier),

  /// The remote payload could not be fetched.
  #[error("failed to fetch {url}")]
  FetchFailed {
    url: String,
    #[source]
    source: TransportError,
  },

  /// A local payload could not be read.
  #[error("failed to read {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Supplies the platform-specific files of a wheel.
pub trait BinarySource: Send + Sync {
  /// Produce the ordered payload entries for `platform`.
  ///
  /// Fails with [`SourceError::UnsupportedPlatform`] if the source has no
  /// payload for the platform.
  fn generate_fileset(&self, platform: &PlatformIdentifier) -> Result<Vec<FileEntry>, SourceError>;
}

impl<S: BinarySource + ?Sized> BinarySource for Box<S> {
  fn generate_fileset(&self, platform: &PlatformIdentifier) -> Result<Vec<FileEntry>, SourceError> {
    (**self).generate_fileset(platform)
  }
}
