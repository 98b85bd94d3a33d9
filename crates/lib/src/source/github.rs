//! Release-asset source for GitHub-style release hosts.
//!
//! Assets are downloaded from
//! `{host}/{project_slug}/releases/download/{tag_prefix}{version}/{asset_name}`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::transport::HttpTransport;
use super::{BinarySource, SourceError};
use crate::entry::FileEntry;
use crate::platform::PlatformIdentifier;

/// Default release host.
pub const DEFAULT_HOST: &str = "https://github.com";

/// Default prefix between `download/` and the version in release tags.
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Fetches one release asset per platform and places it at `binary_path` as an executable.
#[derive(Clone)]
pub struct GithubReleaseSource {
  host: String,
  project_slug: String,
  version: String,
  asset_names: BTreeMap<PlatformIdentifier, String>,
  binary_path: String,
  tag_prefix: String,
  token: Option<String>,
  transport: Arc<dyn HttpTransport>,
}

impl GithubReleaseSource {
  /// Create a source for `project_slug` (e.g. `owner/repo`) at release `version`.
  ///
  /// The fetched binary is stored at the archive path `binary_path`. Every
  /// download goes through `transport`.
  pub fn new(
    project_slug: impl Into<String>,
    version: impl Into<String>,
    binary_path: impl Into<String>,
    transport: Arc<dyn HttpTransport>,
  ) -> Self {
    Self {
      host: DEFAULT_HOST.to_string(),
      project_slug: project_slug.into(),
      version: version.into(),
      asset_names: BTreeMap::new(),
      binary_path: binary_path.into(),
      tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
      token: None,
      transport,
    }
  }

  /// Map `platform` to the release asset named `asset_name`.
  pub fn with_asset(mut self, platform: PlatformIdentifier, asset_name: impl Into<String>) -> Self {
    self.asset_names.insert(platform, asset_name.into());
    self
  }

  pub fn with_assets(mut self, assets: impl IntoIterator<Item = (PlatformIdentifier, String)>) -> Self {
    self.asset_names.extend(assets);
    self
  }

  pub fn with_host(mut self, host: impl Into<String>) -> Self {
    self.host = host.into();
    self
  }

  pub fn with_tag_prefix(mut self, tag_prefix: impl Into<String>) -> Self {
    self.tag_prefix = tag_prefix.into();
    self
  }

  /// Authenticate downloads with a bearer token.
  pub fn with_token(mut self, token: Option<String>) -> Self {
    self.token = token;
    self
  }

  /// Download URL of the asset mapped to `platform`, if any.
  pub fn asset_url(&self, platform: &PlatformIdentifier) -> Option<String> {
    let asset_name = self.asset_names.get(platform)?;
    Some(format!(
      "{}/{}/releases/download/{}{}/{}",
      self.host.trim_end_matches('/'),
      self.project_slug,
      self.tag_prefix,
      self.version,
      asset_name
    ))
  }
}

impl fmt::Debug for GithubReleaseSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GithubReleaseSource")
      .field("host", &self.host)
      .field("project_slug", &self.project_slug)
      .field("version", &self.version)
      .field("asset_names", &self.asset_names)
      .field("binary_path", &self.binary_path)
      .field("tag_prefix", &self.tag_prefix)
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .finish_non_exhaustive()
  }
}

impl BinarySource for GithubReleaseSource {
  fn generate_fileset(&self, platform: &PlatformIdentifier) -> Result<Vec<FileEntry>, SourceError> {
    let url = self
      .asset_url(platform)
      .ok_or_else(|| SourceError::UnsupportedPlatform(platform.clone()))?;

    let mut headers = Vec::new();
    if let Some(token) = &self.token {
      headers.push(("Authorization", format!("Bearer {}", token)));
    }

    info!(url = %url, platform = %platform, "fetching release asset");
    let content = self
      .transport
      .get(&url, &headers)
      .map_err(|source| SourceError::FetchFailed { url: url.clone(), source })?;
    debug!(path = %self.binary_path, size = content.len(), "release asset fetched");

    Ok(vec![FileEntry::executable(self.binary_path.clone(), content)])
  }
}
