//! YAML wheel spec loading.
//!
//! Maps a declarative `wheel.yaml` onto a [`WheelSpec`]. Relative paths
//! (`description_file`, local binaries) resolve against the spec file's directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

use binwheel_lib::platform::PlatformIdentifier;
use binwheel_lib::source::github::{DEFAULT_HOST, DEFAULT_TAG_PREFIX};
use binwheel_lib::source::{BinarySource, GithubReleaseSource, LocalFileSource, ReqwestTransport};
use binwheel_lib::WheelSpec;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WheelConfig {
  pub name: String,
  pub version: String,
  /// Defaults to the normalized distribution name.
  pub package: Option<String>,
  pub executable: String,
  #[serde(default)]
  pub summary: String,
  pub description: Option<String>,
  pub description_file: Option<PathBuf>,
  pub license: Option<String>,
  #[serde(default)]
  pub classifiers: Vec<String>,
  #[serde(default)]
  pub project_urls: BTreeMap<String, String>,
  pub requires_python: Option<String>,
  #[serde(default)]
  pub add_to_path: bool,
  pub platforms: Vec<PlatformIdentifier>,
  pub source: SourceConfig,
}

/// Exactly one of the source kinds must be set.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
  pub github_release: Option<GithubReleaseConfig>,
  pub local: Option<LocalConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GithubReleaseConfig {
  pub project_slug: String,
  pub version: String,
  pub binary_path: String,
  pub asset_names: BTreeMap<PlatformIdentifier, String>,
  #[serde(default = "default_tag_prefix")]
  pub tag_prefix: String,
  #[serde(default = "default_host")]
  pub host: String,
  /// Name of the environment variable holding the access token.
  pub token_env: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalConfig {
  pub binary_path: String,
  pub files: BTreeMap<PlatformIdentifier, PathBuf>,
}

fn default_tag_prefix() -> String {
  DEFAULT_TAG_PREFIX.to_string()
}

fn default_host() -> String {
  DEFAULT_HOST.to_string()
}

/// Load the wheel spec at `path`.
pub fn load_wheel_spec(path: &Path) -> Result<WheelSpec> {
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read wheel spec: {}", path.display()))?;
  let config: WheelConfig =
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse wheel spec: {}", path.display()))?;

  let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
  config.into_spec(base_dir)
}

impl WheelConfig {
  /// Convert into a [`WheelSpec`], resolving relative paths against `base_dir`.
  pub fn into_spec(self, base_dir: &Path) -> Result<WheelSpec> {
    let description = match (&self.description, &self.description_file) {
      (Some(_), Some(_)) => bail!("Only one of 'description' and 'description_file' may be set"),
      (_, Some(file)) => {
        let file = base_dir.join(file);
        fs::read_to_string(&file).with_context(|| format!("Failed to read description file: {}", file.display()))?
      }
      (Some(description), None) => description.clone(),
      (None, None) => String::new(),
    };

    let source = self.source.into_source(base_dir)?;
    let package = self.package.unwrap_or_else(|| self.name.replace(['-', '.'], "_"));
    debug!(name = %self.name, package = %package, platforms = self.platforms.len(), "loaded wheel spec");

    let mut spec = WheelSpec::new(self.name, self.version, package, self.executable, source);
    spec.summary = self.summary;
    spec.description = description;
    spec.license = self.license;
    spec.classifiers = self.classifiers;
    spec.project_urls = self.project_urls.into_iter().collect();
    spec.requires_python = self.requires_python;
    spec.add_to_path = self.add_to_path;
    spec.platforms = self.platforms;
    Ok(spec)
  }
}

impl SourceConfig {
  fn into_source(self, base_dir: &Path) -> Result<Box<dyn BinarySource>> {
    match (self.github_release, self.local) {
      (Some(github), None) => {
        let token = github.token_env.as_deref().and_then(|name| std::env::var(name).ok());
        let transport = ReqwestTransport::new().context("Failed to create HTTP client")?;
        Ok(Box::new(
          GithubReleaseSource::new(github.project_slug, github.version, github.binary_path, Arc::new(transport))
            .with_host(github.host)
            .with_tag_prefix(github.tag_prefix)
            .with_token(token)
            .with_assets(github.asset_names),
        ))
      }
      (None, Some(local)) => {
        let source = local
          .files
          .into_iter()
          .fold(LocalFileSource::new(local.binary_path), |source, (platform, path)| {
            source.with_file(platform, base_dir.join(path))
          });
        Ok(Box::new(source))
      }
      (Some(_), Some(_)) => bail!("Only one of 'source.github_release' and 'source.local' may be set"),
      (None, None) => bail!("One of 'source.github_release' or 'source.local' must be set"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use tempfile::TempDir;

  const GITHUB_SPEC: &str = r#"
name: my-tool
version: 1.2.0
executable: bin/tool
summary: A tool
license: MIT
classifiers:
  - "Programming Language :: Python :: 3"
project_urls:
  Source: https://github.com/owner/tool
add_to_path: true
platforms:
  - linux-x86_64
  - macosx_11_0_arm64
source:
  github_release:
    project_slug: owner/tool
    version: 1.2.0
    binary_path: my_tool/bin/tool
    token_env: BINWHEEL_TEST_TOKEN
    asset_names:
      linux-x86_64: tool-linux
      macosx_11_0_arm64: tool-macos
"#;

  fn parse(yaml: &str) -> WheelConfig {
    serde_yaml::from_str(yaml).unwrap()
  }

  #[test]
  fn parses_github_spec() {
    let config = parse(GITHUB_SPEC);
    assert_eq!(config.platforms.len(), 2);
    assert_eq!(config.platforms[0].tag(), "py3-none-linux_x86_64");

    let github = config.source.github_release.as_ref().unwrap();
    assert_eq!(github.tag_prefix, "v");
    assert_eq!(github.host, "https://github.com");
    assert_eq!(github.asset_names.len(), 2);
  }

  #[test]
  #[serial]
  fn builds_spec_with_defaults() {
    temp_env::with_var("BINWHEEL_TEST_TOKEN", Some("secret"), || {
      let spec = parse(GITHUB_SPEC).into_spec(Path::new(".")).unwrap();
      assert_eq!(spec.package, "my_tool");
      assert_eq!(spec.description, "");
      assert_eq!(
        spec.project_urls,
        vec![("Source".to_string(), "https://github.com/owner/tool".to_string())]
      );
      assert!(spec.add_to_path);
      assert!(format!("{:?}", spec).contains("my-tool"));
    });
  }

  #[test]
  fn unknown_fields_are_rejected() {
    let yaml = format!("{GITHUB_SPEC}unexpected: true\n");
    assert!(serde_yaml::from_str::<WheelConfig>(&yaml).is_err());
  }

  #[test]
  fn compressed_platform_tag_is_kept() {
    let yaml = GITHUB_SPEC.replace(
      "  - linux-x86_64\n",
      "  - manylinux_2_17_x86_64.manylinux2014_x86_64\n",
    );
    let config = parse(&yaml);
    assert_eq!(
      config.platforms[0].tag(),
      "py3-none-manylinux_2_17_x86_64.manylinux2014_x86_64"
    );
  }

  #[test]
  fn invalid_platform_is_rejected() {
    let yaml = GITHUB_SPEC.replace("  - linux-x86_64\n", "  - linux/x86_64\n");
    assert!(serde_yaml::from_str::<WheelConfig>(&yaml).is_err());
  }

  #[test]
  fn description_file_resolves_against_spec_dir() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "# Tool\n").unwrap();
    let yaml = format!("{GITHUB_SPEC}description_file: README.md\n");

    let spec = parse(&yaml).into_spec(temp.path()).unwrap();
    assert_eq!(spec.description, "# Tool\n");
  }

  #[test]
  fn description_and_file_conflict() {
    let yaml = format!("{GITHUB_SPEC}description: inline\ndescription_file: README.md\n");
    let err = parse(&yaml).into_spec(Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("description_file"));
  }

  #[test]
  fn source_must_be_exactly_one_kind() {
    let yaml = GITHUB_SPEC.replace(
      "source:\n",
      "source:\n  local:\n    binary_path: x\n    files: {}\n",
    );
    assert!(parse(&yaml).into_spec(Path::new(".")).is_err());

    let yaml = r#"
name: tool
version: "1.0"
executable: bin/tool
platforms: [linux-x86_64]
source: {}
"#;
    let err = parse(yaml).into_spec(Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("must be set"));
  }

  #[test]
  fn local_source_reads_relative_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("tool-bin"), b"ELF").unwrap();
    let yaml = r#"
name: tool
version: "1.0"
executable: bin/tool
platforms: [linux-x86_64]
source:
  local:
    binary_path: tool/bin/tool
    files:
      linux-x86_64: tool-bin
"#;

    let spec = parse(yaml).into_spec(temp.path()).unwrap();
    let entries = spec.source.generate_fileset(&spec.platforms[0]).unwrap();
    assert_eq!(entries[0].path, "tool/bin/tool");
    assert_eq!(entries[0].content, b"ELF");
  }
}
