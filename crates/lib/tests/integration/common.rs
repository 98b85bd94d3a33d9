//! Shared test helpers for library integration tests.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use binwheel_lib::{BinarySource, FileEntry, PlatformIdentifier, SourceError, WheelSpec};

/// Source returning fixed entries for every platform it lists.
pub struct FixedSource {
  pub platforms: Vec<PlatformIdentifier>,
  pub entries: Vec<FileEntry>,
}

impl BinarySource for FixedSource {
  fn generate_fileset(&self, platform: &PlatformIdentifier) -> Result<Vec<FileEntry>, SourceError> {
    if !self.platforms.contains(platform) {
      return Err(SourceError::UnsupportedPlatform(platform.clone()));
    }
    Ok(self.entries.clone())
  }
}

pub fn platform(raw: &str) -> PlatformIdentifier {
  PlatformIdentifier::new(raw).unwrap()
}

/// Spec for `tool` 1.2.0 on the given platforms, served by `entries`.
pub fn tool_spec(platforms: &[&str], entries: Vec<FileEntry>) -> WheelSpec {
  let platforms: Vec<_> = platforms.iter().map(|p| platform(p)).collect();
  let source = FixedSource {
    platforms: platforms.clone(),
    entries,
  };
  let mut spec = WheelSpec::new("tool", "1.2.0", "tool", "bin/tool", Box::new(source));
  spec.platforms = platforms;
  spec
}

/// Member of a wheel read back from disk.
#[derive(Debug)]
pub struct Member {
  pub name: String,
  pub content: Vec<u8>,
  pub mode: Option<u32>,
}

/// Read every member of the zip at `path`, in central-directory order.
pub fn read_wheel(path: &Path) -> Vec<Member> {
  let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
  (0..archive.len())
    .map(|i| {
      let mut file = archive.by_index(i).unwrap();
      let mut content = Vec::new();
      file.read_to_end(&mut content).unwrap();
      Member {
        name: file.name().to_string(),
        content,
        mode: file.unix_mode(),
      }
    })
    .collect()
}
