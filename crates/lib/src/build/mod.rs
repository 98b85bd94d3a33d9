//! Per-platform wheel build orchestration.
//!
//! For every platform of a [`WheelSpec`], in declaration order, a build:
//! 1. generates the wrapper entries
//! 2. asks the spec's binary source for the platform payload
//! 3. renders `METADATA` and `WHEEL`
//! 4. writes `{name}-{version}-{tag}.whl` with the reproducible archive writer
//! 5. reads the finished file back and computes its SHA-256
//!
//! [`build_wheels`] returns a lazy iterator: each call to `next()` writes one
//! wheel to disk, so callers must drain it for every wheel to exist. The first
//! error is yielded and ends the iteration; wheels written before it stay on disk.

mod types;

use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::slice;

use tracing::{debug, info};

use crate::archive::{ArchiveOptions, write_archive};
use crate::entry::FileEntry;
use crate::metadata::{MetadataFields, generate_metadata_file, generate_wheel_file};
use crate::platform::PlatformIdentifier;
use crate::util::hash::hash_file;
use crate::wrapper::{WrapperOptions, generate_wrappers};

pub use types::*;

/// Lazily builds one wheel per platform of a [`WheelSpec`].
///
/// Created by [`build_wheels`].
pub struct WheelBuilds<'a> {
  spec: &'a WheelSpec,
  out_dir: PathBuf,
  options: BuildOptions,
  platforms: slice::Iter<'a, PlatformIdentifier>,
  failed: bool,
}

impl Iterator for WheelBuilds<'_> {
  type Item = Result<BuildResult, BuildError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }

    let platform = self.platforms.next()?;
    let result = build_platform_wheel(self.spec, platform, &self.out_dir, &self.options);
    self.failed = result.is_err();
    Some(result)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    if self.failed {
      (0, Some(0))
    } else {
      (0, Some(self.platforms.len()))
    }
  }
}

impl FusedIterator for WheelBuilds<'_> {}

/// Prepare a build of every platform wheel of `spec` into `out_dir`.
///
/// Creates `out_dir` if needed; existing files in it are left alone. Nothing
/// else happens until the returned iterator is advanced.
pub fn build_wheels<'a>(
  spec: &'a WheelSpec,
  out_dir: &Path,
  options: BuildOptions,
) -> Result<WheelBuilds<'a>, BuildError> {
  fs::create_dir_all(out_dir).map_err(|source| BuildError::CreateDir {
    path: out_dir.to_path_buf(),
    source,
  })?;

  Ok(WheelBuilds {
    spec,
    out_dir: out_dir.to_path_buf(),
    options,
    platforms: spec.platforms.iter(),
    failed: false,
  })
}

/// Build every platform wheel of `spec`, stopping at the first error.
pub fn build_all_wheels(spec: &WheelSpec, out_dir: &Path, options: BuildOptions) -> Result<Vec<BuildResult>, BuildError> {
  build_wheels(spec, out_dir, options)?.collect()
}

/// Build the wheel of a single platform into `out_dir`.
pub fn build_platform_wheel(
  spec: &WheelSpec,
  platform: &PlatformIdentifier,
  out_dir: &Path,
  options: &BuildOptions,
) -> Result<BuildResult, BuildError> {
  let file_path = out_dir.join(spec.wheel_filename(platform));
  info!(platform = %platform, path = ?file_path, "building wheel");

  let entries = wheel_entries(spec, platform)?;
  debug!(count = entries.len(), "collected wheel entries");

  let archive_options = ArchiveOptions {
    record_path: options
      .write_record
      .then(|| format!("{}/RECORD", spec.dist_info_dir())),
  };
  write_archive(&file_path, &entries, &archive_options).map_err(|source| BuildError::Archive {
    path: file_path.clone(),
    source,
  })?;

  let read_back = |source| BuildError::ReadBack {
    path: file_path.clone(),
    source,
  };
  let checksum = hash_file(&file_path).map_err(read_back)?;
  let size = fs::metadata(&file_path).map_err(read_back)?.len();
  info!(checksum = %checksum, size, path = ?file_path, "wheel built");

  Ok(BuildResult {
    platform: platform.clone(),
    file_path,
    checksum,
    size,
  })
}

/// Assemble the logical entries of the wheel for `platform`.
///
/// Order: wrapper entries, then source entries, then `METADATA` and `WHEEL`.
pub fn wheel_entries(spec: &WheelSpec, platform: &PlatformIdentifier) -> Result<Vec<FileEntry>, BuildError> {
  let dist_info = spec.dist_info_dir();

  let mut entries = generate_wrappers(&WrapperOptions {
    package: &spec.package,
    executable: &spec.executable,
    command: &spec.name,
    add_to_path: spec.add_to_path,
    dist_info: &dist_info,
  });

  let payload = spec
    .source
    .generate_fileset(platform)
    .map_err(|source| BuildError::Source {
      platform: platform.clone(),
      source,
    })?;
  entries.extend(payload);

  let metadata = generate_metadata_file(&spec.name, &spec.version, &spec.description, &metadata_fields(spec))
    .map_err(BuildError::Metadata)?;
  entries.push(FileEntry::new(format!("{dist_info}/METADATA"), metadata));
  entries.push(FileEntry::new(
    format!("{dist_info}/WHEEL"),
    generate_wheel_file(&platform.tag()),
  ));

  Ok(entries)
}

fn metadata_fields(spec: &WheelSpec) -> MetadataFields {
  let project_urls: Vec<String> = spec
    .project_urls
    .iter()
    .map(|(label, url)| format!("{}, {}", label, url))
    .collect();

  MetadataFields::new()
    .insert("Summary", spec.summary.as_str())
    .insert("Description-Content-Type", "text/markdown")
    .insert_opt("License", spec.license.clone())
    .insert("Classifier", spec.classifiers.clone())
    .insert("Project-URL", project_urls)
    .insert_opt("Requires-Python", spec.requires_python.clone())
}
