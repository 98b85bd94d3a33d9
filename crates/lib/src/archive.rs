//! Reproducible wheel archive writer.
//!
//! Writes an ordered list of [`FileEntry`] values into a zip archive whose bytes
//! depend only on the entries:
//! - every member carries the zip epoch (1980-01-01 00:00:00) as modification time
//! - members appear in entry-list order
//! - every member is deflated at a fixed level
//! - unix permission bits come from the entry, never from the filesystem
//!
//! The archive is written to a sibling `.tmp` file and renamed into place once
//! complete, so a failed write never leaves a partial archive at the destination.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::entry::{DEFAULT_PERMISSIONS, FileEntry};
use crate::util::hash::record_digest;

/// Deflate level applied to every member.
pub const COMPRESSION_LEVEL: i64 = 6;

/// Errors that can occur while writing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
  /// An entry path cannot be stored in a wheel.
  #[error("invalid archive path '{path}': {reason}")]
  InvalidPath { path: String, reason: &'static str },

  /// Two entries share the same path.
  #[error("duplicate archive path: {0}")]
  DuplicatePath(String),

  #[error("zip error")]
  Zip(#[from] zip::result::ZipError),

  #[error("io error")]
  Io(#[from] io::Error),
}

/// Options controlling archive layout.
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
  /// When set, a RECORD manifest listing every entry is appended at this path.
  pub record_path: Option<String>,
}

/// Write `entries` to a reproducible zip archive at `dest`.
///
/// All paths are validated before anything touches the filesystem. An existing
/// file at `dest` is replaced only if the whole archive was written successfully.
///
/// # Errors
///
/// Returns an error if:
/// - an entry path is empty, absolute, contains `\`, NUL, `.` or `..` components
/// - two entries (or an entry and the RECORD) share a path
/// - the temporary file cannot be created, written or renamed
pub fn write_archive(dest: &Path, entries: &[FileEntry], options: &ArchiveOptions) -> Result<(), ArchiveError> {
  validate_entries(entries, options.record_path.as_deref())?;

  let temp_path = temp_path_for(dest)?;
  let result = write_zip(&temp_path, entries, options).and_then(|()| Ok(fs::rename(&temp_path, dest)?));

  if result.is_err() {
    // The temp file may not exist if creation itself failed
    let _ = fs::remove_file(&temp_path);
  }

  result
}

fn write_zip(path: &Path, entries: &[FileEntry], options: &ArchiveOptions) -> Result<(), ArchiveError> {
  let file = File::create(path)?;
  let mut zip = ZipWriter::new(BufWriter::new(file));

  for entry in entries {
    debug!(path = %entry.path, size = entry.content.len(), mode = %format!("{:o}", entry.permissions), "adding entry");
    zip.start_file(entry.path.clone(), file_options(entry.permissions))?;
    zip.write_all(&entry.content)?;
  }

  if let Some(record_path) = &options.record_path {
    zip.start_file(record_path.clone(), file_options(DEFAULT_PERMISSIONS))?;
    zip.write_all(&render_record(entries, record_path))?;
  }

  let writer = zip.finish()?;
  let file = writer.into_inner().map_err(|e| e.into_error())?;
  file.sync_all()?;

  Ok(())
}

fn file_options(permissions: u32) -> SimpleFileOptions {
  SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .compression_level(Some(COMPRESSION_LEVEL))
    .last_modified_time(DateTime::default())
    .unix_permissions(permissions)
}

/// Render the RECORD manifest: one `path,sha256=...,size` line per entry, then the RECORD itself.
fn render_record(entries: &[FileEntry], record_path: &str) -> Vec<u8> {
  let mut record = String::new();
  for entry in entries {
    record.push_str(&format!(
      "{},{},{}\n",
      csv_field(&entry.path),
      record_digest(&entry.content),
      entry.content.len()
    ));
  }
  record.push_str(&format!("{},,\n", csv_field(record_path)));
  record.into_bytes()
}

fn csv_field(value: &str) -> String {
  if value.contains([',', '"', '\n']) {
    format!("\"{}\"", value.replace('"', "\"\""))
  } else {
    value.to_string()
  }
}

fn validate_entries(entries: &[FileEntry], record_path: Option<&str>) -> Result<(), ArchiveError> {
  let mut seen = HashSet::new();

  for path in entries.iter().map(|e| e.path.as_str()).chain(record_path) {
    validate_path(path)?;
    if !seen.insert(path) {
      return Err(ArchiveError::DuplicatePath(path.to_string()));
    }
  }

  Ok(())
}

fn validate_path(path: &str) -> Result<(), ArchiveError> {
  let invalid = |reason| {
    Err(ArchiveError::InvalidPath {
      path: path.to_string(),
      reason,
    })
  };

  if path.is_empty() {
    return invalid("path is empty");
  }
  if path.starts_with('/') {
    return invalid("path must be relative");
  }
  if path.contains('\\') {
    return invalid("path must use '/' separators");
  }
  if path.contains('\0') {
    return invalid("path contains NUL");
  }
  if path.split('/').any(|c| c.is_empty() || c == "." || c == "..") {
    return invalid("path contains an empty, '.' or '..' component");
  }

  Ok(())
}

fn temp_path_for(dest: &Path) -> Result<PathBuf, ArchiveError> {
  let file_name = dest.file_name().ok_or_else(|| {
    io::Error::new(
      io::ErrorKind::InvalidInput,
      format!("archive destination has no file name: {}", dest.display()),
    )
  })?;

  let mut temp_name = OsString::from(file_name);
  temp_name.push(".tmp");
  Ok(dest.with_file_name(temp_name))
}
