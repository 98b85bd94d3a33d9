//! Rendering of the `METADATA` and `WHEEL` files of a wheel's dist-info directory.
//!
//! Both renderers are pure: identical inputs always yield identical bytes.

use thiserror::Error;

/// Core metadata version written to `METADATA`.
pub const METADATA_VERSION: &str = "2.1";

/// Wheel format version written to `WHEEL`.
pub const WHEEL_VERSION: &str = "1.0";

/// Generator identity written to `WHEEL`.
pub const GENERATOR: &str = concat!("binwheel ", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while rendering `METADATA`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
  /// A header value spans several lines and would inject headers or end the
  /// header block early.
  #[error("metadata field '{field}' must be a single line")]
  MultilineValue { field: String },
}

/// Value of one metadata field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
  /// Rendered as a single `Field: value` line.
  Scalar(String),
  /// Rendered as one `Field: value` line per element.
  List(Vec<String>),
}

impl MetadataValue {
  fn is_empty(&self) -> bool {
    match self {
      Self::Scalar(value) => value.is_empty(),
      Self::List(values) => values.iter().all(|v| v.is_empty()),
    }
  }
}

impl From<&str> for MetadataValue {
  fn from(value: &str) -> Self {
    Self::Scalar(value.to_string())
  }
}

impl From<String> for MetadataValue {
  fn from(value: String) -> Self {
    Self::Scalar(value)
  }
}

impl From<Vec<String>> for MetadataValue {
  fn from(values: Vec<String>) -> Self {
    Self::List(values)
  }
}

/// Ordered mapping of metadata field name to value.
///
/// Fields render in insertion order. Absent values are kept so callers can pass
/// optional fields straight through; they are skipped when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFields {
  fields: Vec<(String, Option<MetadataValue>)>,
}

impl MetadataFields {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a field. A field inserted twice renders twice.
  pub fn insert(mut self, name: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
    self.fields.push((name.into(), Some(value.into())));
    self
  }

  /// Append a field that may be absent.
  pub fn insert_opt(mut self, name: impl Into<String>, value: Option<impl Into<MetadataValue>>) -> Self {
    self.fields.push((name.into(), value.map(Into::into)));
    self
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&MetadataValue>)> {
    self.fields.iter().map(|(name, value)| (name.as_str(), value.as_ref()))
  }
}

/// Render the `METADATA` file.
///
/// `Metadata-Version`, `Name` and `Version` come first, then `fields` in order.
/// Empty scalars, empty list elements and absent values are omitted. A non-empty
/// `description` becomes the message body after a blank line.
///
/// # Errors
///
/// Returns [`MetadataError::MultilineValue`] if `name`, `version` or any field
/// value contains a CR or LF. The description body may span lines.
pub fn generate_metadata_file(
  name: &str,
  version: &str,
  description: &str,
  fields: &MetadataFields,
) -> Result<Vec<u8>, MetadataError> {
  let mut out = String::new();
  out.push_str(&format!("Metadata-Version: {}\n", METADATA_VERSION));
  push_header(&mut out, "Name", name)?;
  push_header(&mut out, "Version", version)?;

  for (field, value) in fields.iter() {
    match value {
      Some(value) if value.is_empty() => {}
      Some(MetadataValue::Scalar(value)) => push_header(&mut out, field, value)?,
      Some(MetadataValue::List(values)) => {
        for value in values.iter().filter(|v| !v.is_empty()) {
          push_header(&mut out, field, value)?;
        }
      }
      None => {}
    }
  }

  if !description.is_empty() {
    out.push('\n');
    out.push_str(description);
    if !description.ends_with('\n') {
      out.push('\n');
    }
  }

  Ok(out.into_bytes())
}

fn push_header(out: &mut String, field: &str, value: &str) -> Result<(), MetadataError> {
  if value.contains(['\r', '\n']) {
    return Err(MetadataError::MultilineValue {
      field: field.to_string(),
    });
  }
  out.push_str(&format!("{}: {}\n", field, value));
  Ok(())
}

/// Render the `WHEEL` file for a wheel tagged `tag`.
pub fn generate_wheel_file(tag: &str) -> Vec<u8> {
  format!(
    "Wheel-Version: {}\nGenerator: {}\nRoot-Is-Purelib: false\nTag: {}\n",
    WHEEL_VERSION, GENERATOR, tag
  )
  .into_bytes()
}
