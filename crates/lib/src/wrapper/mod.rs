//! Generated python wrapper files around the embedded executable.
//!
//! Every wheel carries:
//! - `{package}/__init__.py` (empty)
//! - `{package}/__main__.py` forwarding `sys.argv[1:]` to the executable and exiting with its code
//! - `{package}/exec.py` with subprocess helpers for library callers
//! - `{dist_info}/entry_points.txt` declaring a console script, when the command is added to `PATH`

mod templates;

use crate::entry::FileEntry;

pub use templates::{ENTRY_POINTS_TEMPLATE, EXEC_PY_TEMPLATE, MAIN_PY_TEMPLATE};

/// Inputs of the wrapper generator.
#[derive(Debug, Clone)]
pub struct WrapperOptions<'a> {
  /// Python package the wrappers live in.
  pub package: &'a str,
  /// Executable path relative to the package directory.
  pub executable: &'a str,
  /// Console script name.
  pub command: &'a str,
  /// Whether to declare `command` as a console script.
  pub add_to_path: bool,
  /// Name of the dist-info directory (`{name}-{version}.dist-info`).
  pub dist_info: &'a str,
}

/// Generate the wrapper entries, in archive order.
pub fn generate_wrappers(options: &WrapperOptions<'_>) -> Vec<FileEntry> {
  let package = options.package;
  let executable = python_string_escape(options.executable);

  let mut entries = vec![
    FileEntry::new(format!("{package}/__init__.py"), Vec::new()),
    FileEntry::new(
      format!("{package}/__main__.py"),
      MAIN_PY_TEMPLATE.replace("{executable}", &executable),
    ),
    FileEntry::new(
      format!("{package}/exec.py"),
      EXEC_PY_TEMPLATE.replace("{executable}", &executable),
    ),
  ];

  if options.add_to_path {
    entries.push(FileEntry::new(
      format!("{}/entry_points.txt", options.dist_info),
      ENTRY_POINTS_TEMPLATE
        .replace("{command}", options.command)
        .replace("{package}", package),
    ));
  }

  entries
}

/// Escape `value` for use inside a double-quoted python string literal.
fn python_string_escape(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '\\' => escaped.push_str("\\\\"),
      '"' => escaped.push_str("\\\""),
      '\n' => escaped.push_str("\\n"),
      c => escaped.push(c),
    }
  }
  escaped
}
