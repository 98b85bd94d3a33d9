//! Implementation of the `binwheel build` command.
//!
//! Loads a wheel spec, builds one wheel per declared platform into the dist
//! folder, and prints `> {checksum} - {path}` for each wheel as it is written.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use binwheel_lib::{BuildOptions, build_wheels};

use crate::output::{format_bytes, format_duration, print_build_result, print_success};

/// Execute the build command.
///
/// Stops at the first failing platform; wheels written before it stay in `dist_folder`.
pub fn cmd_build(wheel_spec: &Path, dist_folder: &Path, no_record: bool) -> Result<()> {
  let start = Instant::now();
  let spec = crate::load_wheel_spec(wheel_spec)?;

  let options = BuildOptions {
    write_record: !no_record,
  };
  let builds = build_wheels(&spec, dist_folder, options).context("Failed to prepare wheel build")?;

  let mut count = 0;
  let mut total_bytes = 0;
  for result in builds {
    let result = result.context("Failed to build wheel")?;
    print_build_result(&result.checksum.0, &result.file_path);

    info!(platform = %result.platform, size = result.size, "wheel written");
    count += 1;
    total_bytes += result.size;
  }

  print_success(&format!(
    "Built {} wheel(s), {} in {}",
    count,
    format_bytes(total_bytes),
    format_duration(start.elapsed())
  ));

  Ok(())
}
