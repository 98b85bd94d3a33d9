//! End-to-end wheel builds.

use std::fs;

use binwheel_lib::util::hash::{hash_bytes, record_digest};
use binwheel_lib::{BuildOptions, FileEntry, build_all_wheels};
use tempfile::TempDir;

use super::common::{read_wheel, tool_spec};

fn no_record() -> BuildOptions {
  BuildOptions { write_record: false }
}

#[test]
fn single_platform_wheel_layout() {
  let temp = TempDir::new().unwrap();
  let spec = tool_spec(
    &["linux-x86_64"],
    vec![FileEntry::executable("bin/tool", b"BINARY".to_vec())],
  );

  let results = build_all_wheels(&spec, temp.path(), no_record()).unwrap();

  assert_eq!(results.len(), 1);
  let result = &results[0];
  assert_eq!(result.file_path, temp.path().join("tool-1.2.0-py3-none-linux_x86_64.whl"));

  let bytes = fs::read(&result.file_path).unwrap();
  assert_eq!(result.checksum, hash_bytes(&bytes));
  assert_eq!(result.checksum.0.len(), 64);

  let members = read_wheel(&result.file_path);
  let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
  assert_eq!(
    names,
    [
      "tool/__init__.py",
      "tool/__main__.py",
      "tool/exec.py",
      "bin/tool",
      "tool-1.2.0.dist-info/METADATA",
      "tool-1.2.0.dist-info/WHEEL",
    ]
  );
  assert_eq!(members[3].content, b"BINARY");
  assert_eq!(members[3].mode.map(|m| m & 0o777), Some(0o755));
}

#[test]
fn record_is_appended_by_default() {
  let temp = TempDir::new().unwrap();
  let spec = tool_spec(
    &["linux-x86_64"],
    vec![FileEntry::executable("tool/bin/tool", b"BINARY".to_vec())],
  );

  let results = build_all_wheels(&spec, temp.path(), BuildOptions::default()).unwrap();
  let members = read_wheel(&results[0].file_path);

  assert_eq!(members.len(), 7);
  let record = &members[6];
  assert_eq!(record.name, "tool-1.2.0.dist-info/RECORD");

  let record = String::from_utf8(record.content.clone()).unwrap();
  for member in &members[..6] {
    let line = format!("{},{},{}", member.name, record_digest(&member.content), member.content.len());
    assert!(record.contains(&line), "RECORD is missing {line}");
  }
  assert!(record.ends_with("tool-1.2.0.dist-info/RECORD,,\n"));
}

#[test]
fn same_spec_builds_identical_wheels() {
  let temp = TempDir::new().unwrap();
  let entries = vec![FileEntry::executable("tool/bin/tool", b"BINARY".to_vec())];

  let first = build_all_wheels(
    &tool_spec(&["linux-x86_64"], entries.clone()),
    &temp.path().join("first"),
    BuildOptions::default(),
  )
  .unwrap();
  let second = build_all_wheels(
    &tool_spec(&["linux-x86_64"], entries),
    &temp.path().join("second"),
    BuildOptions::default(),
  )
  .unwrap();

  assert_eq!(first[0].checksum, second[0].checksum);
  assert_eq!(
    fs::read(&first[0].file_path).unwrap(),
    fs::read(&second[0].file_path).unwrap()
  );
}

#[test]
fn permuted_source_entries_change_the_wheel() {
  let temp = TempDir::new().unwrap();
  let entries = vec![
    FileEntry::executable("tool/bin/tool", b"BINARY".to_vec()),
    FileEntry::new("tool/bin/LICENSE", b"MIT".to_vec()),
  ];
  let mut permuted = entries.clone();
  permuted.reverse();

  let forward = build_all_wheels(
    &tool_spec(&["linux-x86_64"], entries),
    &temp.path().join("forward"),
    BuildOptions::default(),
  )
  .unwrap();
  let reversed = build_all_wheels(
    &tool_spec(&["linux-x86_64"], permuted),
    &temp.path().join("reversed"),
    BuildOptions::default(),
  )
  .unwrap();

  assert_ne!(forward[0].checksum, reversed[0].checksum);

  let names: Vec<_> = read_wheel(&reversed[0].file_path).into_iter().map(|m| m.name).collect();
  assert_eq!(names[3], "tool/bin/LICENSE");
  assert_eq!(names[4], "tool/bin/tool");
}

#[test]
fn duplicate_source_path_fails_without_output() {
  let temp = TempDir::new().unwrap();
  let spec = tool_spec(
    &["linux-x86_64"],
    vec![FileEntry::executable("tool/__init__.py", b"BINARY".to_vec())],
  );

  let err = build_all_wheels(&spec, temp.path(), BuildOptions::default()).unwrap_err();

  assert!(err.to_string().contains("tool-1.2.0-py3-none-linux_x86_64.whl"));
  assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
