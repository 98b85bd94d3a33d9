//! binwheel-lib: reproducible binary wheels
//!
//! This crate packages a pre-built executable into one python wheel per target
//! platform:
//! - `PlatformIdentifier`: the python/abi/platform tag of one wheel
//! - `FileEntry`: one file inside a wheel
//! - `BinarySource`: pluggable supplier of the platform-specific executable
//! - `write_archive`: byte-for-byte reproducible zip writer
//! - `build_wheels`: the per-platform build orchestrator

pub mod archive;
pub mod build;
pub mod entry;
pub mod metadata;
pub mod platform;
pub mod source;
pub mod util;
pub mod wrapper;

pub use build::{BuildError, BuildOptions, BuildResult, WheelBuilds, WheelSpec, build_all_wheels, build_wheels};
pub use entry::FileEntry;
pub use platform::PlatformIdentifier;
pub use source::{BinarySource, SourceError};
