//! Integration tests for binwheel-lib.

mod build_tests;
mod common;
