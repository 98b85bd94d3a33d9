//! Test utilities for binwheel-lib.
//!
//! Stub transports and sources that let tests exercise the build pipeline
//! without network access.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::entry::FileEntry;
use crate::platform::PlatformIdentifier;
use crate::source::{BinarySource, HttpTransport, SourceError, TransportError};

/// Transport returning a canned response and counting calls.
pub struct StubTransport {
  response: Result<Vec<u8>, u16>,
  calls: AtomicUsize,
  last_headers: Mutex<Vec<(String, String)>>,
}

impl StubTransport {
  /// Answer every request with `body`.
  pub fn ok(body: &[u8]) -> Self {
    Self::with_response(Ok(body.to_vec()))
  }

  /// Answer every request with a non-success `status`.
  pub fn status(status: u16) -> Self {
    Self::with_response(Err(status))
  }

  fn with_response(response: Result<Vec<u8>, u16>) -> Self {
    Self {
      response,
      calls: AtomicUsize::new(0),
      last_headers: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn last_headers(&self) -> Vec<(String, String)> {
    self.last_headers.lock().unwrap().clone()
  }
}

impl HttpTransport for StubTransport {
  fn get(&self, _url: &str, headers: &[(&str, String)]) -> Result<Vec<u8>, TransportError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    *self.last_headers.lock().unwrap() = headers.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    match &self.response {
      Ok(body) => Ok(body.clone()),
      Err(status) => Err(TransportError::Status { status: *status }),
    }
  }
}

/// Source returning the same entries for a fixed set of platforms.
pub struct StubSource {
  pub platforms: Vec<PlatformIdentifier>,
  pub entries: Vec<FileEntry>,
}

impl BinarySource for StubSource {
  fn generate_fileset(&self, platform: &PlatformIdentifier) -> Result<Vec<FileEntry>, SourceError> {
    if !self.platforms.contains(platform) {
      return Err(SourceError::UnsupportedPlatform(platform.clone()));
    }
    Ok(self.entries.clone())
  }
}
