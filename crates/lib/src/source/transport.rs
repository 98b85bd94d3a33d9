//! Blocking HTTP transport used by remote binary sources.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// User-Agent header sent with every request.
const USER_AGENT: &str = concat!("binwheel/", env!("CARGO_PKG_VERSION"));

/// Timeout applied to a whole request, including the body download.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors reported by an [`HttpTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
  /// The server answered with a non-success status.
  #[error("HTTP {status}")]
  Status { status: u16 },

  /// The request could not be completed.
  #[error("request failed")]
  Request(#[source] reqwest::Error),
}

/// Performs HTTP GET requests on behalf of a binary source.
pub trait HttpTransport: Send + Sync {
  /// Fetch `url` with the given extra headers and return the full response body.
  ///
  /// Any non-success status is an error.
  fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<Vec<u8>, TransportError>;
}

/// [`HttpTransport`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  client: reqwest::blocking::Client,
}

impl ReqwestTransport {
  /// Build a client with the binwheel user agent and request timeout.
  ///
  /// Fails if the TLS backend cannot be initialized.
  pub fn new() -> Result<Self, TransportError> {
    let client = reqwest::blocking::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(REQUEST_TIMEOUT)
      .build()
      .map_err(TransportError::Request)?;
    Ok(Self { client })
  }
}

impl HttpTransport for ReqwestTransport {
  fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<Vec<u8>, TransportError> {
    let mut request = self.client.get(url);
    for (name, value) in headers {
      request = request.header(*name, value.as_str());
    }

    let response = request.send().map_err(TransportError::Request)?;
    let status = response.status();
    if !status.is_success() {
      return Err(TransportError::Status {
        status: status.as_u16(),
      });
    }

    let bytes = response.bytes().map_err(TransportError::Request)?;
    debug!(url = %url, size = bytes.len(), "download complete");
    Ok(bytes.to_vec())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn get_returns_body() {
    let mut server = mockito::Server::new();
    let mock = server
      .mock("GET", "/asset")
      .match_header("x-test", "yes")
      .with_status(200)
      .with_body("payload")
      .create();

    let transport = ReqwestTransport::new().unwrap();
    let body = transport
      .get(&format!("{}/asset", server.url()), &[("x-test", "yes".to_string())])
      .unwrap();

    assert_eq!(body, b"payload");
    mock.assert();
  }

  #[test]
  fn non_success_status_is_error() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/missing").with_status(404).create();

    let transport = ReqwestTransport::new().unwrap();
    let err = transport.get(&format!("{}/missing", server.url()), &[]).unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 404 }));
  }
}
