use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
  #[error("Request to {url} failed: {source}")]
  Request {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("Request to {url} timed out after {secs}s")]
  Timeout { url: String, secs: u64 },

  #[error("Server responded with HTTP {status}: {message}")]
  Server { status: u16, message: String },

  #[error("Failed to decode response from {url}: {message}")]
  Decode { url: String, message: String },

  #[error("Clipboard write failed: {message}")]
  Clipboard { message: String },

  #[error("Unknown query field '{name}'")]
  InvalidField { name: String },

  #[error("Invalid server URL '{url}': {message}")]
  InvalidUrl { url: String, message: String },

  #[error("Row {index} does not exist (table has {len} rows)")]
  RowOutOfRange { index: usize, len: usize },
}

impl PanelError {
  pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
    let url = url.into();
    Self::Request { url, source }
  }

  pub fn timeout(url: impl Into<String>, secs: u64) -> Self {
    Self::Timeout { url: url.into(), secs }
  }

  pub fn server(status: u16, message: impl Into<String>) -> Self {
    Self::Server { status, message: message.into() }
  }

  pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Decode { url: url.into(), message: message.into() }
  }

  pub fn clipboard(message: impl Into<String>) -> Self {
    Self::Clipboard { message: message.into() }
  }

  pub fn invalid_field(name: impl Into<String>) -> Self {
    Self::InvalidField { name: name.into() }
  }

  pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
    Self::InvalidUrl { url: url.into(), message: message.into() }
  }

  /// Transport and timeout failures, as opposed to answers the server gave us
  pub fn is_network(&self) -> bool {
    matches!(self, Self::Request { .. } | Self::Timeout { .. })
  }
}
