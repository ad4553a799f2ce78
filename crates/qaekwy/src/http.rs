//! Blocking HTTP [`Transport`] over `reqwest`.
//!
//! Enabled by the `http` feature.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use qaekwy_config::ClientConfig;

use crate::transport::{Transport, TransportError};

const CLIENT_AGENT: &str = concat!("qaekwy-rs/", env!("CARGO_PKG_VERSION"));

/// Sends commands to `<endpoint>/<command>` with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Builds a client honoring the config's timeout and certificate check.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        config
            .validate()
            .map_err(|err| TransportError::Request(err.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, TransportError> {
        let response = request
            .send()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn send_json(&self, request: RequestBuilder) -> Result<Value, TransportError> {
        self.send(request)?
            .json::<Value>()
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}

impl Transport for HttpTransport {
    fn get(&self, command: &str) -> Result<Value, TransportError> {
        let url = self.config.command_url(command);
        debug!(%url, "GET");
        self.send_json(self.client.get(url))
    }

    fn post(&self, command: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.config.command_url(command);
        debug!(%url, "POST");
        self.send_json(self.client.post(url).json(body))
    }

    fn post_text(&self, command: &str, body: &Value) -> Result<String, TransportError> {
        let url = self.config.command_url(command);
        debug!(%url, "POST");
        self.send(self.client.post(url).json(body))?
            .text()
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}
