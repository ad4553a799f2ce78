//! The seam between model documents and whatever carries them to an engine.
//!
//! The `http` feature provides a blocking implementation. Otherwise implement
//! [`Transport`] over the client of your choice; it owns authentication
//! headers, timeouts, TLS and the mapping of non-2xx replies into
//! [`TransportError::Status`].

use serde_json::Value;
use thiserror::Error;

use qaekwy_solution::Response;

/// Failure to exchange a command with the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The engine answered with a non-success status
    #[error("HTTP error occurred: {status} - {body}")]
    Status { status: u16, body: String },

    /// The request never produced a reply (connection, timeout, TLS)
    #[error("Request error occurred: {0}")]
    Request(String),

    /// The reply body could not be decoded
    #[error("Invalid reply: {0}")]
    Decode(String),
}

/// Sends engine commands. `command` is a path segment such as `"model"`.
pub trait Transport {
    fn get(&self, command: &str) -> Result<Value, TransportError>;

    fn post(&self, command: &str, body: &Value) -> Result<Value, TransportError>;

    /// Posts `body` and returns the reply body as plain text.
    ///
    /// Used by commands whose reply is not a JSON document, such as `echo`.
    /// The default decodes through [`Transport::post`]: a JSON string yields
    /// its contents and any other value its serialized form.
    fn post_text(&self, command: &str, body: &Value) -> Result<String, TransportError> {
        self.post(command, body).map(|reply| Response::new(reply).text())
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, command: &str) -> Result<Value, TransportError> {
        (**self).get(command)
    }

    fn post(&self, command: &str, body: &Value) -> Result<Value, TransportError> {
        (**self).post(command, body)
    }

    fn post_text(&self, command: &str, body: &Value) -> Result<String, TransportError> {
        (**self).post_text(command, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, command: &str) -> Result<Value, TransportError> {
        (**self).get(command)
    }

    fn post(&self, command: &str, body: &Value) -> Result<Value, TransportError> {
        (**self).post(command, body)
    }

    fn post_text(&self, command: &str, body: &Value) -> Result<String, TransportError> {
        (**self).post_text(command, body)
    }
}
