//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use qaekwy::{Transport, TransportError};
use serde_json::Value;

/// One request as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub command: String,
    pub body: Option<Value>,
}

/// Replays canned replies in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<Value, TransportError>>>,
    sent: RefCell<Vec<Sent>>,
}

impl ScriptedTransport {
    pub fn replying(replies: impl IntoIterator<Item = Value>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().map(Ok).collect()),
            sent: RefCell::default(),
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            replies: RefCell::new(VecDeque::from([Err(error)])),
            sent: RefCell::default(),
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.borrow().clone()
    }

    fn next(&self, command: &str, body: Option<&Value>) -> Result<Value, TransportError> {
        self.sent.borrow_mut().push(Sent {
            command: command.to_string(),
            body: body.cloned(),
        });
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted reply".into())))
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, command: &str) -> Result<Value, TransportError> {
        self.next(command, None)
    }

    fn post(&self, command: &str, body: &Value) -> Result<Value, TransportError> {
        self.next(command, Some(body))
    }
}
