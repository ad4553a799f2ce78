//! Engine commands over a [`Transport`].

use serde_json::Value;
use tracing::{debug, info};

use qaekwy_core::wire;
use qaekwy_model::Modeller;
use qaekwy_solution::{
    ExplanationResponse, Response, SolutionResponse, StatusResponse, VersionResponse,
};

use crate::error::Result;
use crate::transport::Transport;

const ECHO_PAYLOAD: &str = "ECHO";

/// Client for one engine endpoint.
#[derive(Debug, Clone)]
pub struct Engine<T> {
    transport: T,
}

impl<T: Transport> Engine<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn get(&self, command: &str) -> Result<Response> {
        debug!(command, "GET");
        Ok(Response::new(self.transport.get(command)?))
    }

    fn post(&self, command: &str, body: &Value) -> Result<Response> {
        debug!(command, "POST");
        Ok(Response::new(self.transport.post(command, body)?))
    }

    /// Round-trips a short payload; the engine echoes it back as text.
    pub fn echo(&self) -> Result<String> {
        debug!(command = "echo", "POST");
        Ok(self.transport.post_text("echo", &Value::from(ECHO_PAYLOAD))?)
    }

    pub fn version(&self) -> Result<VersionResponse> {
        self.get("version").map(VersionResponse::new)
    }

    pub fn status(&self) -> Result<StatusResponse> {
        self.get("status").map(StatusResponse::new)
    }

    pub fn reset(&self) -> Result<StatusResponse> {
        self.get("reset").map(StatusResponse::new)
    }

    pub fn stop(&self) -> Result<StatusResponse> {
        self.get("stop").map(StatusResponse::new)
    }

    /// Posts the model's submittable document to `model`.
    ///
    /// Engines that solve synchronously reply with solutions, queued
    /// engines with a status; wrap the reply in the matching view.
    pub fn submit(&self, model: &Modeller) -> Result<Response> {
        let document = Value::Object(model.serialize(true)?);
        info!(
            variables = model.variables().len(),
            constraints = model.constraints().len(),
            "Submitting model"
        );
        self.post("model", &document)
    }

    /// The model the engine is currently working on.
    pub fn current_model(&self) -> Result<Modeller> {
        let response = self.get("current")?;
        let document = wire::as_map(response.content(), "content")?;
        Ok(Modeller::deserialize(document)?)
    }

    /// Solutions found so far for the current model.
    pub fn current_solutions(&self) -> Result<SolutionResponse> {
        self.get("result").map(SolutionResponse::new)
    }

    /// Asks the engine to explain `model` without solving it.
    pub fn explain(&self, model: &Modeller) -> Result<ExplanationResponse> {
        let document = Value::Object(model.serialize(true)?);
        self.post("explain", &document).map(ExplanationResponse::new)
    }

    /// Explanation of the current model.
    pub fn explain_current(&self) -> Result<ExplanationResponse> {
        self.get("explain").map(ExplanationResponse::new)
    }
}
