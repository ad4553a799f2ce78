//! Engine response envelopes.
//!
//! Every engine reply is a JSON value that may carry `status`, `message` and
//! `content`. [`Response`] reads those with the engine's defaults; the typed
//! views below read the command-specific fields.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SolutionError};
use crate::solution::Solution;

/// Status reported by a successful command.
pub const STATUS_OK: &str = "Ok";

/// Raw engine reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    payload: Value,
}

impl Response {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    /// `status`, or `"Ok"` when absent.
    pub fn status(&self) -> &str {
        self.payload
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or(STATUS_OK)
    }

    pub fn is_ok(&self) -> bool {
        self.status() == STATUS_OK
    }

    /// `message`, or empty when absent.
    pub fn message(&self) -> &str {
        self.payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// `content`, or the whole payload when absent.
    pub fn content(&self) -> &Value {
        self.payload.get("content").unwrap_or(&self.payload)
    }

    /// Payload as text, for echo replies that are a bare string.
    pub fn text(&self) -> String {
        match &self.payload {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl From<Value> for Response {
    fn from(payload: Value) -> Self {
        Response::new(payload)
    }
}

/// Engine busy/idle status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse(Response);

impl StatusResponse {
    pub fn new(response: Response) -> Self {
        Self(response)
    }

    pub fn response(&self) -> &Response {
        &self.0
    }

    /// `type`, or empty.
    pub fn kind(&self) -> &str {
        self.0
            .payload
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// `code`, or -1.
    pub fn code(&self) -> i64 {
        self.0
            .payload
            .get("code")
            .and_then(Value::as_i64)
            .unwrap_or(-1)
    }

    pub fn is_busy(&self) -> bool {
        self.0
            .payload
            .get("busy_node")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// `current_solution_found`, or -1.
    pub fn solutions_found(&self) -> i64 {
        self.0
            .payload
            .get("current_solution_found")
            .and_then(Value::as_i64)
            .unwrap_or(-1)
    }
}

/// Reply carrying zero or more solutions.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionResponse(Response);

impl SolutionResponse {
    pub fn new(response: Response) -> Self {
        Self(response)
    }

    pub fn response(&self) -> &Response {
        &self.0
    }

    /// Decodes every solution in `content`; `None` when the status is not Ok.
    pub fn solutions(&self) -> Result<Option<Vec<Solution>>> {
        if !self.0.is_ok() {
            return Ok(None);
        }
        let entries = self
            .0
            .content()
            .as_array()
            .ok_or_else(|| SolutionError::response("content", "expected a list of solutions"))?;
        entries
            .iter()
            .map(Solution::from_value)
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

/// Engine build information.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    pub app: String,
    pub author: String,
    pub version: String,
    #[serde(rename = "version_major")]
    pub major: i64,
    #[serde(rename = "version_minor")]
    pub minor: i64,
    #[serde(rename = "version_build")]
    pub build: i64,
    #[serde(rename = "version_release")]
    pub release: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VersionResponse(Response);

impl VersionResponse {
    pub fn new(response: Response) -> Self {
        Self(response)
    }

    pub fn response(&self) -> &Response {
        &self.0
    }

    /// Version fields are read from the top level of the payload.
    pub fn info(&self) -> Result<VersionInfo> {
        VersionInfo::deserialize(&self.0.payload)
            .map_err(|e| SolutionError::response("version", e.to_string()))
    }
}

/// One explained variable or constraint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExplanationEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub explanation: String,
}

/// Engine explanation of a model, split into variables and constraints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Explanation {
    entries: Vec<ExplanationEntry>,
}

impl Explanation {
    pub fn from_value(content: &Value) -> Result<Explanation> {
        let entries = Vec::<ExplanationEntry>::deserialize(content)
            .map_err(|e| SolutionError::response("content", e.to_string()))?;
        Ok(Explanation { entries })
    }

    pub fn entries(&self) -> &[ExplanationEntry] {
        &self.entries
    }

    /// Entries of type `var`, keyed by name.
    pub fn variables(&self) -> IndexMap<&str, &ExplanationEntry> {
        self.of_kind("var")
    }

    /// Entries of type `constraint`, keyed by name.
    pub fn constraints(&self) -> IndexMap<&str, &ExplanationEntry> {
        self.of_kind("constraint")
    }

    fn of_kind(&self, kind: &str) -> IndexMap<&str, &ExplanationEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| (entry.name.as_str(), entry))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationResponse(Response);

impl ExplanationResponse {
    pub fn new(response: Response) -> Self {
        Self(response)
    }

    pub fn response(&self) -> &Response {
        &self.0
    }

    /// `None` when the status is not Ok.
    pub fn explanation(&self) -> Result<Option<Explanation>> {
        if !self.0.is_ok() {
            return Ok(None);
        }
        Explanation::from_value(self.0.content()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaekwy_test::{solution_response, status_response};
    use serde_json::json;

    // ========================================================================
    // Envelope Tests
    // ========================================================================

    #[test]
    fn test_envelope_defaults() {
        let response = Response::new(json!({"anything": 1}));
        assert_eq!(response.status(), "Ok");
        assert!(response.is_ok());
        assert_eq!(response.message(), "");
        assert_eq!(response.content(), &json!({"anything": 1}));
    }

    #[test]
    fn test_envelope_fields() {
        let response = Response::new(json!({
            "status": "Error",
            "message": "no searcher",
            "content": [1, 2]
        }));
        assert!(!response.is_ok());
        assert_eq!(response.status(), "Error");
        assert_eq!(response.message(), "no searcher");
        assert_eq!(response.content(), &json!([1, 2]));
    }

    #[test]
    fn test_text_of_bare_string() {
        assert_eq!(Response::new(json!("hello")).text(), "hello");
        assert_eq!(Response::new(json!("hello")).content(), &json!("hello"));
    }

    // ========================================================================
    // Typed View Tests
    // ========================================================================

    #[test]
    fn test_status_view() {
        let status = StatusResponse::new(Response::new(status_response()));
        assert_eq!(status.kind(), "status");
        assert_eq!(status.code(), 1);
        assert!(status.is_busy());
        assert_eq!(status.solutions_found(), 3);
    }

    #[test]
    fn test_status_view_defaults() {
        let status = StatusResponse::new(Response::new(json!({})));
        assert_eq!(status.kind(), "");
        assert_eq!(status.code(), -1);
        assert!(!status.is_busy());
        assert_eq!(status.solutions_found(), -1);
    }

    #[test]
    fn test_solution_view_decodes_each_solution() {
        let response = SolutionResponse::new(Response::new(solution_response()));
        let solutions = response.solutions().unwrap().unwrap();
        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].i64("x"), Some(4));
        assert_eq!(solutions[1].i64("x"), Some(7));
    }

    #[test]
    fn test_solution_view_not_ok_is_none() {
        let response = SolutionResponse::new(Response::new(json!({
            "status": "Error",
            "message": "infeasible",
            "content": []
        })));
        assert_eq!(response.solutions().unwrap(), None);
    }

    #[test]
    fn test_solution_view_rejects_non_list_content() {
        let response = SolutionResponse::new(Response::new(json!({"content": {"x": 1}})));
        assert_eq!(
            response.solutions().unwrap_err().code(),
            "SOLUTION_MALFORMED_RESPONSE"
        );
    }

    #[test]
    fn test_version_view() {
        let response = VersionResponse::new(Response::new(json!({
            "app": "Qaekwy",
            "author": "Qaekwy",
            "version": "1.4.2",
            "version_major": 1,
            "version_minor": 4,
            "version_build": 2,
            "version_release": "stable"
        })));
        let info = response.info().unwrap();
        assert_eq!(info.version, "1.4.2");
        assert_eq!((info.major, info.minor, info.build), (1, 4, 2));
        assert_eq!(info.release, "stable");
    }

    #[test]
    fn test_version_view_requires_prefixed_release() {
        let response = VersionResponse::new(Response::new(json!({
            "app": "Qaekwy",
            "author": "Qaekwy",
            "version": "1.4.2",
            "version_major": 1,
            "version_minor": 4,
            "version_build": 2,
            "release": "stable"
        })));
        assert!(response.info().is_err());
    }

    #[test]
    fn test_version_view_missing_field() {
        let response = VersionResponse::new(Response::new(json!({"app": "Qaekwy"})));
        assert!(response.info().is_err());
    }

    #[test]
    fn test_explanation_split_by_kind() {
        let response = ExplanationResponse::new(Response::new(json!({
            "status": "Ok",
            "content": [
                {"name": "x", "type": "var", "explanation": "x in [0, 10]"},
                {"name": "c0", "type": "constraint", "explanation": "all different a"},
                {"name": "a", "type": "var", "explanation": "array of 3"}
            ]
        })));
        let explanation = response.explanation().unwrap().unwrap();
        let variables = explanation.variables();
        assert_eq!(variables.keys().copied().collect::<Vec<_>>(), ["x", "a"]);
        assert_eq!(variables["x"].explanation, "x in [0, 10]");
        let constraints = explanation.constraints();
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints["c0"].kind, "constraint");
    }
}
