//! The minimal JSON-RPC-shaped envelope used by the stdio transport.
//!
//! Framing is newline-delimited JSON objects, not `Content-Length`-prefixed
//! like LSP — the simpler of the two MCP-sanctioned stdio framings, chosen
//! to keep this crate small since the transport is explicitly out of scope
//! for design effort.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(RpcError { message: message.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let json = r#"{"id": 1, "method": "env_var_audit", "params": {"project_root": "."}}"#;
        let request: RpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method, "env_var_audit");
        assert_eq!(request.params.get("project_root").unwrap(), ".");
    }

    #[test]
    fn test_parse_request_without_params() {
        let json = r#"{"id": 1, "method": "env_var_audit"}"#;
        let request: RpcRequest = serde_json::from_str(json).unwrap();
        assert!(request.params.is_empty());
    }

    #[test]
    fn test_ok_response_omits_error() {
        let response = RpcResponse::ok(Value::from(1), serde_json::json!({"healthy": true}));
        let encoded = serde_json::to_value(&response).unwrap();
        assert!(encoded.get("error").is_none());
        assert!(encoded.get("result").is_some());
    }

    #[test]
    fn test_err_response_omits_result() {
        let response = RpcResponse::err(Value::from(1), "boom");
        let encoded = serde_json::to_value(&response).unwrap();
        assert!(encoded.get("result").is_none());
        assert_eq!(encoded["error"]["message"], "boom");
    }
}
