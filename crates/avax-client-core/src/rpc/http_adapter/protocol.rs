use crate::error::RpcError;

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: serde_json::Value,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub(super) id: serde_json::Value,
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Parse a JSON-RPC error value into a structured `RpcError`.
///
/// JSON-RPC 2.0 errors are `{"code": <int>, "message": <string>}`.
/// If the error value matches that shape, we produce `Remote`; otherwise we
/// fall back to `InvalidResponse` with the raw JSON.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> RpcError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    if let Ok(parsed) = serde_json::from_value::<JsonRpcError>(err.clone()) {
        RpcError::Remote {
            code: parsed.code,
            message: parsed.message,
        }
    } else {
        RpcError::InvalidResponse(format!("non-standard JSON-RPC error: {err}"))
    }
}

/// Check that a response id echoes the request id.
///
/// Servers echo the id verbatim, but some proxies stringify it, so numeric
/// strings are accepted too.
pub(super) fn check_response_id(id: &serde_json::Value, expected: u64) -> Result<(), RpcError> {
    let parsed = if let Some(n) = id.as_u64() {
        n
    } else if let Some(s) = id.as_str() {
        s.parse::<u64>().map_err(|e| {
            RpcError::InvalidResponse(format!("invalid response id string `{s}`: {e}"))
        })?
    } else {
        return Err(RpcError::InvalidResponse(format!("invalid response id: {id}")));
    };

    if parsed != expected {
        return Err(RpcError::InvalidResponse(format!(
            "response id {parsed} does not match request id {expected}"
        )));
    }
    Ok(())
}
