use std::time::Duration;

/// Failure of a single `namespace.method` call.
///
/// Exactly one of these is produced when a call does not yield a decoded
/// result. None of them are retried by the requester.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("failed to encode request params: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("HTTP transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("server returned error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("failed to decode response result: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("RPC communication failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid response data: {0}")]
    InvalidData(String),
}
