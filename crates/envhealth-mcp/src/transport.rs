//! The stdio transport loop: one newline-delimited JSON request in, one
//! newline-delimited JSON response out. The engine itself knows nothing of
//! JSON-RPC or stdio framing; this module is the only place that bridges
//! the two.

use crate::license::LicenseGate;
use crate::rpc::{RpcRequest, RpcResponse};
use envhealth_engine::{ArgBag, DiagnosticEngine, Operation};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Decodes and dispatches one request line, producing a response.
/// Never returns an error itself — decode/dispatch failures become an
/// error-shaped [`RpcResponse`] instead, so the caller can always write a
/// response back to the client.
pub async fn handle_line(engine: &DiagnosticEngine, license: &LicenseGate, line: &str) -> RpcResponse {
    let request: RpcRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return RpcResponse::err(Value::Null, format!("invalid request: {e}")),
    };

    let Some(operation) = Operation::parse(&request.method) else {
        return RpcResponse::err(request.id, format!("unknown operation: {}", request.method));
    };

    if !license.allow(&request.method) {
        return RpcResponse::err(request.id, "operation not licensed");
    }

    let args: ArgBag = request.params.into_iter().collect();
    match engine.dispatch(operation, &args).await {
        Ok(outcome) => RpcResponse::ok(request.id, outcome.encode()),
        Err(e) => RpcResponse::err(request.id, e.to_string()),
    }
}

/// Runs the transport loop until `input` reaches EOF.
pub async fn serve<R, W>(engine: Arc<DiagnosticEngine>, license: LicenseGate, input: R, mut output: W) -> std::io::Result<()>
where
    R: tokio::io::AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&engine, &license, &line).await;
        let mut encoded = serde_json::to_vec(&response).unwrap_or_default();
        encoded.push(b'\n');
        output.write_all(&encoded).await?;
        output.flush().await?;
    }
    Ok(())
}
