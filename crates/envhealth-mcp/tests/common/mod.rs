//! Common test utilities for envhealth-mcp integration tests.
//!
//! Spawns the real `envhealth-mcp` binary and drives it over its
//! newline-delimited stdio framing, mirroring the teacher's `LspClient`
//! test harness but adapted to this server's simpler envelope.

use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Test client for the `envhealth-mcp` stdio transport.
pub struct EngineClient {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl EngineClient {
    /// Spawns the binary with its current directory set to the workspace
    /// root, so the default `config/` descriptor directory resolves.
    pub fn spawn() -> Self {
        let workspace_root = concat!(env!("CARGO_MANIFEST_DIR"), "/../..");
        let mut process = Command::new(env!("CARGO_BIN_EXE_envhealth-mcp"))
            .current_dir(workspace_root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to spawn envhealth-mcp binary");

        let stdin = process.stdin.take().expect("stdin not captured");
        let stdout = BufReader::new(process.stdout.take().expect("stdout not captured"));
        Self { process, stdin, stdout }
    }

    /// Sends one request line and reads the matching response line.
    pub fn call(&mut self, id: i64, method: &str, params: Value) -> Value {
        let request = serde_json::json!({ "id": id, "method": method, "params": params });
        let mut line = serde_json::to_string(&request).unwrap();
        line.push('\n');
        self.stdin.write_all(line.as_bytes()).unwrap();
        self.stdin.flush().unwrap();

        let mut response_line = String::new();
        let bytes_read = self
            .stdout
            .read_line(&mut response_line)
            .expect("failed to read response line");
        assert!(bytes_read > 0, "server closed stdout unexpectedly");
        serde_json::from_str(&response_line)
            .unwrap_or_else(|e| panic!("invalid JSON response: {e} in: {response_line:?}"))
    }
}

impl Drop for EngineClient {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}
