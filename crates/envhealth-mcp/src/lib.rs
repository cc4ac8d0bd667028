//! Stdio MCP transport wiring `envhealth-engine` to a real client.
//!
//! This crate is intentionally thin: the binary in `main.rs` is a few
//! lines of CLI handling and tracing setup around [`transport::serve`].

pub mod config;
pub mod license;
pub mod rpc;
pub mod transport;
