use envhealth_engine::DiagnosticEngine;
use envhealth_mcp::config::EngineConfig;
use envhealth_mcp::license::LicenseGate;
use envhealth_mcp::transport;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    eprintln!("envhealth-mcp {VERSION} - dev-environment health MCP server");
    eprintln!();
    eprintln!("Usage: envhealth-mcp [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --stdio     Use stdio transport (default)");
    eprintln!("  --version   Print version information");
    eprintln!("  --help      Print this help message");
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    for arg in &args {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("envhealth-mcp {VERSION}");
                return;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            "--stdio" => {}
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {arg}");
                eprintln!("Run 'envhealth-mcp --help' for usage information.");
                std::process::exit(1);
            }
            _ => {}
        }
    }

    // Initialize tracing - write to stderr to avoid interfering with the
    // JSON-RPC framing on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting envhealth-mcp v{VERSION}");

    let config = EngineConfig::default();
    let engine = match DiagnosticEngine::load(Path::new(&config.descriptor_root)) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::error!(error = %e, "failed to load ecosystem descriptors");
            std::process::exit(1);
        }
    };

    let license = LicenseGate::default();
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    if let Err(e) = transport::serve(engine, license, stdin, stdout).await {
        tracing::error!(error = %e, "transport loop terminated with an error");
        std::process::exit(1);
    }
}
