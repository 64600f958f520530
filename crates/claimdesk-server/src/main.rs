//! Claimdesk server CLI
//!
//! Starts the HTTP server for claim document processing.

use claimdesk_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using local defaults");
        eprintln!("Usage: claimdesk-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::local_default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Claimdesk Server - Claim document classification and validation");
    println!();
    println!("USAGE:");
    println!("    claimdesk-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    claimdesk-server --config config/claimdesk.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8000)");
    println!("    - accepted_content_type: Upload content type (default: application/pdf)");
    println!("    - [llm]: endpoint, model, max_retries, request_timeout_secs");
    println!("    - [pipeline]: classification_delay_ms, call_timeout_secs, max_documents,");
    println!("      parallel_extraction");
    println!("    - [validation]: required_documents, flag_diagnostic_fields");
    println!();
    println!("LOGGING:");
    println!("    Set RUST_LOG (e.g., 'claimdesk_extractor=debug') to adjust verbosity");
    println!();
}
