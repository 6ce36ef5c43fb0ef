//! rulekit MCP Server
//!
//! A Model Context Protocol (MCP) server that exposes the rulekit rule store
//! to AI agents over stdio transport.
//!
//! ## Usage
//!
//! ```bash
//! # Start with the default rule store (~/.local/share/rulekit/rules)
//! rulekit-mcp
//!
//! # Start with a custom rule store
//! rulekit-mcp --rules-dir /path/to/rules
//!
//! # Enable verbose logging
//! rulekit-mcp --verbose
//! ```
//!
//! ## MCP Configuration
//!
//! Add to `.cursor/mcp.json` (or run `rulekit init`):
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "rulekit": {
//!       "command": "rulekit-mcp",
//!       "args": ["--rules-dir", "/path/to/rules"]
//!     }
//!   }
//! }
//! ```
//!
//! ## Available Tools
//!
//! - **list_rules**: Rule files per purpose, with descriptions
//! - **get_rule**: Raw text of a rule file
//! - **enable_rules**: Install purposes into a project's `.cursor/rules`

use anyhow::{Context, Result};
use clap::Parser;
use rulekit::mcp::McpServer;
use rulekit::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// rulekit MCP Server - Expose Cursor rules to AI agents via Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "rulekit-mcp")]
#[command(
    author,
    version,
    about = "rulekit MCP Server - Model Context Protocol interface for Cursor rules"
)]
struct Args {
    /// Rule store directory
    #[arg(long, short = 'r', env = "RULEKIT_RULES_DIR")]
    rules_dir: Option<PathBuf>,

    /// Config file (YAML)
    #[arg(long, short = 'c', env = "RULEKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging (outputs to stderr)
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging to stderr (MCP uses stdout for protocol)
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        // By default, suppress all logging to avoid interfering with MCP protocol
        EnvFilter::new("error")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = Config::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.rules_dir, None);

    if !config.rules_dir.is_dir() {
        tracing::warn!(
            "Rule store {} does not exist; listings will be empty",
            config.rules_dir.display()
        );
    }

    tracing::info!(
        "Starting rulekit MCP server with rules: {}",
        config.rules_dir.display()
    );

    let server = McpServer::from_config(&config);
    server.run().await?;

    Ok(())
}
