//! Shooting Calendar MCP Server - Main Entry Point
//!
//! This is the main entry point for the shooting calendar MCP server.
//! The actual implementation is in the `shootcal_mcp` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use shootcal_mcp::{Config, ScheduleServerHandler};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shooting Calendar MCP Server - production phases and scheduling conflicts via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the project data file
    file: String,

    /// Path to the configuration file (phase offsets, calendar layout)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();

    // stdout carries the MCP protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };

    let handler = ScheduleServerHandler::new(&args.file, &config)?;
    tracing::info!("serving projects from {}", args.file);
    serve_stdio(handler).await?;
    Ok(())
}
