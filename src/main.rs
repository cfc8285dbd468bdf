//! reddit-mcp MCP Server & CLI
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements three tools:
//! - `fetch_user_latest_posts(username, limit, sort)` - Latest posts from a Reddit user
//! - `fetch_reddit_hot_threads(subreddit, limit)` - Hot threads from a subreddit
//! - `fetch_reddit_post_content(post_id, comment_limit, comment_depth)` - One post with its comment tree

mod cli;
mod error;
mod http;
mod mcp;
mod reddit;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use reddit::RedditClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        // CLI mode - parse arguments and execute
        run_cli_mode().await
    } else {
        // MCP server mode - default behavior
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    // The shared client handle: constructed once, passed to every operation
    let client = RedditClient::from_env();

    let output = match cli.command {
        Some(Commands::UserPosts(args)) => {
            tools::user_posts::execute_user_posts(args, &client).await
        }
        Some(Commands::HotThreads(args)) => {
            tools::hot_threads::execute_hot_threads(args, &client).await
        }
        Some(Commands::PostContent(args)) => {
            tools::post_content::execute_post_content(args, &client).await
        }
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    // Tool-level failures are already encoded in the output text
    println!("{}", output);
    Ok(())
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // Log to stderr: stdout carries the JSON-RPC stream
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting reddit-mcp MCP Server");

    let client = RedditClient::from_env();
    mcp::handle_stdio(&client).await?;

    Ok(())
}
