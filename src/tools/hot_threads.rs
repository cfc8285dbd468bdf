//! `fetch_reddit_hot_threads` tool implementation

use crate::cli::HotThreadsArgs;
use crate::error::{validate_subreddit, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::RedditClient;
use crate::tools::format::format_hot_thread;
use serde_json::Value;
use tracing::{error, info};

/// Handle fetch_reddit_hot_threads tool call
pub async fn handle_hot_threads(
    id: Option<Value>,
    args: Value,
    client: &RedditClient,
) -> McpResponse {
    let args: HotThreadsArgs = match serde_json::from_value(args) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(id, "invalid_params", &format!("Invalid arguments: {}", e))
        }
    };

    let result = ToolResult::text(execute_hot_threads(args, client).await);
    McpResponse::success(id, serde_json::to_value(result).unwrap())
}

/// Execute the tool (shared implementation for MCP and CLI).
pub async fn execute_hot_threads(args: HotThreadsArgs, client: &RedditClient) -> String {
    match fetch_hot_threads(&args, client).await {
        Ok(text) => text,
        Err(e) => {
            error!("An error occurred while fetching r/{}: {}", args.subreddit, e);
            format!("An error occurred: {}", e)
        }
    }
}

async fn fetch_hot_threads(
    args: &HotThreadsArgs,
    client: &RedditClient,
) -> Result<String, AppError> {
    validate_subreddit(&args.subreddit)?;

    info!(
        "Hot threads request for r/{} (limit={})",
        args.subreddit, args.limit
    );

    let submissions = client.hot_submissions(&args.subreddit, args.limit).await?;

    // Zero results render as the empty string, not a not-found message.
    let posts: Vec<String> = submissions.iter().map(format_hot_thread).collect();
    Ok(posts.join("\n\n"))
}
