//! `fetch_user_latest_posts` tool implementation

use crate::cli::UserPostsArgs;
use crate::error::{validate_username, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::{ListingRoute, RedditClient, SortMode};
use crate::tools::format::format_user_post;
use serde_json::Value;
use tracing::{debug, error, info};

/// Handle fetch_user_latest_posts tool call
pub async fn handle_user_posts(
    id: Option<Value>,
    args: Value,
    client: &RedditClient,
) -> McpResponse {
    let args: UserPostsArgs = match serde_json::from_value(args) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(id, "invalid_params", &format!("Invalid arguments: {}", e))
        }
    };

    let result = ToolResult::text(execute_user_posts(args, client).await);
    McpResponse::success(id, serde_json::to_value(result).unwrap())
}

/// Execute the tool (shared implementation for MCP and CLI).
///
/// Always produces text: any fault is logged and converted into a
/// user-facing error string rather than propagated.
pub async fn execute_user_posts(args: UserPostsArgs, client: &RedditClient) -> String {
    match fetch_user_posts(&args, client).await {
        Ok(text) => text,
        Err(e) => {
            error!(
                "An error occurred while fetching posts for {}: {}",
                args.username, e
            );
            format!(
                "An error occurred while fetching posts for {}: {}",
                args.username, e
            )
        }
    }
}

async fn fetch_user_posts(
    args: &UserPostsArgs,
    client: &RedditClient,
) -> Result<String, AppError> {
    validate_username(&args.username)?;

    // Invalid sort is a user-facing result, not a fallback trigger, and is
    // decided before any network call.
    let Some(sort) = SortMode::parse(&args.sort) else {
        return Ok(format!(
            "Invalid sort method: {}. Use 'new', 'hot', or 'top'.",
            args.sort
        ));
    };

    info!(
        "User posts request for u/{} (sort={}, limit={})",
        args.username,
        sort.as_query(),
        args.limit
    );

    let mut submissions = None;
    for route in ListingRoute::CHAIN {
        match client
            .user_submissions(route, &args.username, sort, args.limit)
            .await
        {
            Ok(list) => {
                submissions = Some(list);
                break;
            }
            Err(AppError::Unavailable(reason)) => {
                debug!("{:?} route unavailable, falling through: {}", route, reason);
            }
            Err(e) => return Err(e),
        }
    }

    let Some(submissions) = submissions else {
        return Ok(
            "Unable to access user posts API. Reddit API structure may have changed.".to_string(),
        );
    };

    let posts: Vec<String> = submissions.iter().map(format_user_post).collect();

    if posts.is_empty() {
        return Ok(format!("No posts found for user: {}", args.username));
    }

    Ok(format!(
        "Latest {} posts from u/{}:\n\n{}",
        posts.len(),
        args.username,
        posts.join("\n\n")
    ))
}
