//! `fetch_reddit_post_content` tool implementation

use crate::cli::PostContentArgs;
use crate::error::{validate_post_id, AppError};
use crate::mcp::{McpResponse, ToolResult};
use crate::reddit::{CommentNode, RedditClient, Submission};
use crate::tools::format::{format_comment_tree, format_post_detail};
use serde_json::Value;
use tracing::{error, info};

/// Handle fetch_reddit_post_content tool call
pub async fn handle_post_content(
    id: Option<Value>,
    args: Value,
    client: &RedditClient,
) -> McpResponse {
    let args: PostContentArgs = match serde_json::from_value(args) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(id, "invalid_params", &format!("Invalid arguments: {}", e))
        }
    };

    let result = ToolResult::text(execute_post_content(args, client).await);
    McpResponse::success(id, serde_json::to_value(result).unwrap())
}

/// Execute the tool (shared implementation for MCP and CLI).
pub async fn execute_post_content(args: PostContentArgs, client: &RedditClient) -> String {
    match fetch_post_content(&args, client).await {
        Ok(text) => text,
        Err(e) => {
            error!("An error occurred while fetching post {}: {}", args.post_id, e);
            format!("An error occurred: {}", e)
        }
    }
}

async fn fetch_post_content(
    args: &PostContentArgs,
    client: &RedditClient,
) -> Result<String, AppError> {
    validate_post_id(&args.post_id)?;

    info!(
        "Post content request for {} (comment_limit={}, comment_depth={})",
        args.post_id, args.comment_limit, args.comment_depth
    );

    // Strictly sequential: the submission first, its comment tree after.
    let submission = client.submission(&args.post_id).await?;
    let comments = client
        .comment_tree(&args.post_id, args.comment_limit, args.comment_depth)
        .await?;

    Ok(render_post_content(&submission, &comments))
}

fn render_post_content(submission: &Submission, comments: &[CommentNode]) -> String {
    let mut content = format_post_detail(submission);

    if comments.is_empty() {
        content.push_str("\nNo comments found.");
    } else {
        content.push_str("\nComments:\n");
        for comment in comments {
            content.push('\n');
            content.push_str(&format_comment_tree(comment, 0));
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reddit::{Auth, PostContent};

    fn text_post() -> Submission {
        Submission {
            id36: "1abc2d".to_string(),
            title: "How do lifetimes work?".to_string(),
            subreddit: "rust".to_string(),
            score: 42,
            comment_count: 2,
            created_at: None,
            author: Some("confused_rustacean".to_string()),
            permalink: "/r/rust/comments/1abc2d/how_do_lifetimes_work/".to_string(),
            content: PostContent::Text("I am confused about 'static.".to_string()),
        }
    }

    #[test]
    fn test_render_without_comments() {
        let rendered = render_post_content(&text_post(), &[]);
        assert!(rendered.starts_with("Title: How do lifetimes work?\n"));
        assert!(rendered.ends_with("No comments found."));
        assert!(!rendered.contains("Comments:\n"));
    }

    #[test]
    fn test_render_with_comments() {
        let comments = vec![
            CommentNode {
                author: Some("alice".to_string()),
                score: 12,
                body: "Top comment".to_string(),
                children: vec![CommentNode {
                    author: Some("bob".to_string()),
                    score: 5,
                    body: "A reply".to_string(),
                    children: vec![],
                }],
            },
            CommentNode {
                author: None,
                score: 1,
                body: "Another top comment".to_string(),
                children: vec![],
            },
        ];

        let rendered = render_post_content(&text_post(), &comments);
        assert!(rendered.contains("\nComments:\n"));
        // Top-level comment blocks start flush-left, replies are indented.
        assert!(rendered.contains("\n* Author: alice\n"));
        assert!(rendered.contains("\n-- * Author: bob\n"));
        assert!(rendered.contains("\n* Author: [deleted]\n"));
        assert!(!rendered.contains("No comments found."));
    }

    #[tokio::test]
    async fn test_invalid_post_id_becomes_error_text() {
        let client = RedditClient::new(Auth::Anonymous);
        let args = PostContentArgs {
            post_id: "t3_1abc2d".to_string(),
            comment_limit: 20,
            comment_depth: 3,
        };

        let result = execute_post_content(args, &client).await;
        assert!(result.starts_with("An error occurred:"));
        assert!(result.contains("Invalid post ID format"));
    }
}
