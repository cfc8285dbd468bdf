//! CLI mode implementation
//!
//! Provides a command-line interface for the reddit-mcp tools. The argument
//! structs double as the MCP tool input schemas via schemars.

use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// reddit-mcp CLI
#[derive(Parser)]
#[command(name = "reddit-mcp")]
#[command(about = "Reddit content retrieval utility and MCP server", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch latest posts from a specific Reddit user
    UserPosts(UserPostsArgs),
    /// Fetch hot threads from a subreddit
    HotThreads(HotThreadsArgs),
    /// Fetch detailed content of a specific post
    PostContent(PostContentArgs),
}

fn default_limit() -> u32 {
    10
}

fn default_sort() -> String {
    "new".to_string()
}

fn default_comment_limit() -> u32 {
    20
}

fn default_comment_depth() -> u32 {
    3
}

/// fetch_user_latest_posts tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct UserPostsArgs {
    /// Reddit username (without the u/ prefix)
    #[arg(short = 'u', long)]
    #[schemars(description = "Reddit username (without the u/ prefix)")]
    pub username: String,

    /// Number of posts to fetch (default: 10)
    #[arg(short = 'l', long, default_value_t = default_limit())]
    #[serde(default = "default_limit")]
    #[schemars(description = "Number of posts to fetch (default: 10)")]
    pub limit: u32,

    /// Sort method - 'new', 'hot', 'top' (default: 'new')
    #[arg(short = 's', long, default_value = "new")]
    #[serde(default = "default_sort")]
    #[schemars(description = "Sort method - 'new', 'hot', 'top' (default: 'new')")]
    pub sort: String,
}

/// fetch_reddit_hot_threads tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct HotThreadsArgs {
    /// Name of the subreddit (without the r/ prefix)
    #[arg(short = 'r', long)]
    #[schemars(description = "Name of the subreddit (without the r/ prefix)")]
    pub subreddit: String,

    /// Number of posts to fetch (default: 10)
    #[arg(short = 'l', long, default_value_t = default_limit())]
    #[serde(default = "default_limit")]
    #[schemars(description = "Number of posts to fetch (default: 10)")]
    pub limit: u32,
}

/// fetch_reddit_post_content tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct PostContentArgs {
    /// Reddit post ID (base-36, without the t3_ prefix)
    #[arg(short = 'p', long)]
    #[schemars(description = "Reddit post ID (base-36, without the t3_ prefix)")]
    pub post_id: String,

    /// Number of top level comments to fetch (default: 20)
    #[arg(short = 'l', long, default_value_t = default_comment_limit())]
    #[serde(default = "default_comment_limit")]
    #[schemars(description = "Number of top level comments to fetch (default: 20)")]
    pub comment_limit: u32,

    /// Maximum depth of comment tree to traverse (default: 3)
    #[arg(short = 'd', long, default_value_t = default_comment_depth())]
    #[serde(default = "default_comment_depth")]
    #[schemars(description = "Maximum depth of comment tree to traverse (default: 3)")]
    pub comment_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_posts_args_defaults() {
        let args: UserPostsArgs = serde_json::from_value(json!({
            "username": "spez"
        }))
        .unwrap();
        assert_eq!(args.username, "spez");
        assert_eq!(args.limit, 10);
        assert_eq!(args.sort, "new");
    }

    #[test]
    fn test_user_posts_args_explicit() {
        let args: UserPostsArgs = serde_json::from_value(json!({
            "username": "spez",
            "limit": 5,
            "sort": "top"
        }))
        .unwrap();
        assert_eq!(args.limit, 5);
        assert_eq!(args.sort, "top");
    }

    #[test]
    fn test_hot_threads_args_defaults() {
        let args: HotThreadsArgs = serde_json::from_value(json!({
            "subreddit": "rust"
        }))
        .unwrap();
        assert_eq!(args.subreddit, "rust");
        assert_eq!(args.limit, 10);
    }

    #[test]
    fn test_post_content_args_defaults() {
        let args: PostContentArgs = serde_json::from_value(json!({
            "post_id": "1abc2d"
        }))
        .unwrap();
        assert_eq!(args.post_id, "1abc2d");
        assert_eq!(args.comment_limit, 20);
        assert_eq!(args.comment_depth, 3);
    }

    #[test]
    fn test_missing_required_argument_is_rejected() {
        let result: Result<UserPostsArgs, _> = serde_json::from_value(json!({ "limit": 5 }));
        assert!(result.is_err());
    }
}
