//! MCP (Model Context Protocol) handling module
//!
//! Implements the JSON-RPC 2.0 protocol for MCP communication over stdio.
//! Requests are handled one line at a time; the shared Reddit client handle
//! is passed into every tool dispatch.

use crate::reddit::RedditClient;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info};

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field - required by spec but not accessed in code
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: String,
    pub message: String,
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: &str, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem {
                r#type: "text".to_string(),
                text: content.into(),
            }],
        }
    }
}

/// Parse MCP request from JSON string
pub fn parse_request(json: &str) -> Result<McpRequest> {
    let request: McpRequest = serde_json::from_str(json)?;
    Ok(request)
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication
pub async fn handle_stdio(client: &RedditClient) -> Result<()> {
    info!("Starting reddit-mcp server on stdio");

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = reader.next_line().await? {
        debug!("Received request: {}", line);

        let response = match parse_request(&line) {
            Ok(request) => handle_request(request, client).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                McpResponse::error(None, "parse_error", &format!("Invalid JSON: {}", e))
            }
        };

        let response_json = serialize_response(&response)?;
        debug!("Sending response: {}", response_json);

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Handle a single MCP request
async fn handle_request(request: McpRequest, client: &RedditClient) -> McpResponse {
    match request.method.as_str() {
        "initialize" => handle_initialize(request).await,
        "tools/call" => handle_tool_call(request, client).await,
        "tools/list" => handle_tools_list(request).await,
        _ => McpResponse::error(
            request.id,
            "method_not_found",
            &format!("Method '{}' not found", request.method),
        ),
    }
}

/// Handle tools/call method
async fn handle_tool_call(request: McpRequest, client: &RedditClient) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id.clone(),
                "invalid_params",
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    match args.name.as_str() {
        "fetch_user_latest_posts" => {
            crate::tools::user_posts::handle_user_posts(request.id, args.arguments, client).await
        }
        "fetch_reddit_hot_threads" => {
            crate::tools::hot_threads::handle_hot_threads(request.id, args.arguments, client).await
        }
        "fetch_reddit_post_content" => {
            crate::tools::post_content::handle_post_content(request.id, args.arguments, client)
                .await
        }
        _ => McpResponse::error(
            request.id,
            "tool_not_found",
            &format!("Tool '{}' not found", args.name),
        ),
    }
}

/// Handle tools/list method
async fn handle_tools_list(request: McpRequest) -> McpResponse {
    let tools = build_tools_array();

    McpResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle initialize method
async fn handle_initialize(request: McpRequest) -> McpResponse {
    let tools = build_tools_array();
    let result = serde_json::json!({
        "serverInfo": {
            "name": "reddit-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "list": true, "call": true }
        },
        "tools": tools
    });
    McpResponse::success(request.id, result)
}

/// Build the tools array returned from tools/list and initialize
fn build_tools_array() -> serde_json::Value {
    use crate::cli::{HotThreadsArgs, PostContentArgs, UserPostsArgs};
    use schemars::schema_for;

    // Generate JSON schemas from the CLI argument structs
    let user_posts_schema = schema_for!(UserPostsArgs);
    let hot_threads_schema = schema_for!(HotThreadsArgs);
    let post_content_schema = schema_for!(PostContentArgs);

    serde_json::json!([
        {
            "name": "fetch_user_latest_posts",
            "description": "Fetch latest posts from a specific Reddit user",
            "inputSchema": user_posts_schema
        },
        {
            "name": "fetch_reddit_hot_threads",
            "description": "Fetch hot threads from a subreddit",
            "inputSchema": hot_threads_schema
        },
        {
            "name": "fetch_reddit_post_content",
            "description": "Fetch detailed content of a specific post and its comments",
            "inputSchema": post_content_schema
        }
    ])
}
