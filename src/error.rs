//! Error types and handling for the Reddit MCP server

use thiserror::Error;

/// Application error types
///
/// `Unavailable` is special: it marks an API access path that does not exist
/// on the deployment we are talking to. The user-posts fallback chain catches
/// it internally; everywhere else it surfaces like any other error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Endpoint unavailable: {0}")]
    Unavailable(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert reqwest::Error to AppError
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            AppError::NetworkError(err.to_string())
        } else if err.is_decode() {
            AppError::ParseError(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

/// Validation functions
pub fn validate_username(username: &str) -> Result<(), AppError> {
    if username.is_empty() {
        return Err(AppError::InvalidInput("Username cannot be empty".to_string()));
    }

    if username.starts_with("u/") || username.starts_with("/u/") {
        return Err(AppError::InvalidInput(
            "Username must not include the u/ prefix".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_subreddit(subreddit: &str) -> Result<(), AppError> {
    if subreddit.is_empty() {
        return Err(AppError::InvalidInput("Subreddit cannot be empty".to_string()));
    }

    if subreddit.starts_with("r/") || subreddit.starts_with("/r/") {
        return Err(AppError::InvalidInput(
            "Subreddit must not include the r/ prefix".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_post_id(post_id: &str) -> Result<(), AppError> {
    if post_id.is_empty() {
        return Err(AppError::InvalidInput("Post ID cannot be empty".to_string()));
    }

    // Base-36 identifier, without the t3_ fullname prefix
    if !post_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid post ID format: {}",
            post_id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("spez").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("u/spez").is_err());
        assert!(validate_username("/u/spez").is_err());
    }

    #[test]
    fn test_validate_subreddit() {
        assert!(validate_subreddit("rust").is_ok());
        assert!(validate_subreddit("").is_err());
        assert!(validate_subreddit("r/rust").is_err());
    }

    #[test]
    fn test_validate_post_id() {
        assert!(validate_post_id("1abc2d").is_ok());
        assert!(validate_post_id("").is_err());
        assert!(validate_post_id("t3_1abc2d").is_err());
        assert!(validate_post_id("abc/def").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = AppError::NotFound("no submission with id abc123".to_string());
        assert_eq!(err.to_string(), "Not found: no submission with id abc123");
    }
}
