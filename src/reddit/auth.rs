//! Credential loading and the Reddit token exchange
//!
//! Credentials come from three optional environment variables, read once at
//! startup. What was provided decides the grant: all three values select the
//! refresh-token grant, id + secret alone select the application-only
//! (client credentials) grant, and anything less degrades to anonymous
//! access against the public JSON endpoints.

use crate::error::AppError;
use serde::Deserialize;
use tracing::warn;

pub const ENV_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
pub const ENV_REFRESH_TOKEN: &str = "REDDIT_REFRESH_TOKEN";

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Anonymous,
    AppOnly {
        client_id: String,
        client_secret: String,
    },
    RefreshToken {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
}

impl Auth {
    /// Read credentials from the environment, keeping only set, non-empty
    /// values in the fixed order (id, secret, refresh token).
    pub fn from_env() -> Self {
        Self::resolve(
            getenv(ENV_CLIENT_ID),
            getenv(ENV_CLIENT_SECRET),
            getenv(ENV_REFRESH_TOKEN),
        )
    }

    pub(crate) fn resolve(
        client_id: Option<String>,
        client_secret: Option<String>,
        refresh_token: Option<String>,
    ) -> Self {
        match (client_id, client_secret, refresh_token) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Auth::RefreshToken {
                client_id,
                client_secret,
                refresh_token,
            },
            (Some(client_id), Some(client_secret), None) => Auth::AppOnly {
                client_id,
                client_secret,
            },
            (None, None, None) => Auth::Anonymous,
            _ => {
                warn!(
                    "Incomplete Reddit credentials in environment, falling back to anonymous access"
                );
                Auth::Anonymous
            }
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Auth::Anonymous)
    }
}

fn getenv(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange the loaded credentials for a bearer token.
///
/// Called lazily on the first authenticated request; the token is then held
/// for the process lifetime.
pub async fn exchange_token(http: &reqwest::Client, auth: &Auth) -> Result<String, AppError> {
    let (client_id, client_secret, params) = match auth {
        Auth::RefreshToken {
            client_id,
            client_secret,
            refresh_token,
        } => (
            client_id,
            client_secret,
            vec![
                ("grant_type", "refresh_token".to_string()),
                ("refresh_token", refresh_token.clone()),
            ],
        ),
        Auth::AppOnly {
            client_id,
            client_secret,
        } => (
            client_id,
            client_secret,
            vec![("grant_type", "client_credentials".to_string())],
        ),
        Auth::Anonymous => {
            return Err(AppError::AuthFailed(
                "no credentials loaded from environment".to_string(),
            ))
        }
    };

    let response = http
        .post(TOKEN_URL)
        .basic_auth(client_id, Some(client_secret))
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::NetworkError(format!("token request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::AuthFailed(format!(
            "token endpoint returned {}",
            response.status()
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AppError::ParseError(format!("failed to parse token response: {}", e)))?;

    Ok(token.access_token)
}
