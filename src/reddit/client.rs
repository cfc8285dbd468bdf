//! Typed facade over the Reddit JSON API
//!
//! One client handle is constructed at startup and shared by every tool
//! invocation. It is read-only after construction apart from the bearer
//! token, which is exchanged lazily on the first authenticated request and
//! then held for the process lifetime.

use crate::error::AppError;
use crate::http::client_with_timeout;
use crate::reddit::auth::{exchange_token, Auth};
use crate::reddit::model::{
    comment_forest, CommentNode, Listing, RawComment, RawSubmission, SortMode, Submission,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use urlencoding::encode;

const OAUTH_BASE: &str = "https://oauth.reddit.com";
const PUBLIC_BASE: &str = "https://www.reddit.com";

/// One access strategy for listing a user's submissions.
///
/// The API surface for user listings has moved between deployments, so the
/// user-posts tool walks `CHAIN` in order and falls through on
/// capability-not-found. `Search` is the last resort: a global search scoped
/// to `author:<username>` across all communities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingRoute {
    User,
    Account,
    Search,
}

impl ListingRoute {
    pub const CHAIN: [ListingRoute; 3] =
        [ListingRoute::User, ListingRoute::Account, ListingRoute::Search];

    fn path(&self, username: &str) -> String {
        match self {
            ListingRoute::User => format!("/user/{}/submitted.json", encode(username)),
            ListingRoute::Account => format!("/api/v1/user/{}/submitted.json", encode(username)),
            ListingRoute::Search => "/search.json".to_string(),
        }
    }

    fn query(&self, username: &str, sort: SortMode, limit: u32) -> Vec<(&'static str, String)> {
        match self {
            ListingRoute::Search => vec![
                ("q", format!("author:{}", username)),
                ("type", "link".to_string()),
                ("sort", sort.as_query().to_string()),
                ("limit", limit.to_string()),
            ],
            _ => vec![
                ("sort", sort.as_query().to_string()),
                ("limit", limit.to_string()),
            ],
        }
    }
}

/// Statuses that mean the endpoint itself is absent on this deployment,
/// as opposed to a transient or remote fault.
fn is_unavailable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 404 | 405 | 410 | 501)
}

pub struct RedditClient {
    http: reqwest::Client,
    auth: Auth,
    token: OnceCell<String>,
}

impl RedditClient {
    /// Construct the shared handle from environment credentials.
    pub fn from_env() -> Self {
        Self::new(Auth::from_env())
    }

    pub fn new(auth: Auth) -> Self {
        if auth.is_anonymous() {
            info!("No Reddit credentials found, using anonymous access");
        } else {
            info!("Reddit credentials loaded from environment");
        }

        Self {
            http: client_with_timeout(Duration::from_secs(30)),
            auth,
            token: OnceCell::new(),
        }
    }

    pub(crate) fn base(&self) -> &'static str {
        if self.auth.is_anonymous() {
            PUBLIC_BASE
        } else {
            OAUTH_BASE
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.base(), path);
        let mut request = self
            .http
            .get(&url)
            .query(&[("raw_json", "1")])
            .query(query);

        if !self.auth.is_anonymous() {
            let token = self
                .token
                .get_or_try_init(|| exchange_token(&self.http, &self.auth))
                .await?;
            request = request.bearer_auth(token);
        }

        debug!("GET {}", url);

        let response = request
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("request to {} failed: {}", path, e)))?;

        let status = response.status();
        if is_unavailable_status(status) {
            return Err(AppError::Unavailable(format!("{} answered {}", path, status)));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::AuthFailed(format!(
                "Reddit API returned {} for {}",
                status, path
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::NetworkError(format!(
                "Reddit API returned {}: {}",
                status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ParseError(format!("failed to decode {}: {}", path, e)))
    }

    /// Fetch a user's submissions through one access route.
    ///
    /// A decode mismatch counts as the route being unavailable, the same as
    /// a missing endpoint: both mean this API shape is not the one we
    /// guessed.
    pub async fn user_submissions(
        &self,
        route: ListingRoute,
        username: &str,
        sort: SortMode,
        limit: u32,
    ) -> Result<Vec<Submission>, AppError> {
        let listing: Listing<RawSubmission> = match self
            .get_json(&route.path(username), &route.query(username, sort, limit))
            .await
        {
            Ok(listing) => listing,
            Err(AppError::ParseError(e)) => return Err(AppError::Unavailable(e)),
            Err(e) => return Err(e),
        };

        if listing.kind != "Listing" {
            return Err(AppError::Unavailable(format!(
                "expected a listing envelope, got kind {:?}",
                listing.kind
            )));
        }

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| Submission::from(child.data))
            .collect())
    }

    /// Fetch a subreddit's hot submissions, up to `limit`.
    pub async fn hot_submissions(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, AppError> {
        let listing: Listing<RawSubmission> = self
            .get_json(
                &format!("/r/{}/hot.json", encode(subreddit)),
                &[("limit", limit.to_string())],
            )
            .await?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| Submission::from(child.data))
            .collect())
    }

    /// Fetch exactly one submission by its base-36 id.
    pub async fn submission(&self, post_id: &str) -> Result<Submission, AppError> {
        let listing: Listing<RawSubmission> = self
            .get_json(&format!("/by_id/t3_{}.json", encode(post_id)), &[])
            .await?;

        listing
            .data
            .children
            .into_iter()
            .next()
            .map(|child| Submission::from(child.data))
            .ok_or_else(|| AppError::NotFound(format!("no submission with id {}", post_id)))
    }

    /// Fetch a submission's comment tree, sorted by top, bounded to `limit`
    /// top-level comments and `depth` nesting levels.
    pub async fn comment_tree(
        &self,
        post_id: &str,
        limit: u32,
        depth: u32,
    ) -> Result<Vec<CommentNode>, AppError> {
        // The comments endpoint answers a two-element array: the submission
        // listing, then the comment listing.
        let pages: Vec<serde_json::Value> = self
            .get_json(
                &format!("/comments/{}.json", encode(post_id)),
                &[
                    ("sort", "top".to_string()),
                    ("limit", limit.to_string()),
                    ("depth", depth.to_string()),
                ],
            )
            .await?;

        let comments = pages.into_iter().nth(1).ok_or_else(|| {
            AppError::ParseError("comments response missing the comment listing".to_string())
        })?;
        let listing: Listing<RawComment> = serde_json::from_value(comments)?;

        Ok(comment_forest(listing, limit as usize, depth as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_order() {
        assert_eq!(
            ListingRoute::CHAIN,
            [ListingRoute::User, ListingRoute::Account, ListingRoute::Search]
        );
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(
            ListingRoute::User.path("spez"),
            "/user/spez/submitted.json"
        );
        assert_eq!(
            ListingRoute::Account.path("spez"),
            "/api/v1/user/spez/submitted.json"
        );
        assert_eq!(ListingRoute::Search.path("spez"), "/search.json");
    }

    #[test]
    fn test_search_route_scopes_to_author() {
        let query = ListingRoute::Search.query("spez", SortMode::Top, 10);
        assert!(query.contains(&("q", "author:spez".to_string())));
        assert!(query.contains(&("sort", "top".to_string())));
        assert!(query.contains(&("limit", "10".to_string())));
    }

    #[test]
    fn test_listing_routes_carry_sort_and_limit() {
        let query = ListingRoute::User.query("spez", SortMode::New, 25);
        assert_eq!(
            query,
            vec![("sort", "new".to_string()), ("limit", "25".to_string())]
        );
    }

    #[test]
    fn test_unavailable_statuses() {
        assert!(is_unavailable_status(StatusCode::NOT_FOUND));
        assert!(is_unavailable_status(StatusCode::METHOD_NOT_ALLOWED));
        assert!(is_unavailable_status(StatusCode::GONE));
        assert!(is_unavailable_status(StatusCode::NOT_IMPLEMENTED));
        assert!(!is_unavailable_status(StatusCode::OK));
        assert!(!is_unavailable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_unavailable_status(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_anonymous_client_uses_public_base() {
        let client = RedditClient::new(Auth::Anonymous);
        assert_eq!(client.base(), PUBLIC_BASE);
    }

    #[test]
    fn test_authenticated_client_uses_oauth_base() {
        let client = RedditClient::new(Auth::AppOnly {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        });
        assert_eq!(client.base(), OAUTH_BASE);
    }
}
