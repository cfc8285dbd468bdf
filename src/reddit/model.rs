//! Data model for the Reddit JSON API
//!
//! Raw serde models mirror the wire shapes (Reddit wraps every collection in
//! a listing envelope), and the domain types `Submission` / `CommentNode`
//! are what the tools actually format. Conversion happens once per fetch;
//! nothing here is cached or mutated afterwards.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Reddit's listing envelope: `{"kind": "Listing", "data": {"children": [...]}}`
#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub kind: String,
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListingData<T> {
    #[serde(default)]
    pub children: Vec<Thing<T>>,
    #[serde(default)]
    pub after: Option<String>,
}

/// A kinded wrapper around every item in a listing (t1 = comment, t3 = post)
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

pub const KIND_COMMENT: &str = "t1";

/// Raw submission payload as served by the API
#[derive(Debug, Deserialize)]
pub struct RawSubmission {
    pub id: String,
    pub title: String,
    pub subreddit: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub author: Option<String>,
    pub permalink: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub is_gallery: bool,
}

/// Raw comment payload
///
/// The defaults also absorb `more` children, whose payload carries none of
/// these fields; callers filter those out by kind before conversion.
#[derive(Debug, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub replies: Replies,
}

/// Reddit sends `"replies": ""` for a comment with no replies, and a nested
/// listing otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Replies {
    Listing(Box<Listing<RawComment>>),
    Absent(String),
}

impl Default for Replies {
    fn default() -> Self {
        Replies::Absent(String::new())
    }
}

/// Sort modes accepted by the user-posts tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    New,
    Hot,
    Top,
}

impl SortMode {
    /// Parse a user-supplied sort name. Anything but the three exact
    /// lowercase names is rejected.
    pub fn parse(s: &str) -> Option<SortMode> {
        match s {
            "new" => Some(SortMode::New),
            "hot" => Some(SortMode::Hot),
            "top" => Some(SortMode::Top),
            _ => None,
        }
    }

    /// The value Reddit expects in the `sort` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            SortMode::New => "new",
            SortMode::Hot => "hot",
            SortMode::Top => "top",
        }
    }
}

/// Content variant of a submission
///
/// Closed set: every submission maps to exactly one variant, and `Unknown`
/// renders as empty rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContent {
    Link(String),
    Text(String),
    Gallery(String),
    Unknown,
}

impl PostContent {
    pub fn label(&self) -> &'static str {
        match self {
            PostContent::Link(_) => "link",
            PostContent::Text(_) => "text",
            PostContent::Gallery(_) => "gallery",
            PostContent::Unknown => "unknown",
        }
    }

    pub fn body(&self) -> &str {
        match self {
            PostContent::Link(url) => url,
            PostContent::Text(text) => text,
            PostContent::Gallery(url) => url,
            PostContent::Unknown => "",
        }
    }
}

/// A fetched post, request-scoped
#[derive(Debug, Clone)]
pub struct Submission {
    pub id36: String,
    pub title: String,
    pub subreddit: String,
    pub score: i64,
    pub comment_count: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub permalink: String,
    pub content: PostContent,
}

impl From<RawSubmission> for Submission {
    fn from(raw: RawSubmission) -> Self {
        let content = if raw.is_gallery {
            PostContent::Gallery(raw.url)
        } else if raw.is_self {
            PostContent::Text(raw.selftext)
        } else if !raw.url.is_empty() {
            PostContent::Link(raw.url)
        } else {
            PostContent::Unknown
        };

        Submission {
            id36: raw.id,
            title: raw.title,
            subreddit: raw.subreddit,
            score: raw.score,
            comment_count: raw.num_comments,
            created_at: raw
                .created_utc
                .and_then(|ts| DateTime::from_timestamp(ts as i64, 0)),
            author: raw.author.filter(|a| !a.is_empty()),
            permalink: raw.permalink,
            content,
        }
    }
}

/// One node of a comment tree
#[derive(Debug, Clone)]
pub struct CommentNode {
    pub author: Option<String>,
    pub score: i64,
    pub body: String,
    pub children: Vec<CommentNode>,
}

/// Convert a raw comment listing into a bounded forest.
///
/// Top-level breadth is clamped to `limit` and nesting to `max_depth`
/// regardless of what the remote returned: depth 0 keeps top-level comments
/// only, depth 1 additionally keeps their direct replies, and so on.
pub fn comment_forest(listing: Listing<RawComment>, limit: usize, max_depth: usize) -> Vec<CommentNode> {
    listing
        .data
        .children
        .into_iter()
        .filter(|child| child.kind == KIND_COMMENT)
        .take(limit)
        .map(|child| build_node(child.data, 0, max_depth))
        .collect()
}

fn build_node(raw: RawComment, depth: usize, max_depth: usize) -> CommentNode {
    let children = if depth < max_depth {
        match raw.replies {
            Replies::Listing(replies) => replies
                .data
                .children
                .into_iter()
                .filter(|child| child.kind == KIND_COMMENT)
                .map(|child| build_node(child.data, depth + 1, max_depth))
                .collect(),
            Replies::Absent(_) => Vec::new(),
        }
    } else {
        Vec::new()
    };

    CommentNode {
        author: raw.author.filter(|a| !a.is_empty()),
        score: raw.score,
        body: raw.body,
        children,
    }
}
