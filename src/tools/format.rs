//! Text rendering for submissions and comment trees
//!
//! All output is plain fixed-field text, one field per line. Rendering is
//! pure: the same fetched data always produces byte-identical output.

use crate::reddit::{CommentNode, Submission};

const DELETED_AUTHOR: &str = "[deleted]";

/// Render one post for the user-posts listing.
pub fn format_user_post(post: &Submission) -> String {
    let mut block = String::new();
    block.push_str(&format!("Title: {}\n", post.title));
    block.push_str(&format!("Subreddit: r/{}\n", post.subreddit));
    block.push_str(&format!("Score: {}\n", post.score));
    block.push_str(&format!("Comments: {}\n", post.comment_count));
    if let Some(created) = post.created_at {
        block.push_str(&format!(
            "Posted: {}\n",
            created.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    block.push_str(&format!("Type: {}\n", post.content.label()));
    block.push_str(&format!("Content: {}\n", post.content.body()));
    block.push_str(&format!("Link: https://reddit.com{}\n", post.permalink));
    block.push_str(&format!("Post ID: {}\n", post.id36));
    block.push_str("---");
    block
}

/// Render one post for the hot-threads listing. Carries the author instead
/// of the post id and creation time.
pub fn format_hot_thread(post: &Submission) -> String {
    let mut block = String::new();
    block.push_str(&format!("Title: {}\n", post.title));
    block.push_str(&format!("Score: {}\n", post.score));
    block.push_str(&format!("Comments: {}\n", post.comment_count));
    block.push_str(&format!(
        "Author: {}\n",
        post.author.as_deref().unwrap_or(DELETED_AUTHOR)
    ));
    block.push_str(&format!("Type: {}\n", post.content.label()));
    block.push_str(&format!("Content: {}\n", post.content.body()));
    block.push_str(&format!("Link: https://reddit.com{}\n", post.permalink));
    block.push_str("---");
    block
}

/// Render the header block of a single post's detail view.
pub fn format_post_detail(post: &Submission) -> String {
    format!(
        "Title: {}\nScore: {}\nAuthor: {}\nType: {}\nContent: {}\n",
        post.title,
        post.score,
        post.author.as_deref().unwrap_or(DELETED_AUTHOR),
        post.content.label(),
        post.content.body()
    )
}

/// Recursively render a comment tree, depth-first, pre-order.
///
/// A node at depth d gets a line prefix of d repetitions of `-- `; its
/// score and body lines hang two spaces further in. Children are separated
/// from their parent and from each other by a blank line.
pub fn format_comment_tree(node: &CommentNode, depth: usize) -> String {
    let indent = "-- ".repeat(depth);
    let mut content = format!(
        "{}* Author: {}\n{}  Score: {}\n{}  {}\n",
        indent,
        node.author.as_deref().unwrap_or(DELETED_AUTHOR),
        indent,
        node.score,
        indent,
        node.body
    );

    for child in &node.children {
        content.push('\n');
        content.push_str(&format_comment_tree(child, depth + 1));
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reddit::PostContent;
    use chrono::DateTime;

    fn link_post() -> Submission {
        Submission {
            id36: "1abc2d".to_string(),
            title: "Announcing Rust 1.80".to_string(),
            subreddit: "rust".to_string(),
            score: 1543,
            comment_count: 210,
            created_at: DateTime::from_timestamp(1700000000, 0),
            author: Some("steveklabnik1".to_string()),
            permalink: "/r/rust/comments/1abc2d/announcing_rust_180/".to_string(),
            content: PostContent::Link(
                "https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html".to_string(),
            ),
        }
    }

    #[test]
    fn test_format_user_post() {
        let block = format_user_post(&link_post());
        assert_eq!(
            block,
            "Title: Announcing Rust 1.80\n\
             Subreddit: r/rust\n\
             Score: 1543\n\
             Comments: 210\n\
             Posted: 2023-11-14 22:13:20 UTC\n\
             Type: link\n\
             Content: https://blog.rust-lang.org/2024/07/25/Rust-1.80.0.html\n\
             Link: https://reddit.com/r/rust/comments/1abc2d/announcing_rust_180/\n\
             Post ID: 1abc2d\n\
             ---"
        );
    }

    #[test]
    fn test_format_user_post_without_timestamp() {
        let mut post = link_post();
        post.created_at = None;
        let block = format_user_post(&post);
        assert!(!block.contains("Posted:"));
        assert!(block.contains("Comments: 210\nType: link\n"));
    }

    #[test]
    fn test_format_hot_thread_omits_id_and_time() {
        let block = format_hot_thread(&link_post());
        assert!(block.starts_with("Title: Announcing Rust 1.80\n"));
        assert!(block.contains("Author: steveklabnik1\n"));
        assert!(block.ends_with("---"));
        assert!(!block.contains("Post ID:"));
        assert!(!block.contains("Posted:"));
        assert!(!block.contains("Subreddit:"));
    }

    #[test]
    fn test_format_hot_thread_deleted_author() {
        let mut post = link_post();
        post.author = None;
        let block = format_hot_thread(&post);
        assert!(block.contains("Author: [deleted]\n"));
    }

    #[test]
    fn test_format_post_detail() {
        let mut post = link_post();
        post.content = PostContent::Text("Some body text".to_string());
        let block = format_post_detail(&post);
        assert_eq!(
            block,
            "Title: Announcing Rust 1.80\n\
             Score: 1543\n\
             Author: steveklabnik1\n\
             Type: text\n\
             Content: Some body text\n"
        );
    }

    #[test]
    fn test_format_unknown_content_is_empty() {
        let mut post = link_post();
        post.content = PostContent::Unknown;
        let block = format_post_detail(&post);
        assert!(block.contains("Type: unknown\nContent: \n"));
    }

    fn comment_tree() -> CommentNode {
        CommentNode {
            author: Some("alice".to_string()),
            score: 12,
            body: "Top comment".to_string(),
            children: vec![
                CommentNode {
                    author: Some("bob".to_string()),
                    score: 5,
                    body: "First reply".to_string(),
                    children: vec![CommentNode {
                        author: None,
                        score: 2,
                        body: "Nested reply".to_string(),
                        children: vec![],
                    }],
                },
                CommentNode {
                    author: Some("dave".to_string()),
                    score: 1,
                    body: "Second reply".to_string(),
                    children: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_format_comment_tree_nesting() {
        let rendered = format_comment_tree(&comment_tree(), 0);

        assert!(rendered.starts_with("* Author: alice\n  Score: 12\n  Top comment\n"));
        assert!(rendered.contains("\n-- * Author: bob\n--   Score: 5\n--   First reply\n"));
        assert!(rendered
            .contains("\n-- -- * Author: [deleted]\n-- --   Score: 2\n-- --   Nested reply\n"));
        assert!(rendered.contains("\n-- * Author: dave\n"));
    }

    #[test]
    fn test_format_comment_tree_leaf() {
        let leaf = CommentNode {
            author: Some("alice".to_string()),
            score: 3,
            body: "Just this".to_string(),
            children: vec![],
        };
        assert_eq!(
            format_comment_tree(&leaf, 0),
            "* Author: alice\n  Score: 3\n  Just this\n"
        );
    }

    #[test]
    fn test_format_comment_tree_is_idempotent() {
        let tree = comment_tree();
        assert_eq!(format_comment_tree(&tree, 0), format_comment_tree(&tree, 0));
    }
}
