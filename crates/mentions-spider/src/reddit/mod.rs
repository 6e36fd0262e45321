//! Reddit discussions: the [OAuth API](https://www.reddit.com/dev/api/) client and the
//! comment trees it returns.

mod client;
mod listing;

pub use client::{Credentials, RedditClient};

use std::collections::VecDeque;

/// A submission in a subreddit's top listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thread {
    pub id: String,
    pub title: String,
}

/// One node of a thread's comment tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommentNode {
    Comment(Comment),

    /// A "load more comments" placeholder for a truncated branch.
    More,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub body: String,
    /// Seconds since the epoch, UTC.
    pub created_utc: i64,
    pub replies: Vec<CommentNode>,
}

impl Comment {
    pub fn new(body: impl Into<String>, created_utc: i64) -> Self {
        Self {
            body: body.into(),
            created_utc,
            replies: Vec::new(),
        }
    }

    pub fn with_replies(mut self, replies: Vec<CommentNode>) -> Self {
        self.replies = replies;
        self
    }
}

/// Flattens a comment tree breadth-first: top-level comments, then their replies level by
/// level. Placeholders are dropped and the returned comments carry no replies.
pub fn flatten(tree: Vec<CommentNode>) -> Vec<Comment> {
    let mut queue: VecDeque<CommentNode> = tree.into();
    let mut comments = Vec::new();

    while let Some(node) = queue.pop_front() {
        if let CommentNode::Comment(mut comment) = node {
            queue.extend(std::mem::take(&mut comment.replies));
            comments.push(comment);
        }
    }
    comments
}
