use super::{Comment, CommentNode, Thread};
use serde::Deserialize;
use serde_json::Value;

// listings
// ----------------------------------------------------------------
//
//  {
//      "kind": "Listing",
//      "data": {
//          "after": "t3_lmno12",
//          "children": [
//              { "kind": "t3", "data": { "id": "lmno12", "title": "...", ... } },
//              { "kind": "t1", "data": { "body": "...", "created_utc": 1612345678.0,
//                                        "replies": "" | { "kind": "Listing", ... } } },
//              { "kind": "more", "data": { "count": 12, "children": [...] } },
//              ...
//          ]
//      }
//  }
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    after: Option<String>,

    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    kind: String,

    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct Link {
    id: String,

    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    #[serde(default)]
    body: String,

    created_utc: f64,

    // `""` when there are no replies
    #[serde(default)]
    replies: Value,
}

/// `GET /comments/{id}` returns the submission listing followed by the comment listing.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentsResponse(
    #[allow(dead_code)] pub(crate) Listing,
    pub(crate) Listing,
);

impl Listing {
    /// Pagination cursor for the next page.
    pub(crate) fn after(&self) -> Option<&str> {
        self.data.after.as_deref().filter(|after| !after.is_empty())
    }

    /// The submissions of a subreddit listing; any other kind of child is skipped.
    pub(crate) fn into_threads(self) -> Result<Vec<Thread>, serde_json::Error> {
        self.data
            .children
            .into_iter()
            .filter(|thing| thing.kind == "t3")
            .map(|thing| {
                let link: Link = serde_json::from_value(thing.data)?;
                Ok(Thread {
                    id: link.id,
                    title: link.title,
                })
            })
            .collect()
    }

    pub(crate) fn into_comment_tree(self) -> Result<Vec<CommentNode>, serde_json::Error> {
        comment_tree(self.data.children)
    }
}

fn comment_tree(children: Vec<Thing>) -> Result<Vec<CommentNode>, serde_json::Error> {
    children
        .into_iter()
        .filter_map(|thing| match thing.kind.as_str() {
            "t1" => Some(comment(thing.data)),
            "more" => Some(Ok(CommentNode::More)),
            _ => None,
        })
        .collect()
}

fn comment(data: Value) -> Result<CommentNode, serde_json::Error> {
    let raw: RawComment = serde_json::from_value(data)?;
    let replies = match raw.replies {
        replies @ Value::Object(_) => {
            let listing: Listing = serde_json::from_value(replies)?;
            comment_tree(listing.data.children)?
        }
        _ => Vec::new(),
    };

    Ok(CommentNode::Comment(
        Comment::new(raw.body, raw.created_utc as i64).with_replies(replies),
    ))
}
