mod common;

use common::StubServer;
use mentions_spider::reddit::{CommentNode, Credentials, RedditClient, Thread};
use mentions_spider::{
    ContentSource, Error, HttpConfig, Provider, ProviderFailure, Result, TimeWindow,
};
use serde_json::json;

const TOKEN: &str = r#"{"access_token":"tok123","token_type":"bearer","expires_in":86400}"#;

fn script_user() -> Credentials {
    Credentials {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        username: Some("spider".to_string()),
        password: Some("hunter2".to_string()),
    }
}

fn app_only() -> Credentials {
    Credentials {
        username: None,
        password: None,
        ..script_user()
    }
}

fn ok(body: impl ToString) -> (u16, String) {
    (200, body.to_string())
}

// a page of `count` submissions named `{prefix}{n}`
fn page(prefix: &str, count: usize, after: Option<&str>) -> String {
    let children: Vec<_> = (0..count)
        .map(|n| json!({"kind": "t3", "data": {"id": format!("{prefix}{n}"), "title": "t"}}))
        .collect();
    json!({"kind": "Listing", "data": {"after": after, "children": children}}).to_string()
}

async fn connect(server: &StubServer, credentials: &Credentials) -> Result<RedditClient> {
    RedditClient::with_urls(
        credentials,
        &HttpConfig::default(),
        format!("{}/api/v1/access_token", server.url),
        server.url.clone(),
    )
    .await
}

fn thread(id: &str) -> Thread {
    Thread {
        id: id.to_string(),
        title: String::new(),
    }
}

// authentication
// ----------------------------------------------------------------------------

#[tokio::test]
async fn refused_credentials_are_unauthorized() {
    let server = StubServer::start(vec![ok(r#"{"error":"invalid_grant"}"#)]).await;

    let err = connect(&server, &script_user()).await.err().unwrap();

    match err {
        Error::ProviderRequestFailed {
            provider,
            target,
            failure: ProviderFailure::Unauthorized(reason),
        } => {
            assert_eq!(provider, Provider::Content);
            assert_eq!(target, "authentication");
            assert_eq!(reason, "invalid_grant");
        }
        other => panic!("unexpected error: {other}"),
    }

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].line, "POST /api/v1/access_token");
    assert!(requests[0].body.contains("grant_type=password"));
    assert!(requests[0].body.contains("username=spider"));
    assert!(requests[0].head.contains("authorization: basic"));
}

#[tokio::test]
async fn without_user_credentials_authenticates_app_only() {
    let server = StubServer::start(vec![ok(TOKEN), ok(page("a", 0, None))]).await;

    let reddit = connect(&server, &app_only()).await.unwrap();
    let threads = reddit
        .top_threads("stocks", TimeWindow::Day, 5)
        .await
        .unwrap();

    assert!(threads.is_empty());
    let requests = server.requests();
    assert_eq!(requests[0].body, "grant_type=client_credentials");
    assert!(requests[1].head.contains("authorization: bearer tok123"));
}

// top listing
// ----------------------------------------------------------------------------

#[tokio::test]
async fn top_listing_pages_until_limit() {
    let server = StubServer::start(vec![
        ok(TOKEN),
        ok(page("a", 100, Some("t3_p1"))),
        ok(page("b", 60, Some("t3_p2"))),
    ])
    .await;

    let reddit = connect(&server, &script_user()).await.unwrap();
    let threads = reddit
        .top_threads("stocks", TimeWindow::Week, 150)
        .await
        .unwrap();

    assert_eq!(threads.len(), 150);
    assert_eq!(threads[0].id, "a0");
    assert_eq!(threads[99].id, "a99");
    assert_eq!(threads[149].id, "b49");
    assert_eq!(
        server.lines()[1..],
        [
            "GET /r/stocks/top?t=week&limit=100&raw_json=1",
            "GET /r/stocks/top?t=week&limit=50&after=t3_p1&raw_json=1",
        ]
    );
}

#[tokio::test]
async fn top_listing_stops_when_reddit_runs_out() {
    let server = StubServer::start(vec![ok(TOKEN), ok(page("a", 30, None))]).await;

    let reddit = connect(&server, &script_user()).await.unwrap();
    let threads = reddit
        .top_threads("investing", TimeWindow::All, 250)
        .await
        .unwrap();

    assert_eq!(threads.len(), 30);
    assert_eq!(server.lines().len(), 2);
}

#[tokio::test]
async fn rate_limited_listing_is_retried() {
    let server = StubServer::start(vec![
        ok(TOKEN),
        (429, "{}".to_string()),
        ok(page("a", 2, None)),
    ])
    .await;

    let reddit = connect(&server, &script_user()).await.unwrap();
    let threads = reddit
        .top_threads("stocks", TimeWindow::Week, 10)
        .await
        .unwrap();

    assert_eq!(threads.len(), 2);
    let lines = server.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], lines[2]);
}

// comments
// ----------------------------------------------------------------------------

#[tokio::test]
async fn comment_tree_is_decoded() {
    let comments = json!([
        {"kind": "Listing", "data": {"children": [{"kind": "t3", "data": {"id": "abc"}}]}},
        {"kind": "Listing", "data": {"children": [
            {"kind": "t1", "data": {"body": "GME", "created_utc": 1000.0, "replies": ""}},
            {"kind": "more", "data": {"count": 3, "children": ["x"]}}
        ]}}
    ]);
    let server = StubServer::start(vec![ok(TOKEN), ok(comments)]).await;

    let reddit = connect(&server, &script_user()).await.unwrap();
    let tree = reddit.comment_tree("stocks", &thread("abc")).await.unwrap();

    assert_eq!(tree.len(), 2);
    match &tree[0] {
        CommentNode::Comment(comment) => {
            assert_eq!(comment.body, "GME");
            assert_eq!(comment.created_utc, 1000);
            assert!(comment.replies.is_empty());
        }
        other => panic!("unexpected node: {other:?}"),
    }
    assert!(matches!(tree[1], CommentNode::More));
    assert_eq!(server.lines()[1], "GET /comments/abc?raw_json=1");
}

#[tokio::test]
async fn unauthorized_comments_are_not_retried() {
    let server = StubServer::start(vec![ok(TOKEN), (401, "{}".to_string())]).await;

    let reddit = connect(&server, &script_user()).await.unwrap();
    let err = reddit
        .comment_tree("stocks", &thread("abc"))
        .await
        .unwrap_err();

    match err {
        Error::ProviderRequestFailed {
            provider,
            target,
            failure,
        } => {
            assert_eq!(provider, Provider::Content);
            assert_eq!(target, "r/stocks");
            assert!(matches!(failure, ProviderFailure::Unauthorized(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.lines().len(), 2);
}
