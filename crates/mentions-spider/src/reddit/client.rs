use super::listing::{CommentsResponse, Listing};
use super::{CommentNode, Thread};
use crate::api::ContentSource;
use crate::config::{HttpConfig, TimeWindow};
use crate::error::{Error, Provider, ProviderFailure};
use crate::http::{self, HttpClient};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, trace};

const AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_URL: &str = "https://oauth.reddit.com";

// reddit caps listings at 100 children per request
const PAGE_SIZE: usize = 100;

/// Script-app credentials. Without a username and password the client authenticates
/// application-only.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// An authenticated reddit session.
pub struct RedditClient {
    client: HttpClient,
    token: String,
    api_url: String,
    retries: u32,
}

impl RedditClient {
    /// Exchanges `credentials` for a bearer token.
    pub async fn connect(credentials: &Credentials, config: &HttpConfig) -> Result<Self> {
        Self::with_urls(credentials, config, AUTH_URL, API_URL).await
    }

    /// Same as [`RedditClient::connect`], but authenticates at `auth_url` and sends API
    /// requests to `api_url`.
    pub async fn with_urls(
        credentials: &Credentials,
        config: &HttpConfig,
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self> {
        let auth_url = auth_url.into();
        let client = http::build_client(config).map_err(auth_error)?;

        let mut form = vec![("grant_type", "client_credentials")];
        if let (Some(username), Some(password)) = (&credentials.username, &credentials.password)
        {
            form = vec![
                ("grant_type", "password"),
                ("username", username.as_str()),
                ("password", password.as_str()),
            ];
        }

        trace!("requesting reddit access token ({})", form[0].1);
        let response: TokenResponse = http::send_json(config.retries, || {
            client
                .post(&auth_url)
                .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
                .form(&form)
        })
        .await
        .map_err(|err| {
            error!("failed to authenticate with reddit, error({err})");
            auth_error(err)
        })?;

        let token = match response {
            TokenResponse {
                access_token: Some(token),
                ..
            } => token,
            TokenResponse { error, .. } => {
                let reason = error.unwrap_or_else(|| "no access token returned".to_string());
                error!("reddit refused the credentials, error({reason})");
                return Err(auth_error(ProviderFailure::Unauthorized(reason)));
            }
        };
        debug!("reddit session established");

        Ok(Self {
            client,
            token,
            api_url: api_url.into(),
            retries: config.retries,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, ProviderFailure> {
        trace!("fetching {url}");
        http::send_json(self.retries, || {
            self.client
                .get(url)
                .bearer_auth(&self.token)
                .query(query)
                .query(&[("raw_json", "1")])
        })
        .await
    }
}

impl ContentSource for RedditClient {
    async fn top_threads(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Thread>> {
        let url = format!("{}/r/{subreddit}/top", self.api_url);
        let mut threads = Vec::new();
        let mut after: Option<String> = None;

        while threads.len() < limit {
            let mut query = vec![
                ("t", window.to_string()),
                ("limit", (limit - threads.len()).min(PAGE_SIZE).to_string()),
            ];
            if let Some(after) = &after {
                query.push(("after", after.clone()));
            }

            let listing: Listing = self.get(&url, &query).await.map_err(|err| {
                error!("failed to fetch top threads of r/{subreddit}, error({err})");
                content_error(subreddit, err)
            })?;

            let next = listing.after().map(str::to_string);
            let page = listing
                .into_threads()
                .map_err(|err| content_error(subreddit, malformed(err)))?;
            if page.is_empty() {
                break;
            }
            threads.extend(page);

            match next {
                Some(next) => after = Some(next),
                None => break,
            }
        }

        threads.truncate(limit);
        debug!("{} top threads listed for r/{subreddit}", threads.len());
        Ok(threads)
    }

    async fn comment_tree(&self, subreddit: &str, thread: &Thread) -> Result<Vec<CommentNode>> {
        let url = format!("{}/comments/{}", self.api_url, thread.id);

        let CommentsResponse(_, comments) = self.get(&url, &[]).await.map_err(|err| {
            error!(
                "failed to fetch comments of thread {} in r/{subreddit}, error({err})",
                thread.id
            );
            content_error(subreddit, err)
        })?;

        comments
            .into_comment_tree()
            .map_err(|err| content_error(subreddit, malformed(err)))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

fn auth_error(failure: ProviderFailure) -> Error {
    Error::provider(Provider::Content, "authentication", failure)
}

fn content_error(subreddit: &str, failure: ProviderFailure) -> Error {
    Error::provider(Provider::Content, format!("r/{subreddit}"), failure)
}

fn malformed(err: serde_json::Error) -> ProviderFailure {
    ProviderFailure::Malformed(err.to_string())
}
