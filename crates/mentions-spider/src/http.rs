use crate::config::HttpConfig;
use crate::error::ProviderFailure;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{trace, warn};

pub(crate) use reqwest::Client as HttpClient;

const BACKOFF_BASE: Duration = Duration::from_millis(500);

pub(crate) fn build_client(config: &HttpConfig) -> Result<HttpClient, ProviderFailure> {
    reqwest::ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .map_err(ProviderFailure::Network)
}

/// Sends the request produced by `build`, retrying network errors, 429 and 5xx up to
/// `retries` times, and decodes the JSON body.
///
/// `build` is called once per attempt, since a sent [`RequestBuilder`] is consumed.
pub(crate) async fn send_json<T, F>(retries: u32, build: F) -> Result<T, ProviderFailure>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;
    loop {
        let (failure, retryable) = match build().send().await {
            Ok(response) => match classify(response.status()) {
                None => {
                    trace!("response received from {}", response.url());
                    let body = response.text().await?;
                    return serde_json::from_str(&body)
                        .map_err(|err| ProviderFailure::Malformed(err.to_string()));
                }
                Some(classified) => classified,
            },
            Err(err) => (ProviderFailure::Network(err), true),
        };

        if !retryable || attempt >= retries {
            return Err(failure);
        }

        let delay = backoff(attempt);
        warn!("request failed, retrying in {delay:?}, error({failure})");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Maps a non-success status to its failure and whether it is worth retrying.
fn classify(status: StatusCode) -> Option<(ProviderFailure, bool)> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            (ProviderFailure::Unauthorized(status.to_string()), false)
        }
        StatusCode::TOO_MANY_REQUESTS => (ProviderFailure::RateLimited, true),
        status if status.is_server_error() => (ProviderFailure::Status(status), true),
        status => (ProviderFailure::Status(status), false),
    })
}

fn backoff(attempt: u32) -> Duration {
    BACKOFF_BASE * 2u32.saturating_pow(attempt)
}
