//! Reqwest-backed placeholder source adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain entities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::domain::ports::{PlaceholderSource, PlaceholderSourceError};
use crate::domain::{Comment, Post, PostId, User};

const USER_AGENT: &str = "social-feed-client/0.1";

/// Placeholder source adapter issuing GET requests below one base URL.
#[derive(Debug, Clone)]
pub struct PlaceholderHttpSource {
    client: Client,
    base_url: Url,
}

impl PlaceholderHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `base_url` must end with a slash so resource names join below it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn resource_url(&self, resource: &str) -> Result<Url, PlaceholderSourceError> {
        self.base_url.join(resource).map_err(|error| {
            PlaceholderSourceError::transport(format!("invalid resource URL {resource:?}: {error}"))
        })
    }

    #[instrument(level = "debug", skip_all, fields(url = %url))]
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, PlaceholderSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(bytes = body.len(), "placeholder response received");
        decode(body.as_ref())
    }
}

#[async_trait]
impl PlaceholderSource for PlaceholderHttpSource {
    async fn users(&self) -> Result<Vec<User>, PlaceholderSourceError> {
        self.fetch(self.resource_url("users")?).await
    }

    async fn posts(&self) -> Result<Vec<Post>, PlaceholderSourceError> {
        self.fetch(self.resource_url("posts")?).await
    }

    async fn comments(&self, post: Option<PostId>) -> Result<Vec<Comment>, PlaceholderSourceError> {
        let mut url = self.resource_url("comments")?;
        if let Some(post) = post {
            url.query_pairs_mut()
                .append_pair("postId", &post.to_string());
        }
        self.fetch(url).await
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, PlaceholderSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        PlaceholderSourceError::decode(format!("invalid placeholder JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> PlaceholderSourceError {
    if error.is_timeout() {
        PlaceholderSourceError::timeout(error.to_string())
    } else if error.is_decode() {
        PlaceholderSourceError::decode(error.to_string())
    } else {
        PlaceholderSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PlaceholderSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_owned()
    } else {
        preview
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PlaceholderSourceError::timeout(format!("status {}: {message}", status.as_u16()))
        }
        _ => PlaceholderSourceError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn source() -> PlaceholderHttpSource {
        let base = Url::parse("https://jsonplaceholder.typicode.com/").expect("base url");
        PlaceholderHttpSource::new(base, Duration::from_secs(1)).expect("client")
    }

    #[rstest]
    fn resources_join_below_the_base(source: PlaceholderHttpSource) {
        assert_eq!(
            source.resource_url("users").expect("url").as_str(),
            "https://jsonplaceholder.typicode.com/users"
        );
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "timeout")]
    #[case::not_found(StatusCode::NOT_FOUND, "status")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "status")]
    fn maps_http_statuses_to_expected_domain_errors(
        #[case] status: StatusCode,
        #[case] expected: &str,
    ) {
        let error = map_status_error(status, b"{\"error\":\"backend unavailable\"}");
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn status_errors_fall_back_to_reason_phrase() {
        let error = map_status_error(StatusCode::NOT_FOUND, b"   ");
        assert_eq!(error, PlaceholderSourceError::status(404_u16, "Not Found"));
    }

    #[rstest]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x ".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 123);
    }

    #[rstest]
    fn decodes_placeholder_users() {
        let body = r#"[{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }]"#;

        let users: Vec<User> = decode(body.as_bytes()).expect("JSON should decode");
        let leanne = users.first().expect("one user");
        assert_eq!(leanne.username, "Bret");
        assert_eq!(
            leanne.company.catch_phrase,
            "Multi-layered client-server neural-net"
        );
    }

    #[rstest]
    fn malformed_payloads_map_to_decode_errors() {
        let error = decode::<Vec<Post>>(b"{\"not\":\"a list\"}").expect_err("decode should fail");
        assert!(
            matches!(error, PlaceholderSourceError::Decode { .. }),
            "malformed payloads should map to Decode errors",
        );
    }
}
