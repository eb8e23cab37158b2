//! Reddit API client: OAuth2 handshake and new-post listing.
//!
//! Uses the application-only (client-credentials) grant: POST the id/secret
//! to the token endpoint, then send the bearer token to the oauth host for
//! the listing. The listing is fully materialized before the caller sees
//! it — the final slide order depends on the total fetched count, so a
//! lazy/streaming view would buy nothing.

use crate::config::RedditCredentials;
use crate::error::Reddit2PptxError;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_HOST: &str = "https://oauth.reddit.com";

/// One post from a subreddit listing.
#[derive(Debug, Clone)]
pub struct RedditPost {
    /// Post headline, used verbatim as the slide title.
    pub title: String,
    /// The URL the post links to (for image posts, the image itself).
    pub url: String,
}

/// An authenticated Reddit API client.
///
/// Construction performs the OAuth2 handshake; an instance always holds a
/// valid-at-connect-time bearer token. Tokens from this grant last an hour,
/// far beyond any single run, so there is no refresh logic.
pub struct RedditClient {
    http: reqwest::Client,
    token: String,
}

impl RedditClient {
    /// Build an HTTP client and authenticate against Reddit.
    ///
    /// # Errors
    /// [`Reddit2PptxError::AuthenticationFailed`] if the token endpoint
    /// rejects the credentials or returns no token.
    pub async fn connect(
        credentials: &RedditCredentials,
        timeout_secs: u64,
    ) -> Result<Self, Reddit2PptxError> {
        let http = reqwest::Client::builder()
            .user_agent(&credentials.user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Reddit2PptxError::Internal(format!("HTTP client build failed: {e}")))?;

        let token = request_token(&http, credentials).await?;
        info!("Authenticated with Reddit");

        Ok(Self { http, token })
    }

    /// Fetch the `limit` newest posts of a subreddit, newest first.
    ///
    /// # Errors
    /// [`Reddit2PptxError::SubredditNotFound`] when Reddit answers 404 or
    /// 403 (missing, banned, or private subreddit);
    /// [`Reddit2PptxError::ListingFailed`] for any other failure.
    pub async fn newest_posts(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<RedditPost>, Reddit2PptxError> {
        let url = format!("{OAUTH_HOST}/r/{subreddit}/new");
        debug!("Listing {} newest posts from r/{}", limit, subreddit);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            // raw_json=1 stops Reddit HTML-escaping titles and URLs
            // ("&amp;" in an image URL breaks the download).
            .query(&[("limit", limit.to_string()), ("raw_json", "1".to_string())])
            .send()
            .await
            .map_err(|e| Reddit2PptxError::ListingFailed {
                subreddit: subreddit.to_string(),
                reason: e.to_string(),
            })?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                return Err(Reddit2PptxError::SubredditNotFound {
                    subreddit: subreddit.to_string(),
                })
            }
            status if !status.is_success() => {
                return Err(Reddit2PptxError::ListingFailed {
                    subreddit: subreddit.to_string(),
                    reason: format!("HTTP {status}"),
                })
            }
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| Reddit2PptxError::ListingFailed {
                subreddit: subreddit.to_string(),
                reason: e.to_string(),
            })?;

        let posts =
            parse_listing(&body).map_err(|e| Reddit2PptxError::ListingFailed {
                subreddit: subreddit.to_string(),
                reason: format!("unexpected listing payload: {e}"),
            })?;

        info!("Listed {} posts from r/{}", posts.len(), subreddit);
        Ok(posts)
    }

}

// ── Wire format ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Deserialize)]
struct PostData {
    title: String,
    url: String,
}

async fn request_token(
    http: &reqwest::Client,
    credentials: &RedditCredentials,
) -> Result<String, Reddit2PptxError> {
    let response = http
        .post(TOKEN_URL)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| Reddit2PptxError::AuthenticationFailed {
            detail: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(Reddit2PptxError::AuthenticationFailed {
            detail: format!("token endpoint returned HTTP {}", response.status()),
        });
    }

    let token: TokenResponse =
        response
            .json()
            .await
            .map_err(|e| Reddit2PptxError::AuthenticationFailed {
                detail: format!("malformed token response: {e}"),
            })?;

    match token.access_token {
        Some(t) if !t.is_empty() => Ok(t),
        // Reddit reports bad grants as 200 + {"error": "..."}.
        _ => Err(Reddit2PptxError::AuthenticationFailed {
            detail: token
                .error
                .unwrap_or_else(|| "token endpoint returned no access_token".to_string()),
        }),
    }
}

/// Parse a Reddit listing body into posts, newest first (Reddit's order).
fn parse_listing(body: &str) -> Result<Vec<RedditPost>, serde_json::Error> {
    let listing: Listing = serde_json::from_str(body)?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| RedditPost {
            title: child.data.title,
            url: child.data.url,
        })
        .collect())
}
