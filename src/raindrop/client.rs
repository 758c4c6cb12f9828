//! Raindrop.io HTTP client implementation.
//!
//! This module provides `RaindropClient` for making synchronous HTTP requests to the
//! Raindrop REST API, along with error types and builder patterns for configuration.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{Item, ItemId};

/// Default base URL of the Raindrop REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.raindrop.io/rest/v1";

/// Default number of items requested per candidate query.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Errors that can occur when interacting with the Raindrop API.
#[derive(Debug, Error)]
pub enum RaindropError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No bearer token was supplied to the builder
    #[error("Missing API token")]
    MissingToken,
}

/// A search over the user's bookmarks that yields tagging candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateQuery {
    /// Items with no tags at all.
    Untagged,
    /// Items carrying the given tag.
    Tagged(String),
}

impl CandidateQuery {
    /// Returns the Raindrop search expression for this query.
    ///
    /// # Examples
    ///
    /// ```
    /// use raintag::raindrop::CandidateQuery;
    ///
    /// assert_eq!(CandidateQuery::Untagged.search_term(), "notag:true");
    /// assert_eq!(CandidateQuery::Tagged("ifttt".into()).search_term(), "#ifttt");
    /// ```
    pub fn search_term(&self) -> String {
        match self {
            CandidateQuery::Untagged => "notag:true".to_string(),
            CandidateQuery::Tagged(tag) => format!("#{tag}"),
        }
    }
}

/// Builder for constructing `RaindropClient` instances.
///
/// # Examples
///
/// ```
/// use raintag::raindrop::RaindropClientBuilder;
///
/// let client = RaindropClientBuilder::new()
///     .token("test-token")
///     .page_size(25)
///     .build()
///     .expect("Failed to create client");
/// assert_eq!(client.page_size(), 25);
/// ```
#[derive(Debug, Default)]
pub struct RaindropClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    page_size: Option<u32>,
}

impl RaindropClientBuilder {
    /// Creates a new `RaindropClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for the Raindrop API.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL (e.g., "https://api.raindrop.io/rest/v1")
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets how many items each candidate query requests.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Builds the `RaindropClient` with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns `RaindropError::MissingToken` if no non-empty token was set, and
    /// `RaindropError::InvalidUrl` if the base URL does not parse.
    pub fn build(self) -> Result<RaindropClient, RaindropError> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(RaindropError::MissingToken)?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        // Validate URL
        reqwest::Url::parse(&base_url)
            .map_err(|e| RaindropError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        // Transport defaults only; no retry or extra timeout layer
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(RaindropError::Network)?;

        Ok(RaindropClient {
            client,
            base_url,
            token,
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

/// Synchronous HTTP client for the Raindrop REST API.
///
/// It should be constructed using `RaindropClientBuilder`.
pub struct RaindropClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
    page_size: u32,
}

/// Trait for the bookmark service operations the tagger depends on.
///
/// This trait enables mocking in unit tests and provides a clean interface
/// for interacting with the Raindrop API.
pub trait RaindropClientTrait: Send + Sync {
    /// Fetches items matching `query`, newest first, limited to one page.
    fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Item>, RaindropError>;

    /// Requests AI tag suggestions for an item.
    fn suggest_tags(&self, id: ItemId) -> Result<Vec<String>, RaindropError>;

    /// Replaces the item's full tag list with `tags`.
    fn update_tags(&self, id: ItemId, tags: &[String]) -> Result<(), RaindropError>;
}

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    item: Option<SuggestedItem>,
}

#[derive(Debug, Deserialize)]
struct SuggestedItem {
    #[serde(default)]
    tags: Vec<String>,
}

/// Parses the body of a multi-item listing response.
pub(crate) fn parse_items(body: &str) -> Result<Vec<Item>, RaindropError> {
    let response: ItemsResponse =
        serde_json::from_str(body).map_err(RaindropError::Serialization)?;
    Ok(response.items)
}

/// Parses the body of a suggestion response; a missing `item` means no suggestions.
pub(crate) fn parse_suggestions(body: &str) -> Result<Vec<String>, RaindropError> {
    let response: SuggestResponse =
        serde_json::from_str(body).map_err(RaindropError::Serialization)?;
    Ok(response.item.map(|item| item.tags).unwrap_or_default())
}

impl RaindropClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the page size used for candidate queries.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sends a prepared request and returns the body of a successful response.
    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<String, RaindropError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(RaindropError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RaindropError::Http {
                status: status.as_u16(),
            });
        }

        response.text().map_err(RaindropError::Network)
    }
}

impl RaindropClientTrait for RaindropClient {
    fn fetch_candidates(&self, query: &CandidateQuery) -> Result<Vec<Item>, RaindropError> {
        let url = format!("{}/raindrops/0", self.base_url);
        let search = query.search_term();
        debug!(%search, "fetching candidates");

        let request = self.client.get(&url).query(&[
            ("sort", "-created".to_string()),
            ("perpage", self.page_size.to_string()),
            ("search", search),
        ]);

        parse_items(&self.send(request)?)
    }

    fn suggest_tags(&self, id: ItemId) -> Result<Vec<String>, RaindropError> {
        let url = format!("{}/raindrop/{}/suggest", self.base_url, id);
        parse_suggestions(&self.send(self.client.get(&url))?)
    }

    fn update_tags(&self, id: ItemId, tags: &[String]) -> Result<(), RaindropError> {
        let url = format!("{}/raindrop/{}", self.base_url, id);
        let body = serde_json::json!({ "tags": tags });

        self.send(self.client.put(&url).json(&body)).map(|_| ())
    }
}
