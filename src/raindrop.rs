/// Raindrop.io HTTP client module.
///
/// This module provides a blocking HTTP client for the bookmark service's REST API:
/// candidate search, AI tag suggestions and tag updates.
mod client;

pub use client::{
    CandidateQuery, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, RaindropClient, RaindropClientBuilder,
    RaindropClientTrait, RaindropError,
};
