//! Process configuration loaded from the environment.
//!
//! Values are read once and passed explicitly into the client and workflow;
//! nothing downstream reads the environment.

use std::time::Duration;

use thiserror::Error;

use crate::models::IgnoredTagSet;
use crate::raindrop::{
    DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, RaindropClient, RaindropClientBuilder, RaindropError,
};

/// Bearer token for the bookmark service.
pub const TOKEN_VAR: &str = "RD_TOKEN";
/// Seconds to wait between cycles.
pub const CYCLE_TIMEOUT_VAR: &str = "CYCLE_TIMEOUT_SECONDS";
/// Base URL override for the bookmark service API.
pub const API_URL_VAR: &str = "RAINDROP_API_URL";
/// Comma-separated list of ignored tags.
pub const IGNORED_TAGS_VAR: &str = "RAINDROP_IGNORED_TAGS";

/// Delay between cycles when none (or an unusable value) is configured.
pub const DEFAULT_CYCLE_INTERVAL: Duration = Duration::from_secs(60);

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `RD_TOKEN` is unset or blank.
    #[error("RD_TOKEN not found in environment variables")]
    MissingToken,
}

/// Runtime configuration for a tagging cycle.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub api_base_url: String,
    pub ignored_tags: IgnoredTagSet,
    pub cycle_interval: Duration,
    pub page_size: u32,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if `RD_TOKEN` is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use raintag::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "RD_TOKEN" => Some("secret".to_string()),
    ///     "RAINDROP_IGNORED_TAGS" => Some("pocket, IFTTT".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.ignored_tags.tags(), &["pocket", "ifttt"]);
    /// assert_eq!(config.cycle_interval.as_secs(), 60);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let api_base_url = lookup(API_URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let ignored_tags = match lookup(IGNORED_TAGS_VAR) {
            Some(raw) => IgnoredTagSet::new(parse_tags(&raw)),
            None => IgnoredTagSet::default(),
        };

        Ok(Self {
            token,
            api_base_url,
            ignored_tags,
            cycle_interval: parse_interval(lookup(CYCLE_TIMEOUT_VAR).as_deref()),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Reads only the cycle interval from the environment.
    ///
    /// The loop needs its cadence even when the token is missing.
    pub fn cycle_interval_from_env() -> Duration {
        parse_interval(std::env::var(CYCLE_TIMEOUT_VAR).ok().as_deref())
    }

    /// Builds a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns `RaindropError` if the base URL is invalid.
    pub fn client(&self) -> Result<RaindropClient, RaindropError> {
        RaindropClientBuilder::new()
            .base_url(&self.api_base_url)
            .token(&self.token)
            .page_size(self.page_size)
            .build()
    }
}

/// Parses a whole number of seconds, falling back to the default for
/// missing, unparseable or zero values.
fn parse_interval(raw: Option<&str>) -> Duration {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_CYCLE_INTERVAL)
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
