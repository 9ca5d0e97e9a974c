// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! OAuth client credentials are read from the environment (or a `.env`
//! file for local development) and never compiled into the binary.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Redirect target registered with Strava for this client
    pub redirect_url: String,
    /// Browser consent endpoint
    pub authorize_url: String,
    /// Authorization-code exchange endpoint
    pub token_url: String,
    /// REST API base URL
    pub api_base_url: String,
    /// Requested OAuth scopes
    pub scopes: Vec<String>,
    /// Local key-value file holding the session token
    pub session_path: PathBuf,
    /// How long to wait for the OAuth redirect before giving up
    pub auth_timeout_secs: u64,
}

const DEFAULT_REDIRECT_URL: &str = "http://localhost:8765/Redirect";
const DEFAULT_AUTHORIZE_URL: &str = "https://www.strava.com/oauth/mobile/authorize";
const DEFAULT_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
const DEFAULT_API_URL: &str = "https://www.strava.com/api/v3";
const DEFAULT_SCOPES: &str = "activity:read_all,activity:write";
const DEFAULT_SESSION_PATH: &str = ".strava-session.json";
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 300;

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            scopes: parse_scopes(DEFAULT_SCOPES),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            auth_timeout_secs: DEFAULT_AUTH_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            redirect_url: env::var("STRAVA_REDIRECT_URL")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URL.to_string()),
            authorize_url: env::var("STRAVA_AUTHORIZE_URL")
                .unwrap_or_else(|_| DEFAULT_AUTHORIZE_URL.to_string()),
            token_url: env::var("STRAVA_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            api_base_url: env::var("STRAVA_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            scopes: parse_scopes(
                &env::var("STRAVA_SCOPES").unwrap_or_else(|_| DEFAULT_SCOPES.to_string()),
            ),
            session_path: env::var("SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_PATH)),
            auth_timeout_secs: env::var("AUTH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_AUTH_TIMEOUT_SECS),
        })
    }

    /// Loopback port the OAuth redirect listener binds to.
    ///
    /// Derived from `redirect_url`; falls back to the scheme default.
    pub fn callback_port(&self) -> Result<u16, ConfigError> {
        let url = reqwest::Url::parse(&self.redirect_url)
            .map_err(|e| ConfigError::Invalid("STRAVA_REDIRECT_URL", e.to_string()))?;
        url.port_or_known_default()
            .ok_or(ConfigError::Invalid(
                "STRAVA_REDIRECT_URL",
                "redirect URL has no port".to_string(),
            ))
    }
}

/// Split a comma-separated scope list, dropping blanks.
fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
