// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete and token models from the OAuth exchange.

use serde::Deserialize;

/// Token exchange response from Strava OAuth.
///
/// Only the access token is kept. Refresh is out of scope, so the refresh
/// token is not even deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub athlete: Option<Athlete>,
}

/// Athlete summary included in the token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct Athlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

/// Result of a completed authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedSession {
    pub access_token: String,
    pub athlete_id: Option<u64>,
}

impl From<TokenExchangeResponse> for AuthorizedSession {
    fn from(response: TokenExchangeResponse) -> Self {
        Self {
            access_token: response.access_token,
            athlete_id: response.athlete.map(|a| a.id),
        }
    }
}
