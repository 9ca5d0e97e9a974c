// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for listing and creating activities.
//!
//! Handles:
//! - Bearer-authenticated GET/POST against the REST API
//! - Authorization-code exchange at the OAuth token endpoint
//!
//! No retry and no token refresh: the access token is opaque and assumed
//! valid for the lifetime of the session.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{ActivityForm, CreatedActivity, StravaActivity, TokenExchangeResponse};
use serde::{de::DeserializeOwned, Serialize};

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
        }
    }

    /// List the authenticated athlete's activities.
    pub async fn list_activities(&self, access_token: &str) -> Result<Vec<StravaActivity>> {
        let activities: Vec<StravaActivity> =
            self.get_json("/athlete/activities", access_token).await?;
        tracing::debug!(count = activities.len(), "Fetched activities");
        Ok(activities)
    }

    /// Create a manual activity from validated form values.
    pub async fn create_activity(
        &self,
        access_token: &str,
        form: &ActivityForm,
    ) -> Result<CreatedActivity> {
        let response = self.post("/activities", form, access_token).await?;

        // Any 2xx means the activity exists; the body is informational.
        let body = response.text().await.unwrap_or_default();
        let created: CreatedActivity = serde_json::from_str(&body).unwrap_or_default();
        tracing::info!(activity_id = ?created.id, "Activity created");
        Ok(created)
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token exchange failed");
            return Err(AppError::Auth(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))
    }

    /// Generic GET request with JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, access_token: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(AppError::network)?;

        self.check_response_json(response).await
    }

    /// Generic POST request with JSON body and JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        access_token: &str,
    ) -> Result<T> {
        let response = self.post(path, body, access_token).await?;
        Self::parse_json(response).await
    }

    /// POST a JSON body and check the status, leaving the body unread.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        access_token: &str,
    ) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .map_err(AppError::network)?;

        self.check_status(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;
        Self::parse_json(response).await
    }

    /// Map a non-2xx response to an error.
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
            }

            // Unauthorized - token revoked or expired; there is no refresh
            if status.as_u16() == 401 {
                tracing::warn!("Strava rejected the access token (401)");
            }

            return Err(AppError::status(status.as_u16(), body));
        }

        Ok(response)
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();
        response
            .json()
            .await
            .map_err(|e| AppError::status(status, format!("JSON parse error: {}", e)))
    }
}
