// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth authorization-code handoff.
//!
//! The consent step happens in the user's browser. Strava redirects back
//! to `redirect_url` with a `code`, which is exchanged for an access token.
//! The `state` parameter is HMAC-signed with a per-login random key so a
//! redirect from another login attempt is rejected.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::AuthorizedSession;
use crate::routes::callback::{self, CallbackState};
use crate::routes::{RedirectParams, Route};
use crate::services::strava::StravaClient;
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use std::sync::Arc;
use std::time::Duration;
use subtle::ConstantTimeEq;
use tokio::sync::oneshot;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

const STATE_KEY_LEN: usize = 32;

/// Resolves a login into an access token.
///
/// Implementations drive the browser-mediated consent and the code
/// exchange; callers only react to the outcome.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self) -> Result<AuthorizedSession>;
}

/// Signing key for the `state` parameter of one login attempt.
pub struct OAuthState {
    key: [u8; STATE_KEY_LEN],
}

impl OAuthState {
    /// Create a fresh random key.
    pub fn generate() -> Result<Self> {
        let mut key = [0u8; STATE_KEY_LEN];
        SystemRandom::new()
            .fill(&mut key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG unavailable")))?;
        Ok(Self { key })
    }

    pub fn from_key(key: [u8; STATE_KEY_LEN]) -> Self {
        Self { key }
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))
    }

    /// Encode `route` and the current time into a signed state value.
    pub fn sign(&self, route: Route) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        self.sign_at(route, timestamp)
    }

    fn sign_at(&self, route: Route, timestamp_millis: i64) -> Result<String> {
        // "route|timestamp_hex"
        let payload = format!("{}|{:x}", route.path(), timestamp_millis);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        let signed = format!("{}|{}", payload, hex::encode(signature));
        Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
    }

    /// Verify a state value and return the route it was issued for.
    ///
    /// Fails on malformed input, signature mismatch, or a state older than
    /// `max_age`.
    pub fn verify(&self, state: &str, max_age: Duration) -> Option<Route> {
        let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
        let state_str = String::from_utf8(bytes).ok()?;

        let mut parts = state_str.splitn(3, '|');
        let route = parts.next()?;
        let timestamp_hex = parts.next()?;
        let signature_hex = parts.next()?;

        let payload = format!("{}|{}", route, timestamp_hex);
        let mut mac = self.mac().ok()?;
        mac.update(payload.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        if !bool::from(expected.as_bytes().ct_eq(signature_hex.as_bytes())) {
            tracing::error!("OAuth state signature mismatch");
            return None;
        }

        let issued = i64::from_str_radix(timestamp_hex, 16).ok()?;
        let age = chrono::Utc::now().timestamp_millis().saturating_sub(issued);
        if age < 0 || age as u128 > max_age.as_millis() {
            tracing::warn!(age_ms = age, "OAuth state expired");
            return None;
        }

        Route::from_path(route)
    }
}

/// A login waiting for its redirect.
pub struct PendingAuthorization {
    state: OAuthState,
    max_age: Duration,
    url: String,
}

impl PendingAuthorization {
    /// Prepare a login: fresh state key and the consent URL.
    pub fn new(config: &Config) -> Result<Self> {
        let state = OAuthState::generate()?;
        let signed = state.sign(Route::Redirect)?;
        Ok(Self {
            url: authorize_url(config, &signed),
            max_age: Duration::from_secs(config.auth_timeout_secs),
            state,
        })
    }

    /// Browser URL for the consent step.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check a redirect and extract the authorization code.
    pub fn code_from(&self, params: &RedirectParams) -> Result<String> {
        if let Some(error) = &params.error {
            // "access_denied" is what Strava sends when the user cancels.
            return Err(AppError::Auth(format!("Authorization denied: {}", error)));
        }

        let state = params
            .state
            .as_deref()
            .ok_or_else(|| AppError::Auth("Redirect is missing state".to_string()))?;
        if self.state.verify(state, self.max_age).is_none() {
            return Err(AppError::Auth("Invalid or expired state".to_string()));
        }

        params
            .code
            .clone()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| AppError::Auth("Redirect is missing code".to_string()))
    }
}

/// Build the Strava consent URL.
pub fn authorize_url(config: &Config, state: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&approval_prompt=auto&scope={}&state={}",
        config.authorize_url,
        urlencoding::encode(&config.strava_client_id),
        urlencoding::encode(&config.redirect_url),
        urlencoding::encode(&config.scopes.join(",")),
        state
    )
}

/// Callback invoked with the consent URL so the user can open it.
pub type OpenUrl = Arc<dyn Fn(&str) + Send + Sync>;

/// Authorizer that receives the redirect on a loopback HTTP listener.
pub struct LoopbackAuthorizer {
    config: Config,
    client: StravaClient,
    open_url: OpenUrl,
}

impl LoopbackAuthorizer {
    pub fn new(config: Config, client: StravaClient, open_url: OpenUrl) -> Self {
        Self {
            config,
            client,
            open_url,
        }
    }

    /// Wait for the browser redirect on the configured port.
    async fn wait_for_redirect(&self, pending: &PendingAuthorization) -> Result<RedirectParams> {
        let port = self
            .config
            .callback_port()
            .map_err(|e| AppError::Auth(e.to_string()))?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .map_err(|e| AppError::Auth(format!("Failed to listen on port {}: {}", port, e)))?;

        let (tx, rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = callback::router(CallbackState::new(tx));

        let server = tokio::spawn(async move {
            let shutdown = async move {
                shutdown_rx.await.ok();
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                tracing::warn!(error = %e, "Redirect listener failed");
            }
        });

        tracing::info!(port, "Waiting for OAuth redirect");
        (self.open_url)(pending.url());

        let timeout = Duration::from_secs(self.config.auth_timeout_secs);
        let outcome = tokio::time::timeout(timeout, rx).await;

        shutdown_tx.send(()).ok();
        server.await.ok();

        match outcome {
            Ok(Ok(params)) => Ok(params),
            Ok(Err(_)) => Err(AppError::Auth("Redirect listener closed".to_string())),
            Err(_) => Err(AppError::Auth("Timed out waiting for authorization".to_string())),
        }
    }
}

#[async_trait]
impl Authorizer for LoopbackAuthorizer {
    async fn authorize(&self) -> Result<AuthorizedSession> {
        let pending = PendingAuthorization::new(&self.config)?;

        tracing::info!(
            client_id = %self.config.strava_client_id,
            "Starting OAuth flow"
        );

        let params = self.wait_for_redirect(&pending).await?;
        let code = pending.code_from(&params)?;

        tracing::info!("Exchanging authorization code for tokens");
        let session = AuthorizedSession::from(self.client.exchange_code(&code).await?);

        tracing::info!(athlete_id = ?session.athlete_id, "OAuth successful");
        Ok(session)
    }
}
