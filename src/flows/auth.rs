// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login flow.

use crate::error::Result;
use crate::routes::{Navigator, Route};
use crate::services::Authorizer;
use crate::store::SessionStore;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Idle,
    Authorizing,
    Authorized,
    /// Last attempt failed or was cancelled; the reason is for logs only.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoginPressed,
    Resolved,
    Rejected(String),
}

impl AuthState {
    pub fn next(&self, event: AuthEvent) -> AuthState {
        match (self, event) {
            (_, AuthEvent::LoginPressed) => AuthState::Authorizing,
            (AuthState::Authorizing, AuthEvent::Resolved) => AuthState::Authorized,
            (AuthState::Authorizing, AuthEvent::Rejected(reason)) => AuthState::Failed(reason),
            // Outcomes only matter while a login is in flight.
            (state, _) => state.clone(),
        }
    }

    /// Whether the login affordance should be disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, AuthState::Authorizing)
    }
}

/// Drives a login from the Home screen.
pub struct AuthFlow {
    session: SessionStore,
    authorizer: Arc<dyn Authorizer>,
    state: AuthState,
}

impl AuthFlow {
    pub fn new(session: SessionStore, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            session,
            authorizer,
            state: AuthState::Idle,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Handle the login action.
    ///
    /// On success the token is persisted before navigating to the activity
    /// list. On failure nothing is written, the error is logged and the
    /// user stays on Home.
    pub async fn login(&mut self, nav: &mut Navigator) -> &AuthState {
        if self.state.is_busy() {
            tracing::debug!("Login already in progress");
            return &self.state;
        }
        self.state = self.state.next(AuthEvent::LoginPressed);

        match self.authorize_and_store().await {
            Ok(()) => {
                self.state = self.state.next(AuthEvent::Resolved);
                nav.navigate(Route::Activities);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.state = self.state.next(AuthEvent::Rejected(e.to_string()));
            }
        }

        &self.state
    }

    async fn authorize_and_store(&self) -> Result<()> {
        let authorized = self.authorizer.authorize().await?;
        self.session.set(&authorized.access_token).await?;
        tracing::info!("Session token stored");
        Ok(())
    }

    /// Return to Idle, e.g. after logout.
    pub fn reset(&mut self) {
        self.state = AuthState::Idle;
    }
}
