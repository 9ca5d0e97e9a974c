// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth redirect listener routes.
//!
//! The browser is sent back to the loopback redirect URL after consent.
//! The first redirect is forwarded to the waiting authorizer; later ones
//! are told the login already completed.

use super::{RedirectParams, Route};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared slot for the single pending redirect.
#[derive(Clone)]
pub struct CallbackState {
    sender: Arc<Mutex<Option<oneshot::Sender<RedirectParams>>>>,
}

impl CallbackState {
    pub fn new(sender: oneshot::Sender<RedirectParams>) -> Self {
        Self {
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }

    fn take(&self) -> Option<oneshot::Sender<RedirectParams>> {
        self.sender.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Build the redirect router. Both redirect-capable routes are served.
pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route(&format!("/{}", Route::Redirect.path()), get(redirect))
        .route(&format!("/{}", Route::Home.path()), get(redirect))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .with_state(state)
}

async fn redirect(
    State(state): State<CallbackState>,
    Query(params): Query<RedirectParams>,
) -> impl IntoResponse {
    let Some(sender) = state.take() else {
        tracing::warn!("Redirect received with no pending login");
        return (
            StatusCode::CONFLICT,
            Html("<p>This login has already completed. You can close this window.</p>"),
        );
    };

    let failed = params.error.is_some() || params.code.is_none();
    if let Some(error) = &params.error {
        tracing::warn!(error = %error, "OAuth error from Strava");
    }

    if sender.send(params).is_err() {
        tracing::warn!("Authorizer stopped waiting before the redirect arrived");
    }

    if failed {
        (
            StatusCode::OK,
            Html("<p>Login was not completed. Return to the app to try again.</p>"),
        )
    } else {
        (
            StatusCode::OK,
            Html("<p>Login complete. You can close this window.</p>"),
        )
    }
}
