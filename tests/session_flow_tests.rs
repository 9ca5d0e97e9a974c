// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session bootstrap and login flow.

use std::sync::Arc;
use strava_activity_client::flows::{AuthState, BootstrapState};
use strava_activity_client::routes::{Navigator, Route};
use strava_activity_client::store::{FileStore, MemoryStore};
use strava_activity_client::AppState;

mod common;

#[tokio::test]
async fn test_bootstrap_without_token_shows_login() {
    let state = common::test_state("http://127.0.0.1:9");
    let mut nav = Navigator::starting_at(Route::Home);
    let mut bootstrap = state.bootstrap();

    assert_eq!(bootstrap.state(), BootstrapState::Checking);
    assert_eq!(bootstrap.on_focus(&mut nav).await, BootstrapState::ShowLogin);
    assert!(nav.history().is_empty());
}

#[tokio::test]
async fn test_bootstrap_with_token_redirects_once() {
    let state = common::test_state("http://127.0.0.1:9");
    state.session.set("abc123").await.unwrap();

    let mut nav = Navigator::starting_at(Route::Home);
    let mut bootstrap = state.bootstrap();

    assert_eq!(bootstrap.on_focus(&mut nav).await, BootstrapState::Redirected);
    assert_eq!(bootstrap.on_focus(&mut nav).await, BootstrapState::Redirected);
    assert_eq!(nav.history(), &[Route::Activities]);
}

#[tokio::test]
async fn test_bootstrap_storage_failure_shows_login() {
    let state = AppState::with_store(
        common::test_config("http://127.0.0.1:9"),
        Arc::new(MemoryStore::unavailable()),
    );
    let mut nav = Navigator::starting_at(Route::Home);

    assert_eq!(
        state.bootstrap().on_focus(&mut nav).await,
        BootstrapState::ShowLogin
    );
    assert_eq!(nav.current(), Some(Route::Home));
}

#[tokio::test]
async fn test_login_stores_token_then_navigates() {
    let state = common::test_state("http://127.0.0.1:9");
    let authorizer = common::FakeAuthorizer::granting("abc123");

    let mut nav = Navigator::starting_at(Route::Home);
    let mut auth = state.auth_flow(authorizer.clone());

    assert_eq!(auth.login(&mut nav).await, &AuthState::Authorized);
    assert_eq!(state.session.get().await.unwrap().as_deref(), Some("abc123"));
    assert_eq!(nav.history(), &[Route::Activities]);
    assert_eq!(authorizer.calls(), 1);
}

#[tokio::test]
async fn test_login_denied_stays_home() {
    let state = common::test_state("http://127.0.0.1:9");
    let authorizer = common::FakeAuthorizer::denying("access_denied");

    let mut nav = Navigator::starting_at(Route::Home);
    let mut auth = state.auth_flow(authorizer);

    assert!(matches!(auth.login(&mut nav).await, AuthState::Failed(_)));
    assert_eq!(state.session.get().await.unwrap(), None);
    assert!(nav.history().is_empty());

    // The login affordance stays available.
    assert!(!auth.state().is_busy());
}

#[tokio::test]
async fn test_login_storage_failure_does_not_navigate() {
    let state = AppState::with_store(
        common::test_config("http://127.0.0.1:9"),
        Arc::new(MemoryStore::unavailable()),
    );
    let mut nav = Navigator::starting_at(Route::Home);
    let mut auth = state.auth_flow(common::FakeAuthorizer::granting("abc123"));

    assert!(matches!(auth.login(&mut nav).await, AuthState::Failed(_)));
    assert!(nav.history().is_empty());
}

#[tokio::test]
async fn test_token_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let config = common::test_config("http://127.0.0.1:9");

    let first = AppState::with_store(config.clone(), Arc::new(FileStore::new(&path)));
    let mut nav = Navigator::starting_at(Route::Home);
    first
        .auth_flow(common::FakeAuthorizer::granting("abc123"))
        .login(&mut nav)
        .await;

    let second = AppState::with_store(config, Arc::new(FileStore::new(&path)));
    let mut nav = Navigator::starting_at(Route::Home);
    assert_eq!(
        second.bootstrap().on_focus(&mut nav).await,
        BootstrapState::Redirected
    );
    assert_eq!(nav.current(), Some(Route::Activities));
}
