// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity list screen against a mock Strava API.

use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use strava_activity_client::flows::{ActivityListFlow, BootstrapState, ListState};
use strava_activity_client::models::HeartRate;
use strava_activity_client::render;
use strava_activity_client::routes::{Navigator, Route};
use strava_activity_client::AppState;

mod common;

#[tokio::test]
async fn test_lists_activities_with_bearer_token() {
    let (mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();
    mock.set_activities(
        StatusCode::OK,
        json!([common::activity_json(1, "Run A", Some(120.0))]),
    );

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();
    let list = flow.mount(&mut nav).await;

    assert!(!list.is_loading());
    let rows = list.activities();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Run A");
    assert_eq!(rows[0].distance_label(), "10 miles");
    assert_eq!(rows[0].average_speed_label(), "5 mph");
    assert_eq!(rows[0].activity_type, "run");
    assert_eq!(rows[0].max_speed_label(), "12 mph");
    assert_eq!(rows[0].heart_rate_label(), "120 bpm");

    let requests = mock.requests_to(Method::GET, "/athlete/activities");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer abc123"));
    assert!(nav.history().is_empty());
}

#[tokio::test]
async fn test_heart_rate_not_logged() {
    let (mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();
    mock.set_activities(
        StatusCode::OK,
        json!([common::activity_json(2, "Ride B", None)]),
    );

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();
    let list = flow.mount(&mut nav).await;

    assert_eq!(list.activities()[0].heart_rate, HeartRate::NotLogged);
    assert!(render::activity_list(list).contains("Heart Rate: Not Logged"));
}

#[tokio::test]
async fn test_flagged_but_missing_heart_rate_not_logged() {
    let (mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();
    mock.set_activities(
        StatusCode::OK,
        json!([{
            "id": 3, "name": "Swim", "distance": 1, "average_speed": 1,
            "type": "swim", "max_speed": 2, "hasHeartRate": true
        }]),
    );

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();
    let list = flow.mount(&mut nav).await;

    assert_eq!(list.activities()[0].heart_rate_label(), "Not Logged");
}

#[tokio::test]
async fn test_sparse_record_does_not_drop_list() {
    let (mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();
    mock.set_activities(
        StatusCode::OK,
        json!([
            common::activity_json(1, "Run A", Some(120.0)),
            { "id": 2, "name": null, "distance": null, "type": "walk" }
        ]),
    );

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();
    let list = flow.mount(&mut nav).await;

    let rows = list.activities();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Run A");
    assert_eq!(rows[1].name, "");
    assert_eq!(rows[1].distance_label(), "0 miles");
    assert_eq!(rows[1].heart_rate_label(), "Not Logged");
}

#[tokio::test]
async fn test_every_focus_refetches() {
    let (mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();
    flow.mount(&mut nav).await;

    mock.set_activities(
        StatusCode::OK,
        json!([common::activity_json(9, "New one", None)]),
    );
    let list = flow.on_focus(&mut nav).await;
    assert_eq!(list.activities()[0].name, "New one");

    assert_eq!(mock.requests_to(Method::GET, "/athlete/activities").len(), 2);
}

#[tokio::test]
async fn test_no_session_returns_to_login() {
    let (mock, state) = common::create_test_app().await;

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();
    let list = flow.mount(&mut nav).await;

    assert_eq!(list, &ListState::Ready(Vec::new()));
    assert_eq!(nav.current(), Some(Route::Home));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_clears_spinner_and_stays() {
    let (mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();
    mock.set_activities(
        StatusCode::OK,
        json!([common::activity_json(1, "Run A", Some(120.0))]),
    );

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();
    flow.mount(&mut nav).await;

    mock.set_activities(StatusCode::UNAUTHORIZED, json!({ "message": "Authorization Error" }));
    let list = flow.on_focus(&mut nav).await;

    assert!(!list.is_loading());
    assert_eq!(list.activities()[0].name, "Run A");
    assert_eq!(nav.current(), Some(Route::Activities));
    // The token is not cleared on a rejected request.
    assert_eq!(state.session.get().await.unwrap().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_network_failure_leaves_empty_list() {
    let state = common::test_state("http://127.0.0.1:9");
    state.session.set("abc123").await.unwrap();

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();
    let list = flow.mount(&mut nav).await;

    assert_eq!(list, &ListState::Ready(Vec::new()));
    assert_eq!(nav.current(), Some(Route::Activities));
}

#[tokio::test]
async fn test_stale_fetch_discarded() {
    let (mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();
    mock.set_activities(
        StatusCode::OK,
        json!([common::activity_json(1, "Old", None)]),
    );

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();

    let first = flow.begin_fetch();
    let first_outcome = ActivityListFlow::fetch(&state.session, &state.strava).await;

    mock.set_activities(
        StatusCode::OK,
        json!([common::activity_json(2, "New", None)]),
    );
    let second = flow.begin_fetch();
    let second_outcome = ActivityListFlow::fetch(&state.session, &state.strava).await;

    assert!(flow.apply(second, second_outcome, &mut nav));
    assert!(!flow.apply(first, first_outcome, &mut nav));
    assert_eq!(flow.state().activities()[0].name, "New");
}

#[tokio::test]
async fn test_fetch_after_unmount_discarded() {
    let (mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();
    mock.set_activities(
        StatusCode::OK,
        json!([common::activity_json(1, "Run A", None)]),
    );

    let mut nav = Navigator::starting_at(Route::Activities);
    let mut flow = state.activity_list();

    let ticket = flow.begin_fetch();
    flow.unmount();
    let outcome = ActivityListFlow::fetch(&state.session, &state.strava).await;

    assert!(!flow.apply(ticket, outcome, &mut nav));
    assert!(flow.state().activities().is_empty());
}

#[tokio::test]
async fn test_logout_clears_token_then_shows_login() {
    let (_mock, state) = common::create_test_app().await;
    state.session.set("abc123").await.unwrap();

    let mut nav = Navigator::starting_at(Route::Activities);
    state.activity_list().logout(&mut nav).await.unwrap();

    assert_eq!(state.session.get().await.unwrap(), None);
    assert_eq!(nav.current(), Some(Route::Home));

    let outcome = state.bootstrap().on_focus(&mut nav).await;
    assert_eq!(outcome, BootstrapState::ShowLogin);
    assert_eq!(nav.current(), Some(Route::Home));
}

#[tokio::test]
async fn test_logout_failure_stays_on_list() {
    let store = Arc::new(common::ReadOnlyStore::with_token("abc123").await);
    let state = AppState::with_store(common::test_config("http://127.0.0.1:9"), store);

    let mut nav = Navigator::starting_at(Route::Activities);
    let result = state.activity_list().logout(&mut nav).await;

    assert!(result.is_err());
    assert_eq!(nav.current(), Some(Route::Activities));
    assert!(nav.history().is_empty());
}

#[tokio::test]
async fn test_create_navigates_to_form() {
    let state = common::test_state("http://127.0.0.1:9");

    let mut nav = Navigator::starting_at(Route::Activities);
    state.activity_list().create(&mut nav);
    assert_eq!(nav.current(), Some(Route::Create));
}
