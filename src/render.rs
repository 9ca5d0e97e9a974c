// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text rendering of the screens for the terminal.

use crate::flows::{AuthState, BootstrapState, FormField, FormState, ListState, Notice};
use crate::models::ActivityView;
use std::fmt::Write as _;

pub const LOADING: &str = "Loading...";
pub const LOGIN_PROMPT: &str = "Login with Strava";

/// Home screen: spinner while checking, otherwise the login affordance.
pub fn home(bootstrap: BootstrapState, auth: &AuthState) -> String {
    match (bootstrap, auth) {
        (BootstrapState::Checking, _) | (_, AuthState::Authorizing) => LOADING.to_string(),
        (BootstrapState::Redirected, _) => "Signed in".to_string(),
        (BootstrapState::ShowLogin, _) => format!("[ {} ]", LOGIN_PROMPT),
    }
}

/// One activity row.
pub fn activity_row(activity: &ActivityView) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", activity.name);
    let _ = writeln!(out, "  Distance: {}", activity.distance_label());
    let _ = writeln!(out, "  Average Speed: {}", activity.average_speed_label());
    let _ = writeln!(out, "  Activity Type: {}", activity.activity_type);
    let _ = writeln!(out, "  Max Speed: {}", activity.max_speed_label());
    let _ = writeln!(out, "  Heart Rate: {}", activity.heart_rate_label());
    out
}

/// Activity list screen.
pub fn activity_list(state: &ListState) -> String {
    if state.is_loading() && state.activities().is_empty() {
        return LOADING.to_string();
    }

    let mut out = String::from("My Activities\n\n");
    for activity in state.activities() {
        out.push_str(&activity_row(activity));
        out.push('\n');
    }
    out.push_str("[ Logout ]  [ + Create Activity ]");
    out
}

/// Visible form errors, one per line as `Label: message`.
pub fn form_errors(form: &FormState) -> String {
    FormField::ALL
        .iter()
        .filter_map(|field| {
            form.visible_error(*field)
                .map(|message| format!("{}: {}", field.label(), message))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn notice(notice: &Notice) -> String {
    format!("✔ {}", notice.message)
}
