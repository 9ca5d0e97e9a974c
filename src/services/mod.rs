// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - remote API and OAuth.

pub mod oauth;
pub mod strava;

pub use oauth::{Authorizer, LoopbackAuthorizer, OAuthState, PendingAuthorization};
pub use strava::StravaClient;
