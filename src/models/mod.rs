// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod new_activity;
pub mod user;

pub use activity::{ActivityView, CreatedActivity, HeartRate, StravaActivity};
pub use new_activity::{ActivityForm, ActivityType};
pub use user::{Athlete, AuthorizedSession, TokenExchangeResponse};
