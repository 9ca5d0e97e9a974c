// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen flows as state machines.
//!
//! Each flow has an explicit state enum with a pure transition function and
//! a driver that performs the storage and network effects. Drivers take the
//! [`Navigator`](crate::routes::Navigator) by reference so callers decide
//! how navigation is rendered.

pub mod activity_list;
pub mod auth;
pub mod bootstrap;
pub mod create_activity;

pub use activity_list::{ActivityListFlow, ListState};
pub use auth::{AuthFlow, AuthState};
pub use bootstrap::{BootstrapState, SessionBootstrap};
pub use create_activity::{CreateActivityFlow, CreateState, FormField, FormState, FormSwitch, Notice};
