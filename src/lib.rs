// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava activity client
//!
//! Signs a user in with Strava OAuth, lists their activities and creates
//! manual activities. Screens are modelled as state machines in [`flows`]
//! and rendered as text by the CLI.

pub mod config;
pub mod error;
pub mod flows;
pub mod format;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use flows::{ActivityListFlow, AuthFlow, CreateActivityFlow, SessionBootstrap};
use routes::Linking;
use services::{Authorizer, StravaClient};
use std::sync::Arc;
use store::{FileStore, KeyValueStore, SessionStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub strava: StravaClient,
}

impl AppState {
    /// State backed by the session file named in `config`.
    pub fn new(config: Config) -> Self {
        let store = Arc::new(FileStore::new(config.session_path.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            strava: StravaClient::new(&config),
            session: SessionStore::new(store),
            config,
        }
    }

    pub fn linking(&self) -> Linking {
        Linking::from_redirect_url(&self.config.redirect_url)
    }

    pub fn bootstrap(&self) -> SessionBootstrap {
        SessionBootstrap::new(self.session.clone())
    }

    pub fn auth_flow(&self, authorizer: Arc<dyn Authorizer>) -> AuthFlow {
        AuthFlow::new(self.session.clone(), authorizer)
    }

    pub fn activity_list(&self) -> ActivityListFlow {
        ActivityListFlow::new(self.session.clone(), self.strava.clone())
    }

    pub fn create_activity(&self) -> CreateActivityFlow {
        CreateActivityFlow::new(self.session.clone(), self.strava.clone())
    }
}
