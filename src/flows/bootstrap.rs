// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session check run whenever the Home screen gains focus.

use crate::routes::{Navigator, Route};
use crate::store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Reading the session store; a spinner is shown.
    Checking,
    /// No session: show the login affordance.
    ShowLogin,
    /// A session exists and the activity list has been requested.
    Redirected,
}

impl BootstrapState {
    pub fn resolve(token_present: bool) -> BootstrapState {
        if token_present {
            BootstrapState::Redirected
        } else {
            BootstrapState::ShowLogin
        }
    }
}

/// Routes to the activity list when a session exists.
pub struct SessionBootstrap {
    session: SessionStore,
    state: BootstrapState,
}

impl SessionBootstrap {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            state: BootstrapState::Checking,
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Run on mount and on every focus event.
    ///
    /// Has no side effect besides navigation; running it again with the
    /// same stored token does not navigate again.
    pub async fn on_focus(&mut self, nav: &mut Navigator) -> BootstrapState {
        self.state = BootstrapState::Checking;

        let token = self.session.get_or_logged_out().await;
        self.state = BootstrapState::resolve(token.is_some());

        if self.state == BootstrapState::Redirected {
            nav.navigate(Route::Activities);
        }
        self.state
    }
}
