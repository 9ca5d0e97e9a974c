// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity list screen.
//!
//! Every focus event triggers a fresh full fetch; nothing is cached across
//! sessions. A fetch that resolves after the screen was unmounted, or after
//! a newer focus started another fetch, is discarded.

use crate::error::{AppError, Result};
use crate::models::ActivityView;
use crate::routes::{Navigator, Route};
use crate::services::StravaClient;
use crate::store::SessionStore;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// Fetch in flight. Keeps the rows from the previous fetch.
    Loading(Vec<ActivityView>),
    Ready(Vec<ActivityView>),
}

impl Default for ListState {
    fn default() -> Self {
        ListState::Loading(Vec::new())
    }
}

/// Result of one fetch, before it is applied to the screen.
#[derive(Debug)]
pub enum FetchOutcome {
    NoSession,
    Loaded(Vec<ActivityView>),
    Failed(AppError),
}

impl ListState {
    /// Rows currently held, whether or not they are being refreshed.
    pub fn activities(&self) -> &[ActivityView] {
        match self {
            ListState::Loading(rows) | ListState::Ready(rows) => rows,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading(_))
    }

    pub fn begin_fetch(self) -> ListState {
        match self {
            ListState::Loading(rows) | ListState::Ready(rows) => ListState::Loading(rows),
        }
    }

    pub fn finish(self, outcome: FetchOutcome) -> ListState {
        let previous = match self {
            ListState::Loading(rows) | ListState::Ready(rows) => rows,
        };
        match outcome {
            FetchOutcome::Loaded(rows) => ListState::Ready(rows),
            // A failed fetch only clears the spinner.
            FetchOutcome::Failed(_) => ListState::Ready(previous),
            FetchOutcome::NoSession => ListState::Ready(Vec::new()),
        }
    }
}

/// Ticket identifying one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Drives the activity list screen.
pub struct ActivityListFlow {
    session: SessionStore,
    client: StravaClient,
    state: ListState,
    epoch: u64,
    mounted: bool,
}

impl ActivityListFlow {
    pub fn new(session: SessionStore, client: StravaClient) -> Self {
        Self {
            session,
            client,
            state: ListState::default(),
            epoch: 0,
            mounted: true,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Mark the screen as gone; in-flight results will be dropped.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Mount (or remount) the screen and run the first fetch.
    pub async fn mount(&mut self, nav: &mut Navigator) -> &ListState {
        self.mounted = true;
        self.on_focus(nav).await
    }

    /// Refresh on focus.
    pub async fn on_focus(&mut self, nav: &mut Navigator) -> &ListState {
        let ticket = self.begin_fetch();
        let outcome = Self::fetch(&self.session, &self.client).await;
        self.apply(ticket, outcome, nav);
        &self.state
    }

    /// Enter the loading state and issue a ticket for the fetch.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.state = std::mem::take(&mut self.state).begin_fetch();
        FetchTicket(self.epoch)
    }

    /// Read the session and fetch the activities.
    pub async fn fetch(session: &SessionStore, client: &StravaClient) -> FetchOutcome {
        let Some(token) = session.get_or_logged_out().await else {
            return FetchOutcome::NoSession;
        };

        match client.list_activities(&token).await {
            Ok(activities) => {
                FetchOutcome::Loaded(activities.into_iter().map(ActivityView::from).collect())
            }
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    /// Apply a fetch outcome. Returns false if the outcome was stale.
    pub fn apply(&mut self, ticket: FetchTicket, outcome: FetchOutcome, nav: &mut Navigator) -> bool {
        if !self.mounted || ticket.0 != self.epoch {
            tracing::debug!(
                mounted = self.mounted,
                ticket = ticket.0,
                epoch = self.epoch,
                "Discarding stale activity fetch"
            );
            return false;
        }

        match &outcome {
            FetchOutcome::Loaded(rows) => tracing::info!(count = rows.len(), "Activities loaded"),
            FetchOutcome::Failed(e) => tracing::warn!(error = %e, "Failed to fetch activities"),
            FetchOutcome::NoSession => {
                tracing::info!("No session, returning to login");
                nav.navigate(Route::Home);
            }
        }

        self.state = std::mem::take(&mut self.state).finish(outcome);
        true
    }

    /// Log out: clear the stored token, then go to Home.
    ///
    /// If the token cannot be cleared the user stays on this screen.
    pub async fn logout(&mut self, nav: &mut Navigator) -> Result<()> {
        if let Err(e) = self.session.clear().await {
            tracing::error!(error = %e, "Failed to clear session on logout");
            return Err(e);
        }
        tracing::info!("Logged out");
        nav.navigate(Route::Home);
        Ok(())
    }

    /// Open the create-activity form.
    pub fn create(&self, nav: &mut Navigator) {
        nav.navigate(Route::Create);
    }
}
