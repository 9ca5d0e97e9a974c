// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen routes, deep links and navigation.

pub mod callback;

use serde::Deserialize;

/// Scheme prefix registered for deep links.
pub const APP_SCHEME_PREFIX: &str = "stravaapp://";

/// Navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Activities,
    Create,
    /// OAuth redirect target; resolves the pending login and lands on Home.
    Redirect,
}

impl Route {
    /// URL path of the route under a registered prefix.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Activities => "Activities",
            Route::Create => "Create Activity",
            Route::Redirect => "Redirect",
        }
    }

    /// Resolve a decoded URL path. The screen name `Create` is accepted as
    /// well as its path.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_matches('/') {
            "Home" => Some(Route::Home),
            "Activities" => Some(Route::Activities),
            "Create Activity" | "Create" => Some(Route::Create),
            "Redirect" => Some(Route::Redirect),
            _ => None,
        }
    }

    /// Whether the route accepts the OAuth `code` parameter.
    pub fn accepts_code(&self) -> bool {
        matches!(self, Route::Home | Route::Redirect)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// OAuth parameters carried by a redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RedirectParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A parsed deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    pub route: Route,
    pub params: RedirectParams,
}

/// Deep-link configuration: the URL prefixes the app answers to.
#[derive(Debug, Clone)]
pub struct Linking {
    prefixes: Vec<String>,
}

impl Linking {
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Prefixes for the app scheme plus the origin of the redirect URL.
    pub fn from_redirect_url(redirect_url: &str) -> Self {
        let mut prefixes = vec![APP_SCHEME_PREFIX.to_string()];
        if let Ok(url) = reqwest::Url::parse(redirect_url) {
            let origin = url.origin();
            if origin.is_tuple() {
                prefixes.push(format!("{}/", origin.ascii_serialization()));
            }
        }
        Self { prefixes }
    }

    /// Parse a URL into a route and its parameters.
    ///
    /// Returns `None` for URLs outside the registered prefixes or with an
    /// unknown path. `code` is dropped for routes that do not accept it.
    pub fn parse(&self, url: &str) -> Option<DeepLink> {
        let rest = self
            .prefixes
            .iter()
            .find_map(|prefix| url.strip_prefix(prefix.as_str()))?;

        let (raw_path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        let raw_path = raw_path.split('#').next().unwrap_or_default();
        let path = urlencoding::decode(raw_path).ok()?;
        let route = Route::from_path(&path)?;

        let mut params = RedirectParams::default();
        for pair in query.unwrap_or_default().split('#').next().unwrap_or_default().split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(&value.replace('+', " "))
                .map(|v| v.into_owned())
                .ok();
            match key {
                "code" if route.accepts_code() => params.code = value,
                "state" => params.state = value,
                "error" => params.error = value,
                _ => {}
            }
        }

        Some(DeepLink { route, params })
    }
}

/// Single-slot navigator.
///
/// Navigation replaces the active screen instead of stacking it, and
/// navigating to the already-active screen is a no-op. Focus-driven
/// re-checks therefore never loop.
#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<Route>,
    history: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on `route` without counting it as a navigation effect.
    pub fn starting_at(route: Route) -> Self {
        Self {
            current: Some(route),
            history: Vec::new(),
        }
    }

    /// Make `route` the active screen. Returns whether anything changed.
    pub fn navigate(&mut self, route: Route) -> bool {
        if self.current == Some(route) {
            tracing::trace!(%route, "Already on route, ignoring navigation");
            return false;
        }
        tracing::debug!(from = ?self.current, to = %route, "Navigating");
        self.current = Some(route);
        self.history.push(route);
        true
    }

    pub fn current(&self) -> Option<Route> {
        self.current
    }

    /// Routes navigated to, in order.
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Number of navigation effects so far.
    pub fn navigation_count(&self) -> usize {
        self.history.len()
    }
}
