//! Active view tracking
//!
//! Binds the route currently on screen to the cache. Only the active route's
//! dependency keys are read, so a result that lands for a route the user has
//! already left never reaches the screen.

use super::data::{derive_view, ViewData};
use super::route::Route;
use super::state::{gather, ViewState};
use crate::cache::{QueryCache, QueryEntry, QueryStatus};
use crate::resource::{Fetcher, Payload};

/// What a resolution was computed from: the attempt and status of every
/// dependency plus the search text
#[derive(Debug, Clone, PartialEq, Eq)]
struct Inputs {
    entries: Vec<(u64, QueryStatus)>,
    search: String,
}

impl Inputs {
    fn of(entries: &[QueryEntry], search: &str) -> Self {
        Self {
            entries: entries.iter().map(|e| (e.attempt, e.status())).collect(),
            search: search.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActiveView {
    route: Route,
    /// Payloads of the last Ready resolution for `route`
    last_ready: Option<Vec<Payload>>,
    /// Inputs of the last resolution handed out by `resolve_changed`
    last_inputs: Option<Inputs>,
}

impl ActiveView {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            last_ready: None,
            last_inputs: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Switch to `route`. Returns false when it is already active.
    ///
    /// Changing the route changes the key set, so the remembered Ready
    /// payloads are dropped and the view may show Loading again.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.route {
            return false;
        }
        tracing::debug!("Navigating {} -> {}", self.route, route);
        self.route = route;
        self.last_ready = None;
        self.last_inputs = None;
        true
    }

    /// Current state of the active route, starting any missing fetches.
    ///
    /// Once Ready, a refetch of the same keys keeps showing the previous
    /// data until the new attempt settles instead of flickering to Loading.
    /// Errors always surface.
    pub fn resolve<F: Fetcher>(&mut self, cache: &QueryCache<F>, search: &str) -> ViewState<ViewData> {
        let entries = self.entries(cache);
        self.resolve_entries(&entries, search)
    }

    /// Like [`ActiveView::resolve`], but returns `None` when neither the
    /// dependencies nor the search text changed since the previous call.
    pub fn resolve_changed<F: Fetcher>(
        &mut self,
        cache: &QueryCache<F>,
        search: &str,
    ) -> Option<ViewState<ViewData>> {
        let entries = self.entries(cache);
        let inputs = Inputs::of(&entries, search);
        if self.last_inputs.as_ref() == Some(&inputs) {
            return None;
        }

        let state = self.resolve_entries(&entries, search);
        self.last_inputs = Some(inputs);
        Some(state)
    }

    fn entries<F: Fetcher>(&self, cache: &QueryCache<F>) -> Vec<QueryEntry> {
        self.route
            .dependencies()
            .iter()
            .map(|key| cache.get(key))
            .collect()
    }

    fn resolve_entries(&mut self, entries: &[QueryEntry], search: &str) -> ViewState<ViewData> {
        let payloads = match gather(entries) {
            ViewState::Ready(payloads) => {
                self.last_ready = Some(payloads.clone());
                payloads
            },
            ViewState::Loading => match &self.last_ready {
                Some(previous) => previous.clone(),
                None => return ViewState::Loading,
            },
            ViewState::Error(err) => return ViewState::Error(err),
        };

        match derive_view(self.route, &payloads, search) {
            Ok(data) => ViewState::Ready(data),
            Err(err) => ViewState::Error(err),
        }
    }

    /// Start a refetch of every key the active route depends on
    pub fn refresh<F: Fetcher>(&self, cache: &QueryCache<F>) {
        for key in self.route.dependencies() {
            cache.invalidate(&key);
        }
    }
}
