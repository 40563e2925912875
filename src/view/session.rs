use crate::error::ApiError;
use crate::models::itinerary::{Itinerary, ItineraryRequest};
use crate::models::search::ResultSet;
use crate::services::interface::{ItineraryGenerator, TripSearch};
use crate::view::panel::Panel;
use crate::view::reducer::{initial_selection, merge_itinerary};
use crate::view::state::{EnhancementState, SearchState, ViewState};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to load trip ideas.";
const ENHANCE_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Quiet period between a selection change and the itinerary request.
    pub enhance_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            enhance_delay: Duration::from_millis(ENHANCE_DELAY_MS),
        }
    }
}

/// Completion notices sent back by the tasks a session spawns.
#[derive(Debug)]
pub(crate) enum SessionEvent {
    SearchFinished {
        generation: u64,
        outcome: Result<ResultSet, ApiError>,
    },
    EnhanceDue {
        ticket: u64,
        slug: String,
    },
    EnhanceFinished {
        generation: u64,
        slug: String,
        outcome: Result<Itinerary, ApiError>,
    },
}

/// Search-and-itinerary state machine behind the trip explorer view.
///
/// The owner feeds query changes in with [`SearchSession::set_query`] and
/// drives completions with [`SearchSession::process_next`] or
/// [`SearchSession::settle`]. Network calls and the enhancement debounce run
/// as spawned tasks that report back over a channel, so all state changes
/// happen on the owner's task.
///
/// Every search is tagged with a generation; responses from an older
/// generation are dropped. At most one itinerary request is outstanding at a
/// time; a request that becomes due meanwhile is deferred until it returns.
pub struct SearchSession {
    search: Arc<dyn TripSearch>,
    generator: Arc<dyn ItineraryGenerator>,
    settings: SessionSettings,
    state: ViewState,
    generation: u64,
    in_flight: usize,
    enhancing: Option<String>,
    deferred: Option<String>,
    next_ticket: u64,
    debounce: Option<(u64, CancellationToken)>,
    shutdown: CancellationToken,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SearchSession {
    pub fn new(
        search: Arc<dyn TripSearch>,
        generator: Arc<dyn ItineraryGenerator>,
        settings: SessionSettings,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            search,
            generator,
            settings,
            state: ViewState::default(),
            generation: 0,
            in_flight: 0,
            enhancing: None,
            deferred: None,
            next_ticket: 0,
            debounce: None,
            shutdown: CancellationToken::new(),
            events_tx,
            events_rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn panel(&self) -> Panel<'_> {
        Panel::from_state(&self.state)
    }

    /// Reacts to a new search term. An empty term means no active search.
    ///
    /// Selection is cleared before anything else happens; a pending
    /// enhancement debounce is cancelled and a new generation starts, so
    /// responses for the previous term can no longer land.
    pub fn set_query(&mut self, query: Option<&str>) {
        let query = query
            .filter(|q| !q.trim().is_empty())
            .map(str::to_string);
        if query == self.state.query {
            return;
        }

        self.state.selection = None;
        self.cancel_debounce();
        self.deferred = None;
        self.generation += 1;
        // A request from the previous query may still be running.
        self.state.enhancement = match &self.enhancing {
            Some(slug) => EnhancementState::Enhancing(slug.clone()),
            None => EnhancementState::Idle,
        };
        self.state.query = query.clone();

        match query {
            Some(query) => {
                self.state.search = SearchState::Searching;
                self.dispatch_search(query);
            }
            None => {
                debug!("Search cleared");
                self.state.search = SearchState::Idle;
            }
        }
    }

    /// Fetches the current query again after a failed search. Does nothing in
    /// any other state.
    pub fn retry(&mut self) -> bool {
        let SearchState::Failed(_) = self.state.search else {
            return false;
        };
        let Some(query) = self.state.query.clone() else {
            return false;
        };

        info!("Retrying search for '{}'", query);
        self.generation += 1;
        self.state.search = SearchState::Searching;
        self.dispatch_search(query);
        true
    }

    /// Focuses another trip of the loaded result set. Returns false when the
    /// slug is unknown or already selected.
    pub fn select_trip(&mut self, slug: &str) -> bool {
        let known = self
            .state
            .results()
            .is_some_and(|results| results.find(slug).is_some());
        if !known || self.state.selection() == Some(slug) {
            return false;
        }

        self.state.selection = Some(slug.to_string());
        self.schedule_enhancement();
        true
    }

    /// True when no request or debounce this session cares about is pending.
    pub fn is_settled(&self) -> bool {
        self.shutdown.is_cancelled() || (self.in_flight == 0 && self.debounce.is_none())
    }

    /// Waits for the next completion and applies it. Returns false once the
    /// session has been shut down.
    pub async fn process_next(&mut self) -> bool {
        if self.shutdown.is_cancelled() {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Applies completions until the session is settled.
    pub async fn settle(&mut self) {
        while !self.is_settled() {
            if !self.process_next().await {
                break;
            }
        }
    }

    /// Cancels pending debounce timers. Requests already sent are not
    /// aborted; their results are dropped.
    pub fn shutdown(&mut self) {
        self.cancel_debounce();
        self.shutdown.cancel();
    }

    pub(crate) fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SearchFinished {
                generation,
                outcome,
            } => self.on_search_finished(generation, outcome),
            SessionEvent::EnhanceDue { ticket, slug } => self.on_enhance_due(ticket, slug),
            SessionEvent::EnhanceFinished {
                generation,
                slug,
                outcome,
            } => self.on_enhance_finished(generation, slug, outcome),
        }
    }

    fn dispatch_search(&mut self, query: String) {
        let generation = self.generation;
        let search = Arc::clone(&self.search);
        let events = self.events_tx.clone();

        info!("Searching trips for '{}'", query);
        self.in_flight += 1;
        tokio::spawn(async move {
            let outcome = search.search(&query).await;
            let _ = events.send(SessionEvent::SearchFinished {
                generation,
                outcome,
            });
        });
    }

    fn on_search_finished(&mut self, generation: u64, outcome: Result<ResultSet, ApiError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if generation != self.generation {
            debug!("Discarding search response from superseded generation {}", generation);
            return;
        }

        match outcome {
            Ok(results) => {
                info!(
                    "Loaded {} trips for '{}'",
                    results.trips.len(),
                    self.state.query().unwrap_or_default()
                );
                self.state.selection = initial_selection(&results);
                self.state.search = SearchState::Loaded(results);
                self.schedule_enhancement();
            }
            Err(e) => {
                error!("Failed to fetch trips: {}", e);
                self.state.selection = None;
                self.state.search = SearchState::Failed(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn schedule_enhancement(&mut self) {
        self.cancel_debounce();
        let Some(slug) = self.state.selection.clone() else {
            return;
        };

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let token = self.shutdown.child_token();
        let delay = self.settings.enhance_delay;
        let events = self.events_tx.clone();

        let timer = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = timer.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = events.send(SessionEvent::EnhanceDue { ticket, slug });
                }
            }
        });
        self.debounce = Some((ticket, token));
    }

    fn cancel_debounce(&mut self) {
        if let Some((_, token)) = self.debounce.take() {
            token.cancel();
        }
    }

    fn on_enhance_due(&mut self, ticket: u64, slug: String) {
        match &self.debounce {
            Some((current, token)) if *current == ticket && !token.is_cancelled() => {}
            _ => {
                debug!("Ignoring superseded enhancement timer for '{}'", slug);
                return;
            }
        }
        self.debounce = None;

        if self.state.selection() != Some(slug.as_str()) || self.state.results().is_none() {
            return;
        }
        if self.enhancing.is_some() {
            debug!("Enhancement already running, deferring '{}'", slug);
            self.deferred = Some(slug);
            return;
        }
        self.dispatch_enhancement(slug);
    }

    fn dispatch_enhancement(&mut self, slug: String) {
        let Some(trip) = self.state.results().and_then(|results| results.find(&slug)) else {
            return;
        };
        let query = self.state.query.clone();
        let Some(destination) = trip.enhancement_target(query.as_deref()) else {
            debug!("Nothing to describe trip '{}', skipping enhancement", slug);
            return;
        };
        let request = ItineraryRequest {
            query: query.unwrap_or_else(|| destination.clone()),
            destination,
        };

        info!("Generating itinerary for '{}' ({})", slug, request.destination);
        self.enhancing = Some(slug.clone());
        self.state.enhancement = EnhancementState::Enhancing(slug.clone());
        self.in_flight += 1;

        let generation = self.generation;
        let generator = Arc::clone(&self.generator);
        let events = self.events_tx.clone();
        let token = self.shutdown.child_token();
        tokio::spawn(async move {
            let outcome = generator.generate(&request).await;
            if token.is_cancelled() {
                debug!("Session closed, dropping itinerary for '{}'", slug);
                return;
            }
            let _ = events.send(SessionEvent::EnhanceFinished {
                generation,
                slug,
                outcome,
            });
        });
    }

    fn on_enhance_finished(
        &mut self,
        generation: u64,
        slug: String,
        outcome: Result<Itinerary, ApiError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.enhancing = None;

        let same_generation = generation == self.generation;
        let still_selected = same_generation && self.state.selection() == Some(slug.as_str());
        let tracked = self.state.enhancement == EnhancementState::Enhancing(slug.clone());

        if !still_selected {
            match &outcome {
                Ok(_) => debug!("Discarding itinerary for '{}': selection moved on", slug),
                Err(e) => debug!("Itinerary for '{}' failed after selection moved on: {}", slug, e),
            }
            if tracked {
                self.state.enhancement = EnhancementState::Idle;
            }
        } else {
            match outcome {
                Ok(itinerary) => {
                    let search = std::mem::take(&mut self.state.search);
                    self.state.search = match search {
                        SearchState::Loaded(results) => {
                            SearchState::Loaded(merge_itinerary(results, &slug, itinerary))
                        }
                        other => other,
                    };
                    self.state.enhancement = EnhancementState::Done(slug);
                }
                Err(e) => {
                    warn!("AI itinerary generation failed for '{}': {}", slug, e);
                    self.state.enhancement = EnhancementState::Failed(slug);
                }
            }
        }

        if let Some(next) = self.deferred.take() {
            if self.state.selection() == Some(next.as_str()) {
                self.dispatch_enhancement(next);
            }
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
