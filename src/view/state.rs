use crate::models::search::ResultSet;
use crate::models::trip::TripResult;

/// Lifecycle of the primary trip search for the current query.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Loaded(ResultSet),
    Failed(String),
}

/// Lifecycle of the secondary itinerary enhancement. Each variant carries the
/// slug it concerns.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnhancementState {
    #[default]
    Idle,
    Enhancing(String),
    Done(String),
    Failed(String),
}

/// Everything a search view renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub query: Option<String>,
    pub search: SearchState,
    pub selection: Option<String>,
    pub enhancement: EnhancementState,
}

impl ViewState {
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn results(&self) -> Option<&ResultSet> {
        match &self.search {
            SearchState::Loaded(results) => Some(results),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.search, SearchState::Searching)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.search {
            SearchState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_enhancing(&self) -> bool {
        matches!(self.enhancement, EnhancementState::Enhancing(_))
    }

    pub fn selected_trip(&self) -> Option<&TripResult> {
        let slug = self.selection.as_deref()?;
        self.results()?.find(slug)
    }

    /// Selected trip, else the first trip of the loaded set.
    pub fn displayed_trip(&self) -> Option<&TripResult> {
        self.selected_trip()
            .or_else(|| self.results().and_then(|results| results.trips.first()))
    }
}
