use crate::models::trip::TripResult;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
}

/// Raw body of a `POST /search` response.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    // Some backend builds omit the list entirely when nothing matched.
    #[serde(default)]
    pub trips: Option<Vec<TripResult>>,
}

/// The full answer to one search query, as held by a session.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub query: Option<String>,
    pub trips: Vec<TripResult>,
}

impl SearchResponse {
    /// Normalizes the response into a result set whose slugs are present and
    /// unique. Missing slugs are derived from the trip title; derived and
    /// repeated slugs get a `-N` suffix that no other trip uses.
    pub fn into_result_set(self) -> ResultSet {
        let trips = self.trips.unwrap_or_default();
        let reserved: HashSet<String> = trips
            .iter()
            .filter(|trip| !trip.slug.is_empty())
            .map(|trip| trip.slug.clone())
            .collect();

        let mut seen = HashSet::new();
        let trips = trips
            .into_iter()
            .map(|mut trip| {
                if trip.slug.is_empty() || seen.contains(&trip.slug) {
                    trip.slug = unique_slug(&trip, &reserved, &seen);
                }
                seen.insert(trip.slug.clone());
                trip
            })
            .collect();

        ResultSet {
            query: self.query,
            trips,
        }
    }
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn first_slug(&self) -> Option<&str> {
        self.trips.first().map(|trip| trip.slug.as_str())
    }

    pub fn find(&self, slug: &str) -> Option<&TripResult> {
        self.trips.iter().find(|trip| trip.slug == slug)
    }

    pub fn position(&self, slug: &str) -> Option<usize> {
        self.trips.iter().position(|trip| trip.slug == slug)
    }
}

fn unique_slug(trip: &TripResult, reserved: &HashSet<String>, seen: &HashSet<String>) -> String {
    let base = if trip.slug.is_empty() {
        generate_slug(&trip.title)
    } else {
        trip.slug.clone()
    };
    let base = if base.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        base
    };

    // A derived slug must not take one the backend assigned to another trip;
    // a repeated backend slug keeps its own base but no one else's.
    let derived = trip.slug.is_empty();
    let taken = |candidate: &String| {
        seen.contains(candidate) || ((derived || *candidate != base) && reserved.contains(candidate))
    };

    let mut candidate = base.clone();
    let mut suffix = 2;
    while taken(&candidate) {
        candidate = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    candidate
}

const FALLBACK_SLUG: &str = "trip";

/// URL-friendly slug: lowercase, runs of anything outside `[a-z0-9]` become `-`.
pub fn generate_slug(name: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let pattern = NON_ALNUM
        .get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is a valid regex"));

    pattern
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
