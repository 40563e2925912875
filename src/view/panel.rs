use crate::models::itinerary::{Itinerary, ItineraryDay};
use crate::models::trip::TripResult;
use crate::view::state::{SearchState, ViewState};
use std::fmt;

pub const LANDING_TITLE: &str = "Discover India";
pub const LANDING_SUBTITLE: &str = "Select a destination to explore";
pub const NO_RESULTS_MESSAGE: &str =
    "I couldn't find a direct match for that destination. Try searching for \"Goa\" or \"Jaipur\".";
pub const ENHANCING_MESSAGE: &str = "Enhancing accessibility with AI...";

/// What the search view shows for a given state.
#[derive(Debug, PartialEq)]
pub enum Panel<'a> {
    Landing,
    Loading { query: &'a str },
    Failed { query: &'a str, message: &'a str },
    NoResults { query: &'a str },
    Trip(TripPanel<'a>),
}

#[derive(Debug, PartialEq)]
pub struct TripPanel<'a> {
    pub query: &'a str,
    pub trip: &'a TripResult,
    pub enhancing: bool,
    /// Hidden while an enhancement is running.
    pub itinerary: Option<&'a Itinerary>,
    /// Only offered once a trip is explicitly selected.
    pub route: Option<RouteOverlay<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct RouteOverlay<'a> {
    pub waypoints: &'a [String],
    pub distance_km: Option<u32>,
}

impl<'a> Panel<'a> {
    pub fn from_state(state: &'a ViewState) -> Self {
        let Some(query) = state.query() else {
            return Panel::Landing;
        };

        match &state.search {
            SearchState::Idle | SearchState::Searching => Panel::Loading { query },
            SearchState::Failed(message) => Panel::Failed {
                query,
                message: message.as_str(),
            },
            SearchState::Loaded(results) if results.is_empty() => Panel::NoResults { query },
            SearchState::Loaded(_) => match state.displayed_trip() {
                Some(trip) => {
                    let enhancing = state.is_enhancing();
                    let itinerary = if enhancing {
                        None
                    } else {
                        trip.itinerary.as_ref()
                    };
                    let route = state.selection().and_then(|_| {
                        trip.itinerary
                            .as_ref()
                            .and_then(|itinerary| itinerary.waypoints.as_deref())
                            .map(|waypoints| RouteOverlay {
                                waypoints,
                                distance_km: None,
                            })
                    });

                    Panel::Trip(TripPanel {
                        query,
                        trip,
                        enhancing,
                        itinerary,
                        route,
                    })
                }
                None => Panel::NoResults { query },
            },
        }
    }

    /// Attaches the traveller's distance to the route overlay, if one is shown.
    pub fn with_distance(mut self, distance_km: Option<u32>) -> Self {
        if let Panel::Trip(TripPanel {
            route: Some(route), ..
        }) = &mut self
        {
            route.distance_km = distance_km;
        }
        self
    }

    pub fn trip(&self) -> Option<&'a TripResult> {
        match self {
            Panel::Trip(panel) => Some(panel.trip),
            _ => None,
        }
    }
}

impl fmt::Display for Panel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Landing => {
                writeln!(f, "{}", LANDING_TITLE)?;
                writeln!(f, "{}", LANDING_SUBTITLE)
            }
            Panel::Loading { query } => writeln!(f, "Finding trip ideas for \"{}\"...", query),
            Panel::Failed { query, message } => {
                writeln!(f, "{}", query)?;
                writeln!(f, "{}", message)
            }
            Panel::NoResults { query } => {
                writeln!(f, "{}", query)?;
                writeln!(f, "{}", NO_RESULTS_MESSAGE)
            }
            Panel::Trip(panel) => write!(f, "{}", panel),
        }
    }
}

impl fmt::Display for TripPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trip = self.trip;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "Customized Itinerary")?;
        writeln!(f)?;
        writeln!(f, "== {} ({})", trip.title, trip.location)?;
        if !trip.description.is_empty() {
            writeln!(f, "{}", trip.description)?;
        }

        let mut facts = Vec::new();
        if !trip.price.is_empty() {
            facts.push(format!("Price: {}", trip.price));
        }
        if !trip.duration.is_empty() {
            facts.push(format!("Duration: {}", trip.duration));
        }
        if let Some(rating) = trip.rating {
            facts.push(format!("Rating: {:.1}", rating));
        }
        if !facts.is_empty() {
            writeln!(f, "{}", facts.join(" | "))?;
        }
        if !trip.attractions.is_empty() {
            writeln!(f, "Attractions: {}", trip.attractions.join(", "))?;
        }

        if self.enhancing {
            writeln!(f)?;
            writeln!(f, "* {}", ENHANCING_MESSAGE)?;
        }

        if let Some(itinerary) = self.itinerary {
            writeln!(f)?;
            write_itinerary(f, itinerary)?;
        }

        if let Some(route) = &self.route {
            writeln!(f)?;
            match route.distance_km {
                Some(km) => writeln!(f, "Suggested Route ({} km from you)", km)?,
                None => writeln!(f, "Suggested Route")?,
            }
            let mut stops = vec!["Start".to_string()];
            stops.extend(
                route
                    .waypoints
                    .iter()
                    .enumerate()
                    .map(|(i, waypoint)| format!("{}. {}", i + 1, waypoint)),
            );
            writeln!(f, "{}", stops.join(" -> "))?;
        }
        Ok(())
    }
}

fn write_itinerary(f: &mut fmt::Formatter<'_>, itinerary: &Itinerary) -> fmt::Result {
    let header = if itinerary.header.is_empty() {
        itinerary.intro.as_deref().unwrap_or_default()
    } else {
        itinerary.header.as_str()
    };
    if !header.is_empty() {
        writeln!(f, "{}", header)?;
    }

    for day in &itinerary.days {
        write_day(f, day)?;
    }

    if itinerary.days.is_empty() {
        // Flat single-day layout from older generator responses.
        for (label, text) in [
            ("Morning", &itinerary.morning),
            ("Afternoon", &itinerary.afternoon),
            ("Evening", &itinerary.evening),
        ] {
            if let Some(text) = text {
                writeln!(f, "  {}: {}", label, text)?;
            }
        }
    }

    if !itinerary.footer.is_empty() {
        writeln!(f)?;
        writeln!(f, "{}", itinerary.footer)?;
    }
    Ok(())
}

fn write_day(f: &mut fmt::Formatter<'_>, day: &ItineraryDay) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "[{}] {}", day.day_label, day.title)?;
    if !day.subtitle.is_empty() {
        writeln!(f, "  {}", day.subtitle)?;
    }
    for (label, points) in [
        ("Morning", &day.morning),
        ("Afternoon", &day.afternoon),
        ("Evening", &day.evening),
    ] {
        if points.is_empty() {
            continue;
        }
        writeln!(f, "  {}", label)?;
        for point in points {
            writeln!(f, "    - {}", point)?;
        }
    }
    Ok(())
}
