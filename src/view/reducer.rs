use crate::models::itinerary::Itinerary;
use crate::models::search::ResultSet;

/// Slug focused when a result set is freshly loaded.
pub fn initial_selection(results: &ResultSet) -> Option<String> {
    results.first_slug().map(str::to_string)
}

/// Replaces the itinerary of the trip identified by `slug`.
///
/// Waypoints missing from `update` are taken from the trip's previous
/// itinerary. Sibling trips and every other field are left as they were, and
/// an unknown slug returns the set unchanged.
pub fn merge_itinerary(mut results: ResultSet, slug: &str, mut update: Itinerary) -> ResultSet {
    let Some(index) = results.position(slug) else {
        return results;
    };

    let trip = &mut results.trips[index];
    let previous_waypoints = trip
        .itinerary
        .as_mut()
        .and_then(|itinerary| itinerary.waypoints.take());

    if update.waypoints.is_none() {
        update.waypoints = previous_waypoints;
    }
    trip.itinerary = Some(update);
    results
}
