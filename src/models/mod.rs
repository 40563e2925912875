pub mod destination;
pub mod itinerary;
pub mod media;
pub mod search;
pub mod trip;
