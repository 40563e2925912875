pub mod api_client;
pub mod distance_service;
pub mod interface;
