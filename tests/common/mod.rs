#![allow(dead_code)]

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

use trip_explorer::error::ApiError;
use trip_explorer::models::itinerary::{Itinerary, ItineraryDay, ItineraryRequest};
use trip_explorer::models::search::ResultSet;
use trip_explorer::models::trip::TripResult;
use trip_explorer::services::interface::{ItineraryGenerator, TripSearch};
use trip_explorer::view::session::{SearchSession, SessionSettings};

// ---------------------------------------------------------------------------
// Mock HTTP backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<String, (u16, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process backend answering canned JSON per path on an ephemeral port.
pub struct MockBackend {
    pub base_url: String,
    state: web::Data<MockState>,
    handle: ServerHandle,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = web::Data::new(MockState::default());
        let data = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind mock backend");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn route(&self, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn respond(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let path = req.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: req.method().to_string(),
        path: path.clone(),
        query: req.query_string().to_string(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let route = state.routes.lock().unwrap().get(&path).cloned();
    match route {
        Some((status, json)) => {
            HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(json)
        }
        None => HttpResponse::NotFound().json(json!({"error": "Not found"})),
    }
}

// ---------------------------------------------------------------------------
// Session doubles
// ---------------------------------------------------------------------------

/// Search double answering from a script; individual queries can be held
/// until released.
#[derive(Default)]
pub struct ScriptedSearch {
    responses: Mutex<HashMap<String, Result<ResultSet, String>>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, query: &str, response: Result<ResultSet, &str>) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), response.map_err(str::to_string));
    }

    pub fn hold(&self, query: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(query.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, query: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(query) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TripSearch for ScriptedSearch {
    async fn search(&self, query: &str) -> Result<ResultSet, ApiError> {
        self.calls.lock().unwrap().push(query.to_string());

        let gate = self.gates.lock().unwrap().get(query).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        let response = self.responses.lock().unwrap().get(query).cloned();
        match response {
            Some(Ok(results)) => Ok(results),
            Some(Err(message)) => Err(ApiError::ResponseError(message)),
            None => Ok(ResultSet {
                query: Some(query.to_string()),
                trips: Vec::new(),
            }),
        }
    }
}

/// Itinerary double keyed by destination. Unscripted destinations get a
/// generic plan without waypoints.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<HashMap<String, Result<Itinerary, String>>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    calls: Mutex<Vec<ItineraryRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, destination: &str, response: Result<Itinerary, &str>) {
        self.responses
            .lock()
            .unwrap()
            .insert(destination.to_string(), response.map_err(str::to_string));
    }

    pub fn hold(&self, destination: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(destination.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, destination: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(destination) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> Vec<ItineraryRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItineraryGenerator for ScriptedGenerator {
    async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary, ApiError> {
        self.calls.lock().unwrap().push(request.clone());

        let gate = self.gates.lock().unwrap().get(&request.destination).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        let response = self.responses.lock().unwrap().get(&request.destination).cloned();
        match response {
            Some(Ok(itinerary)) => Ok(itinerary),
            Some(Err(message)) => Err(ApiError::BackendError(message)),
            None => Ok(plan(&format!("Your {} getaway", request.destination), None)),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const ENHANCE_DELAY: Duration = Duration::from_millis(500);

pub fn session(search: Arc<ScriptedSearch>, generator: Arc<ScriptedGenerator>) -> SearchSession {
    SearchSession::new(
        search,
        generator,
        SessionSettings {
            enhance_delay: ENHANCE_DELAY,
        },
    )
}

pub fn trip(slug: &str, title: &str, location: &str) -> TripResult {
    TripResult {
        id: Some(json!(slug)),
        slug: slug.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        description: format!("{} description", title),
        price: "₹10,000".to_string(),
        duration: "2 Nights / 3 Days".to_string(),
        rating: Some(4.5),
        attractions: vec!["Viewpoint".to_string()],
        image_url: format!("/images/{}.png", slug),
        ..Default::default()
    }
}

pub fn with_route(mut trip: TripResult, waypoints: &[&str]) -> TripResult {
    trip.itinerary = Some(Itinerary {
        header: "Original plan".to_string(),
        waypoints: Some(waypoints.iter().map(|w| w.to_string()).collect()),
        ..Default::default()
    });
    trip
}

pub fn results(query: &str, trips: Vec<TripResult>) -> ResultSet {
    ResultSet {
        query: Some(query.to_string()),
        trips,
    }
}

pub fn plan(header: &str, waypoints: Option<&[&str]>) -> Itinerary {
    Itinerary {
        header: header.to_string(),
        days: vec![ItineraryDay {
            day_label: "Day 1".to_string(),
            title: "Arrival".to_string(),
            subtitle: "Settle in".to_string(),
            morning: vec!["Check in".to_string()],
            afternoon: vec!["Explore the market".to_string()],
            evening: vec!["Dinner by the water".to_string()],
        }],
        footer: "Safe travels".to_string(),
        waypoints: waypoints.map(|points| points.iter().map(|p| p.to_string()).collect()),
        ..Default::default()
    }
}
