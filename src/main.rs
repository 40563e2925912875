use std::sync::Arc;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, warn};
use trip_explorer::config::ClientConfig;
use trip_explorer::models::media::DEFAULT_VIDEO_QUERY;
use trip_explorer::services::api_client::BackendClient;
use trip_explorer::services::distance_service::{distance_km, Coordinates, DistanceService};
use trip_explorer::view::session::{SearchSession, SessionSettings};

#[derive(Parser)]
#[command(name = "trip-explorer", about = "Weekend trip ideas from the travel backend")]
struct Cli {
    /// Backend base URL (overrides TRAVEL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search trips and show the itinerary panel
    Search {
        query: String,
        /// Focus this trip instead of the first result
        #[arg(long)]
        pick: Option<String>,
        /// Your position as "lat,lon", for the route distance
        #[arg(long)]
        from: Option<Coordinates>,
        /// Try a failed search again this many times
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Destination name suggestions for a prefix
    Suggest { prefix: String },
    /// Catalogue details of one destination
    Destination { slug: String },
    /// Current background image and video
    Background,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url.as_deref() {
        config = config.with_api_base(api_url)?;
    }
    let client = BackendClient::new(config.clone())?;

    match cli.command {
        Command::Search {
            query,
            pick,
            from,
            retries,
        } => {
            let backend = Arc::new(client);
            let settings = SessionSettings {
                enhance_delay: config.enhance_delay,
            };
            let mut session = SearchSession::new(backend.clone(), backend, settings);

            session.set_query(Some(&query));
            session.settle().await;
            for attempt in 1..=retries {
                if !session.retry() {
                    break;
                }
                warn!("Search failed, retrying ({} of {})", attempt, retries);
                session.settle().await;
            }
            if let Some(slug) = pick.as_deref() {
                if !session.select_trip(slug) {
                    warn!("No trip '{}' in the results, keeping the first one", slug);
                }
                session.settle().await;
            }

            let distance = match (from, session.panel().trip()) {
                (Some(origin), Some(trip)) => {
                    let http_client = reqwest::Client::builder()
                        .timeout(config.request_timeout)
                        .build()?;
                    let geocoder = DistanceService::new(http_client, config.geocoder_base.clone());
                    match geocoder.geocode(&trip.location).await {
                        Ok(Some(destination)) => Some(distance_km(origin, destination)),
                        Ok(None) => None,
                        Err(e) => {
                            warn!("Failed to geocode destination: {}", e);
                            None
                        }
                    }
                }
                _ => None,
            };

            print!("{}", session.panel().with_distance(distance));
            session.shutdown();
        }
        Command::Suggest { prefix } => {
            for suggestion in client.suggest(&prefix).await? {
                println!("{}", suggestion);
            }
        }
        Command::Destination { slug } => {
            let destination = client.destination(&slug).await?;
            println!("{}", serde_json::to_string_pretty(&destination)?);
        }
        Command::Background => {
            match client.background_image().await {
                Ok(image) => println!("{}", serde_json::to_string_pretty(&image)?),
                Err(e) => warn!("No background image: {}", e),
            }
            let video = client.background_video(DEFAULT_VIDEO_QUERY).await;
            println!("{}", serde_json::to_string_pretty(&video)?);
        }
    }

    Ok(())
}
