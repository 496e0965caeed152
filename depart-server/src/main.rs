use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use depart_server::buffer::BufferConfig;
use depart_server::cache::{CacheConfig, CachedMapsClient};
use depart_server::maps::{MapsClient, MapsConfig, MockOracle};
use depart_server::planner::SearchConfig;
use depart_server::weather::{WeatherClient, WeatherConfig};
use depart_server::web::{AppOracle, AppState, LiveOracle, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("depart_server=info")),
        )
        .init();

    // Live clients when credentials are set, otherwise the built-in mock
    let maps_key = std::env::var("MAPS_API_KEY").ok().filter(|k| !k.is_empty());
    let weather_key = std::env::var("WEATHER_API_KEY")
        .ok()
        .filter(|k| !k.is_empty());

    let (oracle, maps) = match maps_key {
        Some(key) => {
            let client = MapsClient::new(MapsConfig::new(&key))
                .expect("Failed to create maps client");
            let cached = Arc::new(CachedMapsClient::new(client, &CacheConfig::default()));

            let weather = match weather_key {
                Some(key) => Some(Arc::new(
                    WeatherClient::new(WeatherConfig::new(&key))
                        .expect("Failed to create weather client"),
                )),
                None => {
                    eprintln!("Warning: WEATHER_API_KEY not set. Weather buffers disabled.");
                    None
                }
            };

            (
                AppOracle::Live(LiveOracle::new(cached.clone(), weather)),
                Some(cached),
            )
        }
        None => {
            eprintln!("Warning: MAPS_API_KEY not set. Using built-in mock travel times.");
            let mock = match std::env::var("MOCK_ORACLE_MODELS") {
                Ok(path) => MockOracle::from_file(&path)
                    .unwrap_or_else(|e| panic!("Failed to load mock models from {path}: {e}")),
                Err(_) => MockOracle::builtin(),
            };
            (AppOracle::Mock(mock), None)
        }
    };

    let state = AppState::new(oracle, maps, SearchConfig::default(), BufferConfig::default());

    let static_dir =
        std::env::var("STATIC_DIR").unwrap_or_else(|_| "depart-server/static".to_string());
    let app = create_router(state, &static_dir);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Departure Planner listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health  - Health check");
    println!("  GET  /about   - About page");
    println!("  POST /plan    - Plan latest safe departures");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
