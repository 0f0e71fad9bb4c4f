use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use helpnet_api::{AppState, AppStateInner, locate, requests, users};
use helpnet_geo::IpLocator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpnet=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("HELPNET_DB_PATH").unwrap_or_else(|_| "helpnet.db".into());
    let host = std::env::var("HELPNET_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("HELPNET_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let geoip_url = std::env::var("HELPNET_GEOIP_URL")
        .unwrap_or_else(|_| helpnet_geo::locate::DEFAULT_ENDPOINT.into());
    let web_dir = std::env::var("HELPNET_WEB_DIR")
        .unwrap_or_else(|_| "crates/helpnet-server/web".into());

    // Init database
    let db = helpnet_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let locator = IpLocator::new(geoip_url)?;
    let app_state: AppState = Arc::new(AppStateInner { db, locator });

    // Routes
    let api_routes = Router::new()
        .route("/users", post(users::register))
        .route("/requests", post(requests::create_request))
        .route("/requests/nearby", get(requests::find_nearby))
        .route("/locate", get(locate::locate))
        .with_state(app_state);

    let app = Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&web_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("HelpNet server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
