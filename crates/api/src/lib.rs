//! # Agenda API
//!
//! HTTP surface of the pharmacy agenda: booking creation, the per-professional
//! slot grid, the whole-hour free list and a cache reload hook.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into scheduler calls
//! - **Middleware**: Error mapping shared by every handler
//! - **Config**: Environment driven settings, including the agenda hours
//!
//! Handlers never touch the database directly; they go through
//! [`AppointmentScheduler`], which is generic over the store traits.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use agenda_core::{
    cache::DirectoryCache,
    scheduler::{AppointmentScheduler, SlotGrid},
    store::{BookingStore, Directory},
};
use agenda_db::{DbPool, PgStore};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub scheduler: AppointmentScheduler,
}

impl ApiState {
    /// Wires a scheduler and its directory cache over a single store.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use agenda_api::ApiState;
    /// use agenda_core::{scheduler::SlotGrid, store::MemoryStore};
    ///
    /// let state = Arc::new(ApiState::new(Arc::new(MemoryStore::new()), SlotGrid::default()));
    /// let app = agenda_api::app(state);
    /// # let _ = app;
    /// ```
    pub fn new<S>(store: Arc<S>, grid: SlotGrid) -> Self
    where
        S: BookingStore + Directory + 'static,
    {
        let cache = Arc::new(DirectoryCache::new(store.clone(), store.clone()));
        Self {
            scheduler: AppointmentScheduler::new(store, cache, grid),
        }
    }
}

/// Builds the application router with all routes and the shared state.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking endpoints
        .merge(routes::booking::routes())
        // Slot grid, free hours and cache endpoints
        .merge(routes::agenda::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = agenda_api::config::ApiConfig::from_env()?;
/// let db_pool = agenda_db::create_pool(&config.database_url).await?;
/// agenda_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = Arc::new(PgStore::new(db_pool));
    let state = Arc::new(ApiState::new(store, config.slot_grid));

    // Warm the directory snapshot; a failure here is retried on first use.
    if let Err(err) = state.scheduler.cache().snapshot().await {
        warn!("Initial directory load failed: {}", err);
    }

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed)
}
