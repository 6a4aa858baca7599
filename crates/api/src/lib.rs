//! # Rota API
//!
//! Local HTTP surface for the rotation schedule manager. Every operation of
//! the schedule controller (editing the form, submitting, rotating, deleting)
//! is exposed as a JSON endpoint so any front end can drive it.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Lock the shared controller and call one operation
//! - **Middleware**: Map controller errors to HTTP responses
//! - **Config**: Handle environment and application configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers that drive the schedule controller
pub mod handlers;
/// Error mapping for handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{http::HeaderValue, Router};
use eyre::Result;
use rota_core::{store::KeyValueStore, RotaError, RotaResult, RotationController};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Storage backend shared with the controller.
pub type SharedStore = Arc<dyn KeyValueStore + Send + Sync>;

/// Shared application state that is accessible to all request handlers
///
/// The controller sits behind a mutex so requests are applied one at a time,
/// each running to completion before the next starts.
pub struct ApiState {
    controller: Mutex<RotationController<SharedStore>>,
}

impl ApiState {
    /// Loads the schedule list from `store` and wraps it for sharing.
    pub fn new(store: SharedStore) -> Arc<Self> {
        Arc::new(Self {
            controller: Mutex::new(RotationController::new(store)),
        })
    }

    /// Locks the controller for one operation.
    pub fn controller(&self) -> RotaResult<MutexGuard<'_, RotationController<SharedStore>>> {
        self.controller
            .lock()
            .map_err(|_| RotaError::Internal("schedule controller lock poisoned".to_string()))
    }
}

/// Builds the application router with all routes attached to `state`
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Schedule list, rotation and deletion
        .merge(routes::schedule::routes())
        // Create/edit form
        .merge(routes::form::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and storage
///
/// Initializes logging, loads the schedules from `store`, configures routes
/// and serves until the process is stopped.
pub async fn start_server(config: config::ApiConfig, store: SharedStore) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = ApiState::new(store);
    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect::<Vec<_>>();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
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
