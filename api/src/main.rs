//! Circle Feed API Server
//!
//! Builds personalized feeds from the post service, shaped by each user's
//! stored preferences and community memberships.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    build_http_client, HttpCommunityService, HttpPostService, HttpUserService,
    PostgresPreferenceRepository,
};
use app::{FeedService, PreferenceService};
use auth::JwtVerifier;
use config::Config;
use domain::ports::{CommunityService, PostService, PreferenceRepository, UserService};

/// Feed service wired to whatever adapters the state was built with
pub type AppFeedService =
    FeedService<dyn PreferenceRepository, dyn PostService, dyn CommunityService, dyn UserService>;

/// Preference service wired to whatever store the state was built with
pub type AppPreferenceService = PreferenceService<dyn PreferenceRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<AppFeedService>,
    pub preference_service: Arc<AppPreferenceService>,
    pub jwt: Arc<JwtVerifier>,
}

impl AppState {
    pub fn new(
        preferences: Arc<dyn PreferenceRepository>,
        posts: Arc<dyn PostService>,
        communities: Arc<dyn CommunityService>,
        users: Arc<dyn UserService>,
        jwt: JwtVerifier,
    ) -> Self {
        Self {
            feed_service: Arc::new(FeedService::new(
                preferences.clone(),
                posts,
                communities,
                users,
            )),
            preference_service: Arc::new(PreferenceService::new(preferences)),
            jwt: Arc::new(jwt),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "feed-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Authenticated routes, mounted under `/api`
fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/feed", get(handlers::get_feed))
        .route("/feed/recommended", get(handlers::get_recommended))
        .route(
            "/feed/preferences",
            get(handlers::get_preferences).put(handlers::update_preferences),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
}

/// Full router: health check, `/api` routes and shared middleware
fn build_router(state: AppState, api: Router<AppState>) -> Router {
    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,circle_feed_api=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads .env, which may set RUST_LOG)
    let config = Config::from_env();
    init_tracing(&config);

    tracing::info!(environment = %config.environment, "Starting feed service...");

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let http = build_http_client(config.upstream_timeout)
        .context("Failed to build HTTP client")?;

    let preferences: Arc<dyn PreferenceRepository> =
        Arc::new(PostgresPreferenceRepository::new(db));
    let posts: Arc<dyn PostService> =
        Arc::new(HttpPostService::new(http.clone(), &config.post_service_url));
    let communities: Arc<dyn CommunityService> = Arc::new(HttpCommunityService::new(
        http.clone(),
        &config.community_service_url,
    ));
    let users: Arc<dyn UserService> =
        Arc::new(HttpUserService::new(http, &config.user_service_url));

    let state = AppState::new(
        preferences,
        posts,
        communities,
        users,
        JwtVerifier::new(&config.jwt_secret),
    );

    // Per-IP rate limit on the API; PeerIpKeyExtractor reads the socket address
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .context("Failed to build rate limit config")?,
    );

    let api = api_routes(&state).layer(GovernorLayer {
        config: governor_config,
    });
    let app = build_router(state, api);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    Ok(())
}
