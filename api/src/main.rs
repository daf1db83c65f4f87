//! Pollster API Server
//!
//! Poll questions, voting, user accounts and a paginated view over an
//! upstream JSON feed. Uses hexagonal (ports & adapters) architecture for
//! clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
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
mod pages;

#[cfg(test)]
mod test_utils;


use adapters::{
    HttpFeedClient, PostgresChoiceRepository, PostgresIdentityProvider, PostgresQuestionRepository,
};
use app::{AuthService, ExternalFeedService, PollService};
use config::Config;
use domain::ports::{ChoiceRepository, FeedClient, IdentityProvider, QuestionRepository};

pub type DynPollService = PollService<dyn QuestionRepository, dyn ChoiceRepository>;
pub type DynAuthService = AuthService<dyn IdentityProvider>;
pub type DynFeedService = ExternalFeedService<dyn FeedClient>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub poll_service: Arc<DynPollService>,
    pub auth_service: Arc<DynAuthService>,
    pub feed_service: Arc<DynFeedService>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    // Credential endpoints, rate limited when enabled
    let mut account_routes = Router::new()
        .route(
            "/register/",
            get(handlers::register_form).post(handlers::register),
        )
        .route("/login/", get(handlers::login_form).post(handlers::login));

    if state.config.rate_limit_enabled {
        // 2 req/sec sustained, burst of 5, keyed on the socket peer address
        match GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
        {
            Some(config) => {
                account_routes = account_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => tracing::warn!("Invalid rate limit settings, account routes are unlimited"),
        }
    }

    Router::new()
        // Health check (no session handling)
        .route("/health", get(health))
        .merge(
            Router::new()
                .route("/", get(handlers::index))
                .route("/:question_id/", get(handlers::detail))
                .route("/:question_id/results/", get(handlers::results))
                .route("/:question_id/vote/", post(handlers::vote))
                .route("/external-data/", get(handlers::external_data))
                .merge(account_routes)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::optional_session,
                )),
        )
        // Session required
        .merge(
            Router::new()
                .route("/logout/", get(handlers::logout))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::require_session,
                )),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pollster_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pollster API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let question_repo: Arc<dyn QuestionRepository> =
        Arc::new(PostgresQuestionRepository::new(db.clone()));
    let choice_repo: Arc<dyn ChoiceRepository> =
        Arc::new(PostgresChoiceRepository::new(db.clone()));
    let identity: Arc<dyn IdentityProvider> = Arc::new(PostgresIdentityProvider::new(
        db.clone(),
        config.session_ttl,
    ));
    let feed_client: Arc<dyn FeedClient> = Arc::new(
        HttpFeedClient::new(config.feed_url.clone(), config.feed_timeout)
            .context("Failed to build upstream feed client")?,
    );

    // Create app state
    let state = AppState {
        poll_service: Arc::new(PollService::new(question_repo, choice_repo)),
        auth_service: Arc::new(AuthService::new(identity)),
        feed_service: Arc::new(ExternalFeedService::new(feed_client)),
        config: config.clone(),
    };

    let app = router(state);

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
    .await
    .context("Server error")?;

    Ok(())
}
