//! # breedctl: pet breed catalogue service
//!
//! `breedctl` keeps a catalogue of pet breeds (species, size class, name and the average adult
//! weights of each sex) and exposes it over a small REST API.
//!
//! ## Overview
//!
//! Three engines sit behind the HTTP layer:
//!
//! - **Filtering**: [`db::query`] turns optional filter criteria into one parameterised `SELECT`
//!   with deterministic ordering (name, then id) and optional pagination. Weight bounds match a
//!   breed when *either* sex's average satisfies them.
//! - **Mutation**: [`db::handlers::Breeds`] validates creates, applies partial updates in a single
//!   statement and reports absent rows as not-found.
//! - **Bulk import**: [`import`] parses a CSV source and [`db::handlers::Breeds::import`] upserts
//!   every record inside one transaction. Either all records land or none do.
//!
//! ## Architecture
//!
//! Persistence goes through the [`db::store::BreedStore`] trait. The PostgreSQL store is used in
//! production; the in-memory store keeps identical semantics and backs the test suite and the
//! `memory` backend.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use breedctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = breedctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     breedctl::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations run automatically on startup for the postgres backend:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! breedctl::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod import;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    config::StorageBackend,
    db::store::{BreedStore, in_memory::InMemoryBreedStore, postgres::PgBreedStore},
    openapi::ApiDoc,
};
use anyhow::Context;
use axum::{
    Json, Router,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::BreedId;

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder()
///     .store(Arc::new(InMemoryBreedStore::new()))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn BreedStore>,
    pub config: Config,
}

/// Get the breedctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect to PostgreSQL with the configured pool settings and bring the schema up to date.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let url = config
        .database
        .url
        .as_deref()
        .context("database.url is required for the postgres backend")?;
    let settings = &config.database.pool;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .max_lifetime(settings.max_lifetime())
        .connect(url)
        .await
        .context("Failed to connect to database")?;

    migrator().run(&pool).await.context("Failed to run database migrations")?;
    info!("Database migrations applied");

    Ok(pool)
}

/// Build the store selected by `database.backend`. The pool is returned so it can be closed on
/// shutdown.
async fn setup_store(config: &Config) -> anyhow::Result<(Arc<dyn BreedStore>, Option<PgPool>)> {
    match config.database.backend {
        StorageBackend::Postgres => {
            let pool = setup_database(config).await?;
            Ok((Arc::new(PgBreedStore::new(pool.clone())), Some(pool)))
        }
        StorageBackend::Memory => {
            info!("Using in-memory breed store, data will not survive a restart");
            Ok((Arc::new(InMemoryBreedStore::new()), None))
        }
    }
}

/// Build the HTTP router with every route, the API docs and request tracing.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route(
            "/breeds",
            get(api::handlers::breeds::list_breeds).post(api::handlers::breeds::create_breed),
        )
        .route(
            "/breeds/{id}",
            get(api::handlers::breeds::get_breed)
                .put(api::handlers::breeds::update_breed)
                .delete(api::handlers::breeds::delete_breed),
        )
        .route("/import-breeds", post(api::handlers::import::import_breeds))
        .route("/health", get(api::handlers::health::health))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

pub struct Application {
    router: Router,
    config: Config,
    pool: Option<PgPool>,
}

impl Application {
    /// Create a new application instance backed by the configured store
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting breedctl with configuration: {:#?}", config);

        let (store, pool) = setup_store(&config).await?;
        let mut app = Self::new_with_store(config, store);
        app.pool = pool;
        Ok(app)
    }

    /// Create an application around an already constructed store
    pub fn new_with_store(config: Config, store: Arc<dyn BreedStore>) -> Self {
        let state = AppState::builder().store(store).config(config.clone()).build();
        let router = build_router(state);

        Self {
            router,
            config,
            pool: None,
        }
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Breed catalogue listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{create_test_config, create_test_server, seed_breeds};
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::builder()
            .store(Arc::new(InMemoryBreedStore::new()))
            .config(create_test_config())
            .build()
    }

    #[tokio::test]
    async fn test_docs_are_served() {
        let response = build_router(state())
            .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = build_router(state())
            .oneshot(Request::builder().uri("/cats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test_log::test(tokio::test)]
    async fn test_openapi_json_endpoint() {
        let server = create_test_server(InMemoryBreedStore::new());

        let response = server.get("/openapi.json").await;
        response.assert_status_ok();
        let content = response.text();
        assert!(content.contains("\"openapi\""));
        assert!(content.contains("/import-breeds"));
    }

    #[test_log::test(tokio::test)]
    async fn test_memory_backend_application() {
        let config = create_test_config();
        assert_eq!(config.database.backend, StorageBackend::Memory);

        let server = Application::new(config).await.unwrap().into_test_server();

        server.get("/health").await.assert_status_ok();
        server.get("/breeds").await.assert_status_ok();
    }

    #[test_log::test(tokio::test)]
    async fn test_new_with_store_shares_the_store() {
        let store = InMemoryBreedStore::new();
        seed_breeds(&store).await;

        let server = Application::new_with_store(create_test_config(), Arc::new(store.clone())).into_test_server();

        let breeds: Vec<api::models::breeds::BreedResponse> = server.get("/breeds").add_query_param("species", "cat").await.json();
        assert_eq!(breeds.len(), 4);
        assert_eq!(breeds[0].name, "Abyssinian");
    }
}
