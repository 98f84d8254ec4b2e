//! Service bootstrap
//!
//! Wires configuration, tracing, the pet store, the business service and the
//! HTTP routes together, then hands the router to [`Server`].

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::{
    config::Config,
    error::Result,
    health::health,
    observability::{init_tracing, shutdown_tracing},
    pets::{Service, Storer},
    router::pets_router,
    server::Server,
    stores::MemoryStore,
};

/// A configured, not yet running, pets service.
pub struct Application {
    config: Config,
    storer: Arc<dyn Storer>,
}

impl Application {
    /// Loads configuration from the usual sources and builds the application.
    pub fn load() -> Result<Self> {
        Ok(Self::new(Config::load()?))
    }

    /// Builds the application with the in-memory store, seeded from config.
    pub fn new(config: Config) -> Self {
        let storer: Arc<dyn Storer> = Arc::new(MemoryStore::with_seed(config.store.seed.clone()));
        Self { config, storer }
    }

    /// Replaces the store adapter.
    pub fn with_storer(mut self, storer: Arc<dyn Storer>) -> Self {
        self.storer = storer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pets routes plus the liveness check, without server middleware.
    pub fn router(&self) -> Router {
        let service = Arc::new(Service::new(Arc::clone(&self.storer)));

        let health_routes = Router::new()
            .route("/health", get(health))
            .with_state(Arc::new(self.config.clone()));

        pets_router(service).merge(health_routes)
    }

    /// Initializes tracing and serves until a shutdown signal arrives.
    pub async fn run(self) -> Result<()> {
        init_tracing(&self.config)?;

        log_startup(&self.config);

        let router = self.router();
        let result = Server::new(self.config).serve(router).await;

        if let Err(e) = &result {
            tracing::error!(error = %e, "pets service stopped with an error");
        }

        shutdown_tracing();

        result
    }
}

fn log_startup(config: &Config) {
    tracing::info!(
        service = %config.service.name,
        version = crate::VERSION,
        environment = %config.service.environment,
        seeded_pets = config.store.seed.len(),
        "starting pets service"
    );
}
