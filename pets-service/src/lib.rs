//! # pets-service
//!
//! CRUD HTTP service for pets. Every route runs the same three-stage
//! pipeline: a decoder extracts a typed request, an endpoint calls the
//! business service, and an encoder writes the JSON response envelope.
//!
//! ## Features
//!
//! - **Typed pipeline**: decoder, endpoint and encoder are tied together by
//!   associated types, so mismatched stages fail to compile
//! - **Business rules**: validation, search defaults and not-found policies
//!   live in [`pets::Service`], independent of HTTP
//! - **Pluggable storage**: any [`pets::Storer`]; an in-memory store is built in
//! - **Middleware stack**: request ids, panic recovery, body size limits,
//!   timeouts, compression, CORS
//! - **Configuration**: defaults, TOML files and `PETS_` environment variables
//! - **Graceful shutdown**: SIGTERM and SIGINT drain in-flight requests
//!
//! ## Example
//!
//! ```rust,no_run
//! use pets_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!
//!     Application::new(config)
//!         .with_storer(std::sync::Arc::new(MemoryStore::with_seed(["drila"])))
//!         .run()
//!         .await
//! }
//! ```

pub mod application;
pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod observability;
pub mod pets;
pub mod router;
pub mod server;
pub mod stores;
pub mod web;

/// Crate version reported at startup and by `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::Application;
    pub use crate::config::{Config, MiddlewareConfig, ServiceConfig, StoreConfig};
    pub use crate::error::{Error, Result};
    pub use crate::health::health;
    pub use crate::observability::{init_tracing, shutdown_tracing};
    pub use crate::pets::{
        NewPet, Pet, PetError, PetId, QueryFilter, Service, StoreError, StoreResult, Storer,
        UpdatePet,
    };
    pub use crate::router::pets_router;
    pub use crate::server::Server;
    pub use crate::stores::MemoryStore;
    pub use crate::web::{Handler, ResponseEnvelope};

    pub use axum::{
        extract::{Path, Query, State},
        response::{IntoResponse, Response},
        routing::{delete, get, post, put},
        Json, Router,
    };
}
