//! HTTP server with graceful shutdown

use axum::http::StatusCode;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    config::Config,
    error::Result,
    middleware::{
        request_id_header, request_id_layer, request_id_propagation_layer,
        sensitive_headers_layer,
    },
};

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the server with the given router until a shutdown signal arrives
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.service.port));

        tracing::info!(service = %self.config.service.name, %addr, "starting server");

        let app = self.apply_middleware(app)?;

        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(%addr, "server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");

        Ok(())
    }

    /// Wraps the router in the configured middleware stack.
    ///
    /// Layers added last run first, so CORS is outermost and panic recovery
    /// sits closest to the handlers.
    pub fn apply_middleware(&self, app: Router) -> Result<Router> {
        let middleware = &self.config.middleware;
        let request_id = request_id_header(&middleware.request_id_header)?;

        self.log_middleware_config();

        let app = if middleware.catch_panic {
            app.layer(CatchPanicLayer::new())
        } else {
            app
        };

        let app = app
            .layer(request_id_propagation_layer(request_id.clone()))
            .layer(request_id_layer(request_id))
            .layer(sensitive_headers_layer())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            )
            .layer(RequestBodyLimitLayer::new(middleware.body_limit_bytes()))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                self.config.service.timeout(),
            ));

        let app = if middleware.compression {
            app.layer(CompressionLayer::new())
        } else {
            app
        };

        Ok(match self.build_cors_layer() {
            Some(cors) => app.layer(cors),
            None => app,
        })
    }

    fn log_middleware_config(&self) {
        let middleware = &self.config.middleware;
        tracing::info!(
            catch_panic = middleware.catch_panic,
            compression = middleware.compression,
            cors_mode = %middleware.cors_mode,
            body_limit_mb = middleware.body_limit_mb,
            request_id_header = %middleware.request_id_header,
            timeout_secs = self.config.service.timeout_secs,
            "middleware configuration"
        );
    }

    /// Build CORS layer based on configuration; `None` when disabled
    fn build_cors_layer(&self) -> Option<CorsLayer> {
        match self.config.middleware.cors_mode.as_str() {
            "permissive" => Some(CorsLayer::permissive()),
            "restrictive" => Some(CorsLayer::new()),
            "disabled" => None,
            other => {
                tracing::warn!(cors_mode = %other, "unknown CORS mode, defaulting to permissive");
                Some(CorsLayer::permissive())
            }
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "unable to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("shutdown signal received, draining requests");
}
