//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all gateway routes
//! - Wire up middleware (tracing, request ID, timeout, body limit, CORS)
//! - Serve with graceful shutdown (Ctrl+C or an external trigger)

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::gateway::GatewayDispatcher;
use crate::http::{cors, handlers};

/// Inbound request bodies have no business being large; every proxied
/// endpoint is a GET.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<GatewayDispatcher>,
    pub config: Arc<GatewayConfig>,
}

/// UUID v4 request IDs for log correlation.
#[derive(Clone, Copy, Default)]
struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the upstream HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> reqwest::Result<Self> {
        let config = Arc::new(config);
        let dispatcher = Arc::new(GatewayDispatcher::new(config.clone())?);
        let state = AppState {
            dispatcher,
            config: config.clone(),
        };
        Ok(Self {
            router: Self::build_router(&config, state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let routes = Router::new()
            .route("/balance", get(handlers::balance))
            .route("/chart", get(handlers::chart))
            .route("/chart/range", get(handlers::chart_range))
            .route("/quote", get(handlers::quote))
            .route("/fusionplus", get(handlers::fusion_plus_quote))
            .route("/history", get(handlers::history))
            .route("/news", get(handlers::news))
            .route("/tokens", get(handlers::tokens))
            .route("/health", get(handlers::health))
            .with_state(state);

        // Deployed clients call both `/balance` and `/api/balance`.
        //
        // Layers are applied directly on the router rather than via a
        // `ServiceBuilder` so that `middleware::from_fn` can infer its inner
        // service type. `Router::layer` wraps later calls outermost, so the
        // calls are ordered innermost-first to preserve the intended nesting
        // (Trace → SetRequestId → PropagateRequestId → CORS → Timeout →
        // BodyLimit → routes).
        Router::new()
            .merge(routes.clone())
            .nest("/api", routes)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(cors::apply_cors))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl+C or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = shutdown.recv() => {}
                }
                tracing::info!("shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
