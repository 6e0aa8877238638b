//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single fallback dispatcher
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch every request through the Ant route table
//! - Swap the route table when a new config arrives
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::{path, Router as RouteRouter};

/// Response header naming the route that served the request.
pub const X_ROUTE_NAME: &str = "x-route-name";

/// Shared, atomically replaceable route table.
pub type RouteTable = Arc<ArcSwap<RouteRouter>>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: RouteTable,
}

/// HTTP server answering requests from the route table.
pub struct HttpServer {
    app: Router,
    routes: RouteTable,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let routes: RouteTable = Arc::new(ArcSwap::from_pointee(RouteRouter::from_config(
            &config.routes,
        )));
        metrics::record_route_count(config.routes.len());

        let state = AppState {
            routes: routes.clone(),
        };
        let app = Self::build_app(&config, state);

        Self {
            app,
            routes,
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Each config received on `config_updates` replaces the route table.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServerConfig>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.load().len(),
            "HTTP server starting"
        );

        let routes = self.routes.clone();
        let mut reload_shutdown = shutdown_rx.resubscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = config_updates.recv() => match update {
                        Some(config) => apply_config(&routes, &config),
                        None => break,
                    },
                    _ = reload_shutdown.recv() => break,
                }
            }
        });

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The Axum app, for driving requests without a listener.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Handle to the live route table.
    pub fn routes(&self) -> RouteTable {
        self.routes.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Compile `config`'s routes and publish them.
pub fn apply_config(routes: &RouteTable, config: &ServerConfig) {
    let router = RouteRouter::from_config(&config.routes);
    tracing::info!(routes = router.len(), "Route table swapped");
    metrics::record_route_count(router.len());
    routes.store(Arc::new(router));
}

/// Fallback handler: resolve the route and serve its response.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().as_str();
    let candidate = path::candidate(method, request.uri().path());
    let request_id = request_id(request.headers());

    let routes = state.routes.load();
    let Some(route) = routes.find(&candidate) else {
        tracing::debug!(request_id = %request_id, candidate = %candidate, "No route matched");
        metrics::record_request(method, 404, metrics::NO_ROUTE, start);
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    };

    tracing::debug!(
        request_id = %request_id,
        candidate = %candidate,
        route = %route.name,
        "Route matched"
    );

    let status = StatusCode::from_u16(route.response.status).unwrap_or(StatusCode::OK);
    metrics::record_request(method, status.as_u16(), &route.name, start);

    (
        status,
        [
            (header::CONTENT_TYPE, route.response.content_type.clone()),
            (HeaderName::from_static(X_ROUTE_NAME), route.name.clone()),
        ],
        route.response.body.clone(),
    )
        .into_response()
}
