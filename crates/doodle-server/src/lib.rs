#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod cors;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use doodle_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the image generation subsystem fails to initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let imagegen_state = doodle_imagegen::build_server(config)?;
        Ok(Self::with_imagegen(config, imagegen_state))
    }

    /// Build the server around an existing image generation state
    ///
    /// Lets callers supply their own provider, e.g. a test double.
    pub fn with_imagegen(config: &Config, imagegen_state: Arc<doodle_imagegen::Server>) -> Self {
        let listen_address = config.server.listen_address();

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            let health_config = Arc::new(config.server.health.clone());
            app = app.route(
                &config.server.health.path,
                axum::routing::get(health::health_handler).with_state(health_config),
            );
        }

        // Image generation routes
        app = app.merge(doodle_imagegen::endpoint_router().with_state(imagegen_state));

        // Apply middleware layers (innermost first)

        app = app.layer(DefaultBodyLimit::max(config.server.body_limit));

        app = app.layer(TraceLayer::new_for_http());

        if config.server.cors.enabled {
            app = app.layer(cors::cors_layer(&config.server.cors));
        }

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use doodle_config::{AllowList, CorsConfig};
    use http::{Request, StatusCode};
    use tower::ServiceExt as _;

    use super::*;

    async fn get(router: Router, path: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn health_reports_service() {
        let server = Server::new(&Config::default()).unwrap();
        let (status, body) = get(server.into_router(), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "doodle-api");
        assert_eq!(json["message"], "Doodle API is running");
    }

    #[tokio::test]
    async fn health_can_be_disabled() {
        let mut config = Config::default();
        config.server.health.enabled = false;

        let (status, _) = get(Server::new(&config).unwrap().into_router(), "/api/health").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_headers_for_allowed_origin() {
        let mut config = Config::default();
        config.server.cors = CorsConfig {
            origins: AllowList::Only(vec!["http://localhost:5173".to_string()]),
            ..CorsConfig::default()
        };

        let request = Request::get("/api/health")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = Server::new(&config).unwrap().into_router().oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn default_config_allows_any_origin() {
        let request = Request::post("/api/generate")
            .header("origin", "http://localhost:5173")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = Server::new(&Config::default()).unwrap().into_router().oneshot(request).await.unwrap();

        assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
    }

    #[tokio::test]
    async fn cors_can_be_disabled() {
        let mut config = Config::default();
        config.server.cors.enabled = false;

        let request = Request::get("/api/health")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = Server::new(&config).unwrap().into_router().oneshot(request).await.unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }

    #[test]
    fn default_listen_address() {
        let server = Server::new(&Config::default()).unwrap();
        assert_eq!(server.listen_address(), SocketAddr::from(([0, 0, 0, 0], 5001)));
    }
}
