//! HTTP surface of the dashboard.
//!
//! Routes:
//!
//! - `GET /`: the index page
//! - `GET /containers`: grouped container list
//! - `/containers/stop/{id}`: stop a container, reply with its new state
//! - `/containers/start/{id}`: start a container, reply with its new state
//! - `DELETE /containers/{id}`: remove a container
//!
//! Failures are answered with HTTP 500 and `{"error": "<message>"}`.

mod base_url;

pub use base_url::BaseUrl;

use crate::container::{Aggregator, DaemonClient, LifecycleCommander};
use crate::env;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub bind_address: String,
    /// Listen port, also stripped from the Host header when building port links
    pub port: u16,
    /// HTML file served at `/`
    pub index_path: PathBuf,
    /// Serve HTTPS when set
    pub tls: Option<TlsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: env::DEFAULT_BIND_ADDRESS.to_string(),
            port: env::DEFAULT_PORT,
            index_path: PathBuf::from(env::DEFAULT_INDEX_FILE),
            tls: None,
        }
    }
}

/// Certificate and key for HTTPS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// PEM certificate chain
    pub cert_path: PathBuf,
    /// PEM private key
    pub key_path: PathBuf,
}

/// HTTP server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Failed to bind HTTP listener: {0}")]
    Bind(#[from] warp::Error),

    #[error("Cannot read TLS file {path}: {source}")]
    Tls {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TlsConfig {
    /// Check that the certificate and key can be opened.
    async fn check_readable(&self) -> Result<(), ServerError> {
        for path in [&self.cert_path, &self.key_path] {
            tokio::fs::File::open(path)
                .await
                .map_err(|source| ServerError::Tls {
                    path: path.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

struct DashboardState {
    aggregator: Aggregator,
    commander: LifecycleCommander,
    config: ServerConfig,
}

/// The dashboard HTTP server.
#[derive(Clone)]
pub struct DashboardServer {
    state: Arc<DashboardState>,
}

impl DashboardServer {
    /// Create a server that shares one daemon client across all requests.
    pub fn new(daemon: Arc<dyn DaemonClient>, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(DashboardState {
                aggregator: Aggregator::new(daemon.clone()),
                commander: LifecycleCommander::new(daemon),
                config,
            }),
        }
    }

    /// Build the warp filter serving every dashboard route.
    pub fn routes(
        self,
    ) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone + Send + Sync + 'static
    {
        let secure = self.state.config.tls.is_some();
        let port = self.state.config.port;

        let index = warp::path::end()
            .and(warp::get())
            .and(with_state(self.state.clone()))
            .and_then(index_handler);

        let list = warp::path!("containers")
            .and(warp::get())
            .and(with_state(self.state.clone()))
            .and(with_base_url(secure, port))
            .and_then(list_handler);

        let stop = warp::path!("containers" / "stop" / String)
            .and(with_state(self.state.clone()))
            .and(with_base_url(secure, port))
            .and_then(stop_handler);

        let start = warp::path!("containers" / "start" / String)
            .and(with_state(self.state.clone()))
            .and(with_base_url(secure, port))
            .and_then(start_handler);

        let remove = warp::path!("containers" / String)
            .and(warp::delete())
            .and(with_state(self.state))
            .and_then(remove_handler);

        index
            .or(list)
            .unify()
            .or(stop)
            .unify()
            .or(start)
            .unify()
            .or(remove)
            .unify()
            .with(warp::trace::request())
    }

    /// Serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns error if the bind address is invalid, the TLS certificate or key
    /// cannot be read, or the listener cannot be bound.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let config = self.state.config.clone();
        let ip: IpAddr = config
            .bind_address
            .parse()
            .map_err(|_| ServerError::InvalidBindAddress(config.bind_address.clone()))?;
        let addr = SocketAddr::new(ip, config.port);
        let routes = self.routes();

        match config.tls {
            Some(tls) => {
                tls.check_readable().await?;
                let (addr, server) = warp::serve(routes)
                    .tls()
                    .cert_path(&tls.cert_path)
                    .key_path(&tls.key_path)
                    .bind_with_graceful_shutdown(addr, shutdown);
                info!("Dashboard listening on https://{}", addr);
                server.await;
            }
            None => {
                let (addr, server) =
                    warp::serve(routes).try_bind_with_graceful_shutdown(addr, shutdown)?;
                info!("Dashboard listening on http://{}", addr);
                server.await;
            }
        }

        info!("Dashboard stopped");
        Ok(())
    }
}

fn with_state(
    state: Arc<DashboardState>,
) -> impl Filter<Extract = (Arc<DashboardState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn with_base_url(
    secure: bool,
    port: u16,
) -> impl Filter<Extract = (BaseUrl,), Error = Rejection> + Clone {
    warp::header::optional::<String>("host")
        .map(move |host: Option<String>| BaseUrl::from_host_header(secure, host.as_deref(), port))
}

async fn index_handler(state: Arc<DashboardState>) -> Result<Response, Infallible> {
    match tokio::fs::read_to_string(&state.config.index_path).await {
        Ok(html) => Ok(warp::reply::html(html).into_response()),
        Err(e) => {
            warn!(
                "Failed to read index page {}: {}",
                state.config.index_path.display(),
                e
            );
            Ok(error_reply(&e))
        }
    }
}

async fn list_handler(
    state: Arc<DashboardState>,
    base_url: BaseUrl,
) -> Result<Response, Infallible> {
    match state.aggregator.list(base_url.as_str()).await {
        Ok(result) => Ok(warp::reply::json(&result).into_response()),
        Err(e) => {
            warn!("Failed to list containers: {}", e);
            Ok(error_reply(&e))
        }
    }
}

async fn stop_handler(
    id: String,
    state: Arc<DashboardState>,
    base_url: BaseUrl,
) -> Result<Response, Infallible> {
    match state.commander.stop(&id, base_url.as_str()).await {
        Ok(view) => Ok(warp::reply::json(&view).into_response()),
        Err(e) => {
            warn!("Failed to stop container {}: {}", id, e);
            Ok(error_reply(&e))
        }
    }
}

async fn start_handler(
    id: String,
    state: Arc<DashboardState>,
    base_url: BaseUrl,
) -> Result<Response, Infallible> {
    match state.commander.start(&id, base_url.as_str()).await {
        Ok(view) => Ok(warp::reply::json(&view).into_response()),
        Err(e) => {
            warn!("Failed to start container {}: {}", id, e);
            Ok(error_reply(&e))
        }
    }
}

async fn remove_handler(id: String, state: Arc<DashboardState>) -> Result<Response, Infallible> {
    match state.commander.remove(&id).await {
        Ok(()) => Ok(warp::reply::json(&serde_json::json!({ "status": "ok" })).into_response()),
        Err(e) => {
            warn!("Failed to remove container {}: {}", id, e);
            Ok(error_reply(&e))
        }
    }
}

fn error_reply(err: &dyn fmt::Display) -> Response {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": err.to_string() })),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{
        ContainerError, ListRequest, MockDaemonClient, PortMapping, RawContainer,
    };
    use crate::env::labels::COMPOSE_PROJECT;
    use serde_json::Value;
    use std::time::Duration;

    fn raw(id: &str, name: &str, state: &str, project: Option<&str>) -> RawContainer {
        let mut raw = RawContainer {
            id: id.to_string(),
            names: vec![format!("/{}", name)],
            state: state.to_string(),
            ports: vec![PortMapping {
                private_port: 80,
                public_port: Some(8081),
            }],
            ..Default::default()
        };
        if let Some(project) = project {
            raw.labels.insert(COMPOSE_PROJECT.to_string(), project.to_string());
        }
        raw
    }

    fn server(daemon: MockDaemonClient) -> DashboardServer {
        DashboardServer::new(Arc::new(daemon), ServerConfig::default())
    }

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_list_containers() {
        let mut daemon = MockDaemonClient::new();
        daemon
            .expect_list_containers()
            .withf(|request| *request == ListRequest::all())
            .returning(|_| {
                Ok(vec![
                    raw("1", "web", "running", Some("blog")),
                    raw("2", "proxy", "running", None),
                ])
            });
        let routes = server(daemon).routes();

        let res = warp::test::request()
            .method("GET")
            .path("/containers")
            .header("host", "nas.local:8860")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res.body());
        assert_eq!(json["containers"][0]["name"], "proxy");
        assert_eq!(json["containers"][0]["ports"][0], "http://nas.local:8081");
        assert_eq!(json["services"][0]["name"], "blog");
        assert_eq!(json["services"][0]["containers"][0]["id"], "1");
    }

    #[tokio::test]
    async fn test_unreadable_tls_files_are_an_error() {
        let config = ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            tls: Some(TlsConfig {
                cert_path: PathBuf::from("/nonexistent/docker-status/cert.pem"),
                key_path: PathBuf::from("/nonexistent/docker-status/key.pem"),
            }),
            ..Default::default()
        };
        let server = DashboardServer::new(Arc::new(MockDaemonClient::new()), config);

        let err = server.run(std::future::pending()).await.unwrap_err();

        match err {
            ServerError::Tls { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/docker-status/cert.pem"));
            }
            other => panic!("Expected TLS error, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_list_failure_returns_500() {
        let mut daemon = MockDaemonClient::new();
        daemon
            .expect_list_containers()
            .returning(|_| Err(ContainerError::Unavailable("daemon down".to_string())));
        let routes = server(daemon).routes();

        let res = warp::test::request()
            .path("/containers")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(res.body())["error"],
            "Container runtime unavailable: daemon down"
        );
    }

    #[tokio::test]
    async fn test_stop_returns_view() {
        let mut daemon = MockDaemonClient::new();
        daemon
            .expect_stop_container()
            .withf(|id, timeout| id == "abc" && *timeout == Duration::from_secs(60))
            .returning(|_, _| Ok(()));
        daemon
            .expect_list_containers()
            .returning(|_| Ok(vec![raw("abc", "web", "exited", None)]));
        let routes = server(daemon).routes();

        let res = warp::test::request()
            .method("POST")
            .path("/containers/stop/abc")
            .header("host", "nas.local:8860")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res.body());
        assert_eq!(json["id"], "abc");
        assert_eq!(json["status"], "exited");
    }

    #[tokio::test]
    async fn test_start_failure_returns_error_body() {
        let mut daemon = MockDaemonClient::new();
        daemon
            .expect_start_container()
            .returning(|_| Err(ContainerError::NotFound("abc".to_string())));
        daemon.expect_list_containers().never();
        let routes = server(daemon).routes();

        let res = warp::test::request()
            .method("GET")
            .path("/containers/start/abc")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(res.body())["error"], "Container not found: abc");
    }

    #[tokio::test]
    async fn test_remove_returns_ok_status() {
        let mut daemon = MockDaemonClient::new();
        daemon
            .expect_remove_container()
            .withf(|id| id == "abc")
            .times(1)
            .returning(|_| Ok(()));
        let routes = server(daemon).routes();

        let res = warp::test::request()
            .method("DELETE")
            .path("/containers/abc")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res.body()), serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_remove_requires_delete() {
        let mut daemon = MockDaemonClient::new();
        daemon.expect_remove_container().never();
        let routes = server(daemon).routes();

        let res = warp::test::request()
            .method("POST")
            .path("/containers/abc")
            .reply(&routes)
            .await;

        assert_ne!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_page() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index.html");
        std::fs::write(&index_path, "<h1>containers</h1>").unwrap();

        let config = ServerConfig {
            index_path,
            ..Default::default()
        };
        let routes = DashboardServer::new(Arc::new(MockDaemonClient::new()), config).routes();

        let res = warp::test::request().path("/").reply(&routes).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"<h1>containers</h1>");
    }

    #[tokio::test]
    async fn test_missing_index_page_returns_500() {
        let config = ServerConfig {
            index_path: PathBuf::from("/nonexistent/index.html"),
            ..Default::default()
        };
        let routes = DashboardServer::new(Arc::new(MockDaemonClient::new()), config).routes();

        let res = warp::test::request().path("/").reply(&routes).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(res.body())["error"].is_string());
    }
}
