//! # Docker Status
//!
//! A small dashboard for a Docker or Podman host. It lists the host's
//! containers, groups them by the docker compose project they belong to, and
//! forwards start/stop/remove commands for individual containers.
//!
//! ## Architecture Overview
//!
//! - **[`container`]**: daemon client, compose grouping, and lifecycle commands
//! - **[`server`]**: warp HTTP surface and base URL derivation
//! - **[`cli`]**: command line arguments and TOML configuration discovery
//! - **[`env`]**: label keys, default port, and configuration paths
//!
//! Every request recomputes its view from the daemon; nothing is cached
//! between requests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docker_status::container::{ContainerClient, DaemonClient};
//! use docker_status::server::{DashboardServer, ServerConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client: Arc<dyn DaemonClient> = Arc::new(ContainerClient::new().await?);
//!     let server = DashboardServer::new(client, ServerConfig::default());
//!
//!     server
//!         .run(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

/// Container aggregation and command forwarding.
///
/// Talks to the container runtime through bollard, groups containers by
/// compose project, and runs lifecycle commands with read-back.
pub mod container;

/// HTTP surface.
pub mod server;

// CLI module for command-line interface
pub mod cli;

/// Environment constants and path utilities.
pub mod env;

pub use container::{
    AggregateResult, Aggregator, ContainerClient, ContainerError, ContainerView, DaemonClient,
    GroupView, LifecycleCommander,
};
pub use server::{BaseUrl, DashboardServer, ServerConfig};
