//! Container aggregation and command forwarding.
//!
//! This module reads the container list from a Docker/Podman daemon via the
//! bollard API, groups containers by compose project, and forwards lifecycle
//! commands (start, stop, remove) for individual containers.
//!
//! ## Architecture
//!
//! - [`daemon`]: the [`DaemonClient`] capability and the raw container records it returns
//! - [`client`]: bollard-backed [`DaemonClient`] with Docker/Podman socket discovery
//! - [`labels`]: compose label accessors
//! - [`view`]: public container and compose group views
//! - [`aggregator`]: grouping and ordering of the container list
//! - [`commander`]: start/stop/remove with read-back of the affected container
//!
//! ## Usage
//!
//! ```rust,no_run
//! use docker_status::container::{Aggregator, ContainerClient, DaemonClient};
//! use docker_status::server::BaseUrl;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client: Arc<dyn DaemonClient> = Arc::new(ContainerClient::new().await?);
//!     let aggregator = Aggregator::new(client);
//!
//!     let base_url = BaseUrl::new(false, "localhost:8860", 8860);
//!     let result = aggregator.list(base_url.as_str()).await?;
//!     for group in &result.groups {
//!         println!("{}: {} containers", group.name, group.members.len());
//!     }
//!     Ok(())
//! }
//! ```

mod aggregator;
mod client;
mod commander;
mod daemon;
pub mod labels;
mod view;

pub use aggregator::{Aggregator, aggregate};
pub use client::{ContainerClient, ContainerClientConfig, RuntimeType};
pub use commander::{LifecycleCommander, STOP_TIMEOUT};
pub use daemon::{DaemonClient, ListRequest, PortMapping, RawContainer};
#[cfg(test)]
pub use daemon::MockDaemonClient;
pub use view::{AggregateResult, ContainerView, GroupView};

/// Container runtime errors.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Docker/Podman API error
    #[error("Container API error: {0}")]
    Api(#[from] bollard::errors::Error),

    /// Daemon could not be reached
    #[error("Container runtime unavailable: {0}")]
    Unavailable(String),

    /// Container not found
    #[error("Container not found: {0}")]
    NotFound(String),
}

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;
