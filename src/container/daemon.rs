//! Daemon capability consumed by the aggregator and the lifecycle commander.
//!
//! [`RawContainer`] is the daemon's view of a container, reduced to the
//! fields the dashboard reads. It is never mutated after being listed.

use crate::container::Result;
use crate::container::labels::LabelSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// A container record as reported by the daemon's list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContainer {
    /// Full container ID
    pub id: String,
    /// Container names, each prefixed with `/` by the runtime
    pub names: Vec<String>,
    /// Lifecycle state (`running`, `exited`, ...)
    pub state: String,
    /// Container labels
    pub labels: HashMap<String, String>,
    /// Port mappings in daemon order
    pub ports: Vec<PortMapping>,
}

impl LabelSource for RawContainer {
    fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// A single port mapping of a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortMapping {
    /// Port inside the container
    pub private_port: u16,
    /// Port published on the host, if any
    pub public_port: Option<u16>,
}

/// Parameters of a container list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// Include stopped containers
    pub all: bool,
    /// Restrict the result to this container ID
    pub id: Option<String>,
}

impl ListRequest {
    /// List every container, running or not.
    pub fn all() -> Self {
        Self {
            all: true,
            id: None,
        }
    }

    /// List the single container with the given ID, running or not.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            all: true,
            id: Some(id.into()),
        }
    }
}

/// Operations the dashboard needs from a container runtime daemon.
///
/// Implementations are shared across concurrent requests and must not keep
/// per-request state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DaemonClient: Send + Sync {
    /// List containers matching the request.
    async fn list_containers(&self, request: ListRequest) -> Result<Vec<RawContainer>>;

    /// Start a container.
    async fn start_container(&self, id: &str) -> Result<()>;

    /// Stop a container, killing it if it has not exited after `timeout`.
    async fn stop_container(&self, id: &str, timeout: Duration) -> Result<()>;

    /// Remove a container.
    async fn remove_container(&self, id: &str) -> Result<()>;
}
