//! Lifecycle commands for individual containers.
//!
//! Start and stop are two daemon calls: the mutation, then a read-back of the
//! container by exact ID, because the mutation does not return the new state.
//! The two calls are not atomic. Another client may remove the container in
//! between, in which case the read-back reports [`ContainerError::NotFound`].

use crate::container::{ContainerError, ContainerView, DaemonClient, ListRequest, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Grace period given to a container before the daemon kills it on stop.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(60);

/// Write path of the dashboard: forwards lifecycle commands to the daemon.
#[derive(Clone)]
pub struct LifecycleCommander {
    daemon: Arc<dyn DaemonClient>,
}

impl LifecycleCommander {
    /// Create a commander on top of a shared daemon client.
    pub fn new(daemon: Arc<dyn DaemonClient>) -> Self {
        Self { daemon }
    }

    /// Stop a container and return its state afterwards.
    ///
    /// # Errors
    ///
    /// Returns the daemon error if the stop or the read-back fails, and
    /// [`ContainerError::NotFound`] if the container is gone after stopping.
    pub async fn stop(&self, id: &str, base_url: &str) -> Result<ContainerView> {
        debug!("Stopping container: {}", id);
        self.daemon.stop_container(id, STOP_TIMEOUT).await?;
        info!("Stopped container: {}", id);

        self.read_back(id, base_url).await
    }

    /// Start a container and return its state afterwards.
    ///
    /// # Errors
    ///
    /// Returns the daemon error if the start or the read-back fails, and
    /// [`ContainerError::NotFound`] if the container is gone after starting.
    pub async fn start(&self, id: &str, base_url: &str) -> Result<ContainerView> {
        debug!("Starting container: {}", id);
        self.daemon.start_container(id).await?;
        info!("Started container: {}", id);

        self.read_back(id, base_url).await
    }

    /// Remove a container.
    ///
    /// # Errors
    ///
    /// Returns error if the daemon rejects the removal.
    pub async fn remove(&self, id: &str) -> Result<()> {
        debug!("Removing container: {}", id);
        self.daemon.remove_container(id).await?;
        info!("Removed container: {}", id);
        Ok(())
    }

    async fn read_back(&self, id: &str, base_url: &str) -> Result<ContainerView> {
        let containers = self.daemon.list_containers(ListRequest::by_id(id)).await?;

        // The daemon's id filter is a substring match; only accept the full ID
        // or a prefix of it.
        containers
            .iter()
            .find(|raw| raw.id == id)
            .or_else(|| containers.iter().find(|raw| raw.id.starts_with(id)))
            .map(|raw| ContainerView::project(raw, base_url))
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))
    }
}
