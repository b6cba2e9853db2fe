//! Docker/Podman client wrapper.
//!
//! Provides the bollard-backed [`DaemonClient`] with connection fallbacks
//! and health checking.

use crate::container::{
    ContainerError, DaemonClient, ListRequest, PortMapping, RawContainer, Result,
};
use crate::env;
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::ContainerSummary;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Container client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerClientConfig {
    /// Explicit daemon socket (`unix:///var/run/docker.sock`), tried before the defaults
    pub socket: Option<String>,
    /// Connection timeout in seconds
    pub timeout: u64,
}

impl Default for ContainerClientConfig {
    fn default() -> Self {
        Self {
            socket: None,
            timeout: 120,
        }
    }
}

/// Docker/Podman API client wrapper.
///
/// Cheap to clone; clones share the same connection.
#[derive(Clone)]
pub struct ContainerClient {
    docker: Arc<Docker>,
}

impl ContainerClient {
    /// Create a new container client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if neither Docker nor Podman are available.
    pub async fn new() -> Result<Self> {
        Self::with_config(ContainerClientConfig::default()).await
    }

    /// Create a new container client with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if connection to the container runtime fails.
    pub async fn with_config(config: ContainerClientConfig) -> Result<Self> {
        let docker = Self::connect(&config)?;

        let client = Self {
            docker: Arc::new(docker),
        };

        client.ping().await?;

        Ok(client)
    }

    /// Connect to Docker or Podman daemon.
    ///
    /// Tries, in order:
    /// 1. The configured socket, if any
    /// 2. Local defaults (`DOCKER_HOST` or the default Unix socket / named pipe)
    /// 3. Podman rootless and system sockets
    fn connect(config: &ContainerClientConfig) -> Result<Docker> {
        debug!("Attempting to connect to container runtime...");

        if let Some(socket) = config.socket.as_deref() {
            return Docker::connect_with_socket(socket, config.timeout, bollard::API_DEFAULT_VERSION)
                .map(|docker| {
                    info!("Connected to container runtime via {}", socket);
                    docker
                })
                .map_err(|e| {
                    ContainerError::Unavailable(format!("Failed to connect to {}: {}", socket, e))
                });
        }

        match Docker::connect_with_local_defaults() {
            Ok(docker) => {
                info!("Connected to container runtime via local defaults");
                return Ok(docker);
            }
            Err(e) => {
                debug!("Local defaults failed: {}", e);
            }
        }

        #[cfg(unix)]
        {
            let runtime_dir = std::env::var_os("XDG_RUNTIME_DIR").map(std::path::PathBuf::from);
            let home = std::env::var_os("HOME").map(std::path::PathBuf::from);

            let mut candidates = Vec::new();
            if let Some(socket) =
                env::podman_rootless_socket(runtime_dir.as_deref(), home.as_deref())
            {
                candidates.push(socket);
            }
            candidates.push(env::podman::SYSTEM_SOCKET.to_string());

            for socket in candidates {
                debug!("Trying Podman socket: {}", socket);
                let timeout = config.timeout;
                match Docker::connect_with_socket(&socket, timeout, bollard::API_DEFAULT_VERSION) {
                    Ok(docker) => {
                        info!("Connected to Podman via {}", socket);
                        return Ok(docker);
                    }
                    Err(e) => {
                        debug!("Podman socket {} failed: {}", socket, e);
                    }
                }
            }
        }

        Err(ContainerError::Unavailable(
            "Failed to connect to Docker or Podman. Please ensure Docker or Podman is installed and running.".to_string()
        ))
    }

    /// Ping the container runtime to verify connectivity.
    ///
    /// # Errors
    ///
    /// Returns error if ping fails.
    pub async fn ping(&self) -> Result<()> {
        self.docker.ping().await.map_err(|e| {
            ContainerError::Unavailable(format!("Failed to ping container runtime: {}", e))
        })?;
        debug!("Container runtime ping successful");
        Ok(())
    }

    /// Get version information from the container runtime.
    ///
    /// # Errors
    ///
    /// Returns error if version query fails.
    pub async fn version(&self) -> Result<bollard::models::SystemVersion> {
        Ok(self.docker.version().await?)
    }

    /// Check if the runtime is Docker or Podman.
    ///
    /// # Errors
    ///
    /// Returns error if runtime detection fails.
    pub async fn runtime_type(&self) -> Result<RuntimeType> {
        let version = self.version().await?;

        let is_podman = version
            .components
            .unwrap_or_default()
            .iter()
            .any(|c| c.name.to_lowercase().contains("podman"));

        if is_podman {
            return Ok(RuntimeType::Podman);
        }

        Ok(RuntimeType::Docker)
    }
}

#[async_trait]
impl DaemonClient for ContainerClient {
    async fn list_containers(&self, request: ListRequest) -> Result<Vec<RawContainer>> {
        let mut filters = HashMap::new();
        if let Some(id) = request.id {
            filters.insert("id".to_string(), vec![id]);
        }

        debug!("Listing containers (all: {}, filters: {:?})", request.all, filters);

        let containers = self
            .docker
            .list_containers(Some(bollard::container::ListContainersOptions {
                all: request.all,
                filters,
                ..Default::default()
            }))
            .await?;

        Ok(containers.into_iter().map(raw_container).collect())
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        self.docker
            .start_container(id, None::<bollard::container::StartContainerOptions<String>>)
            .await?;
        Ok(())
    }

    async fn stop_container(&self, id: &str, timeout: Duration) -> Result<()> {
        self.docker
            .stop_container(
                id,
                Some(bollard::container::StopContainerOptions {
                    t: timeout.as_secs() as i64,
                }),
            )
            .await?;
        Ok(())
    }

    async fn remove_container(&self, id: &str) -> Result<()> {
        self.docker
            .remove_container(id, None::<bollard::container::RemoveContainerOptions>)
            .await?;
        Ok(())
    }
}

fn raw_container(summary: ContainerSummary) -> RawContainer {
    RawContainer {
        id: summary.id.unwrap_or_default(),
        names: summary.names.unwrap_or_default(),
        state: summary.state.map(|s| s.to_string()).unwrap_or_default(),
        labels: summary.labels.unwrap_or_default(),
        ports: summary
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(|port| PortMapping {
                private_port: port.private_port,
                public_port: port.public_port,
            })
            .collect(),
    }
}

/// Type of container runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeType {
    /// Docker runtime
    Docker,
    /// Podman runtime
    Podman,
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "Docker"),
            RuntimeType::Podman => write!(f, "Podman"),
        }
    }
}
