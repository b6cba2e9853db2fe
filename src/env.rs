//! Environment constants and path utilities for the docker status dashboard.
//!
//! This module centralizes the hardcoded label keys, listener defaults,
//! and configuration paths used throughout the application.

use std::path::{Path, PathBuf};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 8860;

/// Default bind address for the HTTP listener
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Default index page served at `/`
pub const DEFAULT_INDEX_FILE: &str = "index.html";

/// Application directory name under the user's config directory
pub const APP_DIR_NAME: &str = "docker-status";

/// Configuration file name inside the app directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration file name when placed in the current directory
pub const LOCAL_CONFIG_FILE_NAME: &str = "docker-status.toml";

/// Compose label keys carried by containers started through docker compose
pub mod labels {
    /// Name of the compose project the container belongs to
    pub const COMPOSE_PROJECT: &str = "com.docker.compose.project";

    /// Compose file(s) the project was started from
    pub const COMPOSE_CONFIG_FILES: &str = "com.docker.compose.project.config_files";

    /// Working directory of the compose project
    pub const COMPOSE_WORKING_DIR: &str = "com.docker.compose.project.working_dir";
}

/// Podman socket locations probed when local defaults fail
pub mod podman {
    /// Rootless socket, relative to `$XDG_RUNTIME_DIR`
    pub const ROOTLESS_SOCKET_SUFFIX: &str = "podman/podman.sock";

    /// Rootless socket relative to `$HOME`, used when `$XDG_RUNTIME_DIR` is unset
    pub const HOME_SOCKET_SUFFIX: &str = "run/podman/podman.sock";

    /// System-wide socket
    pub const SYSTEM_SOCKET: &str = "unix:///run/podman/podman.sock";
}

/// Build the rootless Podman socket URI.
///
/// Prefers the user's runtime directory and falls back to the home directory.
pub fn podman_rootless_socket(
    runtime_dir: Option<&Path>,
    home_dir: Option<&Path>,
) -> Option<String> {
    let path = match (runtime_dir, home_dir) {
        (Some(runtime_dir), _) => runtime_dir.join(podman::ROOTLESS_SOCKET_SUFFIX),
        (None, Some(home_dir)) => home_dir.join(podman::HOME_SOCKET_SUFFIX),
        (None, None) => return None,
    };
    Some(format!("unix://{}", path.display()))
}

/// Build config file path in the current directory
pub fn local_config_file_path(current_dir: &Path) -> PathBuf {
    current_dir.join(LOCAL_CONFIG_FILE_NAME)
}

/// Build config directory path in user's home directory
pub fn user_config_dir_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".config").join(APP_DIR_NAME)
}

/// Build config file path in user's home directory
pub fn user_config_file_path(home_dir: &Path) -> PathBuf {
    user_config_dir_path(home_dir).join(CONFIG_FILE_NAME)
}

/// Build the system-wide config file path
pub fn system_config_file_path() -> PathBuf {
    PathBuf::from("/etc").join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
}
