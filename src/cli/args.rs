//! Command line argument parsing
//!
//! Every option overrides the matching value from the configuration file.
//! The listen port can also be given through the `PORT` environment variable.

use super::config::{ConfigError, DashboardConfig};
use crate::server::TlsConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "docker-status")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Dashboard that groups Docker/Podman containers by compose project"
)]
#[command(long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// HTTP listen port
    #[arg(short = 'p', long = "port", env = "PORT")]
    pub port: Option<u16>,
    /// Address to bind
    #[arg(short = 'b', long = "bind")]
    pub bind: Option<String>,
    /// HTML file served at `/`
    #[arg(long = "index", value_name = "FILE")]
    pub index: Option<PathBuf>,
    /// TLS certificate (PEM), requires --tls-key
    #[arg(long = "tls-cert", value_name = "FILE")]
    pub tls_cert: Option<PathBuf>,
    /// TLS private key (PEM), requires --tls-cert
    #[arg(long = "tls-key", value_name = "FILE")]
    pub tls_key: Option<PathBuf>,
    /// Daemon socket, e.g. unix:///run/podman/podman.sock
    #[arg(long = "docker-socket", value_name = "URI")]
    pub docker_socket: Option<String>,
    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
    /// Print the resolved configuration and exit
    #[arg(long = "show-config")]
    pub show_config: bool,
}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Apply command line overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut DashboardConfig) -> Result<(), ConfigError> {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if let Some(index) = &self.index {
            config.server.index_path = index.clone();
        }
        if let Some(socket) = &self.docker_socket {
            config.docker.socket = Some(socket.clone());
        }

        match (&self.tls_cert, &self.tls_key) {
            (Some(cert_path), Some(key_path)) => {
                config.server.tls = Some(TlsConfig {
                    cert_path: cert_path.clone(),
                    key_path: key_path.clone(),
                });
            }
            (None, None) => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "--tls-cert and --tls-key must be given together".to_string(),
                ));
            }
        }

        Ok(())
    }
}
