use anyhow::Context;
use docker_status::cli::{Args, ConfigDiscovery};
use docker_status::container::{ContainerClient, DaemonClient};
use docker_status::server::DashboardServer;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_filter = if args.verbose {
        "docker_status=debug,warp=debug"
    } else {
        "docker_status=info,warp=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = ConfigDiscovery::discover_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    args.apply(&mut config).context("Invalid command line arguments")?;

    if args.show_config {
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    info!("Starting docker-status dashboard");

    let client = ContainerClient::with_config(config.docker.clone())
        .await
        .context("Failed to connect to the container runtime")?;

    match client.runtime_type().await {
        Ok(runtime) => info!("Using {} runtime", runtime),
        Err(e) => warn!("Could not detect runtime type: {}", e),
    }

    let daemon: Arc<dyn DaemonClient> = Arc::new(client);
    let server = DashboardServer::new(daemon, config.server);

    server
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}
