use clap::Parser;
use mdns64_application::use_cases::RelayQueryUseCase;
use mdns64_domain::{CliOverrides, RelayConfig};
use mdns64_infrastructure::network::DualStackEndpoint;
use mdns64_infrastructure::system::resolve_interface;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "mdns64")]
#[command(version)]
#[command(about = "Relays IPv6 mDNS queries to IPv4 and answers with NAT64 addresses")]
struct Cli {
    /// Network interface to relay on
    #[arg(value_name = "INTERFACE")]
    interface: String,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: Some(cli.log_level),
    };
    let config = RelayConfig::load(cli.interface, cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting mdns64 v{}", env!("CARGO_PKG_VERSION"));

    let interface = resolve_interface(&config.interface)?;

    let shutdown = CancellationToken::new();
    bootstrap::spawn_signal_handler(shutdown.clone());

    let endpoint = Arc::new(DualStackEndpoint::bind(
        &config,
        &interface,
        shutdown.clone(),
    )?);
    let relay = Arc::new(RelayQueryUseCase::new(endpoint.clone(), config.timeouts));

    info!(
        group = %endpoint.ipv6_group(),
        interface = %interface.name,
        "Listening for mDNS queries"
    );

    server::run_dispatch_loop(endpoint, relay, config.recv_buffer_size, shutdown).await;

    info!("Relay shutdown complete");
    Ok(())
}
