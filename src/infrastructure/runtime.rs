//! Service runtime lifecycle.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::bootstrap::{build_services, Services};
use super::scheduler::SyncScheduler;
use crate::adapter::inbound::websocket::WsServer;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Build services from `config` and run until `shutdown` flips to `true`.
pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
    let services = build_services(&config).await?;
    run_services(&config, services, shutdown).await
}

/// Run pre-built services until `shutdown` flips to `true`.
pub async fn run_services(
    config: &Config,
    services: Services,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let server = if config.server.enabled {
        let server = WsServer::bind(
            &config.server.bind,
            Arc::clone(&services.registry),
            config.server.channel_capacity,
        )
        .await?;
        info!(addr = %server.local_addr()?, "Live event channel ready");
        Some(tokio::spawn(server.serve(shutdown.clone())))
    } else {
        info!("WebSocket server disabled");
        None
    };

    let scheduler = if config.sync.enabled {
        Some(
            SyncScheduler::new(Arc::clone(&services.sync), &config.sync)
                .start()
                .await?,
        )
    } else {
        info!("Scheduled sync disabled");
        None
    };

    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            break;
        }
    }
    info!("Shutdown signal received");

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    if let Some(server) = server {
        match server.await {
            Ok(result) => result?,
            Err(e) => warn!(error = %e, "WebSocket server task failed"),
        }
    }
    Ok(())
}
