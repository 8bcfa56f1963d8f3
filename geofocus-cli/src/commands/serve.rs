//! Serve command - run the HTTP server.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use clap::Args;
use geofocus::server;
use tracing::{info, warn};

use super::common::{build_service, load_config, runtime, start_logging, LogMode, SourceArgs};
use crate::error::CliError;

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on, overriding [server] bind
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    /// Fetch the collection before accepting requests
    #[arg(long)]
    pub warm: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run the serve command.
pub fn run(args: ServeArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let mut config = load_config(config_path)?;
    args.source.apply(&mut config)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let _guard = start_logging(&config, LogMode::Service)?;
    info!(
        version = geofocus::VERSION,
        sources = config.sources.urls.len(),
        ttl_secs = config.cache.ttl_secs,
        stale_policy = %config.cache.stale_policy,
        "GeoFocus starting"
    );

    let service = Arc::new(build_service(&config)?);
    let rt = runtime()?;

    rt.block_on(async move {
        if args.warm {
            match service.collection().await {
                Ok(document) => info!(
                    features = document.features().len(),
                    "Feature collection warmed"
                ),
                Err(e) => warn!(error = %e, "Warm-up fetch failed, will retry on first request"),
            }
        }

        server::serve(service, config.server.bind, shutdown_signal()).await
    })?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await
        }
    }
}
