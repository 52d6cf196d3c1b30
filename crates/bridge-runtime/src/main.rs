//! # Bridge Runtime
//!
//! Entry point for the Mattermost-Matrix bridge core.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load and validate configuration
//! 3. Open the Mapping Store and run pending migrations
//! 4. Start the event gate handler
//! 5. Run until Ctrl+C, then shut down

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use bridge_runtime::handlers::ForwardedPost;
use bridge_runtime::{BridgeConfig, BridgeContext, Collaborators, EventGate, GateHandler};
use bridge_telemetry::{init_telemetry, TelemetryConfig};

/// Channel depth between the platform client and the gate.
const EVENT_QUEUE_DEPTH: usize = 1024;

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry(TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    let config = BridgeConfig::from_env().context("Failed to load configuration")?;
    let server_name =
        std::env::var("MB_MATRIX_SERVER_NAME").unwrap_or_else(|_| "localhost".to_string());

    info!("===========================================");
    info!("  Mattermost-Matrix Bridge v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("Store backend: {}", config.store.backend);
    info!("Data Dir: {:?}", config.store.data_dir);

    let (context, report) = BridgeContext::initialize(config, Collaborators::offline(&server_name))
        .await
        .context("Bridge startup failed")?;

    if report.is_noop() {
        info!("Mapping store already at schema v{}", report.to_version);
    } else {
        info!(
            from = report.from_version,
            to = report.to_version,
            written = report.total_written(),
            deleted = report.total_deleted(),
            "Mapping store migrated"
        );
    }
    if report.total_failed() > 0 {
        warn!(
            failed = report.total_failed(),
            "Some mappings could not be migrated; see warnings above"
        );
    }

    let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
    let (forward_tx, mut forward_rx) = mpsc::channel::<ForwardedPost>(EVENT_QUEUE_DEPTH);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let gate = Arc::new(EventGate::from_context(&context));
    let handler = tokio::spawn(GateHandler::new(event_rx, gate, forward_tx).run(shutdown_rx));

    // Platform clients attach here; without them forwarded posts are only logged.
    let drain = tokio::spawn(async move {
        while let Some(post) = forward_rx.recv().await {
            info!(
                post_id = %post.post_id,
                channel_id = %post.channel_id,
                "Post ready to forward"
            );
        }
    });

    info!("Bridge is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    info!("Initiating graceful shutdown...");
    if shutdown_tx.send(true).is_err() {
        warn!("Gate handler already stopped");
    }
    drop(event_tx);

    let stats = handler.await.context("Gate handler panicked")?;
    drain.await.context("Forward drain panicked")?;
    info!(
        forwarded = stats.forwarded,
        skipped_remote = stats.skipped_remote,
        skipped_echo = stats.skipped_echo,
        "Shutdown complete"
    );

    Ok(())
}
