//! Graceful shutdown

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to listen for {signal}: {source}")]
    Install {
        signal: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Stop accepting connections on SIGINT or SIGTERM and give in-flight requests `grace` to
/// finish. An order placement interrupted mid-transaction rolls back, so the grace only
/// spares customers a retry.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Duration,
) -> Result<(), ShutdownSignalError> {
    let received = wait_for_signal().await?;

    info!(signal = received, grace_secs = grace.as_secs(), "stopping storefront api");

    handle.stop_graceful(Some(grace));

    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    use signal::unix::{SignalKind, signal as unix_signal};

    let mut terminate =
        unix_signal(SignalKind::terminate()).map_err(|source| ShutdownSignalError::Install {
            signal: "SIGTERM",
            source,
        })?;

    tokio::select! {
        result = signal::ctrl_c() => result
            .map(|()| "SIGINT")
            .map_err(|source| ShutdownSignalError::Install { signal: "SIGINT", source }),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map(|()| "ctrl-c")
        .map_err(|source| ShutdownSignalError::Install {
            signal: "ctrl-c",
            source,
        })
}
