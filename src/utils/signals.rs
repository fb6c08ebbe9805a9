//! Signal handling for graceful shutdown

use std::future::{self, Future};

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::{error, info};

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() -> Result<(), String> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])
    .map_err(|e| format!("Failed to create signal handler: {}", e))?;

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    Ok(())
}

/// Resolve once `signal` reports a shutdown. If the signal source fails the
/// error is logged and this never resolves, leaving the server running.
pub async fn until_shutdown<F>(signal: F)
where
    F: Future<Output = Result<(), String>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("{}; continuing without signal handling", e);
            future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn failed_signal_source_never_shuts_down() {
        let failing = async { Err("Failed to create signal handler: denied".to_string()) };
        assert!(timeout(Duration::from_secs(3600), until_shutdown(failing)).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn received_signal_shuts_down() {
        let received = async { Ok(()) };
        assert!(timeout(Duration::from_secs(1), until_shutdown(received)).await.is_ok());
    }
}
