//! Signal handling for cancelling an in-flight run.

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_SHUTDOWN;

/// Cancels `cancel` on the first SIGTERM or SIGINT (Ctrl+C).
///
/// Engines observe the token between and during round trips, so the current
/// page is abandoned and the command returns a cancellation error. The task
/// also ends when the token is cancelled by someone else.
pub fn spawn_signal_watcher(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => {}
            () = shutdown_signal() => {
                tracing::warn!(
                    target: TRACING_TARGET_SHUTDOWN,
                    "Cancelling in-flight queries"
                );
                cancel.cancel();
            }
        }
    })
}

/// Waits for a shutdown signal (SIGTERM or SIGINT/Ctrl+C).
///
/// A handler that fails to install never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => {
                tracing::info!(
                    target: TRACING_TARGET_SHUTDOWN,
                    "Received Ctrl+C signal"
                );
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %e,
                    "Failed to install Ctrl+C handler"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!(
                    target: TRACING_TARGET_SHUTDOWN,
                    "Received SIGTERM signal"
                );
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %e,
                    "Failed to install SIGTERM handler"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
