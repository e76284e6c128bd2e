use tokio::signal;

/// Resolves on Ctrl+C or, on unix, SIGTERM. A handler that fails to install
/// never fires, so the other one still stops the server.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => "ctrl_c",
            Err(err) => {
                tracing::error!(error = %err, "Failed to install Ctrl+C handler");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "sigterm"
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    };

    tracing::info!(signal = received, "Shutdown signal received, draining connections");
}
