use tokio_util::sync::CancellationToken;

/// Returns a token cancelled on Ctrl-C. The job board view is bound to it so an
/// interrupted command abandons its pending remote call instead of applying it.
pub(crate) fn install_interrupt_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl-C, tearing down job board view"),
            Err(err) => {
                tracing::warn!(error = %err, "unable to listen for Ctrl-C");
                return;
            }
        }
        token_clone.cancel();
    });

    token
}
