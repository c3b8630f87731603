use anyhow::Context;
use tokio_util::sync::CancellationToken;
use wearsim::{IngestClient, Simulator, SimulatorConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wearsim::logging::init_tracing().context("setting default subscriber failed")?;
    wearsim::logging::init_panic_hook();

    let config = SimulatorConfig::from_env().context("invalid simulator configuration")?;
    let client = IngestClient::new(config.endpoint()).context("failed to build HTTP client")?;
    let mut simulator = Simulator::new(&config, client);

    let shutdown = CancellationToken::new();
    spawn_signal_handlers(shutdown.clone());

    simulator.run(shutdown).await;
    Ok(())
}

fn spawn_signal_handlers(token: CancellationToken) {
    let interrupt_token = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received interrupt signal");
                interrupt_token.cancel();
            }
            Err(err) => tracing::error!("Error setting up signal handler: {}", err),
        }
    });

    #[cfg(unix)]
    tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
                token.cancel();
            }
            Err(err) => tracing::error!("Error setting up SIGTERM handler: {}", err),
        }
    });
}
