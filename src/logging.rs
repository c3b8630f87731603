use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global subscriber. `RUST_LOG` wins, `info` otherwise.
pub fn init_tracing() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Routes panic reports through `tracing` instead of raw stderr, so a
/// faulted tick shows up as one structured log line.
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(target: "panic", "{}", info);
    }));
}
