pub mod config;
pub mod kernel;
pub mod logging;
pub mod services;

// Re-export specific items for convenient access
pub use config::SimulatorConfig;
pub use kernel::reactor::Simulator;
pub use services::ingest::client::IngestClient;
