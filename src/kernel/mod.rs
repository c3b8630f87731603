pub mod generator;
pub mod payload;
pub mod random;
pub mod reactor;
pub mod stress;
pub mod telemetry;
pub mod time;
