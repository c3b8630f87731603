//! Session instrumentation for the run loop.
//!
//! # PRIVACY INVARIANT
//! Events carry outcome kinds, status codes and tick indices only.
//! Generated readings (heart rate, sleep, temperature) are never recorded.

pub mod event;
pub mod metrics;
pub mod recorder;
