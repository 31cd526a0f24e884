//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; the embedding process decides
//! whether and how they are printed by calling [`init_tracing`] once.

pub mod logging;

pub use logging::{init_tracing, try_init_tracing, LogFormat};
