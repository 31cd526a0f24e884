//! Test doubles for the core ports
//!
//! - **[`mocks`]**: scripted transport, fake game host, recording UI
//! - **[`async_utils`]**: polling helpers for work that finishes on another
//!   task
//!
//! Available to other crates through the `test-utils` feature.

pub mod async_utils;
pub mod mocks;

pub use async_utils::poll_until;
pub use mocks::{MockGameHost, MockTransport, RecordedRequest, RecordingUi, StaticCredentials};
