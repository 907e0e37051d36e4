#![forbid(unsafe_code)]

//! Test fixtures for Bindery.
//!
//! - [`StubElement`]: an [`ElementHost`] that counts change subscriptions and
//!   records every write, with no property hooks.
//! - [`Recorder`]: a callback target that logs `(target_key, value)` pairs
//!   and keeps a stable identity for unbinding.
//! - [`init_tracing`]: installs a test-writer subscriber once.
//!
//! [`ElementHost`]: bindery_core::ElementHost

pub mod recorder;
pub mod stub;

pub use recorder::{Recorder, SequenceLog};
pub use stub::StubElement;

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`; defaults to `info`. Safe to call from every test.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
