//! Common test infrastructure
//!
//! Canned ratings-site pages, host-page fixtures, and a fast test
//! configuration for the pipeline tests. Tests should only import from
//! this module, not from internal submodules.

mod fixtures;
mod site;

// Public API - this is what tests import
pub use fixtures::*;
pub use site::CannedSite;

/// Install a tracing subscriber honoring RUST_LOG, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
