//! Forwards the `tracing` crate so that every workspace member logs
//! through a single re-exported name instead of depending on a
//! specific version of `tracing` directly.

pub use tracing;
