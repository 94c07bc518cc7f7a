//! Tracing, logging, audit (shared setup).
//!
//! The authorization core returns decisions as plain values and never logs;
//! the layer that surfaces a denial calls into [`audit`] to record it.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Authorization audit events.
pub mod audit;

/// Tracing configuration (filters, layers).
pub mod tracing;
