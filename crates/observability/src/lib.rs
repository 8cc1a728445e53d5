//! Tracing and logging (shared setup).

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize logging for unit/integration tests.
pub fn init_for_tests() {
    tracing::init_for_tests();
}
