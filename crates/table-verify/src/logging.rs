// crates/table-verify/src/logging.rs
// ============================================================================
// Module: Logging
// Description: tracing subscriber setup for verification runs.
// Purpose: Route verification events to the test harness output.
// Dependencies: thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Verification emits `tracing` events for output reads, table lookups, and
//! field comparisons. This module installs a `fmt` subscriber that writes
//! through the test harness writer so events are captured per test.
//!
//! `RUST_LOG` takes precedence over [`DEFAULT_FILTER`]. An unset or invalid
//! `RUST_LOG` falls back to the default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

// ============================================================================
// SECTION: Initialization
// ============================================================================

/// Installs a fmt subscriber writing through the test harness writer.
///
/// # Errors
///
/// Returns [`LoggingError`] when a global subscriber is already installed.
pub fn try_init_test_logging(default_filter: &str) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_target(true)
        .with_test_writer()
        .try_init()
        .map_err(|err| LoggingError(err.to_string()))
}

/// Installs test logging once; later calls are no-ops.
pub fn init_test_logging() {
    let _ = try_init_test_logging(DEFAULT_FILTER);
}

/// Reads `RUST_LOG`, falling back to `default_filter`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Subscriber installation failure.
#[derive(Debug, Error)]
#[error("logging init failed: {0}")]
pub struct LoggingError(pub String);

// ============================================================================
// SECTION: Tests
// ============================================================================
