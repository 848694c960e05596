// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Region used when no override is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional run root override for verification artifacts.
    RunRoot,
    /// Optional external DynamoDB endpoint; skips the local container.
    DynamoDbEndpoint,
    /// Optional region for the DynamoDB fixture.
    Region,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "TABLE_VERIFY_SYSTEM_TEST_RUN_ROOT",
            Self::DynamoDbEndpoint => "TABLE_VERIFY_SYSTEM_TEST_DYNAMODB_ENDPOINT",
            Self::Region => "TABLE_VERIFY_SYSTEM_TEST_REGION",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional external DynamoDB endpoint.
    pub dynamodb_endpoint: Option<String>,
    /// Optional fixture region.
    pub region: Option<String>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8 or is
    /// empty.
    pub fn load() -> Result<Self, String> {
        Ok(Self {
            run_root: read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from),
            dynamodb_endpoint: read_env_nonempty(SystemTestEnv::DynamoDbEndpoint.as_str())?,
            region: read_env_nonempty(SystemTestEnv::Region.as_str())?,
        })
    }

    /// Returns the configured region or the default.
    #[must_use]
    pub fn region_or_default(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable, enforcing UTF-8 and rejecting empty values.
///
/// # Errors
///
/// Returns an error when the variable is not UTF-8, or is set but blank.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    let Some(raw) = std::env::var_os(name) else {
        return Ok(None);
    };
    let value = raw.into_string().map_err(|_| format!("{name} must be valid UTF-8"))?;
    if value.trim().is_empty() {
        return Err(format!("{name} must not be empty"));
    }
    Ok(Some(value))
}
