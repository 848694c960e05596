// crates/table-verify/src/test_support.rs
// ============================================================================
// Module: Test Support
// Description: Shared process-environment helpers for unit tests.
// Purpose: Serialize env mutation across every test module in the crate.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Unit tests in several modules mutate process environment variables. They
//! all take the same lock so no two tests observe each other's variables, and
//! an [`EnvGuard`] restores the captured values when it drops.

#![allow(unsafe_code, reason = "Tests mutate process env vars under a global lock.")]

use std::ffi::OsStr;
use std::ffi::OsString;
use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// AWS variables that steer the default configuration chain.
pub const AWS_ENV: [&str; 17] = [
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "AWS_REGION",
    "AWS_DEFAULT_REGION",
    "AWS_PROFILE",
    "AWS_DEFAULT_PROFILE",
    "AWS_CONFIG_FILE",
    "AWS_SHARED_CREDENTIALS_FILE",
    "AWS_EC2_METADATA_DISABLED",
    "AWS_WEB_IDENTITY_TOKEN_FILE",
    "AWS_ROLE_ARN",
    "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI",
    "AWS_CONTAINER_CREDENTIALS_FULL_URI",
    "AWS_ENDPOINT_URL",
    "AWS_ENDPOINT_URL_DYNAMODB",
    "AWS_IGNORE_CONFIGURED_ENDPOINT_URLS",
];

/// Lock shared by every test that touches the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Acquires the environment lock, recovering from poisoned holders.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Sets an environment variable for the current process.
pub fn set_var(key: &str, value: impl AsRef<OsStr>) {
    // SAFETY: Tests serialize environment mutation via `env_lock`.
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Removes an environment variable from the current process.
pub fn remove_var(key: &str) {
    // SAFETY: Tests serialize environment mutation via `env_lock`.
    unsafe {
        std::env::remove_var(key);
    }
}

/// Captures and clears variables, restoring them on drop.
pub struct EnvGuard {
    /// Original values keyed by name.
    entries: Vec<(&'static str, Option<OsString>)>,
}

impl EnvGuard {
    /// Records the current values of `names` and removes them.
    pub fn clear(names: &[&'static str]) -> Self {
        let entries = names.iter().map(|name| (*name, std::env::var_os(name))).collect();
        for name in names {
            remove_var(name);
        }
        Self {
            entries,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.entries.drain(..) {
            match value {
                Some(value) => set_var(name, value),
                None => remove_var(name),
            }
        }
    }
}

/// Clears the AWS environment and points shared config files into `dir`.
///
/// Instance metadata is disabled so the chain never waits on IMDS.
pub fn isolated_aws_env(dir: &Path) -> EnvGuard {
    let guard = EnvGuard::clear(&AWS_ENV);
    set_var("AWS_CONFIG_FILE", dir.join("config"));
    set_var("AWS_SHARED_CREDENTIALS_FILE", dir.join("credentials"));
    set_var("AWS_EC2_METADATA_DISABLED", "true");
    guard
}
