// crates/table-verify/src/outputs.rs
// ============================================================================
// Module: Provisioning Outputs
// Description: Readers for infrastructure-as-code output values.
// Purpose: Resolve named Terraform outputs into expected table values.
// Dependencies: serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! Provisioning outputs are the values Terraform records after an apply. The
//! [`OutputSource`] trait exposes a single lookup by name; [`TerraformOutputs`]
//! shells out to the provisioning tool and [`StaticOutputs`] serves fixed
//! values for fixtures.
//!
//! Output values are untrusted: a value must decode as a JSON string and must
//! not be blank before it is used as a lookup key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::process::Command;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::context::TerraformOptions;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default output name holding the table ARN.
pub const DEFAULT_ARN_OUTPUT: &str = "dynamodb_table_arn";

/// Default output name holding the table name.
pub const DEFAULT_NAME_OUTPUT: &str = "dynamodb_table_id";

// ============================================================================
// SECTION: Output Names
// ============================================================================

/// Logical output names read for a table check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    /// Output holding the expected table ARN.
    pub identifier: String,
    /// Output holding the expected table name.
    pub name: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_ARN_OUTPUT.to_string(),
            name: DEFAULT_NAME_OUTPUT.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Output Sources
// ============================================================================

/// Source of named provisioning outputs.
pub trait OutputSource: Send + Sync {
    /// Returns the raw string value of the named output.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] when the output is absent or unreadable.
    fn output(&self, name: &str) -> Result<String, OutputError>;
}

/// Reads an output and rejects blank values.
///
/// # Errors
///
/// Returns [`OutputError::Empty`] when the value is blank, or the source error.
pub fn read_required<S>(source: &S, name: &str) -> Result<String, OutputError>
where
    S: OutputSource + ?Sized,
{
    let value = source.output(name)?;
    if value.trim().is_empty() {
        return Err(OutputError::Empty(name.to_string()));
    }
    Ok(value)
}

/// Terraform-backed output source.
///
/// # Invariants
/// - Each lookup runs `<binary> output -no-color -json <name>` in the working dir.
#[derive(Debug, Clone)]
pub struct TerraformOutputs {
    /// Invocation options for the provisioning tool.
    options: TerraformOptions,
}

impl TerraformOutputs {
    /// Creates a source bound to the given invocation options.
    #[must_use]
    pub const fn new(options: TerraformOptions) -> Self {
        Self {
            options,
        }
    }

    /// Returns the invocation options.
    #[must_use]
    pub const fn options(&self) -> &TerraformOptions {
        &self.options
    }
}

impl OutputSource for TerraformOutputs {
    fn output(&self, name: &str) -> Result<String, OutputError> {
        debug!(
            binary = %self.options.binary,
            working_dir = %self.options.working_dir.display(),
            output = name,
            "reading provisioning output"
        );
        let output = Command::new(&self.options.binary)
            .current_dir(&self.options.working_dir)
            .args(["output", "-no-color", "-json", name])
            .envs(&self.options.env)
            .output()
            .map_err(|err| OutputError::Spawn {
                binary: self.options.binary.clone(),
                message: err.to_string(),
            })?;
        if !output.status.success() {
            return Err(OutputError::Command {
                name: name.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_output_value(name, &output.stdout)
    }
}

/// In-memory output source.
#[derive(Debug, Clone, Default)]
pub struct StaticOutputs {
    /// Output values keyed by name.
    values: BTreeMap<String, String>,
}

impl StaticOutputs {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an output value.
    #[must_use]
    pub fn with_output(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl OutputSource for StaticOutputs {
    fn output(&self, name: &str) -> Result<String, OutputError> {
        self.values.get(name).cloned().ok_or_else(|| OutputError::Missing(name.to_string()))
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Decodes the JSON document printed by `output -json <name>`.
fn parse_output_value(name: &str, stdout: &[u8]) -> Result<String, OutputError> {
    let value: Value = serde_json::from_slice(stdout).map_err(|err| OutputError::Parse {
        name: name.to_string(),
        message: err.to_string(),
    })?;
    match value {
        Value::String(text) => Ok(text),
        Value::Null => Err(OutputError::Missing(name.to_string())),
        other => Err(OutputError::NotString {
            name: name.to_string(),
            kind: json_kind(&other),
        }),
    }
}

/// Returns a stable label for a JSON value's type.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Provisioning output failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output is not recorded.
    #[error("output {0} is not set")]
    Missing(String),
    /// The output is recorded but blank.
    #[error("output {0} is empty")]
    Empty(String),
    /// The output is not a string value.
    #[error("output {name} is a {kind}, expected a string")]
    NotString {
        /// Output name.
        name: String,
        /// JSON type of the recorded value.
        kind: &'static str,
    },
    /// The provisioning tool printed something other than JSON.
    #[error("output {name} is not valid json: {message}")]
    Parse {
        /// Output name.
        name: String,
        /// Decoder message.
        message: String,
    },
    /// The provisioning tool could not be started.
    #[error("failed to run {binary}: {message}")]
    Spawn {
        /// Binary that failed to start.
        binary: String,
        /// OS error message.
        message: String,
    },
    /// The provisioning tool exited unsuccessfully.
    #[error("reading output {name} failed ({status}): {stderr}")]
    Command {
        /// Output name.
        name: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },
}

// ============================================================================
// SECTION: Tests
// ============================================================================
