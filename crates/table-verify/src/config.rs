// crates/table-verify/src/config.rs
// ============================================================================
// Module: Verification Configuration
// Description: Environment-backed configuration for table verification runs.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Verification runs are configured through environment variables so CI jobs
//! can point the check at a Terraform working directory and an AWS account
//! without code changes. Values are parsed with strict UTF-8 enforcement and
//! empty values are rejected rather than treated as unset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

use crate::client::AwsClientConfig;
use crate::context::TerraformOptions;
use crate::outputs::OutputNames;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for verification configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyEnv {
    /// Terraform working directory containing the applied state.
    TerraformDir,
    /// Provisioning tool binary (`terraform` or `tofu`).
    TerraformBinary,
    /// Optional AWS region override.
    AwsRegion,
    /// Optional shared-config profile override.
    AwsProfile,
    /// Optional DynamoDB endpoint override (for example, DynamoDB Local).
    DynamoDbEndpoint,
    /// Output name holding the table ARN.
    ArnOutput,
    /// Output name holding the table name.
    NameOutput,
}

impl VerifyEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 7] = [
        Self::TerraformDir,
        Self::TerraformBinary,
        Self::AwsRegion,
        Self::AwsProfile,
        Self::DynamoDbEndpoint,
        Self::ArnOutput,
        Self::NameOutput,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TerraformDir => "TABLE_VERIFY_TERRAFORM_DIR",
            Self::TerraformBinary => "TABLE_VERIFY_TERRAFORM_BINARY",
            Self::AwsRegion => "TABLE_VERIFY_AWS_REGION",
            Self::AwsProfile => "TABLE_VERIFY_AWS_PROFILE",
            Self::DynamoDbEndpoint => "TABLE_VERIFY_DYNAMODB_ENDPOINT",
            Self::ArnOutput => "TABLE_VERIFY_ARN_OUTPUT",
            Self::NameOutput => "TABLE_VERIFY_NAME_OUTPUT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed verification configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerifyConfig {
    /// Terraform working directory (defaults to the current directory).
    pub terraform_dir: Option<PathBuf>,
    /// Provisioning tool binary (defaults to `terraform`).
    pub terraform_binary: Option<String>,
    /// AWS region override.
    pub aws_region: Option<String>,
    /// AWS shared-config profile override.
    pub aws_profile: Option<String>,
    /// DynamoDB endpoint override.
    pub dynamodb_endpoint: Option<String>,
    /// Output name holding the table ARN.
    pub arn_output: Option<String>,
    /// Output name holding the table name.
    pub name_output: Option<String>,
}

impl VerifyConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is not valid UTF-8 or is empty.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            terraform_dir: read_env_nonempty(VerifyEnv::TerraformDir)?.map(PathBuf::from),
            terraform_binary: read_env_nonempty(VerifyEnv::TerraformBinary)?,
            aws_region: read_env_nonempty(VerifyEnv::AwsRegion)?,
            aws_profile: read_env_nonempty(VerifyEnv::AwsProfile)?,
            dynamodb_endpoint: read_env_nonempty(VerifyEnv::DynamoDbEndpoint)?,
            arn_output: read_env_nonempty(VerifyEnv::ArnOutput)?,
            name_output: read_env_nonempty(VerifyEnv::NameOutput)?,
        })
    }

    /// Builds Terraform invocation options from this configuration.
    #[must_use]
    pub fn terraform_options(&self) -> TerraformOptions {
        let mut options = TerraformOptions::default();
        if let Some(dir) = &self.terraform_dir {
            options.working_dir.clone_from(dir);
        }
        if let Some(binary) = &self.terraform_binary {
            options.binary.clone_from(binary);
        }
        options
    }

    /// Builds the explicit AWS client configuration.
    #[must_use]
    pub fn aws_client_config(&self) -> AwsClientConfig {
        AwsClientConfig {
            region: self.aws_region.clone(),
            profile: self.aws_profile.clone(),
            endpoint_url: self.dynamodb_endpoint.clone(),
        }
    }

    /// Resolves the output names, applying overrides over the defaults.
    #[must_use]
    pub fn output_names(&self) -> OutputNames {
        let mut names = OutputNames::default();
        if let Some(arn) = &self.arn_output {
            names.identifier.clone_from(arn);
        }
        if let Some(name) = &self.name_output {
            names.name.clone_from(name);
        }
        names
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable holds bytes that are not valid UTF-8.
    #[error("{0} must be valid UTF-8")]
    InvalidUtf8(&'static str),
    /// The variable is set but empty or whitespace.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUtf8`] when the value is not valid UTF-8.
pub fn read_env_strict(key: VerifyEnv) -> Result<Option<String>, ConfigError> {
    let name = key.as_str();
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidUtf8(name))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(key: VerifyEnv) -> Result<Option<String>, ConfigError> {
    match read_env_strict(key)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(key.as_str())),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
