// crates/table-verify/src/context.rs
// ============================================================================
// Module: Test Context
// Description: Provisioning context and the composable table test suite.
// Purpose: Bundle Terraform and AWS settings for a complete table check.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! A [`TestContext`] carries everything a composable module test needs: how
//! to invoke the provisioning tool, how to reach AWS, and which outputs name
//! the table. [`verify_composable_complete`] is the suite entry point: it
//! builds the DynamoDB client and runs the `table_exists` check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::Instrument;
use tracing::info;
use tracing::info_span;

use crate::client::AwsClientConfig;
use crate::client::ClientError;
use crate::client::DynamoDbTableDescriber;
use crate::config::VerifyConfig;
use crate::describe::TableDescriber;
use crate::outputs::OutputNames;
use crate::outputs::TerraformOutputs;
use crate::verify::TableVerification;
use crate::verify::VerifyError;
use crate::verify::verify_table;

// ============================================================================
// SECTION: Terraform Options
// ============================================================================

/// Default provisioning tool binary.
pub const DEFAULT_TERRAFORM_BINARY: &str = "terraform";

/// Invocation options for the provisioning tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformOptions {
    /// Binary to run (`terraform` or `tofu`).
    pub binary: String,
    /// Directory holding the applied configuration.
    pub working_dir: PathBuf,
    /// Extra environment variables for each invocation.
    pub env: BTreeMap<String, String>,
}

impl TerraformOptions {
    /// Creates options for the given working directory.
    #[must_use]
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary: DEFAULT_TERRAFORM_BINARY.to_string(),
            working_dir: working_dir.as_ref().to_path_buf(),
            env: BTreeMap::new(),
        }
    }
}

impl Default for TerraformOptions {
    fn default() -> Self {
        Self::new(".")
    }
}

// ============================================================================
// SECTION: Test Context
// ============================================================================

/// Settings shared by every check in a composable module test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContext {
    /// Provisioning tool invocation options.
    terraform: TerraformOptions,
    /// AWS client overrides.
    aws: AwsClientConfig,
    /// Output names that identify the table.
    output_names: OutputNames,
}

impl TestContext {
    /// Creates a context with the default output names.
    #[must_use]
    pub fn new(terraform: TerraformOptions, aws: AwsClientConfig) -> Self {
        Self {
            terraform,
            aws,
            output_names: OutputNames::default(),
        }
    }

    /// Creates a context from environment-backed configuration.
    #[must_use]
    pub fn from_config(config: &VerifyConfig) -> Self {
        Self::new(config.terraform_options(), config.aws_client_config())
            .with_output_names(config.output_names())
    }

    /// Replaces the output names.
    #[must_use]
    pub fn with_output_names(mut self, output_names: OutputNames) -> Self {
        self.output_names = output_names;
        self
    }

    /// Returns the provisioning tool options.
    #[must_use]
    pub const fn terraform_options(&self) -> &TerraformOptions {
        &self.terraform
    }

    /// Returns the AWS client overrides.
    #[must_use]
    pub const fn aws(&self) -> &AwsClientConfig {
        &self.aws
    }

    /// Returns the output names.
    #[must_use]
    pub const fn output_names(&self) -> &OutputNames {
        &self.output_names
    }

    /// Returns an output source bound to this context's working directory.
    #[must_use]
    pub fn terraform_outputs(&self) -> TerraformOutputs {
        TerraformOutputs::new(self.terraform.clone())
    }
}

// ============================================================================
// SECTION: Suite
// ============================================================================

/// Runs the complete table suite against live AWS.
///
/// # Errors
///
/// Returns [`SuiteError::Client`] when AWS configuration cannot be resolved
/// and [`SuiteError::Verify`] when the table check cannot complete.
pub async fn verify_composable_complete(
    context: &TestContext,
) -> Result<TableVerification, SuiteError> {
    let describer = DynamoDbTableDescriber::connect(context.aws()).await?;
    verify_table_exists(context, &describer).await
}

/// Runs the `table_exists` check with the given describer.
///
/// # Errors
///
/// Returns [`SuiteError::Verify`] when an output or the lookup fails.
pub async fn verify_table_exists<D>(
    context: &TestContext,
    describer: &D,
) -> Result<TableVerification, SuiteError>
where
    D: TableDescriber + ?Sized,
{
    let span = info_span!(
        "table_exists",
        working_dir = %context.terraform_options().working_dir.display()
    );
    async {
        let outputs = context.terraform_outputs();
        let verification = verify_table(&outputs, describer, context.output_names()).await?;
        info!(passed = verification.passed(), "table check complete");
        Ok::<_, SuiteError>(verification)
    }
    .instrument(span)
    .await
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Suite failures.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The AWS client could not be configured.
    #[error("aws client setup failed: {0}")]
    Client(#[from] ClientError),
    /// The table check could not complete.
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
