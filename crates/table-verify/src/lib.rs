// crates/table-verify/src/lib.rs
// ============================================================================
// Module: Table Verify Library
// Description: Live verification of DynamoDB tables against IaC outputs.
// Purpose: Assert a provisioned table's ARN and name match Terraform outputs.
// Dependencies: aws-config, aws-sdk-dynamodb, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! `table-verify` checks that a DynamoDB table provisioned by Terraform (or
//! `OpenTofu`) is live and matches the recorded outputs. The flow is linear:
//! resolve an explicit AWS configuration, build a client, read the two
//! provisioning outputs, describe the table once, and compare the ARN and
//! name independently.
//!
//! Output or lookup failures stop the check before any comparison. Field
//! mismatches never stop it: both comparisons always run so every failure is
//! visible in a single report.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
pub mod context;
pub mod describe;
pub mod logging;
pub mod outputs;
pub mod verify;

#[cfg(test)]
mod test_support;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use client::AwsClientConfig;
pub use client::ClientError;
pub use client::DynamoDbTableDescriber;
pub use config::ConfigError;
pub use config::VerifyConfig;
pub use context::SuiteError;
pub use context::TerraformOptions;
pub use context::TestContext;
pub use context::verify_composable_complete;
pub use describe::LookupError;
pub use describe::TableDescriber;
pub use describe::TableDescriptor;
pub use outputs::OutputError;
pub use outputs::OutputNames;
pub use outputs::OutputSource;
pub use outputs::StaticOutputs;
pub use outputs::TerraformOutputs;
pub use verify::ExpectedTable;
pub use verify::FieldCheck;
pub use verify::TableField;
pub use verify::TableVerification;
pub use verify::VerifyError;
pub use verify::verify_table;
