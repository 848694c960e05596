// crates/table-verify/src/client.rs
// ============================================================================
// Module: DynamoDB Client
// Description: AWS configuration loading and the DynamoDB-backed describer.
// Purpose: Build a ready client from explicit configuration and map errors.
// Dependencies: aws-config, aws-credential-types, aws-sdk-dynamodb
// ============================================================================

//! ## Overview
//! Credential resolution is delegated to the standard `aws-config` discovery
//! chain. Overrides arrive through an explicit [`AwsClientConfig`] instead of
//! process globals, and the resolved configuration is validated eagerly so a
//! broken credential chain fails before any table lookup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::SdkConfig;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableOutput;
use thiserror::Error;
use tracing::debug;

use crate::describe::LookupError;
use crate::describe::TableDescriber;
use crate::describe::TableDescriptor;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Explicit overrides applied on top of the default credential chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsClientConfig {
    /// Region override; falls back to the environment chain when unset.
    pub region: Option<String>,
    /// Shared-config profile override.
    pub profile: Option<String>,
    /// Endpoint override (for DynamoDB Local or VPC endpoints).
    pub endpoint_url: Option<String>,
}

/// Resolves an SDK configuration and validates its credentials.
///
/// # Errors
///
/// Returns [`ClientError`] when no region or credentials can be resolved.
pub async fn load_sdk_config(config: &AwsClientConfig) -> Result<SdkConfig, ClientError> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;
    validate_sdk_config(&sdk_config).await?;
    Ok(sdk_config)
}

/// Checks that a resolved configuration can sign requests.
///
/// # Errors
///
/// Returns [`ClientError`] when the region or credentials are unavailable.
pub async fn validate_sdk_config(sdk_config: &SdkConfig) -> Result<(), ClientError> {
    let Some(region) = sdk_config.region() else {
        return Err(ClientError::MissingRegion);
    };
    let provider = sdk_config.credentials_provider().ok_or(ClientError::NoCredentialsProvider)?;
    provider
        .provide_credentials()
        .await
        .map_err(|err| ClientError::Credentials(DisplayErrorContext(&err).to_string()))?;
    debug!(region = %region, "resolved aws configuration");
    Ok(())
}

// ============================================================================
// SECTION: DynamoDB Describer
// ============================================================================

/// DynamoDB-backed table describer.
#[derive(Debug, Clone)]
pub struct DynamoDbTableDescriber {
    /// DynamoDB client handle.
    client: Client,
}

impl DynamoDbTableDescriber {
    /// Wraps an already-resolved SDK configuration.
    #[must_use]
    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::from_client(Client::new(sdk_config))
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self {
            client,
        }
    }

    /// Resolves configuration and builds a describer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the configuration cannot be resolved.
    pub async fn connect(config: &AwsClientConfig) -> Result<Self, ClientError> {
        let sdk_config = load_sdk_config(config).await?;
        Ok(Self::from_sdk_config(&sdk_config))
    }
}

#[async_trait]
impl TableDescriber for DynamoDbTableDescriber {
    async fn describe_table(&self, table_name: &str) -> Result<TableDescriptor, LookupError> {
        let output = self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|err| classify_describe_error(table_name, &err))?;
        descriptor_from_output(&output)
    }
}

/// Extracts the table identity from a describe response.
fn descriptor_from_output(output: &DescribeTableOutput) -> Result<TableDescriptor, LookupError> {
    let table = output.table().ok_or(LookupError::Incomplete("table"))?;
    let identifier = table.table_arn().ok_or(LookupError::Incomplete("table_arn"))?;
    let name = table.table_name().ok_or(LookupError::Incomplete("table_name"))?;
    Ok(TableDescriptor {
        identifier: identifier.to_string(),
        name: name.to_string(),
    })
}

/// Maps an SDK failure onto a lookup error class.
fn classify_describe_error(table_name: &str, err: &SdkError<DescribeTableError>) -> LookupError {
    let message = DisplayErrorContext(err).to_string();
    match err.as_service_error() {
        Some(service) if service.is_resource_not_found_exception() => LookupError::NotFound {
            table: table_name.to_string(),
            message,
        },
        Some(_) => LookupError::Service(message),
        None => LookupError::Transport(message),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Client construction failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No region resolved from overrides or the environment.
    #[error("aws region is not configured")]
    MissingRegion,
    /// The credential chain produced no provider.
    #[error("no aws credentials provider resolved")]
    NoCredentialsProvider,
    /// The credential provider failed to produce credentials.
    #[error("unable to load aws credentials: {0}")]
    Credentials(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
