// crates/table-verify/src/describe.rs
// ============================================================================
// Module: Table Describer
// Description: Narrow lookup interface for live table descriptors.
// Purpose: Decouple verification from the DynamoDB client for test doubles.
// Dependencies: async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! The verification routine needs exactly one capability from the database
//! service: describe a table by name. [`TableDescriber`] captures that single
//! operation so tests can substitute an in-memory fake for the live client.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Public Types
// ============================================================================

/// Snapshot of a live table's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    /// Table ARN assigned by the service.
    pub identifier: String,
    /// Table name.
    pub name: String,
}

/// Table lookup interface.
#[async_trait]
pub trait TableDescriber: Send + Sync {
    /// Describes the table with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the table cannot be described.
    async fn describe_table(&self, table_name: &str) -> Result<TableDescriptor, LookupError>;
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Table lookup failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The table does not exist.
    #[error("table {table} not found: {message}")]
    NotFound {
        /// Table name that was looked up.
        table: String,
        /// Service error message.
        message: String,
    },
    /// The service rejected the request (for example, access denied).
    #[error("describe table rejected: {0}")]
    Service(String),
    /// The request never produced a service response.
    #[error("describe table transport failure: {0}")]
    Transport(String),
    /// The response lacked a required attribute.
    #[error("describe table response missing {0}")]
    Incomplete(&'static str),
}
