// crates/table-verify/src/verify.rs
// ============================================================================
// Module: Table Verification
// Description: Compares a live table descriptor with provisioning outputs.
// Purpose: Report per-field identity checks for a provisioned table.
// Dependencies: serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`verify_table`] reads the expected ARN and name from an [`OutputSource`],
//! describes the table by name, and records one [`FieldCheck`] per field.
//!
//! Unusable inputs fail fast: a missing output or a failed lookup returns an
//! error before any comparison. Mismatches do not: both checks always run and
//! are returned together so a stale ARN never hides a wrong name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::describe::LookupError;
use crate::describe::TableDescriber;
use crate::describe::TableDescriptor;
use crate::outputs::OutputError;
use crate::outputs::OutputNames;
use crate::outputs::OutputSource;
use crate::outputs::read_required;

// ============================================================================
// SECTION: Public Types
// ============================================================================

/// Table attribute under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableField {
    /// Table ARN.
    Identifier,
    /// Table name.
    Name,
}

impl TableField {
    /// Returns a stable label for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "table_arn",
            Self::Name => "table_name",
        }
    }
}

impl fmt::Display for TableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values recorded by the provisioning tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedTable {
    /// Expected table ARN.
    pub identifier: String,
    /// Expected table name.
    pub name: String,
}

/// Outcome of comparing one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    /// Field compared.
    pub field: TableField,
    /// Value recorded by the provisioning tool.
    pub expected: String,
    /// Value reported by the live table.
    pub actual: String,
}

impl FieldCheck {
    /// Compares an expected value with the live value.
    #[must_use]
    pub fn compare(field: TableField, expected: &str, actual: &str) -> Self {
        Self {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Returns true when both values are identical.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

impl fmt::Display for FieldCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "{} matched `{}`", self.field, self.actual)
        } else {
            write!(
                f,
                "{} mismatch: expected `{}`, actual `{}`",
                self.field, self.expected, self.actual
            )
        }
    }
}

/// Result of a completed table check.
///
/// # Invariants
/// - `checks` holds the identifier check followed by the name check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableVerification {
    /// Values read from the provisioning outputs.
    pub expected: ExpectedTable,
    /// Descriptor returned by the live lookup.
    pub descriptor: TableDescriptor,
    /// Field checks in evaluation order.
    checks: Vec<FieldCheck>,
}

impl TableVerification {
    /// Builds a verification by comparing every field.
    #[must_use]
    pub fn new(expected: ExpectedTable, descriptor: TableDescriptor) -> Self {
        let checks = vec![
            FieldCheck::compare(TableField::Identifier, &expected.identifier, &descriptor.identifier),
            FieldCheck::compare(TableField::Name, &expected.name, &descriptor.name),
        ];
        Self {
            expected,
            descriptor,
            checks,
        }
    }

    /// Returns every field check.
    #[must_use]
    pub fn checks(&self) -> &[FieldCheck] {
        &self.checks
    }

    /// Returns the check for a single field.
    #[must_use]
    pub fn check(&self, field: TableField) -> Option<&FieldCheck> {
        self.checks.iter().find(|check| check.field == field)
    }

    /// Returns the failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks.iter().filter(|check| !check.passed())
    }

    /// Returns true when every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(FieldCheck::passed)
    }

    /// Converts failed checks into an error.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Mismatch`] with every failed check.
    pub fn into_result(self) -> Result<Self, VerifyError> {
        let failures: Vec<FieldCheck> = self.failures().cloned().collect();
        if failures.is_empty() { Ok(self) } else { Err(VerifyError::Mismatch(failures)) }
    }
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Verifies a live table against its provisioning outputs.
///
/// Outputs are read through the synchronous [`OutputSource`] trait before the
/// first await. With [`TerraformOutputs`](crate::outputs::TerraformOutputs)
/// each read spawns the provisioning binary and waits on it, which blocks the
/// calling runtime worker until the process exits. Call this from a
/// multi-threaded runtime, or wrap it in `spawn_blocking`, when other tasks
/// must keep making progress meanwhile.
///
/// # Errors
///
/// Returns [`VerifyError::Output`] when an output is missing or blank and
/// [`VerifyError::Lookup`] when the describe call fails. Field mismatches are
/// reported in the returned [`TableVerification`], not as errors.
pub async fn verify_table<O, D>(
    outputs: &O,
    describer: &D,
    names: &OutputNames,
) -> Result<TableVerification, VerifyError>
where
    O: OutputSource + ?Sized,
    D: TableDescriber + ?Sized,
{
    let identifier = read_required(outputs, &names.identifier)?;
    let name = read_required(outputs, &names.name)?;
    debug!(table = %name, arn = %identifier, "read provisioning outputs");

    let descriptor = describer.describe_table(&name).await.inspect_err(|err| {
        warn!(table = %name, error = %err, "describe table failed");
    })?;

    let verification = TableVerification::new(
        ExpectedTable {
            identifier,
            name,
        },
        descriptor,
    );
    for check in verification.checks() {
        if check.passed() {
            info!(field = %check.field, value = %check.actual, "table field matched");
        } else {
            warn!(
                field = %check.field,
                expected = %check.expected,
                actual = %check.actual,
                "table field mismatch"
            );
        }
    }
    Ok(verification)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Table verification failures.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// A provisioning output could not be read.
    #[error("provisioning output unavailable: {0}")]
    Output(#[from] OutputError),
    /// The table lookup failed; no fields were compared.
    #[error("table lookup failed: {0}")]
    Lookup(#[from] LookupError),
    /// One or more fields differ from the provisioning outputs.
    #[error("table verification failed: {}", render_failures(.0))]
    Mismatch(Vec<FieldCheck>),
}

/// Joins failed checks into a single message.
fn render_failures(failures: &[FieldCheck]) -> String {
    failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
