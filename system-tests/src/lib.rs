// system-tests/src/lib.rs
// ============================================================================
// Module: Table Verify System Tests Library
// Description: Shared configuration for table verification system tests.
// Purpose: Provide common settings for the system-test binaries.
// Dependencies: table-verify
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the table verification
//! system-tests binaries in `system-tests/tests`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
