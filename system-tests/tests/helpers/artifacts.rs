// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Artifact helpers for system-tests.
// Purpose: Create per-test run roots and write deterministic summaries.
// Dependencies: system-tests, serde, serde_jcs
// ============================================================================

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use system_tests::config::SystemTestConfig;
use table_verify::TableVerification;

#[derive(Debug, Serialize)]
struct TestSummary<'a> {
    test_name: &'a str,
    status: &'a str,
    duration_ms: u128,
    notes: &'a [String],
}

pub fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Returns a table name unique to this test run.
pub fn unique_table_name(prefix: &str) -> String {
    format!("{prefix}-{}", now_millis())
}

/// Writes per-test verification artifacts, even when a test panics.
pub struct TestReporter {
    root: PathBuf,
    test_name: String,
    started_at_ms: u128,
    finalized: bool,
}

impl TestReporter {
    /// Creates the artifact root for the named test.
    pub fn new(test_name: &str) -> io::Result<Self> {
        let config = SystemTestConfig::load().map_err(io::Error::other)?;
        let started_at_ms = now_millis();
        let root = config.run_root.unwrap_or_else(|| {
            PathBuf::from("target/system-tests").join(format!("run_{started_at_ms}"))
        });
        let root = root.join(test_name);
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            test_name: test_name.to_string(),
            started_at_ms,
            finalized: false,
        })
    }

    /// Records a verification report as canonical JSON.
    pub fn record(&self, verification: &TableVerification) -> io::Result<PathBuf> {
        self.write_json("verification.json", verification)
    }

    /// Writes the final summary for the test.
    pub fn finish(&mut self, status: &str, notes: &[String]) -> io::Result<()> {
        let summary = TestSummary {
            test_name: &self.test_name,
            status,
            duration_ms: now_millis().saturating_sub(self.started_at_ms),
            notes,
        };
        self.write_json("summary.json", &summary)?;
        self.finalized = true;
        Ok(())
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(io::Error::other)?;
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let status = if std::thread::panicking() { "panic" } else { "unknown" };
        let _ = self.finish(status, &[]);
    }
}
