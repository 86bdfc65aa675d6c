// src/exec/mod.rs

pub mod result;
pub mod sandbox;
pub mod validator;

pub use result::{RunErrorKind, RunResult, ValidationResult};
pub use validator::validate;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Semaphore;

use sandbox::Sandbox;

/// Default wall-clock deadline for a single run.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default per-stream cap on recorded output.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10_000;

/// Resource limits applied to one run. Passed explicitly so callers and
/// tests can shrink them without touching global state.
#[derive(Debug, Clone, Copy)]
pub struct RunLimits {
    pub timeout: Duration,
    pub max_output_bytes: usize,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

/// How the interpreter is invoked for a run. Batch is the default; an
/// interactive run adds `-i` but keeps stdin closed, so it is not a
/// session -- each run is still stateless and independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Batch,
    Interactive,
}

/// Public entry point of the execution engine. Safe under concurrent
/// invocation: runs share no mutable state, and a semaphore bounds how
/// many sandboxes exist at once (callers past the bound wait).
#[derive(Debug)]
pub struct Executor {
    sandbox: Sandbox,
    limits: RunLimits,
    permits: Arc<Semaphore>,
}

impl Executor {
    pub fn new(python_bin: impl Into<String>, limits: RunLimits, max_concurrent_runs: usize) -> Self {
        Self {
            sandbox: Sandbox::new(python_bin),
            limits,
            permits: Arc::new(Semaphore::new(max_concurrent_runs.max(1))),
        }
    }

    /// Run `source` with the configured default limits.
    pub async fn execute(&self, source: &str) -> RunResult {
        self.execute_with(source, ExecutionMode::Batch, self.limits).await
    }

    /// Run `source` in an explicit mode with the configured default limits.
    pub async fn execute_in_mode(&self, source: &str, mode: ExecutionMode) -> RunResult {
        self.execute_with(source, mode, self.limits).await
    }

    /// Run `source` with explicit mode and limits. Empty or whitespace-only
    /// input short-circuits before any process is spawned. No validation
    /// pass happens here: invalid syntax is allowed to run and surfaces as
    /// a process failure with the interpreter's own message.
    pub async fn execute_with(
        &self,
        source: &str,
        mode: ExecutionMode,
        limits: RunLimits,
    ) -> RunResult {
        if source.trim().is_empty() {
            return RunResult::empty_input();
        }

        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => return RunResult::spawn_failure("executor is shutting down".to_string()),
        };

        self.sandbox.run(source, mode, &limits).await
    }
}
