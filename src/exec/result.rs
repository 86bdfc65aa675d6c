// src/exec/result.rs
use serde::Serialize;

/// Marker appended to captured stdout when the per-stream byte cap is hit.
pub const STDOUT_TRUNCATION_MARKER: &str = "\n... (output truncated)";
/// Marker appended to captured stderr when the per-stream byte cap is hit.
pub const STDERR_TRUNCATION_MARKER: &str = "\n... (error truncated)";

/// Classification of how a run ended. Exactly one kind applies per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunErrorKind {
    /// The process ran and exited with status 0.
    None,
    /// The wall-clock deadline fired and the process was killed.
    Timeout,
    /// The process ran and exited non-zero (or died on a signal).
    ProcessFailure,
    /// The process could not be started at all.
    SpawnFailure,
    /// The submitted source was empty or whitespace-only; nothing was spawned.
    EmptyInput,
}

/// The terminal, immutable outcome of one run.
///
/// `exit_code` is only present when the child actually exited on its own;
/// a timeout-kill or a spawn failure leaves it `None`.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub error_kind: RunErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResult {
    pub fn success(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code: Some(exit_code),
            error_kind: RunErrorKind::None,
            error: None,
        }
    }

    pub fn process_failure(
        stdout: String,
        stderr: String,
        exit_code: Option<i32>,
        message: String,
    ) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            error_kind: RunErrorKind::ProcessFailure,
            error: Some(message),
        }
    }

    pub fn timeout(stdout: String, stderr: String, message: String) -> Self {
        Self {
            stdout,
            stderr,
            exit_code: None,
            error_kind: RunErrorKind::Timeout,
            error: Some(message),
        }
    }

    pub fn spawn_failure(message: String) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            error_kind: RunErrorKind::SpawnFailure,
            error: Some(message),
        }
    }

    pub fn empty_input() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            error_kind: RunErrorKind::EmptyInput,
            error: Some("No code provided".to_string()),
        }
    }

    /// True when the run produced anything worth forwarding to the
    /// suggestion collaborator.
    pub fn is_failure(&self) -> bool {
        self.error_kind != RunErrorKind::None
    }
}

/// Outcome of a pure syntax check. Independent of execution: a caller may
/// validate without running, and invalid code is still allowed to run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
            line: None,
            column: None,
        }
    }

    pub fn syntax_error(message: String, line: usize, column: usize) -> Self {
        Self {
            valid: false,
            message: Some(message),
            line: Some(line),
            column: Some(column),
        }
    }
}
