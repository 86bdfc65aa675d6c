// src/exec/sandbox.rs
use std::io::Write;
use std::process::Stdio;

use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::timeout;

use crate::exec::result::{RunResult, STDERR_TRUNCATION_MARKER, STDOUT_TRUNCATION_MARKER};
use crate::exec::{ExecutionMode, RunLimits};

/// Owns the OS-level process lifecycle for a single run: one temp-file
/// artifact, one child process, both gone by the time `run` returns.
#[derive(Debug)]
pub struct Sandbox {
    python_bin: String,
}

struct CapturedStream {
    bytes: Vec<u8>,
    truncated: bool,
}

impl CapturedStream {
    fn render(self, marker: &str) -> String {
        let mut text = String::from_utf8_lossy(&self.bytes).into_owned();
        if self.truncated {
            text.push_str(marker);
        }
        text
    }
}

impl Sandbox {
    pub fn new(python_bin: impl Into<String>) -> Self {
        Self {
            python_bin: python_bin.into(),
        }
    }

    /// Run non-empty `source` under `limits`. The coordinator has already
    /// rejected empty input, so the sandbox always attempts a spawn.
    pub async fn run(&self, source: &str, mode: ExecutionMode, limits: &RunLimits) -> RunResult {
        // The temp file is deleted when `artifact` drops, on every exit path.
        let artifact = match self.write_artifact(source) {
            Ok(file) => file,
            Err(e) => {
                return RunResult::spawn_failure(format!(
                    "failed to stage code for execution: {}",
                    e
                ));
            }
        };

        let mut cmd = Command::new(&self.python_bin);
        if mode == ExecutionMode::Interactive {
            cmd.arg("-i");
        }
        cmd.arg(artifact.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return RunResult::spawn_failure(format!(
                    "failed to spawn {}: {}",
                    self.python_bin, e
                ));
            }
        };

        // Each stream is drained on its own task so the child can never
        // block on a full pipe, whatever order it writes in.
        let cap = limits.max_output_bytes;
        let stdout_task = tokio::spawn(read_stream(child.stdout.take(), cap));
        let stderr_task = tokio::spawn(read_stream(child.stderr.take(), cap));

        // Race the child's exit against the wall-clock deadline. On the
        // deadline the process must be dead before a result is returned.
        let status = match timeout(limits.timeout, child.wait()).await {
            Ok(Ok(status)) => Some(status),
            Ok(Err(e)) => {
                let _ = child.kill().await;
                return RunResult::spawn_failure(format!("failed to wait for process: {}", e));
            }
            Err(_) => {
                if let Err(e) = child.kill().await {
                    log::warn!("failed to kill timed-out process: {}", e);
                }
                None
            }
        };

        // Once the child is gone both pipes hit EOF, so these joins are
        // bounded too.
        let (out, err) = futures::future::join(stdout_task, stderr_task).await;
        let stdout = out
            .map(|captured| captured.render(STDOUT_TRUNCATION_MARKER))
            .unwrap_or_default();
        let stderr = err
            .map(|captured| captured.render(STDERR_TRUNCATION_MARKER))
            .unwrap_or_default();

        match status {
            None => RunResult::timeout(
                stdout,
                stderr,
                format!(
                    "Code execution timed out after {} seconds",
                    limits.timeout.as_secs()
                ),
            ),
            Some(status) => match status.code() {
                Some(0) => RunResult::success(stdout, stderr, 0),
                code => {
                    let message = if stderr.trim().is_empty() {
                        "Code execution failed".to_string()
                    } else {
                        stderr.clone()
                    };
                    RunResult::process_failure(stdout, stderr, code, message)
                }
            },
        }
    }

    /// Materialize the source into a uniquely named temp file visible to
    /// the spawned interpreter.
    fn write_artifact(&self, source: &str) -> std::io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("sandpad-run-")
            .suffix(".py")
            .tempfile()?;
        file.write_all(source.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

async fn read_stream<R>(stream: Option<R>, cap: usize) -> CapturedStream
where
    R: AsyncRead + Unpin,
{
    match stream {
        Some(reader) => read_capped(reader, cap).await,
        None => CapturedStream {
            bytes: Vec::new(),
            truncated: false,
        },
    }
}

/// Read to EOF, recording at most `cap` bytes. Past the cap the stream is
/// still drained so the writer never stalls; the extra bytes are dropped
/// and the capture is flagged truncated.
async fn read_capped<R>(mut reader: R, cap: usize) -> CapturedStream
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    let mut chunk = [0u8; 4096];
    let mut truncated = false;
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if bytes.len() < cap {
                    let take = n.min(cap - bytes.len());
                    bytes.extend_from_slice(&chunk[..take]);
                    if take < n {
                        truncated = true;
                    }
                } else {
                    truncated = true;
                }
            }
        }
    }
    CapturedStream { bytes, truncated }
}
