// tests/integration_tests.rs
use std::time::{Duration, Instant};

use sandpad::exec::result::STDOUT_TRUNCATION_MARKER;
use sandpad::exec::{validate, ExecutionMode, Executor, RunErrorKind, RunLimits};

/// Engine tests need a Python interpreter; environments without one skip
/// the process-level assertions rather than fail.
fn python_available() -> bool {
    std::process::Command::new("python3")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn executor() -> Executor {
    Executor::new("python3", RunLimits::default(), 4)
}

#[tokio::test]
async fn test_execute_hello_world() {
    if !python_available() {
        return;
    }
    let result = executor().execute("print('hi')").await;
    assert_eq!(result.error_kind, RunErrorKind::None);
    assert!(result.stdout.contains("hi"));
    assert_eq!(result.exit_code, Some(0));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_empty_input_never_spawns() {
    // a nonexistent interpreter would turn any spawn attempt into a
    // spawn_failure, so empty_input here proves nothing was spawned
    let executor = Executor::new("sandpad-no-such-python", RunLimits::default(), 4);
    for source in ["", "   ", "\n\t  \n"] {
        let result = executor.execute(source).await;
        assert_eq!(result.error_kind, RunErrorKind::EmptyInput);
        assert!(result.exit_code.is_none());
        assert!(result.stdout.is_empty());
        assert!(result.stderr.is_empty());
    }
}

#[tokio::test]
async fn test_spawn_failure_for_missing_interpreter() {
    let executor = Executor::new("sandpad-no-such-python", RunLimits::default(), 4);
    let result = executor.execute("print('hi')").await;
    assert_eq!(result.error_kind, RunErrorKind::SpawnFailure);
    assert!(result.exit_code.is_none());
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_timeout_kills_the_child() {
    if !python_available() {
        return;
    }
    let limits = RunLimits {
        timeout: Duration::from_secs(1),
        max_output_bytes: 10_000,
    };
    let started = Instant::now();
    let result = executor()
        .execute_with("import time; time.sleep(100)", ExecutionMode::Batch, limits)
        .await;
    assert_eq!(result.error_kind, RunErrorKind::Timeout);
    assert!(result.exit_code.is_none());
    assert!(result.error.unwrap().contains("timed out after 1"));
    // the deadline is 1s; the whole call must come back promptly after it
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_timeout_keeps_partial_output() {
    if !python_available() {
        return;
    }
    let limits = RunLimits {
        timeout: Duration::from_secs(1),
        max_output_bytes: 10_000,
    };
    let code = "import sys, time\nprint('before sleep', flush=True)\ntime.sleep(100)";
    let result = executor()
        .execute_with(code, ExecutionMode::Batch, limits)
        .await;
    assert_eq!(result.error_kind, RunErrorKind::Timeout);
    assert!(result.stdout.contains("before sleep"));
}

#[tokio::test]
async fn test_output_truncation_marker_appended_once() {
    if !python_available() {
        return;
    }
    let limits = RunLimits {
        timeout: Duration::from_secs(10),
        max_output_bytes: 1_000,
    };
    let result = executor()
        .execute_with("print('x' * 50000)", ExecutionMode::Batch, limits)
        .await;
    assert_eq!(result.error_kind, RunErrorKind::None);
    assert!(result.stdout.ends_with(STDOUT_TRUNCATION_MARKER));
    assert_eq!(result.stdout.matches("truncated").count(), 1);
    assert!(result.stdout.len() <= 1_000 + STDOUT_TRUNCATION_MARKER.len());
}

#[tokio::test]
async fn test_streams_truncate_independently() {
    if !python_available() {
        return;
    }
    let limits = RunLimits {
        timeout: Duration::from_secs(10),
        max_output_bytes: 100,
    };
    let code = "import sys\nprint('o' * 5000)\nprint('e' * 5000, file=sys.stderr)";
    let result = executor()
        .execute_with(code, ExecutionMode::Batch, limits)
        .await;
    assert!(result.stdout.contains("(output truncated)"));
    assert!(result.stderr.contains("(error truncated)"));
}

#[tokio::test]
async fn test_process_failure_surfaces_stderr() {
    if !python_available() {
        return;
    }
    let result = executor().execute("raise ValueError('x')").await;
    assert_eq!(result.error_kind, RunErrorKind::ProcessFailure);
    assert!(result.exit_code.is_some());
    assert_ne!(result.exit_code, Some(0));
    assert!(result.error.unwrap().contains("ValueError"));
}

#[tokio::test]
async fn test_invalid_syntax_still_executes_and_fails() {
    if !python_available() {
        return;
    }
    // validation and execution are decoupled: bad syntax is allowed to
    // run and surfaces as the interpreter's own error
    let result = executor().execute("def f(:\n  pass").await;
    assert_eq!(result.error_kind, RunErrorKind::ProcessFailure);
    assert!(result.error.unwrap().contains("SyntaxError"));
}

#[tokio::test]
async fn test_concurrent_runs_use_distinct_artifacts() {
    if !python_available() {
        return;
    }
    let executor = executor();
    let code = "print(__file__)";
    let (a, b) = tokio::join!(executor.execute(code), executor.execute(code));
    assert_eq!(a.error_kind, RunErrorKind::None);
    assert_eq!(b.error_kind, RunErrorKind::None);
    assert_ne!(a.stdout, b.stdout);
}

#[tokio::test]
async fn test_concurrent_runs_do_not_interfere() {
    if !python_available() {
        return;
    }
    let executor = executor();
    let (a, b) = tokio::join!(
        executor.execute("print('alpha')"),
        executor.execute("print('beta')")
    );
    assert!(a.stdout.contains("alpha"));
    assert!(!a.stdout.contains("beta"));
    assert!(b.stdout.contains("beta"));
    assert!(!b.stdout.contains("alpha"));
}

#[tokio::test]
async fn test_pure_source_is_idempotent() {
    if !python_available() {
        return;
    }
    let executor = executor();
    let code = "print(sum(range(10)))";
    let first = executor.execute(code).await;
    let second = executor.execute(code).await;
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.exit_code, second.exit_code);
}

#[tokio::test]
async fn test_interactive_mode_runs_and_exits() {
    if !python_available() {
        return;
    }
    // stdin is closed, so the interpreter's interactive prompt hits EOF
    // right after the script; each run stays stateless
    let result = executor()
        .execute_in_mode("print('repl')", ExecutionMode::Interactive)
        .await;
    assert_eq!(result.error_kind, RunErrorKind::None);
    assert!(result.stdout.contains("repl"));
}

#[test]
fn test_validate_reports_first_error_position() {
    let result = validate("def f(:\n  pass").unwrap();
    assert!(!result.valid);
    assert_eq!(result.line, Some(1));
    assert!(result.message.unwrap().starts_with("Syntax error"));
}

#[test]
fn test_validate_accepts_valid_source() {
    let result = validate("for i in range(3):\n    print(i)\n").unwrap();
    assert!(result.valid);
}
