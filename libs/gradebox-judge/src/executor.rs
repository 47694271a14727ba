//! Submission executor - high-level orchestration
//!
//! Glue layer: resolves the entry point, synthesizes the driver, runs it,
//! aggregates the protocol lines, and applies the comparison policy. Knows
//! nothing about how drivers execute (runner's job) or how verdicts are
//! decided (compare's job). Every failure mode comes back as data inside a
//! RunOutcome; this function never fails.
use gradebox_common::types::{RunMode, RunOutcome, TestCase};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{aggregator, compare, entry_point, harness, runner::PythonRunner};

/// Fixed message for a run that exceeded the wall-clock budget.
pub const TIMEOUT_MESSAGE: &str = "Code execution timed out (max 10 seconds)";

/// Preflight message when no method definition can be found.
pub const NO_ENTRY_POINT_MESSAGE: &str =
    "Could not find a method definition in your code. Please define a method in the Solution class.";

/// Grade a submission against a list of test cases.
pub async fn run_submission(
    runner: &PythonRunner,
    code: &str,
    test_cases: &[TestCase],
    mode: RunMode,
) -> RunOutcome {
    let run_id = Uuid::new_v4();

    let Some(method_name) = entry_point::resolve(code) else {
        return RunOutcome::run_failure(NO_ENTRY_POINT_MESSAGE, mode);
    };

    info!(
        %run_id,
        method = %method_name,
        test_cases = test_cases.len(),
        mode = ?mode,
        source_size = code.len(),
        "starting grading run"
    );

    let driver = harness::generate(code, &method_name, mode);
    let payload = match serde_json::to_string(test_cases) {
        Ok(payload) => payload,
        Err(error) => {
            return RunOutcome::run_failure(format!("Execution error: {}", error), mode);
        }
    };

    let output = match runner.run(&driver, &payload).await {
        Ok(output) => output,
        Err(error) => {
            warn!(%run_id, error = %error, "runner failed before producing output");
            return RunOutcome::run_failure(format!("Execution error: {:#}", error), mode);
        }
    };

    if output.timed_out {
        return RunOutcome::run_failure(TIMEOUT_MESSAGE, mode);
    }

    if output.exit_code != Some(0) {
        // the process failed before the protocol could be trusted, e.g. a
        // syntax error that kept the driver from starting at all
        let diagnostic = if !output.stderr.trim().is_empty() {
            output.stderr
        } else if !output.stdout.trim().is_empty() {
            output.stdout
        } else {
            "Unknown error".to_string()
        };
        return RunOutcome::run_failure(diagnostic, mode);
    }

    let (mut results, errors) = aggregator::parse_output(&output.stdout);

    if mode == RunMode::Judged {
        // the driver's claimed verdict is recomputed on this side of the
        // process boundary, where user code cannot have interfered with it
        for record in &mut results {
            if record.skipped {
                continue;
            }
            if let Some(expected) = &record.expected {
                record.passed = compare::outputs_match(&record.output, expected);
            }
        }
    }

    info!(
        %run_id,
        results = results.len(),
        errors = errors.len(),
        duration_ms = output.duration.as_millis() as u64,
        "grading run finished"
    );

    RunOutcome::new(results, errors, mode)
}
