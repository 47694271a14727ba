use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One (input, optional expected) pair to run against the entry point.
/// `expected` absent means the case is observe-only: it is still executed
/// and reported, but never judged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
}

/// Result-construction mode baked into the generated driver at synthesis time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Compare each output against `expected` to produce pass/fail.
    Judged,
    /// Report raw output without a pass/fail judgment.
    Execute,
}

/// Per-case success-path record, one per test case that ran to completion.
/// Field names follow the line protocol the driver emits on stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    #[serde(rename = "test_case")]
    pub index: u32,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub skipped: bool,
    #[serde(default)]
    pub output: Value,
    #[serde(default)]
    pub expected: Option<Value>,
    #[serde(default)]
    pub input: Value,
    #[serde(rename = "console_output", default)]
    pub console_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Per-case failure-path record. `index` 0 marks a run-level failure that
/// invalidated the whole execution (timeout, crash before the protocol
/// started, missing entry point).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(rename = "test_case")]
    pub index: u32,
    pub error: String,
    #[serde(default)]
    pub input: Value,
    #[serde(rename = "console_output", default)]
    pub console_output: String,
}

impl ErrorRecord {
    /// Synthetic record for a failure that invalidated the whole run.
    pub fn run_level(error: impl Into<String>) -> Self {
        Self {
            index: 0,
            error: error.into(),
            input: Value::Null,
            console_output: String::new(),
        }
    }
}

/// The grading contract's single return shape: every run produces one of
/// these, even in total failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub results: Vec<ExecutionRecord>,
    pub errors: Vec<ErrorRecord>,
    pub all_passed: bool,
    pub execute_mode: bool,
}

impl RunOutcome {
    /// `all_passed` holds iff there are no errors, at least one result, and
    /// every result passed.
    pub fn new(results: Vec<ExecutionRecord>, errors: Vec<ErrorRecord>, mode: RunMode) -> Self {
        let all_passed = errors.is_empty() && !results.is_empty() && results.iter().all(|r| r.passed);
        Self {
            results,
            errors,
            all_passed,
            execute_mode: mode == RunMode::Execute,
        }
    }

    /// Outcome carrying a single run-level error and no per-case results.
    pub fn run_failure(error: impl Into<String>, mode: RunMode) -> Self {
        Self {
            results: Vec::new(),
            errors: vec![ErrorRecord::run_level(error)],
            all_passed: false,
            execute_mode: mode == RunMode::Execute,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passing_record(index: u32) -> ExecutionRecord {
        ExecutionRecord {
            index,
            passed: true,
            skipped: false,
            output: json!(5),
            expected: Some(json!(5)),
            input: json!({"a": 2, "b": 3}),
            console_output: String::new(),
            message: None,
        }
    }

    #[test]
    fn test_all_passed_requires_nonempty_results() {
        let outcome = RunOutcome::new(vec![], vec![], RunMode::Judged);
        assert!(!outcome.all_passed);
    }

    #[test]
    fn test_all_passed_when_every_result_passed() {
        let outcome = RunOutcome::new(vec![passing_record(1), passing_record(2)], vec![], RunMode::Judged);
        assert!(outcome.all_passed);
        assert!(!outcome.execute_mode);
    }

    #[test]
    fn test_errors_defeat_all_passed() {
        let outcome = RunOutcome::new(
            vec![passing_record(1)],
            vec![ErrorRecord::run_level("boom")],
            RunMode::Judged,
        );
        assert!(!outcome.all_passed);
    }

    #[test]
    fn test_run_failure_shape() {
        let outcome = RunOutcome::run_failure("Code execution timed out (max 10 seconds)", RunMode::Execute);
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 0);
        assert!(outcome.execute_mode);
        assert!(!outcome.all_passed);
    }

    #[test]
    fn test_execution_record_wire_names() {
        let line = r#"{"test_case": 1, "passed": true, "output": 5, "expected": 5, "input": {"a": 2, "b": 3}, "console_output": ""}"#;
        let record: ExecutionRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.index, 1);
        assert!(record.passed);
        assert!(!record.skipped);
        assert_eq!(record.output, json!(5));
    }

    #[test]
    fn test_skipped_record_wire_names() {
        let line = r#"{"test_case": 2, "skipped": true, "passed": false, "output": [1], "expected": null, "input": [1], "console_output": "", "message": "No expected output provided for this test case"}"#;
        let record: ExecutionRecord = serde_json::from_str(line).unwrap();
        assert!(record.skipped);
        assert!(!record.passed);
        assert!(record.expected.is_none());
        assert!(record.message.is_some());
    }

    #[test]
    fn test_error_record_wire_names() {
        let line = r#"{"test_case": 3, "error": "division by zero", "input": {"x": 0}, "console_output": "dbg\n"}"#;
        let record: ErrorRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.index, 3);
        assert_eq!(record.error, "division by zero");
        assert_eq!(record.console_output, "dbg\n");
    }
}
