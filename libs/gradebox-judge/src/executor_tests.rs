/// End-to-end tests for the grading pipeline
///
/// These exercise the full path: resolve -> generate -> run -> aggregate ->
/// compare. Anything that spawns a real interpreter is ignored by default,
/// the same way the Docker-backed paths are gated elsewhere.
mod end_to_end {
    use crate::executor::{run_submission, NO_ENTRY_POINT_MESSAGE, TIMEOUT_MESSAGE};
    use crate::runner::PythonRunner;
    use gradebox_common::types::{RunMode, TestCase};
    use serde_json::{json, Value};
    use std::time::Duration;

    fn case(input: Value, expected: Option<Value>) -> TestCase {
        TestCase { input, expected }
    }

    fn runner() -> PythonRunner {
        PythonRunner::new("python3")
    }

    const ADD_TWO: &str = "class Solution:\n    def add(self, a, b):\n        return a + b\n";

    #[tokio::test]
    async fn test_missing_entry_point_is_preflight_failure() {
        // nothing is spawned: resolution fails before any process exists
        let cases = vec![
            case(json!({"a": 1}), Some(json!(1))),
            case(json!({"a": 2}), Some(json!(2))),
            case(json!({"a": 3}), Some(json!(3))),
        ];
        let outcome = run_submission(&runner(), "x = 1\n", &cases, RunMode::Judged).await;

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 0);
        assert_eq!(outcome.errors[0].error, NO_ENTRY_POINT_MESSAGE);
        assert!(!outcome.all_passed);
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_add_two_numbers_passes() {
        let cases = vec![case(json!({"a": 2, "b": 3}), Some(json!(5)))];
        let outcome = run_submission(&runner(), ADD_TWO, &cases, RunMode::Judged).await;

        assert!(outcome.all_passed);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.results.len(), 1);
        let record = &outcome.results[0];
        assert_eq!(record.index, 1);
        assert!(record.passed);
        assert_eq!(record.output, json!(5));
        assert_eq!(record.expected, Some(json!(5)));
        assert_eq!(record.input, json!({"a": 2, "b": 3}));
        assert_eq!(record.console_output, "");
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_positional_and_scalar_binding() {
        let code = "class Solution:\n    def mul(self, a, b=10):\n        return a * b\n";
        let cases = vec![
            case(json!([3, 4]), Some(json!(12))),
            case(json!(5), Some(json!(50))),
        ];
        let outcome = run_submission(&runner(), code, &cases, RunMode::Judged).await;

        assert!(outcome.all_passed, "errors: {:?}", outcome.errors);
        assert_eq!(outcome.results.len(), 2);
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_one_failing_case_does_not_stop_the_rest() {
        let code = "class Solution:\n    def pick(self, x):\n        return [1, 2][x]\n";
        let cases = vec![
            case(json!({"x": 0}), Some(json!(1))),
            case(json!({"x": 9}), Some(json!(0))),
            case(json!({"x": 1}), Some(json!(2))),
        ];
        let outcome = run_submission(&runner(), code, &cases, RunMode::Judged).await;

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 2);
        assert!(outcome.errors[0].error.contains("index"));
        assert!(!outcome.all_passed);
        assert!(outcome.results.iter().all(|r| r.passed));
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_parameter_count_mismatch_is_per_case() {
        let cases = vec![
            case(json!({"x": 1}), Some(json!(1))),
            case(json!({"a": 2, "b": 3}), Some(json!(5))),
        ];
        let outcome = run_submission(&runner(), ADD_TWO, &cases, RunMode::Judged).await;

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 1);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].index, 2);
        assert!(outcome.results[0].passed);
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_syntax_error_is_a_single_run_level_failure() {
        let code = "class Solution:\n    def add(self, a, b)\n        return a + b\n";
        let cases = vec![
            case(json!({"a": 1, "b": 2}), Some(json!(3))),
            case(json!({"a": 2, "b": 3}), Some(json!(5))),
        ];
        let outcome = run_submission(&runner(), code, &cases, RunMode::Judged).await;

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 0);
        assert!(outcome.errors[0].error.contains("SyntaxError"));
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_infinite_loop_yields_single_timeout_record() {
        let code = "class Solution:\n    def spin(self, n):\n        while True:\n            pass\n";
        let cases = vec![
            case(json!({"n": 1}), Some(json!(1))),
            case(json!({"n": 2}), Some(json!(2))),
        ];
        let runner = PythonRunner::new("python3").with_timeout(Duration::from_secs(1));
        let outcome = run_submission(&runner, code, &cases, RunMode::Judged).await;

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 0);
        assert_eq!(outcome.errors[0].error, TIMEOUT_MESSAGE);
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_order_insensitive_sequence_verdict() {
        let code = "class Solution:\n    def indices(self, nums):\n        return [2, 1]\n";
        let cases = vec![case(json!({"nums": [5, 6, 7]}), Some(json!([1, 2])))];
        let outcome = run_submission(&runner(), code, &cases, RunMode::Judged).await;

        assert!(outcome.all_passed, "errors: {:?}", outcome.errors);
        assert!(outcome.results[0].passed);
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_absent_expected_is_reported_as_skipped() {
        let cases = vec![case(json!({"a": 2, "b": 3}), None)];
        let outcome = run_submission(&runner(), ADD_TWO, &cases, RunMode::Judged).await;

        assert_eq!(outcome.results.len(), 1);
        let record = &outcome.results[0];
        assert!(record.skipped);
        assert!(!record.passed);
        assert!(record.expected.is_none());
        assert_eq!(record.output, json!(5));
        assert!(record.message.is_some());
        assert!(!outcome.all_passed);
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_execute_mode_reports_without_judging() {
        let cases = vec![case(json!({"a": 1, "b": 1}), Some(json!(999)))];
        let outcome = run_submission(&runner(), ADD_TWO, &cases, RunMode::Execute).await;

        assert!(outcome.execute_mode);
        assert!(outcome.all_passed);
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].passed);
        assert_eq!(outcome.results[0].output, json!(2));
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_console_output_is_captured_per_case() {
        let code =
            "class Solution:\n    def loud(self, n):\n        print('thinking about', n)\n        return n\n";
        let cases = vec![
            case(json!({"n": 1}), Some(json!(1))),
            case(json!({"n": 2}), Some(json!(2))),
        ];
        let outcome = run_submission(&runner(), code, &cases, RunMode::Judged).await;

        assert!(outcome.all_passed, "errors: {:?}", outcome.errors);
        assert!(outcome.results[0].console_output.contains("thinking about 1"));
        assert!(outcome.results[1].console_output.contains("thinking about 2"));
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_bare_function_without_class_fails_at_run_start() {
        // resolution tolerates the missing class, instantiation does not
        let code = "def add(a, b):\n    return a + b\n";
        let cases = vec![case(json!({"a": 1, "b": 2}), Some(json!(3)))];
        let outcome = run_submission(&runner(), code, &cases, RunMode::Judged).await;

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 0);
        assert!(outcome.errors[0].error.contains("NameError"));
    }

    #[tokio::test]
    #[ignore] // Requires python3
    async fn test_top_level_prints_do_not_fabricate_records() {
        let code = "print('hello from import time')\n\nclass Solution:\n    def add(self, a, b):\n        return a + b\n";
        let cases = vec![case(json!({"a": 2, "b": 2}), Some(json!(4)))];
        let outcome = run_submission(&runner(), code, &cases, RunMode::Judged).await;

        // the stray line is dropped, not turned into a verdict or an error
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.errors.is_empty());
        assert!(outcome.all_passed);
    }
}
