// CLI commands for grading and checking submissions
use anyhow::{bail, Context, Result};
use gradebox_common::types::{RunMode, TestCase};
use gradebox_judge::executor::run_submission;
use gradebox_judge::runner::PythonRunner;
use std::fs;

/// Grade a submission file against a JSON test-case file
pub async fn grade(
    code_path: &str,
    tests_path: &str,
    execute: bool,
    python: &str,
    json: bool,
) -> Result<()> {
    let code = fs::read_to_string(code_path)
        .with_context(|| format!("Failed to read submission file {}", code_path))?;
    let tests_content = fs::read_to_string(tests_path)
        .with_context(|| format!("Failed to read test-case file {}", tests_path))?;
    let test_cases: Vec<TestCase> = serde_json::from_str(&tests_content)
        .with_context(|| format!("{} is not a JSON array of test cases", tests_path))?;

    if test_cases.is_empty() {
        bail!("{} contains no test cases", tests_path);
    }

    let mode = if execute { RunMode::Execute } else { RunMode::Judged };
    let runner = PythonRunner::new(python);
    let outcome = run_submission(&runner, &code, &test_cases, mode).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for record in &outcome.results {
            let mark = if record.skipped {
                "⏭️"
            } else if record.passed {
                "✅"
            } else {
                "❌"
            };
            println!(
                "{} test case {}: output = {}",
                mark,
                record.index,
                serde_json::to_string(&record.output)?
            );
            if !record.console_output.is_empty() {
                for line in record.console_output.lines() {
                    println!("     | {}", line);
                }
            }
        }
        for error in &outcome.errors {
            if error.index == 0 {
                println!("❌ run failed: {}", error.error);
            } else {
                println!("❌ test case {}: {}", error.index, error.error);
            }
        }
        let passed = outcome.results.iter().filter(|r| r.passed).count();
        println!(
            "\n{} of {} passed, {} errors",
            passed,
            outcome.results.len(),
            outcome.errors.len()
        );
    }

    if !execute && !outcome.all_passed {
        bail!("Submission did not pass all test cases");
    }
    Ok(())
}

/// Syntax-check a submission file without executing it
pub async fn check(code_path: &str, python: &str) -> Result<()> {
    let code = fs::read_to_string(code_path)
        .with_context(|| format!("Failed to read submission file {}", code_path))?;

    let runner = PythonRunner::new(python);
    let output = runner.check_syntax(&code).await?;

    if output.succeeded() {
        println!("✅ Syntax check passed");
        Ok(())
    } else {
        let diagnostic = if output.stderr.trim().is_empty() {
            output.stdout.trim().to_string()
        } else {
            output.stderr.trim().to_string()
        };
        println!("❌ Syntax check failed:\n{}", diagnostic);
        bail!("Syntax check failed for {}", code_path);
    }
}
