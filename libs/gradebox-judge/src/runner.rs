//! Isolated runner - process-as-sandbox execution of driver programs
//!
//! Isolation here means crash and time-bound containment: a separate
//! interpreter process with a hard wall-clock budget. It is not resource
//! isolation; stronger sandboxing can replace this module behind the same
//! (driver text, test cases) -> output contract.
use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tempfile::{Builder, NamedTempFile};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

/// Wall-clock budget for one run. A design parameter, not configuration.
pub const RUN_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw output of one driver execution.
#[derive(Debug)]
pub struct RunnerOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
    pub duration: Duration,
}

impl RunnerOutput {
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    fn timeout(duration: Duration) -> Self {
        Self {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            timed_out: true,
            duration,
        }
    }
}

/// Spawns python interpreter processes for driver programs and syntax checks.
#[derive(Debug, Clone)]
pub struct PythonRunner {
    python_bin: String,
    timeout: Duration,
}

impl PythonRunner {
    pub fn new(python_bin: impl Into<String>) -> Self {
        Self {
            python_bin: python_bin.into(),
            timeout: RUN_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute a driver program with the serialized test-case array on its
    /// stdin. The driver is materialized into a uniquely-named ephemeral
    /// file which is removed on every exit path, timeout and panic included.
    pub async fn run(&self, driver: &str, test_cases_json: &str) -> Result<RunnerOutput> {
        let scratch = self.materialize(driver)?;
        debug!(
            driver_path = %scratch.path().display(),
            driver_bytes = driver.len(),
            "materialized driver program"
        );

        let start = Instant::now();
        let mut child = Command::new(&self.python_bin)
            .arg(scratch.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn interpreter '{}'", self.python_bin))?;

        let mut stdin = child.stdin.take().context("driver stdin was not captured")?;
        let feed = async {
            // the driver may exit before reading stdin (e.g. a submission
            // that fails to parse), which closes the pipe under us
            if let Err(error) = stdin.write_all(test_cases_json.as_bytes()).await {
                debug!(%error, "driver closed stdin early");
            }
            drop(stdin);
        };
        let wait = child.wait_with_output();

        match tokio::time::timeout(self.timeout, async { tokio::join!(feed, wait).1 }).await {
            Ok(output) => {
                let output = output.context("failed to collect driver output")?;
                Ok(RunnerOutput {
                    exit_code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    timed_out: false,
                    duration: start.elapsed(),
                })
            }
            Err(_) => {
                // dropping the wait future drops the child; kill_on_drop
                // reaps it at exactly the budget boundary
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "driver exceeded wall-clock budget, killed"
                );
                Ok(RunnerOutput::timeout(start.elapsed()))
            }
        }
    }

    /// Syntax-check a submission without executing it, via py_compile.
    pub async fn check_syntax(&self, code: &str) -> Result<RunnerOutput> {
        let scratch = self.materialize(code)?;
        let start = Instant::now();

        let run = Command::new(&self.python_bin)
            .arg("-m")
            .arg("py_compile")
            .arg(scratch.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, run).await {
            Ok(output) => {
                let output = output
                    .with_context(|| format!("failed to run syntax check with '{}'", self.python_bin))?;
                Ok(RunnerOutput {
                    exit_code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    timed_out: false,
                    duration: start.elapsed(),
                })
            }
            Err(_) => Ok(RunnerOutput::timeout(start.elapsed())),
        }
    }

    fn materialize(&self, source: &str) -> Result<NamedTempFile> {
        let scratch = Builder::new()
            .prefix(&format!("gradebox-{}-", Uuid::new_v4()))
            .suffix(".py")
            .tempfile()
            .context("failed to create ephemeral driver file")?;
        std::fs::write(scratch.path(), source).context("failed to write driver file")?;
        Ok(scratch)
    }
}
