//! Gradebox judge - sandboxed execution and test-harness core
//!
//! Takes untrusted, syntactically-unverified submitted source, binds it to a
//! resolved entry method, runs it against a list of test cases inside an
//! isolated, time-bounded process, and returns a structured pass/fail verdict
//! per case. Survives every failure mode the submission can produce: syntax
//! errors, wrong signatures, runtime exceptions, infinite loops.
//!
//! Pipeline: entry_point -> harness -> runner -> aggregator -> compare,
//! orchestrated by executor. The external contract is "always returns a
//! RunOutcome", never an error.
pub mod aggregator;
pub mod compare;
pub mod entry_point;
pub mod executor;
pub mod harness;
pub mod runner;

#[cfg(test)]
mod executor_tests;
