//! Result aggregator - line-oriented parsing of driver stdout
//!
//! The driver emits one independently-parsable JSON record per line, so a
//! corrupted or partial line affects only itself. A record carrying an
//! `error` field routes to the error list, everything else to results. A
//! non-blank line that fails to parse contributes to neither list; it is
//! counted and logged instead, since learner code that prints at module
//! import time puts arbitrary text on stdout before the protocol starts.
use gradebox_common::types::{ErrorRecord, ExecutionRecord};
use serde_json::Value;
use tracing::warn;

const PREVIEW_LEN: usize = 120;

enum Record {
    Result(ExecutionRecord),
    Error(ErrorRecord),
}

/// Split raw driver stdout into structured per-case records.
pub fn parse_output(stdout: &str) -> (Vec<ExecutionRecord>, Vec<ErrorRecord>) {
    let mut results = Vec::new();
    let mut errors = Vec::new();
    let mut dropped = 0usize;
    let mut first_dropped: Option<String> = None;

    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(Record::Error(record)) => errors.push(record),
            Some(Record::Result(record)) => results.push(record),
            None => {
                dropped += 1;
                first_dropped.get_or_insert_with(|| preview(line));
            }
        }
    }

    if dropped > 0 {
        warn!(
            dropped,
            first_line = %first_dropped.unwrap_or_default(),
            "dropped unparsable lines from driver output"
        );
    }

    (results, errors)
}

fn parse_line(line: &str) -> Option<Record> {
    let value: Value = serde_json::from_str(line).ok()?;
    if !value.is_object() {
        return None;
    }
    if value.get("error").is_some() {
        serde_json::from_value(value).ok().map(Record::Error)
    } else {
        serde_json::from_value(value).ok().map(Record::Result)
    }
}

fn preview(line: &str) -> String {
    if line.len() <= PREVIEW_LEN {
        line.to_string()
    } else {
        let cut = line
            .char_indices()
            .take_while(|(i, _)| *i < PREVIEW_LEN)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &line[..cut])
    }
}
