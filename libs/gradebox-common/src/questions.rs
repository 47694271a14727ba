// Question store - read-only registry of exercises and their declared examples
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::types::TestCase;

/// One worked example declared on a question. `output` doubles as the
/// expected value when examples are used to backfill missing test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Registry of questions loaded from questions.json.
/// This subsystem only reads it; authoring happens elsewhere.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    questions: HashMap<String, Question>,
}

impl QuestionStore {
    /// Load the store from a JSON file. A missing file is an empty store,
    /// not an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let questions: HashMap<String, Question> =
            serde_json::from_str(content).context("questions file is not a JSON object of questions")?;
        Ok(Self { questions })
    }

    pub fn get(&self, question_id: &str) -> Option<&Question> {
        self.questions.get(question_id)
    }

    pub fn all(&self) -> &HashMap<String, Question> {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Convert a question's declared examples into test cases, each example's
    /// output becoming the expected value. Examples without an input are
    /// skipped. Unknown ids yield an empty list.
    pub fn example_test_cases(&self, question_id: &str) -> Vec<TestCase> {
        let Some(question) = self.get(question_id) else {
            return Vec::new();
        };
        question
            .examples
            .iter()
            .filter(|ex| !ex.input.is_null())
            .map(|ex| TestCase {
                input: ex.input.clone(),
                expected: ex.output.clone(),
            })
            .collect()
    }
}
