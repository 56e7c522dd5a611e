//! Run summary models
//!
//! Mirrors the JSON summary newman emits once a collection run finishes.

use serde::{Deserialize, Serialize};

use super::collection::{lenient_response, Collection, ResponseInfo};

/// Summary of one collection run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub collection: Collection,
    #[serde(default)]
    pub run: Option<Run>,
}

impl RunSummary {
    /// Recorded executions, empty when the run data is missing
    pub fn executions(&self) -> &[Execution] {
        self.run
            .as_ref()
            .map(|r| r.executions.as_slice())
            .unwrap_or_default()
    }

    /// Total assertion count reported by the runner
    pub fn tests_total(&self) -> Option<u64> {
        self.run
            .as_ref()
            .and_then(|r| r.stats.as_ref())
            .and_then(|s| s.tests.as_ref())
            .map(|t| t.total)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub executions: Vec<Execution>,
    #[serde(default)]
    pub stats: Option<RunStats>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub tests: Option<StatCount>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatCount {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub failed: u64,
}

/// One observed run of one item
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(default)]
    pub id: Option<String>,
    pub item: ItemRef,
    #[serde(default)]
    pub cursor: Cursor,
    #[serde(default, deserialize_with = "lenient_response")]
    pub response: Option<ResponseInfo>,
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    #[serde(default)]
    pub test_script: Vec<ScriptResult>,
    #[serde(default)]
    pub prerequest_script: Vec<ScriptResult>,
    #[serde(default)]
    pub request_error: Option<ErrorInfo>,
}

impl Execution {
    /// Elapsed time in seconds, zero when the response is absent
    pub fn elapsed_secs(&self) -> f64 {
        self.response
            .as_ref()
            .map(ResponseInfo::elapsed_secs)
            .unwrap_or(0.0)
    }

    /// Assertions that carry an error
    pub fn failed_assertions(&self) -> impl Iterator<Item = (&Assertion, &ErrorInfo)> {
        self.assertions
            .iter()
            .filter_map(|a| a.error.as_ref().map(|e| (a, e)))
    }
}

/// Reference from an execution to the item it ran
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Position of an execution inside the run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(default)]
    pub iteration: u64,
    #[serde(default)]
    pub position: u64,
}

/// Outcome of a single assertion
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Assertion {
    #[serde(default)]
    pub assertion: String,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Outcome of a test or pre-request script
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScriptResult {
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Error details as serialized by the runner
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    pub fn stack(&self) -> &str {
        self.stack.as_deref().unwrap_or("")
    }

    /// Stack trace, falling back to the message and then the error name
    pub fn stack_or_message(&self) -> &str {
        [&self.stack, &self.message, &self.name]
            .into_iter()
            .find_map(|s| s.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("")
    }
}
