//! Report tree construction
//!
//! One `testsuite` per collection item that has executions, each holding a
//! single `testcase`. Assertion failures become `failure` nodes under the case;
//! request and script errors are counted and collected into a `system-err`
//! node on the suite.

use chrono::NaiveDateTime;
use tracing::debug;

use super::grouping::ExecutionGroups;
use super::naming::{class_name, parent_name};
use super::tree::XmlElement;
use crate::models::{Assertion, Collection, ErrorInfo, Execution, ResponseInfo};

/// Suite timestamp format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Divider between error message blocks
const DIVIDER: &str = "\n---\n";

/// Script channels inspected for errors, in order
const SCRIPT_CHANNELS: [&str; 2] = ["testScript", "prerequestScript"];

/// Builds the report tree for one run
pub struct ReportBuilder<'a> {
    collection: &'a Collection,
    timestamp: String,
    class_name: String,
    separator: Option<&'a str>,
}

/// Running totals for one suite
#[derive(Debug, Default, PartialEq, Eq)]
struct SuiteTally {
    failures: u32,
    errors: u32,
    messages: String,
}

impl<'a> ReportBuilder<'a> {
    /// Create a builder; `timestamp` is shared by every suite
    pub fn new(collection: &'a Collection, timestamp: NaiveDateTime) -> Self {
        Self {
            collection,
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            class_name: class_name(collection.name()),
            separator: None,
        }
    }

    /// Override the qualified-name separator
    pub fn with_separator(mut self, separator: Option<&'a str>) -> Self {
        self.separator = separator;
        self
    }

    /// Build the `testsuites` root
    pub fn build(&self, groups: &ExecutionGroups<'_>, tests_total: Option<u64>) -> XmlElement {
        let mut root = XmlElement::new("testsuites");
        root.set_attr("name", self.collection.name());
        match tests_total {
            Some(total) => root.set_attr("tests", total),
            None => root.set_attr("tests", "unknown"),
        };

        for (item_id, executions) in groups.iter() {
            match self.build_suite(item_id, executions) {
                Some(suite) => {
                    root.push(suite);
                }
                None => debug!(item_id, "No collection item for executions, skipping"),
            }
        }

        root
    }

    fn build_suite(&self, item_id: &str, executions: &[&Execution]) -> Option<XmlElement> {
        let located = self.collection.find_item(item_id)?;
        let item = located.item;

        let mut suite = XmlElement::new("testsuite");
        suite
            .set_attr("id", &item.id)
            .set_attr(
                "name",
                parent_name(&located, self.separator).unwrap_or_default(),
            )
            .set_attr("tests", 1)
            .set_attr("timestamp", &self.timestamp);

        let initial = item
            .response
            .as_ref()
            .map(ResponseInfo::elapsed_secs)
            .unwrap_or(0.0);
        let mut case = XmlElement::new("testcase");
        case.set_attr("classname", &self.class_name)
            .set_attr("time", format_secs(initial))
            .set_attr("name", &item.name);

        let mut tally = SuiteTally::default();
        for execution in executions {
            let time = format_secs(execution.elapsed_secs());
            suite.set_attr("time", &time);
            case.set_attr("time", &time);

            record_errors(execution, &mut tally);

            for (assertion, error) in execution.failed_assertions() {
                tally.failures += 1;
                case.push(self.failure(assertion, error));
            }
        }

        debug!(
            item_id,
            executions = executions.len(),
            failures = tally.failures,
            errors = tally.errors,
            "Built suite"
        );

        suite
            .set_attr("failures", tally.failures)
            .set_attr("errors", tally.errors);
        suite.push(case);

        if !tally.messages.is_empty() {
            let mut system_err = XmlElement::new("system-err");
            system_err.push_cdata(tally.messages);
            suite.push(system_err);
        }

        Some(suite)
    }

    fn failure(&self, assertion: &Assertion, error: &ErrorInfo) -> XmlElement {
        let mut failure = XmlElement::new("failure");
        failure
            .set_attr("type", "AssertionFailure")
            .set_attr("message", error.message())
            .push_cdata(format!(
                "Collection: {}. Assertion: {}.",
                self.collection.name(),
                assertion.assertion
            ))
            .push_cdata(format!("Error message: {}.", error.message()))
            .push_cdata(format!("Stacktrace: {}.", error.stack()));
        failure
    }
}

/// Count request and script errors of one execution and append its message
/// block to the suite buffer when any occurred.
fn record_errors(execution: &Execution, tally: &mut SuiteTally) {
    let mut errored = false;
    let mut msg = format!("Iteration: {}\n", execution.cursor.iteration);

    if let Some(error) = &execution.request_error {
        tally.errors += 1;
        errored = true;
        msg.push_str(&format!("RequestError: {}\n", error.stack_or_message()));
    }
    msg.push_str(DIVIDER);

    let channels = [&execution.test_script, &execution.prerequest_script];
    for (channel, results) in SCRIPT_CHANNELS.iter().zip(channels) {
        for error in results.iter().filter_map(|r| r.error.as_ref()) {
            tally.errors += 1;
            errored = true;
            msg.push_str(&format!("{channel}Error: {}", error.stack_or_message()));
            msg.push_str(DIVIDER);
        }
    }

    if errored {
        tally.messages.push_str(&msg);
    }
}

fn format_secs(secs: f64) -> String {
    format!("{secs:.3}")
}
