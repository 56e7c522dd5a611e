//! JUnit report generation
//!
//! Turns a finished run summary into a JUnit XML export descriptor.

mod builder;
mod error;
mod export;
mod grouping;
mod naming;
mod serialize;
mod tree;

pub use error::ReportError;
pub use export::ExportDescriptor;
pub use grouping::group_executions;
pub use tree::XmlElement;

use builder::ReportBuilder;
use serialize::to_xml;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::config::ReporterOptions;
use crate::host::Exports;
use crate::models::RunSummary;

/// Format a run summary into an export descriptor.
///
/// Returns `Ok(None)` when the summary has no executions.
pub fn format_report(
    summary: &RunSummary,
    options: &ReporterOptions,
) -> Result<Option<ExportDescriptor>, ReportError> {
    format_report_at(summary, options, Local::now().naive_local())
}

/// Same as [`format_report`] with an explicit suite timestamp
pub fn format_report_at(
    summary: &RunSummary,
    options: &ReporterOptions,
    timestamp: NaiveDateTime,
) -> Result<Option<ExportDescriptor>, ReportError> {
    let Some(root) = build_tree(summary, options, timestamp) else {
        return Ok(None);
    };

    let content = to_xml(&root)?;
    Ok(Some(ExportDescriptor::new(content, options.export.clone())))
}

/// Build the report tree without serializing it
pub fn build_tree(
    summary: &RunSummary,
    options: &ReporterOptions,
    timestamp: NaiveDateTime,
) -> Option<XmlElement> {
    let groups = group_executions(summary.executions());
    if groups.is_empty() {
        return None;
    }
    debug!(
        executions = summary.executions().len(),
        items = groups.len(),
        "Grouped executions"
    );

    let root = ReportBuilder::new(&summary.collection, timestamp)
        .with_separator(options.separator.as_deref())
        .build(&groups, summary.tests_total());
    Some(root)
}

/// Single-shot reporter fired when the run finishes
#[derive(Clone, Debug, Default)]
pub struct JunitReporter {
    options: ReporterOptions,
}

impl JunitReporter {
    pub fn new(options: ReporterOptions) -> Self {
        Self { options }
    }

    /// Handle the run-finished notification. Consumes the reporter.
    pub fn on_before_done(self, summary: &RunSummary, exports: &mut Exports) -> Result<(), ReportError> {
        if let Some(descriptor) = format_report(summary, &self.options)? {
            info!(
                collection = summary.collection.name(),
                collection_id = ?summary.collection.id(),
                executions = summary.executions().len(),
                bytes = descriptor.content.len(),
                "JUnit report generated"
            );
            exports.push(descriptor);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::export::{DEFAULT_FILE_NAME, REPORTER_NAME};
    use super::*;
    use chrono::NaiveDate;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use serde_json::json;
    use std::path::PathBuf;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 6)
            .unwrap()
    }

    fn get_token_summary() -> RunSummary {
        serde_json::from_value(json!({
            "collection": {
                "info": { "_postman_id": "c-1", "name": "Token Service" },
                "item": [{ "id": "get-token", "name": "Get Token" }]
            },
            "run": {
                "stats": { "tests": { "total": 2, "pending": 0, "failed": 1 } },
                "executions": [
                    {
                        "item": { "id": "get-token", "name": "Get Token" },
                        "cursor": { "iteration": 0 },
                        "response": { "responseTime": 101 },
                        "assertions": [{ "assertion": "Status code is 200", "skipped": false }]
                    },
                    {
                        "item": { "id": "get-token", "name": "Get Token" },
                        "cursor": { "iteration": 1 },
                        "response": { "responseTime": 99 },
                        "assertions": [{
                            "assertion": "Status code is 200",
                            "skipped": false,
                            "error": {
                                "name": "AssertionError",
                                "message": "Status code is 200",
                                "stack": "AssertionError: expected 500 to equal 200"
                            }
                        }]
                    }
                ]
            }
        }))
        .unwrap()
    }

    /// Collect (element name, attributes) pairs in document order
    fn elements(xml: &str) -> Vec<(String, Vec<(String, String)>)> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);
        let mut out = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    let attrs = e
                        .attributes()
                        .map(|a| {
                            let a = a.unwrap();
                            (
                                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                                a.unescape_value().unwrap().into_owned(),
                            )
                        })
                        .collect();
                    out.push((name, attrs));
                }
                Event::Eof => break,
                _ => {}
            }
        }
        out
    }

    fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_get_token_end_to_end() {
        let summary = get_token_summary();
        let descriptor = format_report_at(&summary, &ReporterOptions::default(), timestamp())
            .unwrap()
            .unwrap();

        assert_eq!(descriptor.name, REPORTER_NAME);
        assert_eq!(descriptor.default, DEFAULT_FILE_NAME);
        assert!(descriptor.path.is_none());
        assert!(descriptor
            .content
            .starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));

        let nodes = elements(&descriptor.content);
        let suites: Vec<_> = nodes.iter().filter(|(n, _)| n == "testsuite").collect();
        assert_eq!(suites.len(), 1);
        let suite = &suites[0].1;
        assert_eq!(attr(suite, "tests"), Some("1"));
        assert_eq!(attr(suite, "failures"), Some("1"));
        assert_eq!(attr(suite, "errors"), Some("0"));
        assert_eq!(attr(suite, "time"), Some("0.099"));
        assert_eq!(attr(suite, "timestamp"), Some("2026-01-02T03:04:05.006"));

        assert_eq!(nodes.iter().filter(|(n, _)| n == "testcase").count(), 1);
        let failures: Vec<_> = nodes.iter().filter(|(n, _)| n == "failure").collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(attr(&failures[0].1, "message"), Some("Status code is 200"));

        assert!(!nodes.iter().any(|(n, _)| n == "system-err"));
    }

    #[test]
    fn test_no_executions_no_export() {
        let summary: RunSummary = serde_json::from_value(json!({
            "collection": { "name": "Empty", "item": [] },
            "run": { "executions": [] }
        }))
        .unwrap();
        assert!(format_report(&summary, &ReporterOptions::default())
            .unwrap()
            .is_none());

        let mut exports = Exports::new();
        JunitReporter::default()
            .on_before_done(&RunSummary::default(), &mut exports)
            .unwrap();
        assert!(exports.is_empty());
    }

    #[test]
    fn test_reporter_pushes_descriptor_with_export_path() {
        let options = ReporterOptions {
            export: Some(PathBuf::from("reports/junit.xml")),
            ..Default::default()
        };
        let mut exports = Exports::new();
        JunitReporter::new(options)
            .on_before_done(&get_token_summary(), &mut exports)
            .unwrap();

        assert_eq!(exports.len(), 1);
        let descriptor = exports.iter().next().unwrap();
        assert_eq!(descriptor.path, Some(PathBuf::from("reports/junit.xml")));
        assert!(descriptor.content.contains("<testsuites name=\"Token Service\" tests=\"2\">"));
    }

    #[test]
    fn test_xml_bodies_in_assertion_errors_still_export() {
        let summary: RunSummary = serde_json::from_value(json!({
            "collection": { "name": "Soap", "item": [{ "id": "envelope", "name": "Envelope" }] },
            "run": { "executions": [{
                "item": { "id": "envelope" },
                "assertions": [{
                    "assertion": "Body is empty",
                    "error": {
                        "message": "expected '<![CDATA[x]]>' to be empty\nactual: 1 node",
                        "stack": "AssertionError\n    at test.js:3"
                    }
                }]
            }] }
        }))
        .unwrap();

        let descriptor = format_report_at(&summary, &ReporterOptions::default(), timestamp())
            .unwrap()
            .unwrap();
        assert!(descriptor
            .content
            .contains("message=\"expected &apos;&lt;![CDATA[x]]&gt;&apos; to be empty&#xA;actual: 1 node\""));

        let mut reader = Reader::from_str(&descriptor.content);
        reader.trim_text(true);
        let mut payload = String::new();
        loop {
            match reader.read_event().unwrap() {
                Event::CData(e) => {
                    payload.push_str(std::str::from_utf8(&e.into_inner()).unwrap());
                }
                Event::Eof => break,
                _ => {}
            }
        }
        assert!(payload.contains("Error message: expected '<![CDATA[x]]>' to be empty\nactual: 1 node."));
    }

    #[test]
    fn test_unresolved_executions_yield_bare_root() {
        let summary: RunSummary = serde_json::from_value(json!({
            "collection": { "name": "Orphans", "item": [{ "id": "known", "name": "Known" }] },
            "run": { "executions": [
                { "item": { "id": "unknown" }, "requestError": { "message": "ENOTFOUND" } }
            ] }
        }))
        .unwrap();
        let tree = build_tree(&summary, &ReporterOptions::default(), timestamp()).unwrap();
        assert_eq!(tree.elements("testsuite").count(), 0);
        assert_eq!(
            to_xml(&tree).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <testsuites name=\"Orphans\" tests=\"unknown\"></testsuites>\n"
        );
    }
}
