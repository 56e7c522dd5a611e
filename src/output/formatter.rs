//! Output formatters for run inspection
//!
//! Provides table and JSON views of the suites a report would contain.

use chrono::Local;
use serde::Serialize;

use crate::config::ReporterOptions;
use crate::models::RunSummary;
use crate::report::{build_tree, group_executions};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
}

impl OutputFormat {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }
}

/// One suite of the would-be report
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SuiteRow {
    pub id: String,
    pub suite: String,
    pub case: String,
    pub executions: usize,
    pub time: String,
    pub failures: u32,
    pub errors: u32,
}

/// Suites of a run summary, read back from the report tree
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunInspection {
    pub collection: String,
    /// Request items declared in the collection
    pub items: usize,
    pub tests_total: Option<u64>,
    pub suites: Vec<SuiteRow>,
    /// Executions whose item is missing from the collection
    pub unresolved: usize,
}

impl RunInspection {
    pub fn from_summary(summary: &RunSummary, options: &ReporterOptions) -> Self {
        let mut inspection = Self {
            collection: summary.collection.name().to_string(),
            items: summary.collection.item_count(),
            tests_total: summary.tests_total(),
            ..Default::default()
        };

        let Some(root) = build_tree(summary, options, Local::now().naive_local()) else {
            return inspection;
        };
        let groups = group_executions(summary.executions());

        for suite in root.elements("testsuite") {
            let id = suite.attr("id").unwrap_or_default().to_string();
            let executions = groups.get(&id).map(<[_]>::len).unwrap_or(0);
            let count = |key: &str| -> u32 {
                suite
                    .attr(key)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0)
            };

            inspection.suites.push(SuiteRow {
                suite: suite.attr("name").unwrap_or_default().to_string(),
                case: suite
                    .element("testcase")
                    .and_then(|c| c.attr("name"))
                    .unwrap_or_default()
                    .to_string(),
                executions,
                time: suite.attr("time").unwrap_or("0.000").to_string(),
                failures: count("failures"),
                errors: count("errors"),
                id,
            });
        }

        let reported: usize = inspection.suites.iter().map(|s| s.executions).sum();
        inspection.unresolved = summary.executions().len() - reported;
        inspection
    }
}

/// Inspection formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    pub fn format_inspection(&self, inspection: &RunInspection) -> String {
        match self.format {
            OutputFormat::Table => self.format_table(inspection),
            OutputFormat::Json => serde_json::to_string(inspection).unwrap_or_default(),
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(inspection).unwrap_or_default()
            }
        }
    }

    fn format_table(&self, inspection: &RunInspection) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\nCollection: {} ({} items)\n",
            inspection.collection, inspection.items
        ));
        output.push_str(&format!(
            "{:<30} {:<25} {:>5} {:>8} {:>5} {:>5}\n",
            "Suite", "Case", "Runs", "Time(s)", "Fail", "Err"
        ));
        output.push_str(&format!("{:-<83}\n", ""));

        for row in &inspection.suites {
            let line = format!(
                "{:<30} {:<25} {:>5} {:>8} {:>5} {:>5}",
                truncate(&row.suite, 30),
                truncate(&row.case, 25),
                row.executions,
                row.time,
                row.failures,
                row.errors
            );
            if self.colorize && (row.failures > 0 || row.errors > 0) {
                output.push_str(&format!("\x1b[31m{line}\x1b[0m\n"));
            } else {
                output.push_str(&line);
                output.push('\n');
            }
        }

        output.push_str(&format!("{:-<83}\n", ""));
        let failures: u32 = inspection.suites.iter().map(|s| s.failures).sum();
        let errors: u32 = inspection.suites.iter().map(|s| s.errors).sum();
        output.push_str(&format!(
            "Suites: {} | Failures: {} | Errors: {} | Unresolved executions: {}\n",
            inspection.suites.len(),
            failures,
            errors,
            inspection.unresolved
        ));

        output
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> RunSummary {
        serde_json::from_value(json!({
            "collection": {
                "name": "Billing",
                "item": [{ "name": "Invoices", "item": [
                    { "id": "list", "name": "List Invoices" },
                    { "id": "create", "name": "Create Invoice" }
                ] }]
            },
            "run": {
                "stats": { "tests": { "total": 3 } },
                "executions": [
                    { "item": { "id": "list" }, "response": { "responseTime": 45 } },
                    { "item": { "id": "create" },
                      "assertions": [{ "assertion": "Created", "error": { "message": "expected 201" } }] },
                    { "item": { "id": "list" }, "response": { "responseTime": 55 } },
                    { "item": { "id": "deleted" } }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(
            OutputFormat::from_str("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_inspection_rows() {
        let inspection = RunInspection::from_summary(&summary(), &ReporterOptions::default());

        assert_eq!(inspection.collection, "Billing");
        assert_eq!(inspection.items, 2);
        assert_eq!(inspection.tests_total, Some(3));
        assert_eq!(inspection.unresolved, 1);
        assert_eq!(
            inspection.suites[0],
            SuiteRow {
                id: "list".to_string(),
                suite: "Invoices".to_string(),
                case: "List Invoices".to_string(),
                executions: 2,
                time: "0.055".to_string(),
                failures: 0,
                errors: 0,
            }
        );
        assert_eq!(inspection.suites[1].failures, 1);
    }

    #[test]
    fn test_table_and_json_output() {
        let inspection = RunInspection::from_summary(&summary(), &ReporterOptions::default());

        let table = ResultFormatter::new(OutputFormat::Table)
            .no_color()
            .format_inspection(&inspection);
        assert!(table.contains("List Invoices"));
        assert!(table.contains("Suites: 2 | Failures: 1 | Errors: 0 | Unresolved executions: 1"));

        let json = ResultFormatter::new(OutputFormat::Json).format_inspection(&inspection);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["suites"][1]["case"], "Create Invoice");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long suite name", 6), "a ver…");
    }
}
