//! JSON reporter for machine-readable output

use crate::suite::SuiteReport;
use crate::{AggregateStats, InputReport};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single analyzed input as JSON
    pub fn report(&self, report: &InputReport) -> String {
        self.render(report, "{}")
    }

    /// Report multiple inputs with summary
    pub fn report_with_summary(&self, reports: &[InputReport], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results: reports,
            summary: stats,
        };
        self.render(&output, "{}")
    }

    /// Report a full scenario suite run
    pub fn report_suite(&self, suite: &SuiteReport) -> String {
        self.render(suite, "{}")
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [InputReport],
    summary: &'a AggregateStats,
}
