//! Analysis engine - runs every rule over a response

use crate::{AggregateStats, AnalysisResult, InputReport, Rule};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::locate::locate_asterisks;
use super::scoring::{self, Tally};

/// Characters kept in `InputReport::preview`
pub const PREVIEW_CHARS: usize = 200;

/// Score a response for stray asterisks and markdown. Total over all inputs.
pub fn analyze(text: &str) -> AnalysisResult {
    let tally = Rule::PENALTIES.iter().fold(Tally::new(), |tally, &rule| {
        let count = rule.count(text);
        debug!(rule = %rule, count, "penalty rule");
        tally.penalize(rule, count)
    });
    let tally = Rule::BONUSES.iter().fold(tally, |tally, &rule| {
        let count = rule.count(text);
        debug!(rule = %rule, count, "bonus rule");
        tally.reward(rule, count)
    });

    let score = tally.clamped();
    let bonus = tally.bonus();
    let asterisk_count = Rule::Asterisk.count(text);
    let findings = tally.into_findings();

    AnalysisResult {
        score,
        is_clean: scoring::is_clean(score, asterisk_count),
        issues: findings.iter().map(|f| f.message.clone()).collect(),
        asterisk_count,
        findings,
        bonus,
    }
}

/// Analysis engine for labelled inputs
pub struct FormattingAnalyzer {
    /// Whether to collect per-line asterisk locations
    locate: bool,
}

impl FormattingAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self { locate: false }
    }

    /// Also report which lines contain asterisks
    pub fn with_locations(mut self) -> Self {
        self.locate = true;
        self
    }

    /// Score a response
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        analyze(text)
    }

    /// Score a response and attach its label and preview
    pub fn report(&self, label: impl Into<String>, text: &str) -> InputReport {
        let label = label.into();
        let analysis = self.analyze(text);
        debug!(
            label = %label,
            score = analysis.score,
            asterisks = analysis.asterisk_count,
            issues = analysis.issues.len(),
            "analyzed input"
        );
        let asterisk_locations = if self.locate {
            locate_asterisks(text)
        } else {
            Vec::new()
        };
        InputReport {
            label,
            preview: preview(text),
            analysis,
            asterisk_locations,
        }
    }

    /// Read a file and score its contents
    pub fn analyze_path(&self, path: &Path) -> Result<InputReport> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(self.report(path.display().to_string(), &text))
    }

    /// Aggregate statistics across reports
    pub fn aggregate_stats(reports: &[InputReport]) -> AggregateStats {
        AggregateStats::from_results(reports.iter().map(|r| &r.analysis), reports.len())
    }
}

impl Default for FormattingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// First `PREVIEW_CHARS` characters of `text`
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_analyze_logs_rule_counts() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            analyze("This is **bold** text.");
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("rule=bold-markdown count=1"));
        assert!(output.contains("rule=asterisk count=4"));
        assert!(output.contains("rule=paragraph-break count=0"));
    }

    #[test]
    fn test_empty_input() {
        let result = analyze("");
        assert_eq!(result.score, 100);
        assert!(result.is_clean);
        assert!(result.issues.is_empty());
        assert_eq!(result.asterisk_count, 0);
        assert_eq!(result.bonus, 0);
    }

    #[test]
    fn test_bold_text() {
        let result = analyze("This is **bold** text.");
        assert_eq!(result.asterisk_count, 4);
        assert_eq!(
            result.issues,
            vec![
                "4 asterisks found".to_string(),
                "1 bold markdown patterns".to_string(),
                "1 italic markdown patterns".to_string(),
            ]
        );
        // 100 - 40 - 5 - 5 + 1 (line starts with "Th")
        assert_eq!(result.score, 51);
        assert!(!result.is_clean);
    }

    #[test]
    fn test_natural_paragraphs_clamp_to_100() {
        let result = analyze("Step one.\n\nStep two is easy. Step three follows.");
        assert!(result.issues.is_empty());
        assert_eq!(result.asterisk_count, 0);
        assert_eq!(result.bonus, 2 + 3 + 2);
        assert_eq!(result.score, 100);
        assert!(result.is_clean);
    }

    #[test]
    fn test_markdown_without_asterisks() {
        let text = "# Getting started\n\nRun `open` and then click Save. Done.";
        let result = analyze(text);
        assert_eq!(result.asterisk_count, 0);
        assert_eq!(
            result.issues,
            vec![
                "1 header markdown patterns".to_string(),
                "1 inline code patterns".to_string(),
            ]
        );
        // 100 - 5 - 5 + 3 (paragraph) + 2 (". D") + 1 ("Ru")
        assert_eq!(result.score, 96);
        assert!(result.is_clean);
    }

    #[test]
    fn test_fenced_block_also_counts_as_inline_code() {
        let result = analyze("```\nclick\n```");
        assert_eq!(
            result.issues,
            vec![
                "2 code blocks patterns".to_string(),
                "1 inline code patterns".to_string(),
            ]
        );
        assert_eq!(result.score, 85);
    }

    #[test]
    fn test_awkward_placements() {
        let text = "How to use:*Open the menu.*";
        let result = analyze(text);
        assert_eq!(result.asterisk_count, 2);
        let rules: Vec<Rule> = result.findings.iter().map(|f| f.rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::Asterisk,
                Rule::ItalicMarkdown,
                Rule::AwkwardAsteriskPlacement,
                Rule::AsteriskAtSentenceStart,
                Rule::AsteriskAtSentenceEnd,
                Rule::AsteriskAfterColon,
            ]
        );
        assert!(result.issues.contains(&"1 awkward asterisk placement instances".to_string()));
        // 100 - 20 - 5 - 4 * 15 + 1 ("Ho")
        assert_eq!(result.score, 16);
    }

    #[test]
    fn test_issues_mirror_findings() {
        let result = analyze("*A* and **B** and `c`");
        assert_eq!(result.issues.len(), result.findings.len());
        for (issue, finding) in result.issues.iter().zip(&result.findings) {
            assert_eq!(issue, &finding.message);
        }
    }

    #[test]
    fn test_high_score_with_asterisk_is_not_clean() {
        let mut text = String::from("Note the star * here.\n");
        for _ in 0..20 {
            text.push_str("\nThe next paragraph follows. It reads well.\n");
        }
        let result = analyze(&text);
        assert_eq!(result.score, 100);
        assert_eq!(result.asterisk_count, 1);
        assert!(!result.is_clean);
    }

    #[test]
    fn test_report_preview_truncates_on_char_boundary() {
        let text = "é".repeat(300);
        let report = FormattingAnalyzer::new().report("sample", &text);
        assert_eq!(report.preview.chars().count(), PREVIEW_CHARS);
        assert_eq!(report.label, "sample");
        assert!(report.asterisk_locations.is_empty());
    }

    #[test]
    fn test_report_with_locations() {
        let report = FormattingAnalyzer::new()
            .with_locations()
            .report("sample", "ok\n*bad*");
        assert_eq!(report.asterisk_locations.len(), 1);
        assert_eq!(report.asterisk_locations[0].line, 2);
    }

    #[test]
    fn test_analyze_path_missing_file() {
        let err = FormattingAnalyzer::new()
            .analyze_path(Path::new("definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
