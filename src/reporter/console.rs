//! Console reporter with colored output

use crate::suite::{Outcome, ScenarioOutcome, SuiteSummary};
use crate::{AggregateStats, InputReport};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to show the response preview and asterisk locations
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analyzed input
    pub fn report(&self, report: &InputReport) {
        println!();
        println!("{}", "=".repeat(60));
        println!("{}", format!("📝 {}", report.label).bold());
        self.print_verdict(report);
        println!();
    }

    /// Report multiple inputs with summary
    pub fn report_many(&self, reports: &[InputReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
        }
        self.print_summary("FORMATTING SUMMARY", stats, None);
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, report: &InputReport) {
        println!("{}", quiet_line(report));
    }

    /// Report one scenario as soon as it finishes
    pub fn report_outcome(&self, outcome: &ScenarioOutcome) {
        match &outcome.outcome {
            Outcome::Answered { report, .. } => {
                println!();
                println!("{}", "=".repeat(60));
                println!(
                    "{}",
                    format!("🧪 {} [{}]", outcome.name, outcome.timestamp).bold()
                );
                self.print_verdict(report);
            }
            Outcome::Failed { error } => {
                println!();
                println!("{} {} FAILED: {}", "❌".red(), outcome.name.bold(), error);
            }
        }
    }

    /// Final suite summary
    pub fn report_suite_summary(&self, summary: &SuiteSummary) {
        self.print_summary(
            "CLEAN FORMATTING TEST SUMMARY",
            &summary.stats,
            Some(summary.failed_requests),
        );
    }

    fn print_verdict(&self, report: &InputReport) {
        let analysis = &report.analysis;
        let status = if analysis.is_clean {
            "✅ PASS".green().bold()
        } else {
            "❌ FAIL".red().bold()
        };
        println!("Status: {}", status);
        println!("Formatting Score: {}", colorize_score(analysis.score));
        println!("Asterisk Count: {}", analysis.asterisk_count);
        println!("Issues Found: {}", issues_line(&analysis.issues));

        println!("\n📝 Response Preview:");
        println!("\"{}...\"", report.preview);

        if !analysis.is_clean && !analysis.issues.is_empty() {
            println!("\n{}", "⚠️  Formatting Issues:".yellow());
            for issue in &analysis.issues {
                println!("   - {}", issue);
            }
        }

        if self.verbose {
            println!("   {}", analysis.details().dimmed());
            if analysis.bonus > 0 {
                println!("   {}", format!("Natural language bonus: +{}", analysis.bonus).dimmed());
            }
            for finding in &analysis.findings {
                println!(
                    "   {} {} (-{})",
                    format!("[{}]", finding.rule).dimmed(),
                    finding.message,
                    finding.penalty
                );
            }
        }

        if !report.asterisk_locations.is_empty() {
            println!("\n📍 Asterisk locations:");
            for loc in &report.asterisk_locations {
                println!("   Line {}: {}", loc.line, loc.text);
            }
        }
    }

    fn print_summary(&self, title: &str, stats: &AggregateStats, failed_requests: Option<usize>) {
        println!("\n{}", "=".repeat(60));
        println!("{}", format!("📊 {}", title).bold());
        println!("{}", "=".repeat(60));
        println!(
            "Tests Passed: {}/{} ({}%)",
            stats.passed,
            stats.total,
            stats.pass_rate()
        );
        if let Some(failed) = failed_requests.filter(|&f| f > 0) {
            println!("Failed Requests: {}", failed.to_string().red());
        }
        println!("Average Formatting Score: {}%", stats.average_score);
        println!("Total Asterisks Found: {}", stats.total_asterisks);
        println!("Clean Formatting Goal: {}", goal_line(stats));

        if stats.all_passed {
            println!(
                "\n{}",
                "🎉 ALL TESTS PASSED! Responses have clean, natural formatting.".green()
            );
        } else {
            println!(
                "\n{}",
                "⚠️  Some tests need attention. Check formatting rules in the system prompt."
                    .yellow()
            );
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn colorize_score(score: u8) -> colored::ColoredString {
    let s = format!("{}%", score);
    if score >= 90 {
        s.green()
    } else if score >= crate::CLEAN_THRESHOLD {
        s.yellow()
    } else {
        s.red()
    }
}

/// `a, b, c` or `None`
pub fn issues_line(issues: &[String]) -> String {
    if issues.is_empty() {
        "None".to_string()
    } else {
        issues.join(", ")
    }
}

/// `<label>: <score> (PASS|FAIL)`
pub fn quiet_line(report: &InputReport) -> String {
    format!(
        "{}: {} ({})",
        report.label,
        report.analysis.score,
        if report.analysis.is_clean { "PASS" } else { "FAIL" }
    )
}

fn goal_line(stats: &AggregateStats) -> String {
    if stats.goal_achieved {
        "✅ ACHIEVED".to_string()
    } else {
        "❌ NEEDS WORK".to_string()
    }
}
