//! Plainspeak: Formatting Quality Analyzer for conversational AI output
//!
//! This library scores a text response for stray asterisks and markdown
//! markup, producing a pass/fail verdict and a list of diagnostic issues.
//! Responses can come from files, stdin, or (with the `ai` feature) a live
//! scenario suite against a text-generation provider.

pub mod analyzer;
pub mod config;
pub mod provider;
pub mod reporter;
pub mod suite;

pub use analyzer::{analyze, locate_asterisks, FormattingAnalyzer};

use serde::{Deserialize, Serialize};

/// Minimum score for a response to count as cleanly formatted
pub const CLEAN_THRESHOLD: u8 = 80;

/// The verdict for a single text response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Formatting score (0-100)
    pub score: u8,
    /// True iff score >= 80 and no asterisk was found
    pub is_clean: bool,
    /// Human-readable issue messages, one per detected category
    pub issues: Vec<String>,
    /// Number of literal `*` characters in the input
    pub asterisk_count: usize,
    /// Structured form of `issues`, in the same order
    #[serde(default)]
    pub findings: Vec<Finding>,
    /// Points added by natural-language features before clamping
    #[serde(default)]
    pub bonus: i64,
}

impl AnalysisResult {
    /// One-line summary, e.g. `Score: 85%, Asterisks: 0, Issues: 1`
    pub fn details(&self) -> String {
        format!(
            "Score: {}%, Asterisks: {}, Issues: {}",
            self.score,
            self.asterisk_count,
            self.issues.len()
        )
    }
}

/// One detected defect category and what it cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Rule that fired
    pub rule: Rule,
    /// Number of matches
    pub count: usize,
    /// Points deducted from the score
    pub penalty: i64,
    /// Same text as the matching entry in `AnalysisResult::issues`
    pub message: String,
}

/// How a rule affects the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Any literal asterisk
    Asterisk,
    /// Markdown markup (bold, italic, headers, code)
    Markdown,
    /// Asterisks in stylistically awkward positions
    Awkward,
    /// Natural-language feature that earns points back
    Bonus,
}

/// Formatting rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    Asterisk,
    BoldMarkdown,
    ItalicMarkdown,
    HeaderMarkdown,
    CodeBlock,
    InlineCode,
    /// `How to use:` directly followed by an asterisk
    AwkwardAsteriskPlacement,
    AsteriskAtSentenceStart,
    AsteriskAtSentenceEnd,
    AsteriskAfterColon,
    /// Period, space, uppercase letter
    SentenceBreak,
    /// Blank line between paragraphs
    ParagraphBreak,
    /// Line starting with an uppercase then a lowercase letter
    SentenceStart,
}

impl Rule {
    /// Penalty rules in the order their issues are reported
    pub const PENALTIES: [Rule; 10] = [
        Rule::Asterisk,
        Rule::BoldMarkdown,
        Rule::ItalicMarkdown,
        Rule::HeaderMarkdown,
        Rule::CodeBlock,
        Rule::InlineCode,
        Rule::AwkwardAsteriskPlacement,
        Rule::AsteriskAtSentenceStart,
        Rule::AsteriskAtSentenceEnd,
        Rule::AsteriskAfterColon,
    ];

    pub const BONUSES: [Rule; 3] = [Rule::SentenceBreak, Rule::ParagraphBreak, Rule::SentenceStart];

    pub fn kind(self) -> RuleKind {
        use Rule::*;
        match self {
            Asterisk => RuleKind::Asterisk,
            BoldMarkdown | ItalicMarkdown | HeaderMarkdown | CodeBlock | InlineCode => {
                RuleKind::Markdown
            }
            AwkwardAsteriskPlacement
            | AsteriskAtSentenceStart
            | AsteriskAtSentenceEnd
            | AsteriskAfterColon => RuleKind::Awkward,
            SentenceBreak | ParagraphBreak | SentenceStart => RuleKind::Bonus,
        }
    }

    /// Points per match: deducted for penalties, added for bonuses
    pub fn weight(self) -> i64 {
        match self {
            Rule::SentenceBreak => 2,
            Rule::ParagraphBreak => 3,
            Rule::SentenceStart => 1,
            _ => match self.kind() {
                RuleKind::Asterisk => 10,
                RuleKind::Markdown => 5,
                RuleKind::Awkward => 15,
                RuleKind::Bonus => 0,
            },
        }
    }

    /// Name used in issue messages
    pub fn label(self) -> &'static str {
        match self {
            Rule::Asterisk => "asterisks",
            Rule::BoldMarkdown => "bold markdown",
            Rule::ItalicMarkdown => "italic markdown",
            Rule::HeaderMarkdown => "header markdown",
            Rule::CodeBlock => "code blocks",
            Rule::InlineCode => "inline code",
            Rule::AwkwardAsteriskPlacement => "awkward asterisk placement",
            Rule::AsteriskAtSentenceStart => "asterisk at sentence start",
            Rule::AsteriskAtSentenceEnd => "asterisk at sentence end",
            Rule::AsteriskAfterColon => "asterisk after colon",
            Rule::SentenceBreak => "natural sentence breaks",
            Rule::ParagraphBreak => "paragraph breaks",
            Rule::SentenceStart => "natural sentence starts",
        }
    }

    /// Issue message for `count` matches of this rule
    pub fn message(self, count: usize) -> String {
        match self.kind() {
            RuleKind::Asterisk => format!("{} asterisks found", count),
            RuleKind::Markdown => format!("{} {} patterns", count, self.label()),
            RuleKind::Awkward => format!("{} {} instances", count, self.label()),
            RuleKind::Bonus => format!("{} {}", count, self.label()),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Asterisk => write!(f, "asterisk"),
            Rule::BoldMarkdown => write!(f, "bold-markdown"),
            Rule::ItalicMarkdown => write!(f, "italic-markdown"),
            Rule::HeaderMarkdown => write!(f, "header-markdown"),
            Rule::CodeBlock => write!(f, "code-block"),
            Rule::InlineCode => write!(f, "inline-code"),
            Rule::AwkwardAsteriskPlacement => write!(f, "awkward-asterisk-placement"),
            Rule::AsteriskAtSentenceStart => write!(f, "asterisk-at-sentence-start"),
            Rule::AsteriskAtSentenceEnd => write!(f, "asterisk-at-sentence-end"),
            Rule::AsteriskAfterColon => write!(f, "asterisk-after-colon"),
            Rule::SentenceBreak => write!(f, "sentence-break"),
            Rule::ParagraphBreak => write!(f, "paragraph-break"),
            Rule::SentenceStart => write!(f, "sentence-start"),
        }
    }
}

/// A line that contains at least one asterisk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteriskLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Asterisks on this line
    pub count: usize,
    /// Line content, trimmed
    pub text: String,
}

/// Analysis of one named input (file, stdin, or scenario response)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputReport {
    /// File path, `<stdin>`, or scenario name
    pub label: String,
    /// First characters of the text
    pub preview: String,
    /// The verdict
    pub analysis: AnalysisResult,
    /// Lines with asterisks (only when requested)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub asterisk_locations: Vec<AsteriskLocation>,
}

/// Aggregate statistics across several analyzed inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Inputs attempted (failed requests included)
    pub total: usize,
    /// Inputs that were cleanly formatted
    pub passed: usize,
    /// Sum of scores divided by `total`, rounded
    pub average_score: u8,
    pub total_asterisks: usize,
    /// No asterisk anywhere
    pub goal_achieved: bool,
    /// Every input passed and no asterisk anywhere
    pub all_passed: bool,
}

impl AggregateStats {
    /// Build from the verdicts that were produced out of `total` attempts
    pub fn from_results<'a, I>(results: I, total: usize) -> Self
    where
        I: IntoIterator<Item = &'a AnalysisResult>,
    {
        let mut passed = 0usize;
        let mut score_sum = 0usize;
        let mut total_asterisks = 0usize;
        for result in results {
            if result.is_clean {
                passed += 1;
            }
            score_sum += result.score as usize;
            total_asterisks = total_asterisks.saturating_add(result.asterisk_count);
        }

        Self {
            total,
            passed,
            average_score: rounded_ratio(score_sum, total).min(100) as u8,
            total_asterisks,
            goal_achieved: total_asterisks == 0,
            all_passed: total > 0 && passed == total && total_asterisks == 0,
        }
    }

    /// Passed inputs as a rounded percentage of the total
    pub fn pass_rate(&self) -> u8 {
        rounded_ratio(self.passed * 100, self.total).min(100) as u8
    }
}

/// `numerator / denominator` rounded half up; 0 when the denominator is 0
fn rounded_ratio(numerator: usize, denominator: usize) -> usize {
    if denominator == 0 {
        return 0;
    }
    (numerator * 2 + denominator) / (denominator * 2)
}
