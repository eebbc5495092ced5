//! Formatting rules: one regex-backed predicate per rule.
//!
//! Every rule is scanned against the full text on its own, so a single
//! asterisk can be counted by several rules at once.

use crate::Rule;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

impl Rule {
    /// Regex source for this rule
    pub fn pattern(self) -> &'static str {
        match self {
            Rule::Asterisk => r"\*",
            Rule::BoldMarkdown => r"\*\*[^*]+\*\*",
            Rule::ItalicMarkdown => r"\*[^*]+\*",
            Rule::HeaderMarkdown => r"(?m)^#+\s",
            Rule::CodeBlock => r"```",
            Rule::InlineCode => r"`[^`]+`",
            Rule::AwkwardAsteriskPlacement => r"How to use:\*",
            Rule::AsteriskAtSentenceStart => r"\*[A-Z]",
            Rule::AsteriskAtSentenceEnd => r"\.\*",
            Rule::AsteriskAfterColon => r":\s*\*",
            Rule::SentenceBreak => r"\. [A-Z]",
            Rule::ParagraphBreak => r"\n\n",
            Rule::SentenceStart => r"(?m)^[A-Z][a-z]",
        }
    }

    /// Number of non-overlapping matches of this rule in `text`
    pub fn count(self, text: &str) -> usize {
        compiled(self).find_iter(text).count()
    }
}

fn compiled(rule: Rule) -> &'static Regex {
    static CACHE: OnceLock<HashMap<Rule, Regex>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| {
        Rule::PENALTIES
            .iter()
            .chain(Rule::BONUSES.iter())
            .map(|&r| (r, Regex::new(r.pattern()).unwrap()))
            .collect()
    });
    &cache[&rule]
}

pub fn asterisks(text: &str) -> usize {
    Rule::Asterisk.count(text)
}

pub fn bold_markdown(text: &str) -> usize {
    Rule::BoldMarkdown.count(text)
}

pub fn italic_markdown(text: &str) -> usize {
    Rule::ItalicMarkdown.count(text)
}

pub fn header_markdown(text: &str) -> usize {
    Rule::HeaderMarkdown.count(text)
}

pub fn code_blocks(text: &str) -> usize {
    Rule::CodeBlock.count(text)
}

pub fn inline_code(text: &str) -> usize {
    Rule::InlineCode.count(text)
}

pub fn awkward_asterisk_placement(text: &str) -> usize {
    Rule::AwkwardAsteriskPlacement.count(text)
}

pub fn asterisk_at_sentence_start(text: &str) -> usize {
    Rule::AsteriskAtSentenceStart.count(text)
}

pub fn asterisk_at_sentence_end(text: &str) -> usize {
    Rule::AsteriskAtSentenceEnd.count(text)
}

pub fn asterisk_after_colon(text: &str) -> usize {
    Rule::AsteriskAfterColon.count(text)
}

pub fn sentence_breaks(text: &str) -> usize {
    Rule::SentenceBreak.count(text)
}

pub fn paragraph_breaks(text: &str) -> usize {
    Rule::ParagraphBreak.count(text)
}

pub fn sentence_starts(text: &str) -> usize {
    Rule::SentenceStart.count(text)
}
