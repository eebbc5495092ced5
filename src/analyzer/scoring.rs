//! Score accumulation for formatting quality

use crate::{Finding, Rule, CLEAN_THRESHOLD};

/// Score every response starts from
pub const BASE_SCORE: i64 = 100;

/// Running state of a score fold: score so far, bonus earned, findings in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    score: i64,
    bonus: i64,
    findings: Vec<Finding>,
}

impl Tally {
    pub fn new() -> Self {
        Self {
            score: BASE_SCORE,
            bonus: 0,
            findings: Vec::new(),
        }
    }

    /// Deduct `count * weight` and record a finding; no-op for zero matches.
    pub fn penalize(mut self, rule: Rule, count: usize) -> Self {
        if count == 0 {
            return self;
        }
        let penalty = points(rule, count);
        self.score = self.score.saturating_sub(penalty);
        self.findings.push(Finding {
            rule,
            count,
            penalty,
            message: rule.message(count),
        });
        self
    }

    /// Add `count * weight`; bonuses leave no finding behind.
    pub fn reward(mut self, rule: Rule, count: usize) -> Self {
        let bonus = points(rule, count);
        self.score = self.score.saturating_add(bonus);
        self.bonus = self.bonus.saturating_add(bonus);
        self
    }

    /// Raw score, possibly outside 0-100
    pub fn raw(&self) -> i64 {
        self.score
    }

    pub fn bonus(&self) -> i64 {
        self.bonus
    }

    /// Score clamped to 0-100
    pub fn clamped(&self) -> u8 {
        self.raw().clamp(0, 100) as u8
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

fn points(rule: Rule, count: usize) -> i64 {
    i64::try_from(count)
        .unwrap_or(i64::MAX)
        .saturating_mul(rule.weight())
}

/// Pass criterion: score at or above the threshold and not a single asterisk
pub fn is_clean(score: u8, asterisk_count: usize) -> bool {
    score >= CLEAN_THRESHOLD && asterisk_count == 0
}
