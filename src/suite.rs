//! Scenario suite: ask a provider fixed questions and score every answer

use crate::analyzer::FormattingAnalyzer;
use crate::provider::{build_prompt, ResponseSource, DEFAULT_SYSTEM_PROMPT};
use crate::{AggregateStats, InputReport};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A named question sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub question: String,
}

impl Scenario {
    pub fn new(name: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            question: question.into(),
        }
    }
}

/// Built-in scenarios covering explanations, steps, lists, troubleshooting and safety
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "Basic Feature Explanation",
            "How does NULL VOID protect me from dangerous websites?",
        ),
        Scenario::new(
            "Step-by-Step Instructions",
            "How do I use the disposable browser feature?",
        ),
        Scenario::new(
            "Complex Feature List",
            "Can you explain all the features of NULL VOID and how to use them?",
        ),
        Scenario::new(
            "Troubleshooting Help",
            "What should I do if I see a yellow 'Fallback Mode' warning?",
        ),
        Scenario::new(
            "Safety Guidance",
            "How do I use the temporary email feature for safe online registrations?",
        ),
    ]
}

/// What happened for one scenario
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    /// The provider answered and the answer was scored
    Answered { response: String, report: InputReport },
    /// The request or response parsing failed; not retried
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub name: String,
    pub question: String,
    /// Local wall-clock time the scenario finished, `HH:MM:SS`
    pub timestamp: String,
    pub outcome: Outcome,
}

impl ScenarioOutcome {
    pub fn report(&self) -> Option<&InputReport> {
        match &self.outcome {
            Outcome::Answered { report, .. } => Some(report),
            Outcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSummary {
    #[serde(flatten)]
    pub stats: AggregateStats,
    /// Scenarios whose request failed
    pub failed_requests: usize,
}

impl SuiteSummary {
    pub fn from_outcomes(outcomes: &[ScenarioOutcome]) -> Self {
        let stats = AggregateStats::from_results(
            outcomes.iter().filter_map(|o| o.report()).map(|r| &r.analysis),
            outcomes.len(),
        );
        let failed_requests = outcomes.iter().filter(|o| o.report().is_none()).count();
        Self {
            stats,
            failed_requests,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
    pub summary: SuiteSummary,
}

/// Runs scenarios one after another against a response source
pub struct SuiteRunner<S> {
    source: S,
    pause: Duration,
    system_prompt: String,
    analyzer: FormattingAnalyzer,
}

impl<S: ResponseSource> SuiteRunner<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pause: Duration::from_millis(crate::config::DEFAULT_PAUSE_MS),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            analyzer: FormattingAnalyzer::new(),
        }
    }

    /// Pause between a successful request and the next one
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Collect asterisk locations for every answer
    pub fn with_locations(mut self) -> Self {
        self.analyzer = FormattingAnalyzer::new().with_locations();
        self
    }

    pub fn run(&self, scenarios: &[Scenario]) -> SuiteReport {
        self.run_with(scenarios, |_| {})
    }

    /// Run every scenario, handing each outcome to `observer` as soon as it is known
    pub fn run_with<F>(&self, scenarios: &[Scenario], mut observer: F) -> SuiteReport
    where
        F: FnMut(&ScenarioOutcome),
    {
        info!(scenarios = scenarios.len(), "starting formatting suite");
        let mut outcomes = Vec::with_capacity(scenarios.len());

        for (index, scenario) in scenarios.iter().enumerate() {
            debug!(name = %scenario.name, "running scenario");
            let prompt = build_prompt(&self.system_prompt, &scenario.question);

            let outcome = match self.source.respond(&prompt) {
                Ok(response) => {
                    let report = self.analyzer.report(scenario.name.clone(), &response);
                    let is_last = index + 1 == scenarios.len();
                    if !is_last && !self.pause.is_zero() {
                        thread::sleep(self.pause);
                    }
                    Outcome::Answered { response, report }
                }
                Err(e) => {
                    warn!(name = %scenario.name, error = %e, "scenario failed");
                    Outcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            let outcome = ScenarioOutcome {
                name: scenario.name.clone(),
                question: scenario.question.clone(),
                timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
                outcome,
            };
            observer(&outcome);
            outcomes.push(outcome);
        }

        let summary = SuiteSummary::from_outcomes(&outcomes);
        SuiteReport { outcomes, summary }
    }
}
