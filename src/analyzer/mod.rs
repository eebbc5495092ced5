//! Analyzer module - formatting quality analysis

pub mod engine;
pub mod locate;
pub mod rules;
pub mod scoring;

pub use engine::{analyze, FormattingAnalyzer};
pub use locate::locate_asterisks;
pub use scoring::Tally;
