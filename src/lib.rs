//! Feedback insights: sentiment scoring, topic classification, theme
//! clustering and rule-based findings for batches of free-text feedback.

pub mod analyzer;
pub mod api;
pub mod classifier;
pub mod cluster;
pub mod config;
pub mod error;
pub mod insights;
pub mod lexicon;
pub mod models;

pub use analyzer::{split_feedback_lines, Analyzer, SAMPLE_FEEDBACK};
pub use config::AppConfig;
pub use error::{ConfigError, LexiconError};
pub use insights::{InsightGenerator, InsightRule, ToneThresholds};
pub use lexicon::Lexicon;
pub use models::{AnalysisResult, FeedbackItem, SentimentDistribution, SentimentLabel, ThemeCluster};
