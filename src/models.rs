//! Report value types produced by the feedback pipeline.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Polarity of a single feedback item, derived from its score sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Positive iff `score > 0`, negative iff `score < 0`, otherwise neutral.
    pub fn from_score(score: i32) -> Self {
        match score.signum() {
            1 => SentimentLabel::Positive,
            -1 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// One classified line of feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    /// Run-unique identifier
    pub id: String,
    /// Original input, unmodified
    pub text: String,
    pub sentiment_score: i32,
    pub sentiment_label: SentimentLabel,
    /// Sentiment-bearing tokens in the order they were found
    pub keywords: Vec<String>,
    /// Taxonomy topic name or "General"
    pub category: String,
}

/// Items sharing a category, summarised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCluster {
    pub name: String,
    pub count: usize,
    /// Mean sentiment score of the members
    pub sentiment: f64,
    /// Up to three member texts, in input order
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// The aggregate report for one batch of feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_count: usize,
    pub average_sentiment: f64,
    pub sentiment_distribution: SentimentDistribution,
    /// At most five themes, largest first
    pub top_themes: Vec<ThemeCluster>,
    /// Tone statement first, then any triggered findings
    pub actionable_insights: Vec<String>,
}
