//! Batch feedback analysis: classify, aggregate, cluster, summarise.

use std::sync::Arc;
use tracing::debug;

use crate::classifier::Classifier;
use crate::cluster::cluster_themes;
use crate::insights::{InsightGenerator, ToneThresholds};
use crate::lexicon::Lexicon;
use crate::models::{AnalysisResult, FeedbackItem, SentimentDistribution};

/// Demo feedback shipped with the dashboard.
pub const SAMPLE_FEEDBACK: &[&str] = &[
    "I love the new dark mode, it looks amazing!",
    "The app crashes every time I try to upload a photo on Android.",
    "Customer support is terrible, no one replies to my tickets.",
    "Pricing is too high for the value provided.",
    "The login screen is confusing, I can't find the forgot password link.",
    "Great performance improvements in the latest update!",
    "Please add an export to CSV feature.",
    "The interface is clean but a bit hard to navigate on mobile.",
    "Billing is a nightmare, I got charged twice.",
    "Best app I've used for productivity this year.",
];

/// Split pasted multi-line input into feedback lines, skipping blank ones.
pub fn split_feedback_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

pub struct Analyzer {
    classifier: Classifier,
    insights: InsightGenerator,
}

impl Analyzer {
    pub fn new(lexicon: Arc<Lexicon>, thresholds: ToneThresholds) -> Self {
        Self {
            classifier: Classifier::new(lexicon),
            insights: InsightGenerator::new(thresholds),
        }
    }

    /// Use a custom rule set instead of the default one.
    pub fn with_insights(mut self, insights: InsightGenerator) -> Self {
        self.insights = insights;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn analyze<S>(&self, texts: &[S]) -> AnalysisResult
    where
        S: AsRef<str> + Sync,
    {
        self.analyze_detailed(texts).0
    }

    /// Like [`Analyzer::analyze`], also returning the classified items in
    /// input order.
    pub fn analyze_detailed<S>(&self, texts: &[S]) -> (AnalysisResult, Vec<FeedbackItem>)
    where
        S: AsRef<str> + Sync,
    {
        let items = self.classifier.classify_all(texts);

        let total = items.len();
        let sum: i64 = items.iter().map(|i| i.sentiment_score as i64).sum();
        let average_sentiment = if total > 0 {
            sum as f64 / total as f64
        } else {
            0.0
        };

        let mut distribution = SentimentDistribution::default();
        for item in &items {
            distribution.record(item.sentiment_label);
        }

        let top_themes = cluster_themes(&items);
        let actionable_insights =
            self.insights
                .generate(&top_themes, &distribution, average_sentiment);

        debug!(
            "Analysis done - total={}, avg={:.2}, pos={}, neg={}, neu={}, insights={}",
            total,
            average_sentiment,
            distribution.positive,
            distribution.negative,
            distribution.neutral,
            actionable_insights.len()
        );

        let result = AnalysisResult {
            total_count: total,
            average_sentiment,
            sentiment_distribution: distribution,
            top_themes,
            actionable_insights,
        };
        (result, items)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::builtin()), ToneThresholds::default())
    }
}
