//! Rule-based insight synthesis.
//!
//! Rules run in registration order and each may contribute one sentence.
//! The overall-tone rule is always registered first and always fires.

use crate::models::{SentimentDistribution, ThemeCluster};

/// Average-sentiment cutoffs for the overall tone statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneThresholds {
    /// Tone is positive when the average is strictly above this
    pub positive: f64,
    /// Tone is critical when the average is strictly below this
    pub negative: f64,
}

impl Default for ToneThresholds {
    fn default() -> Self {
        Self {
            positive: 0.5,
            negative: -0.5,
        }
    }
}

/// Aggregates a rule may inspect.
pub struct InsightContext<'a> {
    /// Ranked, truncated themes
    pub themes: &'a [ThemeCluster],
    pub distribution: &'a SentimentDistribution,
    pub average_sentiment: f64,
}

pub trait InsightRule: Send + Sync {
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<String>;
}

/// Half-up rounding: `floor(x + 0.5)`, so -2.5 rounds to -2.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub struct OverallTone {
    pub thresholds: ToneThresholds,
}

impl InsightRule for OverallTone {
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<String> {
        let message = if ctx.average_sentiment > self.thresholds.positive {
            "🚀 Users generally love the product! Sentiment is strongly positive."
        } else if ctx.average_sentiment < self.thresholds.negative {
            "⚠️ Critical Action Required: Sentiment is trending negative."
        } else {
            "ℹ️ Product sentiment is mixed/neutral. Users have specific pain points."
        };
        Some(message.to_string())
    }
}

/// Names the highest-ranked theme with negative mean sentiment.
pub struct ProblemTheme;

impl InsightRule for ProblemTheme {
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<String> {
        let theme = ctx.themes.iter().find(|t| t.sentiment < 0.0)?;
        let magnitude = (round_half_up(theme.sentiment * 10.0) / 10.0).abs();
        Some(format!(
            "🔴 High Negative Signal in \"{}\": {} sentiment score. Users are complaining about this area.",
            theme.name, magnitude
        ))
    }
}

/// Fires when the first Features/UX theme has more than `min_count` members.
pub struct FeatureDemand {
    pub min_count: usize,
}

impl Default for FeatureDemand {
    fn default() -> Self {
        Self { min_count: 2 }
    }
}

impl InsightRule for FeatureDemand {
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<String> {
        let theme = ctx
            .themes
            .iter()
            .find(|t| t.name.contains("Features") || t.name.contains("UX"))?;
        if theme.count <= self.min_count {
            return None;
        }
        Some(format!(
            "✨ {} users mentioned UX/Feature requests. Check the feedback for specific ideas.",
            theme.count
        ))
    }
}

/// Negative-to-positive ratio when negatives outnumber positives.
pub struct SentimentImbalance;

impl InsightRule for SentimentImbalance {
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<String> {
        let dist = ctx.distribution;
        if dist.negative <= dist.positive {
            return None;
        }
        let ratio = if dist.positive == 0 {
            0
        } else {
            round_half_up(dist.negative as f64 / dist.positive as f64) as u64
        };
        Some(format!("📉 Negative feedback outweighs positive by {}x.", ratio))
    }
}

pub struct InsightGenerator {
    rules: Vec<Box<dyn InsightRule>>,
}

impl InsightGenerator {
    /// Tone, problem theme, feature demand, imbalance; in that order.
    pub fn new(thresholds: ToneThresholds) -> Self {
        Self {
            rules: vec![
                Box::new(OverallTone { thresholds }),
                Box::new(ProblemTheme),
                Box::new(FeatureDemand::default()),
                Box::new(SentimentImbalance),
            ],
        }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: impl InsightRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn generate(
        &self,
        themes: &[ThemeCluster],
        distribution: &SentimentDistribution,
        average_sentiment: f64,
    ) -> Vec<String> {
        let ctx = InsightContext {
            themes,
            distribution,
            average_sentiment,
        };
        self.rules.iter().filter_map(|rule| rule.evaluate(&ctx)).collect()
    }
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new(ToneThresholds::default())
    }
}
