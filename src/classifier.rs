//! Keyword-based sentiment scoring and topic classification.
//!
//! Each line is scored additively against the lexicon word sets and assigned
//! the taxonomy topic with the most keyword hits. No ML model is involved.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

use crate::lexicon::{Lexicon, GENERAL_CATEGORY};
use crate::models::{FeedbackItem, SentimentLabel};

/// Score contribution of one matched sentiment word, in either direction.
pub const SENTIMENT_STEP: i32 = 2;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Lower-case `text` and split it into word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct Classifier {
    lexicon: Arc<Lexicon>,
}

impl Classifier {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Turn one raw line into a scored, categorized item.
    pub fn classify(&self, text: &str) -> FeedbackItem {
        let (score, keywords) = self.score(text);

        FeedbackItem {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            sentiment_score: score,
            sentiment_label: SentimentLabel::from_score(score),
            keywords,
            category: self.categorize(text),
        }
    }

    /// Classify a batch in parallel. Output order matches input order.
    pub fn classify_all<S>(&self, texts: &[S]) -> Vec<FeedbackItem>
    where
        S: AsRef<str> + Sync,
    {
        let items: Vec<FeedbackItem> = texts
            .par_iter()
            .map(|text| self.classify(text.as_ref()))
            .collect();
        debug!("Classified {} feedback items", items.len());
        items
    }

    /// Additive score over word tokens plus the sentiment words that moved it.
    /// A word present in both sets counts as positive.
    pub fn score(&self, text: &str) -> (i32, Vec<String>) {
        let mut score = 0;
        let mut keywords = Vec::new();

        for token in tokenize(text) {
            if self.lexicon.is_positive(&token) {
                score += SENTIMENT_STEP;
                keywords.push(token);
            } else if self.lexicon.is_negative(&token) {
                score -= SENTIMENT_STEP;
                keywords.push(token);
            }
        }

        (score, keywords)
    }

    /// Topic with the most contained keywords; the earliest topic wins a tie.
    pub fn categorize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let mut best: Option<&str> = None;
        let mut max_matches = 0;

        for topic in self.lexicon.topic_keywords() {
            let matches = topic
                .keywords
                .iter()
                .filter(|k| lowered.contains(k.as_str()))
                .count();
            if matches > max_matches {
                max_matches = matches;
                best = Some(topic.name.as_str());
            }
        }

        best.unwrap_or(GENERAL_CATEGORY).to_string()
    }
}
