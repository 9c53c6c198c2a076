//! Lexicon store: the topic taxonomy and the sentiment word sets.
//!
//! A `Lexicon` is built once at startup (from the builtin tables or from a
//! JSON resource) and is read-only afterwards. It is shared by reference
//! between the classifier and the HTTP layer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use utoipa::ToSchema;

use crate::error::LexiconError;

/// Category assigned when no topic keyword matches.
pub const GENERAL_CATEGORY: &str = "General";

/// Builtin taxonomy, in declaration order. Order matters: earlier topics win ties.
const BUILTIN_TOPICS: &[(&str, &[&str])] = &[
    (
        "Pricing & Value",
        &["price", "cost", "expensive", "cheap", "subscription", "plan", "billing", "charge", "value", "worth"],
    ),
    (
        "User Experience (UX)",
        &["ui", "ux", "interface", "button", "click", "menu", "navigation", "layout", "design", "color", "dark mode"],
    ),
    (
        "Performance & Stability",
        &["slow", "lag", "crash", "bug", "error", "loading", "fast", "speed", "performance", "stable"],
    ),
    (
        "Customer Support",
        &["support", "help", "service", "chat", "agent", "email", "response", "rude", "polite", "ticket"],
    ),
    (
        "Authentication",
        &["login", "signup", "password", "auth", "register", "account", "email", "verify", "2fa"],
    ),
    (
        "Features",
        &["feature", "missing", "add", "request", "option", "setting", "customization"],
    ),
];

const BUILTIN_POSITIVE: &[&str] = &[
    "great", "good", "love", "amazing", "excellent", "best", "fantastic", "fast", "easy", "helpful",
    "nice", "clean", "smooth", "perfect", "worth", "cheap", "value", "stable", "secure", "beautiful",
    "fun",
    // inflections
    "loved", "loves", "loving", "easier", "faster", "smoother", "cleaner",
];

const BUILTIN_NEGATIVE: &[&str] = &[
    "bad", "terrible", "hate", "awful", "worst", "slow", "hard", "difficult", "confusing", "ugly",
    "bug", "crash", "error", "rude", "expensive", "lag", "failed", "broken", "mess", "annoying",
    "boring",
    // inflections
    "hated", "hates", "slower", "harder", "bugs", "buggy", "crashes", "crashed", "crashing",
    "errors", "lags", "lagging", "laggy", "fails",
];

/// One taxonomy entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Topic {
    pub name: String,
    pub keywords: Vec<String>,
}

/// On-disk shape of a lexicon resource.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    topics: Vec<Topic>,
    #[serde(default)]
    positive: Vec<String>,
    #[serde(default)]
    negative: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    topics: Vec<Topic>,
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl Lexicon {
    /// The six-topic product feedback taxonomy with curated sentiment words.
    pub fn builtin() -> Self {
        let topics = BUILTIN_TOPICS
            .iter()
            .map(|(name, keywords)| Topic {
                name: name.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();

        Self::build(
            topics,
            BUILTIN_POSITIVE.iter().map(|w| w.to_string()),
            BUILTIN_NEGATIVE.iter().map(|w| w.to_string()),
        )
    }

    /// Parse a lexicon from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for topic in &file.topics {
            let name = topic.name.trim();
            if name.eq_ignore_ascii_case(GENERAL_CATEGORY) {
                return Err(LexiconError::ReservedTopic(name.to_string()));
            }
            if !seen.insert(name.to_string()) {
                return Err(LexiconError::DuplicateTopic(name.to_string()));
            }
        }

        Ok(Self::build(file.topics, file.positive, file.negative))
    }

    /// Read and parse a JSON lexicon file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Normalise raw tables: lower-case everything, drop blank keywords and
    /// topics left without any keyword.
    fn build(
        topics: Vec<Topic>,
        positive: impl IntoIterator<Item = String>,
        negative: impl IntoIterator<Item = String>,
    ) -> Self {
        let topics = topics
            .into_iter()
            .map(|topic| Topic {
                name: topic.name.trim().to_string(),
                keywords: topic
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .filter(|topic| !topic.keywords.is_empty())
            .collect();

        Self {
            topics,
            positive: normalise_words(positive),
            negative: normalise_words(negative),
        }
    }

    /// Taxonomy topics in declaration order
    pub fn topic_keywords(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.name.as_str())
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    pub fn positive_words(&self) -> usize {
        self.positive.len()
    }

    pub fn negative_words(&self) -> usize {
        self.negative.len()
    }
}

fn normalise_words(words: impl IntoIterator<Item = String>) -> HashSet<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
