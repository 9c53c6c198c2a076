//! Runtime configuration read from the environment (and `.env`).

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::insights::ToneThresholds;
use crate::lexicon::Lexicon;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_ITEMS: usize = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// JSON lexicon to load instead of the builtin one
    pub lexicon_path: Option<PathBuf>,
    pub thresholds: ToneThresholds,
    /// Largest batch accepted by the HTTP endpoint
    pub max_items: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            lexicon_path: None,
            thresholds: ToneThresholds::default(),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl AppConfig {
    /// Read `FEEDBACK_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unparseable numbers fall back to
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = lookup("FEEDBACK_BIND_ADDR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.bind_addr);
        let lexicon_path = lookup("FEEDBACK_LEXICON_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let thresholds = ToneThresholds {
            positive: parse_or(&lookup, "FEEDBACK_POSITIVE_THRESHOLD", defaults.thresholds.positive),
            negative: parse_or(&lookup, "FEEDBACK_NEGATIVE_THRESHOLD", defaults.thresholds.negative),
        };
        if !thresholds.positive.is_finite()
            || !thresholds.negative.is_finite()
            || thresholds.negative > thresholds.positive
        {
            return Err(ConfigError::InvalidThresholds {
                positive: thresholds.positive,
                negative: thresholds.negative,
            });
        }

        let max_items = parse_or(&lookup, "FEEDBACK_MAX_ITEMS", defaults.max_items);

        Ok(Self {
            bind_addr,
            lexicon_path,
            thresholds,
            max_items,
        })
    }

    /// Load the configured lexicon, or the builtin one when none is set.
    pub fn load_lexicon(&self) -> Result<Arc<Lexicon>, ConfigError> {
        let lexicon = match &self.lexicon_path {
            Some(path) => {
                let lexicon = Lexicon::load(path)?;
                info!("📚 Loaded lexicon from {}", path.display());
                lexicon
            }
            None => Lexicon::builtin(),
        };
        info!(
            "📚 Lexicon ready: {} topics, {} positive / {} negative words",
            lexicon.topic_keywords().len(),
            lexicon.positive_words(),
            lexicon.negative_words()
        );
        Ok(Arc::new(lexicon))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {:?}", key, raw, default);
            default
        }),
        None => default,
    }
}
