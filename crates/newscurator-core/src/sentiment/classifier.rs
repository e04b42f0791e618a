use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::analyzer::{PolarityScores, SentimentAnalyzer};
use super::lexicon::Lexicon;
use crate::config::AppConfig;
use crate::Result;

/// Compound score at or above which text is positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which text is negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Sentiment classification for an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Map a compound score to a label. Thresholds are inclusive and
    /// checked positive first.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(format!("unknown sentiment: {}", other)),
        }
    }
}

/// Article sentiment classifier over a fixed lexicon.
///
/// Build it once at startup and share it; classification is pure.
#[derive(Debug, Clone, Default)]
pub struct SentimentClassifier {
    analyzer: SentimentAnalyzer,
}

impl SentimentClassifier {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            analyzer: SentimentAnalyzer::new(lexicon),
        }
    }

    /// Use the configured lexicon file, or the built-in lexicon
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let lexicon = match config.lexicon_path() {
            Some(path) => Lexicon::load(&path)?,
            None => Lexicon::builtin(),
        };
        Ok(Self::new(lexicon))
    }

    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        self.analyzer.polarity_scores(text)
    }

    pub fn classify(&self, text: &str) -> SentimentLabel {
        SentimentLabel::from_compound(self.polarity_scores(text).compound)
    }
}
