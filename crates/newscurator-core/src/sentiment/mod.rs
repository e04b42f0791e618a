mod analyzer;
mod classifier;
mod lexicon;

pub use analyzer::{normalize, PolarityScores, SentimentAnalyzer};
pub use classifier::{SentimentClassifier, SentimentLabel, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
pub use lexicon::Lexicon;
