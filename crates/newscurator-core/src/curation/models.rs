use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ai::SummaryLength;
use crate::sentiment::SentimentLabel;

/// Which sentiments the user wants to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SentimentFilter {
    #[default]
    Both,
    Positive,
    Negative,
}

impl SentimentFilter {
    pub const ALL: [SentimentFilter; 3] = [
        SentimentFilter::Both,
        SentimentFilter::Positive,
        SentimentFilter::Negative,
    ];

    /// Whether an article with this label passes the filter
    pub fn accepts(&self, label: SentimentLabel) -> bool {
        match self {
            SentimentFilter::Both => true,
            SentimentFilter::Positive => label == SentimentLabel::Positive,
            SentimentFilter::Negative => label == SentimentLabel::Negative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentFilter::Both => "Both",
            SentimentFilter::Positive => "Positive",
            SentimentFilter::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "both" | "all" => Ok(SentimentFilter::Both),
            "positive" => Ok(SentimentFilter::Positive),
            "negative" => Ok(SentimentFilter::Negative),
            other => Err(format!("unknown sentiment filter: {}", other)),
        }
    }
}

/// Inputs for one curation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelection {
    pub topic: String,
    pub sentiment_filter: SentimentFilter,
    pub summary_length: SummaryLength,
}

impl UserSelection {
    pub fn new(
        topic: impl Into<String>,
        sentiment_filter: SentimentFilter,
        summary_length: SummaryLength,
    ) -> Self {
        Self {
            topic: topic.into(),
            sentiment_filter,
            summary_length,
        }
    }
}

/// One summarized, sentiment-tagged article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedItem {
    pub title: String,
    pub summary: String,
    pub sentiment: SentimentLabel,
    /// Compound polarity behind `sentiment`
    pub compound: f64,
    #[serde(rename = "source")]
    pub source_name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// An article dropped because its summary could not be generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedArticle {
    pub title: String,
    pub url: String,
    pub reason: String,
}

/// Result of a curation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurationReport {
    /// Articles returned by the news service
    pub fetched: usize,
    /// Curated items in news-service order
    pub items: Vec<CuratedItem>,
    pub skipped: Vec<SkippedArticle>,
}

impl CurationReport {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts() {
        for label in [SentimentLabel::Positive, SentimentLabel::Negative, SentimentLabel::Neutral] {
            assert!(SentimentFilter::Both.accepts(label));
        }
        assert!(SentimentFilter::Positive.accepts(SentimentLabel::Positive));
        assert!(!SentimentFilter::Positive.accepts(SentimentLabel::Neutral));
        assert!(SentimentFilter::Negative.accepts(SentimentLabel::Negative));
        assert!(!SentimentFilter::Negative.accepts(SentimentLabel::Positive));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("Both".parse::<SentimentFilter>(), Ok(SentimentFilter::Both));
        assert_eq!("negative".parse::<SentimentFilter>(), Ok(SentimentFilter::Negative));
        assert!("neutral".parse::<SentimentFilter>().is_err());
    }

    #[test]
    fn test_item_serializes_source_field() {
        let item = CuratedItem {
            title: "t".into(),
            summary: "s".into(),
            sentiment: SentimentLabel::Neutral,
            compound: 0.0,
            source_name: "BBC".into(),
            url: "https://example.com".into(),
            published_at: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["source"], "BBC");
        assert_eq!(json["sentiment"], "Neutral");
        assert!(json.get("published_at").is_none());
    }
}
