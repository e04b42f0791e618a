use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article returned by the search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Description, or the longer content when no description exists
    pub body_text: Option<String>,
    pub source_name: String,
    pub url: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Body text if it has any non-whitespace content
    pub fn text(&self) -> Option<&str> {
        self.body_text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Pick the text used for sentiment and summarization.
///
/// The short description wins; the longer content is the fallback. Blank
/// strings count as absent.
pub fn select_body_text(description: Option<String>, content: Option<String>) -> Option<String> {
    description
        .filter(|d| !d.trim().is_empty())
        .or_else(|| content.filter(|c| !c.trim().is_empty()))
}

/// Wire format of `GET /v2/everything`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Option<Vec<RawArticle>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let published_at = raw
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            title: raw.title.unwrap_or_default(),
            body_text: select_body_text(raw.description, raw.content),
            source_name: raw.source.and_then(|s| s.name).unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            author: raw.author,
            published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_preferred_over_content() {
        let text = select_body_text(Some("short".into()), Some("long content".into()));
        assert_eq!(text.as_deref(), Some("short"));
    }

    #[test]
    fn test_content_used_when_description_missing_or_blank() {
        assert_eq!(
            select_body_text(None, Some("long content".into())).as_deref(),
            Some("long content")
        );
        assert_eq!(
            select_body_text(Some("  ".into()), Some("long content".into())).as_deref(),
            Some("long content")
        );
    }

    #[test]
    fn test_no_text_when_both_absent() {
        assert_eq!(select_body_text(None, None), None);
        assert_eq!(select_body_text(Some("".into()), Some("\n".into())), None);
    }

    #[test]
    fn test_raw_article_conversion() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({
            "source": { "id": null, "name": "Space.com" },
            "author": "Jane Doe",
            "title": "Rocket lands",
            "description": null,
            "url": "https://example.com/rocket",
            "publishedAt": "2024-03-01T12:00:00Z",
            "content": "The rocket landed safely."
        }))
        .unwrap();

        let article = Article::from(raw);
        assert_eq!(article.title, "Rocket lands");
        assert_eq!(article.source_name, "Space.com");
        assert_eq!(article.text(), Some("The rocket landed safely."));
        assert_eq!(article.author.as_deref(), Some("Jane Doe"));
        assert!(article.published_at.is_some());
    }
}
