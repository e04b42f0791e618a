use std::sync::Arc;

use futures::stream::{self, StreamExt};

use super::models::{CuratedItem, CurationReport, SkippedArticle, UserSelection};
use crate::ai::Summarizer;
use crate::config::AppConfig;
use crate::news::{Article, ArticleSource, NewsFetcher};
use crate::sentiment::{SentimentClassifier, SentimentLabel};
use crate::{Error, Result};

/// An article that passed the sentiment filter and awaits its summary
struct Candidate {
    article: Article,
    text: String,
    sentiment: SentimentLabel,
    compound: f64,
}

/// Fetch → classify → filter → summarize
pub struct CurationPipeline {
    source: Arc<dyn ArticleSource>,
    classifier: Arc<SentimentClassifier>,
    summarizer: Arc<Summarizer>,
}

impl CurationPipeline {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        classifier: Arc<SentimentClassifier>,
        summarizer: Arc<Summarizer>,
    ) -> Self {
        Self {
            source,
            classifier,
            summarizer,
        }
    }

    /// Build every collaborator from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source = Arc::new(NewsFetcher::new(config)?);
        let classifier = Arc::new(SentimentClassifier::from_config(config)?);
        let summarizer = Arc::new(Summarizer::new(config)?);
        Ok(Self::new(source, classifier, summarizer))
    }

    /// Run one curation pass.
    ///
    /// An empty topic fails before any network call. Fetch failures abort
    /// the run. Articles whose summary fails are skipped and reported in
    /// [`CurationReport::skipped`].
    pub async fn run(&self, selection: UserSelection) -> Result<CurationReport> {
        let topic = selection.topic.trim();
        if topic.is_empty() {
            return Err(Error::Validation("Please enter a topic to search.".to_string()));
        }

        let articles = self.source.fetch(topic).await?;
        let fetched = articles.len();

        let candidates = self.select(articles, &selection);
        let budget = selection.summary_length.max_tokens();

        tracing::info!(
            "Topic '{}': {} fetched, {} match filter {}, summarizing with max_tokens={}",
            topic,
            fetched,
            candidates.len(),
            selection.sentiment_filter,
            budget
        );

        let summarizer = &self.summarizer;
        let outcomes: Vec<(Candidate, Result<String>)> = stream::iter(candidates)
            .map(|candidate| async move {
                let summary = summarizer.summarize(&candidate.text, budget).await;
                (candidate, summary)
            })
            .buffered(summarizer.concurrency())
            .collect()
            .await;

        let mut report = CurationReport {
            fetched,
            ..CurationReport::default()
        };

        for (candidate, summary) in outcomes {
            let Candidate {
                article,
                sentiment,
                compound,
                ..
            } = candidate;

            match summary {
                Ok(summary) => report.items.push(CuratedItem {
                    title: article.title,
                    summary,
                    sentiment,
                    compound,
                    source_name: article.source_name,
                    url: article.url,
                    published_at: article.published_at,
                }),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!("Skipping '{}': {}", article.title, e);
                    report.skipped.push(SkippedArticle {
                        title: article.title,
                        url: article.url,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Drop articles without text or outside the sentiment filter, keeping order
    fn select(&self, articles: Vec<Article>, selection: &UserSelection) -> Vec<Candidate> {
        articles
            .into_iter()
            .filter_map(|article| {
                let text = article.text()?.to_string();
                let scores = self.classifier.polarity_scores(&text);
                let sentiment = SentimentLabel::from_compound(scores.compound);

                if !selection.sentiment_filter.accepts(sentiment) {
                    tracing::debug!("Filtered '{}' ({})", article.title, sentiment);
                    return None;
                }

                Some(Candidate {
                    article,
                    text,
                    sentiment,
                    compound: scores.compound,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiProvider, SummaryLength};
    use crate::curation::SentimentFilter;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    const POSITIVE_TEXT: &str = "A great success for the mission";
    const NEGATIVE_TEXT: &str = "A terrible disaster killed the crew";
    const NEUTRAL_TEXT: &str = "The committee meets on Tuesday";

    struct FakeSource {
        result: Mutex<Option<Result<Vec<Article>>>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn returning(articles: Vec<Article>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(Ok(articles))),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(Err(Error::Network(message.to_string())))),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl ArticleSource for FakeSource {
        async fn fetch(&self, _topic: &str) -> Result<Vec<Article>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Summarizes as "summary: <text>", failing for texts containing "FAIL"
    #[derive(Default)]
    struct FakeProvider {
        budgets: Mutex<Vec<u32>>,
        delay_by_len: bool,
    }

    #[async_trait::async_trait]
    impl AiProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn summarize(&self, content: &str, max_tokens: u32) -> Result<String> {
            self.budgets.lock().unwrap().push(max_tokens);
            if self.delay_by_len {
                // Shorter texts finish first
                tokio::time::sleep(Duration::from_millis(content.len() as u64)).await;
            }
            if content.contains("FAIL") {
                return Err(Error::Summarization("rate limited".to_string()));
            }
            Ok(format!("summary: {}", content))
        }
    }

    fn article(title: &str, body: Option<&str>) -> Article {
        Article {
            title: title.to_string(),
            body_text: body.map(str::to_string),
            source_name: "Wire".to_string(),
            url: format!("https://example.com/{}", title),
            author: None,
            published_at: None,
        }
    }

    fn pipeline(source: Arc<FakeSource>, provider: Arc<FakeProvider>, concurrency: usize) -> CurationPipeline {
        CurationPipeline::new(
            source,
            Arc::new(SentimentClassifier::default()),
            Arc::new(Summarizer::with_provider(provider, concurrency)),
        )
    }

    fn selection(filter: SentimentFilter, length: SummaryLength) -> UserSelection {
        UserSelection::new("Space", filter, length)
    }

    #[tokio::test]
    async fn test_empty_topic_is_validation_error_without_fetch() {
        let source = FakeSource::returning(vec![article("a", Some(POSITIVE_TEXT))]);
        let provider = Arc::new(FakeProvider::default());
        let pipeline = pipeline(source.clone(), provider.clone(), 1);

        for topic in ["", "   "] {
            let selection = UserSelection::new(topic, SentimentFilter::Both, SummaryLength::Short);
            let err = pipeline.run(selection).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(provider.budgets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_both_filter_short_keeps_all_in_order() {
        let source = FakeSource::returning(vec![
            article("first", Some(POSITIVE_TEXT)),
            article("second", Some(NEGATIVE_TEXT)),
        ]);
        let provider = Arc::new(FakeProvider::default());

        let report = pipeline(source, provider.clone(), 1)
            .run(selection(SentimentFilter::Both, SummaryLength::Short))
            .await
            .unwrap();

        assert_eq!(report.fetched, 2);
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].title, "first");
        assert_eq!(report.items[1].title, "second");
        assert!(report.items.iter().all(|i| !i.summary.is_empty()));
        assert_eq!(report.items[0].sentiment, SentimentLabel::Positive);
        assert_eq!(report.items[1].sentiment, SentimentLabel::Negative);
        assert_eq!(*provider.budgets.lock().unwrap(), vec![50, 50]);
    }

    #[tokio::test]
    async fn test_positive_filter_keeps_only_positive() {
        let source = FakeSource::returning(vec![
            article("pos", Some(POSITIVE_TEXT)),
            article("neg", Some(NEGATIVE_TEXT)),
            article("neu", Some(NEUTRAL_TEXT)),
        ]);
        let provider = Arc::new(FakeProvider::default());

        let report = pipeline(source, provider.clone(), 1)
            .run(selection(SentimentFilter::Positive, SummaryLength::Short))
            .await
            .unwrap();

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].title, "pos");
        assert_eq!(report.items[0].sentiment, SentimentLabel::Positive);
        // Filtered articles are never summarized
        assert_eq!(provider.budgets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_negative_filter_and_detailed_budget() {
        let source = FakeSource::returning(vec![
            article("pos", Some(POSITIVE_TEXT)),
            article("neg", Some(NEGATIVE_TEXT)),
            article("neg2", Some("Fears of war and crisis")),
        ]);
        let provider = Arc::new(FakeProvider::default());

        let report = pipeline(source, provider.clone(), 1)
            .run(selection(SentimentFilter::Negative, SummaryLength::Detailed))
            .await
            .unwrap();

        let titles: Vec<&str> = report.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["neg", "neg2"]);
        assert!(report.items.iter().all(|i| i.sentiment == SentimentLabel::Negative));
        assert_eq!(*provider.budgets.lock().unwrap(), vec![150, 150]);
    }

    #[tokio::test]
    async fn test_articles_without_text_are_skipped() {
        let source = FakeSource::returning(vec![
            article("none", None),
            article("blank", Some("   ")),
            article("ok", Some(NEUTRAL_TEXT)),
        ]);
        let provider = Arc::new(FakeProvider::default());

        let report = pipeline(source, provider.clone(), 1)
            .run(selection(SentimentFilter::Both, SummaryLength::Short))
            .await
            .unwrap();

        assert_eq!(report.fetched, 3);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].title, "ok");
        assert!(report.skipped.is_empty());
        assert_eq!(provider.budgets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_fetch_is_empty_report() {
        let source = FakeSource::returning(Vec::new());
        let report = pipeline(source, Arc::new(FakeProvider::default()), 1)
            .run(selection(SentimentFilter::Both, SummaryLength::Short))
            .await
            .unwrap();

        assert!(report.is_empty());
        assert_eq!(report.fetched, 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_network_error() {
        let source = FakeSource::failing("connection refused");
        let provider = Arc::new(FakeProvider::default());

        let err = pipeline(source, provider.clone(), 1)
            .run(selection(SentimentFilter::Both, SummaryLength::Short))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Network(_)));
        assert!(provider.budgets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summarization_failure_skips_article() {
        let source = FakeSource::returning(vec![
            article("first", Some(POSITIVE_TEXT)),
            article("broken", Some("FAIL: a good day")),
            article("third", Some(NEUTRAL_TEXT)),
        ]);

        let report = pipeline(source, Arc::new(FakeProvider::default()), 1)
            .run(selection(SentimentFilter::Both, SummaryLength::Short))
            .await
            .unwrap();

        let titles: Vec<&str> = report.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "third"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].title, "broken");
        assert!(report.skipped[0].reason.contains("rate limited"));
    }

    #[tokio::test]
    async fn test_concurrent_summaries_keep_source_order() {
        let long = format!("{} {}", POSITIVE_TEXT, "and more words ".repeat(4));
        let source = FakeSource::returning(vec![
            article("slow", Some(&long)),
            article("medium", Some(NEGATIVE_TEXT)),
            article("fast", Some("good")),
        ]);
        let provider = Arc::new(FakeProvider {
            delay_by_len: true,
            ..FakeProvider::default()
        });

        let report = pipeline(source, provider, 3)
            .run(selection(SentimentFilter::Both, SummaryLength::Short))
            .await
            .unwrap();

        let titles: Vec<&str> = report.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["slow", "medium", "fast"]);
    }

    #[tokio::test]
    async fn test_topic_is_trimmed_before_fetch() {
        struct TopicSpy(Mutex<Vec<String>>);

        #[async_trait::async_trait]
        impl ArticleSource for TopicSpy {
            async fn fetch(&self, topic: &str) -> Result<Vec<Article>> {
                self.0.lock().unwrap().push(topic.to_string());
                Ok(Vec::new())
            }
        }

        let spy = Arc::new(TopicSpy(Mutex::new(Vec::new())));
        let pipeline = CurationPipeline::new(
            spy.clone(),
            Arc::new(SentimentClassifier::default()),
            Arc::new(Summarizer::with_provider(Arc::new(FakeProvider::default()), 1)),
        );

        pipeline
            .run(UserSelection::new("  Space  ", SentimentFilter::Both, SummaryLength::Short))
            .await
            .unwrap();

        assert_eq!(*spy.0.lock().unwrap(), vec!["Space".to_string()]);
    }
}
