use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Proxy};
use url::Url;

use super::models::{Article, SearchResponse};
use crate::config::AppConfig;
use crate::{Error, Result};

const SEARCH_PATH: &str = "v2/everything";
const API_KEY_HEADER: &str = "X-Api-Key";
const CLIENT_USER_AGENT: &str = concat!("newscurator/", env!("CARGO_PKG_VERSION"));

/// Anything that can turn a topic into a list of articles
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch(&self, topic: &str) -> Result<Vec<Article>>;
}

/// News search client
pub struct NewsFetcher {
    client: Client,
    base_url: Url,
    api_key: String,
    language: Option<String>,
    sort_by: Option<String>,
    page_size: Option<u32>,
}

impl NewsFetcher {
    /// Create a new fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.news.request_timeout_secs, &config.news.proxy_url)?;
        let base_url = Url::parse(&config.news.base_url)?;

        Ok(Self {
            client,
            base_url,
            api_key: config.news_api_key()?.to_string(),
            language: config.news.language.clone(),
            sort_by: config.news.sort_by.clone(),
            page_size: config.news.page_size,
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(Self::build_headers())
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for news search");
        }

        builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers
    }

    /// Build the search URL for a topic
    pub fn search_url(&self, topic: &str) -> Result<Url> {
        let mut url = self.base_url.join(SEARCH_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", topic);
            if let Some(ref language) = self.language {
                query.append_pair("language", language);
            }
            if let Some(ref sort_by) = self.sort_by {
                query.append_pair("sortBy", sort_by);
            }
            if let Some(page_size) = self.page_size {
                query.append_pair("pageSize", &page_size.to_string());
            }
        }
        Ok(url)
    }

    async fn search(&self, topic: &str) -> Result<Vec<Article>> {
        let url = self.search_url(topic)?;

        tracing::info!("Searching news for topic: {}", topic);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| Error::Network(format!("News search request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Failed to read news response: {}", e)))?;

        let parsed: SearchResponse = serde_json::from_slice(&body).map_err(|e| {
            if status.is_success() {
                Error::Network(format!("Malformed news response: {}", e))
            } else {
                Error::Network(format!("HTTP {} from news service", status))
            }
        })?;

        if !status.is_success() || parsed.status.as_deref() == Some("error") {
            let detail = parsed
                .message
                .or(parsed.code)
                .unwrap_or_else(|| "no details".to_string());
            return Err(Error::Network(format!(
                "News service returned HTTP {}: {}",
                status, detail
            )));
        }

        let articles: Vec<Article> = parsed
            .articles
            .unwrap_or_default()
            .into_iter()
            .map(Article::from)
            .collect();

        tracing::debug!("News search for '{}' returned {} articles", topic, articles.len());

        Ok(articles)
    }
}

#[async_trait::async_trait]
impl ArticleSource for NewsFetcher {
    async fn fetch(&self, topic: &str) -> Result<Vec<Article>> {
        self.search(topic).await
    }
}
