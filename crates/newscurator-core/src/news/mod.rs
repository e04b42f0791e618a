mod fetcher;
mod models;

pub use fetcher::{ArticleSource, NewsFetcher};
pub use models::{select_body_text, Article};
