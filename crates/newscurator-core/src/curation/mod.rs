mod models;
mod pipeline;

pub use models::{CuratedItem, CurationReport, SentimentFilter, SkippedArticle, UserSelection};
pub use pipeline::CurationPipeline;
