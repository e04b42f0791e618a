pub mod ai;
pub mod config;
pub mod curation;
pub mod error;
pub mod news;
pub mod sentiment;

pub use config::AppConfig;
pub use curation::{CuratedItem, CurationPipeline, CurationReport, SentimentFilter, UserSelection};
pub use error::{Error, Result};
