pub mod providers;
mod summarizer;

pub use providers::AiProvider;
pub use summarizer::{Summarizer, SummaryLength};
