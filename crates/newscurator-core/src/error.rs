use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// User input rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// News search transport, status or parse failure
    #[error("Network error: {0}")]
    Network(String),

    /// Text-generation failure for a single article
    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Whether this error should abort a whole curation run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Summarization(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
