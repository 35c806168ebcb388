use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("not an image: {0}")]
    NotAnImage(String),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, CrawlError>;
