use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("feature vector has {actual} elements, expected {expected}")]
    FeatureLength { expected: usize, actual: usize },

    #[error("detector error: {0}")]
    Detector(String),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, VisionError>;
