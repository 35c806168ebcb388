//! HTTP front end for the [`vision`] recognizer.
//!
//! `GET /ping` is a health check. `GET|POST /classify-image` takes
//! `{"image": "<base64 or data URI>"}` and answers with the predicted
//! identity. Every failure is reported as a 500 with an `error` message.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use vision::{LabelDictionary, Recognizer, Verdict, NO_FACE_LABEL};

pub mod config;
pub mod error;
pub mod logging;

pub use config::{load_recognizer, FaceBackend, Settings};
pub use error::AppError;
pub use logging::init_logging;

/// Upper bound on request bodies; portraits arrive base64-inflated.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// State shared by every request. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub recognizer: Arc<Recognizer>,
    /// Label dictionary file, re-read on each request.
    pub labels: Arc<PathBuf>,
}

impl AppState {
    pub fn new(recognizer: Recognizer, labels: impl Into<PathBuf>) -> Self {
        Self {
            recognizer: Arc::new(recognizer),
            labels: Arc::new(labels.into()),
        }
    }
}

#[derive(Deserialize)]
struct ClassifyRequest {
    image: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ClassifyResponse {
    Classified {
        image_cat: String,
        prob: f64,
        #[serde(rename = "processedImage")]
        processed_image: String,
    },
    Unrecognized {
        image_cat: String,
    },
}

impl From<Verdict> for ClassifyResponse {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Classified { label, confidence, image } => ClassifyResponse::Classified {
                image_cat: label,
                prob: confidence,
                processed_image: format!("data:image/jpg;base64,{image}"),
            },
            Verdict::NoFace => ClassifyResponse::Unrecognized {
                image_cat: NO_FACE_LABEL.to_string(),
            },
            Verdict::UnknownClass(class) => ClassifyResponse::Unrecognized {
                image_cat: class.to_string(),
            },
        }
    }
}

#[derive(Serialize)]
pub struct Pong {
    message: &'static str,
}

pub async fn ping() -> Json<Pong> {
    Json(Pong { message: "pong" })
}

/// Run the recognizer on the posted image.
///
/// The body is read and parsed by hand so an oversized or malformed body is
/// reported like any other failure instead of as an extractor rejection.
pub async fn classify_image(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let request: ClassifyRequest = serde_json::from_slice(&body?)?;
    debug!(len = request.image.len(), "classify request");
    let recognizer = state.recognizer.clone();
    let labels = state.labels.clone();
    let verdict = tokio::task::spawn_blocking(move || -> Result<Verdict, AppError> {
        let outcome = recognizer.classify(&request.image)?;
        let labels = LabelDictionary::load(labels.as_path())?;
        Ok(outcome.resolve(&labels))
    })
    .await??;
    info!(verdict = kind(&verdict), "classified");
    Ok(Json(verdict.into()))
}

fn kind(verdict: &Verdict) -> &'static str {
    match verdict {
        Verdict::NoFace => "no_face",
        Verdict::Classified { .. } => "classified",
        Verdict::UnknownClass(_) => "unknown_class",
    }
}

/// Build the application router. Any origin may call it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/classify-image", get(classify_image).post(classify_image))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
