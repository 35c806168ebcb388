use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use vision::{FaceLocator, LogisticModel, Recognizer, RegionDetector, SeetaDetector};

/// Which detector finds face candidates. Eyes always use a Haar cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FaceBackend {
    /// OpenCV Haar cascade, the geometry classifiers are trained against.
    Haar,
    /// SeetaFace frontal detector (pure Rust). Crops differ from Haar's.
    Seeta,
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Settings {
    /// Address to bind the HTTP server
    #[arg(long, env = "CLASSIFY_ADDR", default_value = "127.0.0.1:5000")]
    pub addr: SocketAddr,

    /// Classifier artifact (JSON)
    #[arg(long, env = "CLASSIFY_MODEL", default_value = "assets/celeb_model.json")]
    pub model: PathBuf,

    /// Class index to name mapping (JSON), read on every request
    #[arg(long, env = "CLASSIFY_LABELS", default_value = "assets/class_dictionary.json")]
    pub labels: PathBuf,

    #[arg(long, env = "CLASSIFY_FACE_BACKEND", value_enum, default_value_t = FaceBackend::Haar)]
    pub face_backend: FaceBackend,

    #[arg(long, env = "CLASSIFY_SEETA_MODEL", default_value = "assets/seeta_fd_frontal_v1.0.bin")]
    pub seeta_model: PathBuf,

    #[arg(long, env = "CLASSIFY_FACE_CASCADE", default_value = "assets/haarcascade_frontalface_default.xml")]
    pub face_cascade: PathBuf,

    #[arg(long, env = "CLASSIFY_EYE_CASCADE", default_value = "assets/haarcascade_eye.xml")]
    pub eye_cascade: PathBuf,

    /// Wavelet decomposition depth for the detail pass (at least 1)
    #[arg(long, env = "CLASSIFY_WAVELET_LEVELS", default_value_t = 1, value_parser = parse_levels)]
    pub wavelet_levels: usize,
}

fn parse_levels(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("wavelet depth must be at least 1".to_string()),
        Ok(levels) => Ok(levels),
        Err(e) => Err(e.to_string()),
    }
}

/// Load the model and detectors named in `settings`.
///
/// Called once at startup; any missing or corrupt artifact is fatal.
pub fn load_recognizer(settings: &Settings) -> anyhow::Result<Recognizer> {
    let model = LogisticModel::load(&settings.model)
        .with_context(|| format!("loading model {}", settings.model.display()))?;
    let faces: Arc<dyn RegionDetector> = match settings.face_backend {
        FaceBackend::Seeta => Arc::new(
            SeetaDetector::load(&settings.seeta_model)
                .with_context(|| format!("loading face model {}", settings.seeta_model.display()))?,
        ),
        FaceBackend::Haar => haar(&settings.face_cascade)?,
    };
    let eyes = haar(&settings.eye_cascade)?;
    let locator = FaceLocator::new(faces, eyes);
    Ok(Recognizer::new(locator, Arc::new(model)).with_wavelet_levels(settings.wavelet_levels))
}

#[cfg(feature = "cascade")]
fn haar(path: &Path) -> anyhow::Result<Arc<dyn RegionDetector>> {
    let cascade = vision::HaarCascade::load(path).with_context(|| format!("loading cascade {}", path.display()))?;
    Ok(Arc::new(cascade))
}

#[cfg(not(feature = "cascade"))]
fn haar(path: &Path) -> anyhow::Result<Arc<dyn RegionDetector>> {
    anyhow::bail!("cascade {} needs a build with --features cascade", path.display())
}
