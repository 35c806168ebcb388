use std::sync::Arc;

use image::RgbImage;
use tracing::debug;

use crate::classifier::{Classifier, Prediction};
use crate::decode::{decode_image, encode_jpeg_base64};
use crate::error::Result;
use crate::features::FeatureVector;
use crate::labels::LabelDictionary;
use crate::locator::FaceLocator;
use crate::wavelet::detail_image;

/// Label reported when no face with two eyes was found.
pub const NO_FACE_LABEL: &str = "No face detected or eyes not detected correctly.";

/// Result of running the pipeline, before label lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NoFace,
    Classified {
        prediction: Prediction,
        /// Base64 JPEG of the input with detected eyes outlined.
        annotated: String,
    },
}

/// What the caller is told about an image.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    NoFace,
    Classified {
        label: String,
        /// Percentage, rounded to two decimals.
        confidence: f64,
        image: String,
    },
    /// The model predicted a class the dictionary has no name for.
    UnknownClass(i64),
}

impl Outcome {
    pub fn resolve(self, labels: &LabelDictionary) -> Verdict {
        match self {
            Outcome::NoFace => Verdict::NoFace,
            Outcome::Classified { prediction, annotated } => match labels.lookup(prediction.class) {
                Some(label) => Verdict::Classified {
                    label: label.to_string(),
                    confidence: round2(prediction.confidence_percent()),
                    image: annotated,
                },
                None => Verdict::UnknownClass(prediction.class),
            },
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Decode, locate, extract and classify.
///
/// Holds only shared read-only state; one instance serves every request.
#[derive(Clone)]
pub struct Recognizer {
    locator: FaceLocator,
    classifier: Arc<dyn Classifier>,
    wavelet_levels: usize,
}

impl Recognizer {
    pub fn new(locator: FaceLocator, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            locator,
            classifier,
            wavelet_levels: 1,
        }
    }

    pub fn with_wavelet_levels(mut self, levels: usize) -> Self {
        self.wavelet_levels = levels;
        self
    }

    /// Classify a base64 or data-URI image.
    pub fn classify(&self, payload: &str) -> Result<Outcome> {
        let img = decode_image(payload)?;
        debug!(width = img.width(), height = img.height(), "decoded image");
        self.classify_image(&img)
    }

    pub fn classify_image(&self, img: &RgbImage) -> Result<Outcome> {
        let features = match self.features(img)? {
            Some(f) => f,
            None => {
                debug!("no face with two eyes");
                return Ok(Outcome::NoFace);
            }
        };
        let prediction = self.classifier.predict(&features)?;
        debug!(class = prediction.class, "predicted");
        let annotated = encode_jpeg_base64(&self.locator.annotate(img)?)?;
        Ok(Outcome::Classified { prediction, annotated })
    }

    /// Feature vector of the subject's face, if one qualifies.
    pub fn features(&self, img: &RgbImage) -> Result<Option<FeatureVector>> {
        let Some(detection) = self.locator.locate(img)? else {
            return Ok(None);
        };
        let face = detection.face.crop(img);
        let detail = detail_image(&face, self.wavelet_levels);
        Ok(Some(FeatureVector::assemble(&face, &detail)))
    }
}
