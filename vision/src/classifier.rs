//! Pre-trained linear classifier over [`FeatureVector`]s.
//!
//! The model is produced offline and stored as JSON:
//!
//! ```json
//! {
//!   "scaler": { "mean": [..4096], "scale": [..4096] },
//!   "classes": [0, 1, 2],
//!   "coef": [[..4096], [..4096], [..4096]],
//!   "intercept": [0.1, -0.2, 0.0]
//! }
//! ```
//!
//! `scaler` is optional. A two-class model may carry a single `coef` row, in
//! which case the positive class probability is the logistic sigmoid of the
//! score; otherwise probabilities are the softmax of all class scores.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::Deserialize;

use crate::error::{Result, VisionError};
use crate::features::{FeatureVector, FEATURE_LEN};

/// Predicted class plus the full distribution it was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Class label as emitted by the model.
    pub class: i64,
    /// Position of `class` within `probabilities`.
    pub class_index: usize,
    /// One probability per class, in model class order.
    pub probabilities: Vec<f64>,
}

impl Prediction {
    /// Probability of the predicted class as a percentage.
    pub fn confidence_percent(&self) -> f64 {
        self.probabilities[self.class_index] * 100.0
    }
}

/// Maps a feature vector to a label and per-class probabilities.
///
/// Models are loaded once and shared read-only across requests.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction>;
}

/// Per-feature standardization applied before scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Deserialize)]
struct ModelFile {
    #[serde(default)]
    scaler: Option<StandardScaler>,
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

#[derive(Debug, Clone)]
struct Scaling {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

/// Multinomial (or binary) logistic regression.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    classes: Vec<i64>,
    coef: Array2<f64>,
    intercept: Array1<f64>,
    scaling: Option<Scaling>,
}

impl LogisticModel {
    pub fn new(
        classes: Vec<i64>,
        coef: Array2<f64>,
        intercept: Array1<f64>,
        scaler: Option<StandardScaler>,
    ) -> Result<Self> {
        if classes.len() < 2 {
            return Err(invalid("at least two classes are required"));
        }
        let rows = coef.nrows();
        let binary = classes.len() == 2 && rows == 1;
        if !binary && rows != classes.len() {
            return Err(invalid(format!("{} coefficient rows for {} classes", rows, classes.len())));
        }
        if coef.ncols() != FEATURE_LEN {
            return Err(VisionError::FeatureLength {
                expected: FEATURE_LEN,
                actual: coef.ncols(),
            });
        }
        if intercept.len() != rows {
            return Err(invalid(format!("{} intercepts for {} coefficient rows", intercept.len(), rows)));
        }
        let scaling = match scaler {
            Some(s) => {
                if s.mean.len() != FEATURE_LEN || s.scale.len() != FEATURE_LEN {
                    return Err(invalid("scaler length does not match the feature length"));
                }
                // Constant features were stored with a zero scale.
                let scale = s.scale.into_iter().map(|v| if v == 0.0 { 1.0 } else { v });
                Some(Scaling {
                    mean: Array1::from(s.mean),
                    scale: scale.collect(),
                })
            }
            None => None,
        };
        Ok(Self {
            classes,
            coef,
            intercept,
            scaling,
        })
    }

    /// Load a model artifact from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let file: ModelFile = serde_json::from_reader(reader)?;
        Self::from_file(file)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_file(serde_json::from_str(json)?)
    }

    fn from_file(file: ModelFile) -> Result<Self> {
        let rows = file.coef.len();
        let cols = file.coef.first().map_or(0, Vec::len);
        if file.coef.iter().any(|row| row.len() != cols) {
            return Err(invalid("coefficient rows differ in length"));
        }
        let flat: Vec<f64> = file.coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((rows, cols), flat).map_err(|e| invalid(e.to_string()))?;
        Self::new(file.classes, coef, Array1::from(file.intercept), file.scaler)
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn probabilities(&self, scores: &Array1<f64>) -> Vec<f64> {
        if scores.len() == 1 {
            let p = 1.0 / (1.0 + (-scores[0]).exp());
            return vec![1.0 - p, p];
        }
        let max = scores.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        let exp = scores.mapv(|v| (v - max).exp());
        let total = exp.sum();
        exp.iter().map(|v| v / total).collect()
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        if features.len() != FEATURE_LEN {
            return Err(VisionError::FeatureLength {
                expected: FEATURE_LEN,
                actual: features.len(),
            });
        }
        let x = match &self.scaling {
            Some(s) => (features.values() - &s.mean) / &s.scale,
            None => features.values().clone(),
        };
        let scores = self.coef.dot(&x) + &self.intercept;
        let probabilities = self.probabilities(&scores);
        let class_index = probabilities
            .iter()
            .enumerate()
            .fold(0, |best, (i, &p)| if p > probabilities[best] { i } else { best });
        Ok(Prediction {
            class: self.classes[class_index],
            class_index,
            probabilities,
        })
    }
}

fn invalid(msg: impl Into<String>) -> VisionError {
    VisionError::InvalidModel(msg.into())
}
