//! Face recognition pipeline for single-subject portraits.
//!
//! A request image flows through [`decode`], [`locator`], [`wavelet`],
//! [`features`] and [`classifier`]. [`Recognizer`] strings the stages
//! together and [`Verdict`] is what callers get back once the predicted
//! class has been looked up in a [`LabelDictionary`].

pub mod classifier;
pub mod decode;
pub mod detector;
pub mod error;
pub mod features;
pub mod labels;
pub mod locator;
pub mod recognizer;
pub mod region;
pub mod seeta;
pub mod wavelet;

#[cfg(feature = "cascade")]
pub mod cascade;

pub use classifier::{Classifier, LogisticModel, Prediction, StandardScaler};
pub use decode::{decode_image, encode_jpeg_base64, strip_data_uri};
pub use detector::{DetectParams, RegionDetector};
pub use error::{Result, VisionError};
pub use features::{FeatureVector, FEATURE_LEN, FEATURE_SIDE};
pub use labels::LabelDictionary;
pub use locator::{Detection, FaceLocator};
pub use recognizer::{Outcome, Recognizer, Verdict, NO_FACE_LABEL};
pub use region::Region;
pub use seeta::SeetaDetector;

#[cfg(feature = "cascade")]
pub use cascade::HaarCascade;
