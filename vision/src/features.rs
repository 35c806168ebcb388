use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use ndarray::Array1;

/// Side of the square both blocks are resized to.
pub const FEATURE_SIDE: u32 = 32;

/// 32x32x3 raw pixels followed by 32x32 detail pixels.
pub const FEATURE_LEN: usize = (FEATURE_SIDE * FEATURE_SIDE * 4) as usize;

/// Classifier input: the raw-pixel block followed by the detail block.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    /// Build the vector from a face crop and its wavelet detail image.
    ///
    /// The raw block is row-major with channels interleaved as B,G,R; the
    /// detail block is row-major. Models trained on this layout depend on it
    /// byte for byte.
    pub fn assemble(face: &RgbImage, detail: &GrayImage) -> Self {
        let raw = imageops::resize(face, FEATURE_SIDE, FEATURE_SIDE, FilterType::Triangle);
        let detail = imageops::resize(detail, FEATURE_SIDE, FEATURE_SIDE, FilterType::Triangle);

        let mut values = Vec::with_capacity(FEATURE_LEN);
        for px in raw.pixels() {
            let [r, g, b] = px.0;
            values.extend([b as f64, g as f64, r as f64]);
        }
        values.extend(detail.pixels().map(|px| px.0[0] as f64));
        Self(Array1::from(values))
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self(Array1::from(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }
}
