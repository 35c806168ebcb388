use image::{GrayImage, Luma, RgbImage};

use crate::error::Result;
use crate::region::Region;

/// Multi-scale search parameters handed to a [`RegionDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectParams {
    /// Ratio between successive scan scales.
    pub scale_factor: f64,
    /// Overlapping hits a candidate needs before it is reported.
    pub min_neighbors: i32,
}

impl DetectParams {
    pub const fn new(scale_factor: f64, min_neighbors: i32) -> Self {
        Self {
            scale_factor,
            min_neighbors,
        }
    }

    /// Face search.
    pub const FACE: Self = Self::new(1.3, 5);
    /// Eye search used to accept or reject a face.
    pub const EYE: Self = Self::new(1.1, 3);
    /// Stricter eye search used when drawing the annotated copy.
    pub const EYE_ANNOTATE: Self = Self::new(1.1, 10);
}

/// Pluggable rectangular-object detector (faces, eyes).
///
/// Implementations are shared across requests, so they must be usable
/// from several threads at once.
pub trait RegionDetector: Send + Sync {
    /// Find candidate regions in a single-channel image, in detector order.
    fn detect(&self, gray: &GrayImage, params: &DetectParams) -> Result<Vec<Region>>;
}

/// BT.601 intensity of an RGB image.
pub fn intensity(img: &RgbImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b] = img.get_pixel(x, y).0;
        Luma([luma(r, g, b)])
    })
}

pub(crate) fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Crop a grayscale image to `region`.
pub fn crop_gray(gray: &GrayImage, region: &Region) -> GrayImage {
    image::imageops::crop_imm(gray, region.x, region.y, region.width, region.height).to_image()
}
