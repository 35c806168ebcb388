#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{GrayImage, ImageOutputFormat, Rgb, RgbImage};
use ndarray::{Array1, Array2};
use vision::{DetectParams, FaceLocator, LogisticModel, Region, RegionDetector, FEATURE_LEN};

/// Returns the same regions for every image.
pub struct Fixed(pub Vec<Region>);

impl RegionDetector for Fixed {
    fn detect(&self, _gray: &GrayImage, _params: &DetectParams) -> vision::Result<Vec<Region>> {
        Ok(self.0.clone())
    }
}

/// Eye stub: the number of eyes depends on the width of the face crop.
/// Records every crop width it was asked about.
pub struct EyesByWidth {
    pub rules: Vec<(u32, usize)>,
    pub seen: Mutex<Vec<u32>>,
}

impl EyesByWidth {
    pub fn new(rules: Vec<(u32, usize)>) -> Self {
        Self {
            rules,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl RegionDetector for EyesByWidth {
    fn detect(&self, gray: &GrayImage, _params: &DetectParams) -> vision::Result<Vec<Region>> {
        self.seen.lock().unwrap().push(gray.width());
        let count = self
            .rules
            .iter()
            .find(|(w, _)| *w == gray.width())
            .map_or(0, |(_, n)| *n);
        Ok((0..count as u32).map(|i| Region::new(1 + i * 4, 1, 3, 3)).collect())
    }
}

pub fn portrait() -> RgbImage {
    RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 128]))
}

pub fn png_base64(img: &RgbImage) -> String {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png).unwrap();
    BASE64.encode(buf)
}

/// A locator that always finds one face at (8, 8) sized 40x40 with two eyes.
pub fn face_locator() -> FaceLocator {
    FaceLocator::new(
        Arc::new(Fixed(vec![Region::new(8, 8, 40, 40)])),
        Arc::new(Fixed(vec![Region::new(5, 10, 8, 6), Region::new(25, 10, 8, 6)])),
    )
}

pub fn blind_locator() -> FaceLocator {
    FaceLocator::new(Arc::new(Fixed(Vec::new())), Arc::new(Fixed(Vec::new())))
}

/// Two-class model that ignores the features and favors `winner`.
pub fn biased_model(winner: usize) -> LogisticModel {
    let mut intercept = Array1::zeros(2);
    intercept[winner] = 2.0;
    LogisticModel::new(vec![0, 1], Array2::zeros((2, FEATURE_LEN)), intercept, None).unwrap()
}
