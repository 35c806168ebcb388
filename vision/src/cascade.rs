use std::path::Path;
use std::sync::Mutex;

use image::GrayImage;
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detector::{DetectParams, RegionDetector};
use crate::error::{Result, VisionError};
use crate::region::Region;

/// OpenCV Haar cascade (faces or eyes, depending on the XML loaded).
///
/// `detect_multi_scale` needs `&mut self`, so the classifier sits behind a
/// mutex to be shared between requests.
pub struct HaarCascade {
    inner: Mutex<CascadeClassifier>,
}

impl HaarCascade {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(VisionError::Detector(format!("cascade not found: {}", path.display())));
        }
        let classifier = CascadeClassifier::new(&path.to_string_lossy()).map_err(cv_err)?;
        if classifier.empty().map_err(cv_err)? {
            return Err(VisionError::Detector(format!("cascade is empty: {}", path.display())));
        }
        Ok(Self {
            inner: Mutex::new(classifier),
        })
    }
}

impl RegionDetector for HaarCascade {
    fn detect(&self, gray: &GrayImage, params: &DetectParams) -> Result<Vec<Region>> {
        let (w, h) = gray.dimensions();
        let mat = Mat::new_rows_cols_with_data(h as i32, w as i32, gray.as_raw().as_slice()).map_err(cv_err)?;
        let mut found = Vector::<Rect>::new();
        let mut classifier = self
            .inner
            .lock()
            .map_err(|_| VisionError::Detector("cascade lock poisoned".into()))?;
        classifier
            .detect_multi_scale(
                &mat,
                &mut found,
                params.scale_factor,
                params.min_neighbors,
                0,
                Size::new(0, 0),
                Size::new(0, 0),
            )
            .map_err(cv_err)?;
        Ok(found
            .iter()
            .filter_map(|r| Region::clipped(r.x, r.y, r.width, r.height, w, h))
            .collect())
    }
}

fn cv_err(e: opencv::Error) -> VisionError {
    VisionError::Detector(e.to_string())
}
