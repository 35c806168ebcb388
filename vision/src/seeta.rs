use std::io::Cursor;
use std::path::Path;

use image::GrayImage;
use rustface::{create_detector_with_model, read_model, ImageData, Model};

use crate::detector::{DetectParams, RegionDetector};
use crate::error::{Result, VisionError};
use crate::region::Region;

/// Frontal face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The model is parsed once; each call builds a short-lived detector from a
/// clone of it, so the type is `Sync` without locking.
///
/// Only [`DetectParams::scale_factor`] is honored. `min_neighbors` has no
/// SeetaFace counterpart and is ignored; the fixed score threshold plays
/// that role instead.
pub struct SeetaDetector {
    model: Model,
    min_face_size: u32,
}

impl SeetaDetector {
    /// Load a SeetaFace model file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model = read_model(Cursor::new(bytes)).map_err(|e| VisionError::InvalidModel(e.to_string()))?;
        Ok(Self {
            model,
            min_face_size: 20,
        })
    }

    pub fn with_min_face_size(mut self, size: u32) -> Self {
        self.min_face_size = size;
        self
    }
}

impl RegionDetector for SeetaDetector {
    fn detect(&self, gray: &GrayImage, params: &DetectParams) -> Result<Vec<Region>> {
        let (w, h) = gray.dimensions();
        if w < self.min_face_size || h < self.min_face_size {
            return Ok(Vec::new());
        }
        let mut det = create_detector_with_model(self.model.clone());
        det.set_min_face_size(self.min_face_size);
        det.set_score_thresh(2.0);
        // rustface shrinks the pyramid by this factor; cascades grow the window.
        det.set_pyramid_scale_factor((1.0 / params.scale_factor).clamp(0.1, 0.99) as f32);
        det.set_slide_window_step(4, 4);

        let mut image = ImageData::new(gray.as_raw(), w, h);
        let faces = det.detect(&mut image);
        Ok(faces
            .iter()
            .filter_map(|f| {
                let bbox = f.bbox();
                Region::clipped(bbox.x(), bbox.y(), bbox.width() as i32, bbox.height() as i32, w, h)
            })
            .collect())
    }
}
