use std::sync::Arc;

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::detector::{crop_gray, intensity, DetectParams, RegionDetector};
use crate::error::Result;
use crate::region::Region;

const EYE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const EYE_THICKNESS: u32 = 2;

/// A face accepted by [`FaceLocator::locate`] together with the eyes that
/// qualified it. Eye regions are relative to the face.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub face: Region,
    pub eyes: Vec<Region>,
}

/// Finds the subject's face: the first face candidate with two visible eyes.
#[derive(Clone)]
pub struct FaceLocator {
    faces: Arc<dyn RegionDetector>,
    eyes: Arc<dyn RegionDetector>,
    face_params: DetectParams,
    eye_params: DetectParams,
    annotate_params: DetectParams,
}

impl FaceLocator {
    pub fn new(faces: Arc<dyn RegionDetector>, eyes: Arc<dyn RegionDetector>) -> Self {
        Self {
            faces,
            eyes,
            face_params: DetectParams::FACE,
            eye_params: DetectParams::EYE,
            annotate_params: DetectParams::EYE_ANNOTATE,
        }
    }

    pub fn with_face_params(mut self, params: DetectParams) -> Self {
        self.face_params = params;
        self
    }

    pub fn with_eye_params(mut self, params: DetectParams) -> Self {
        self.eye_params = params;
        self
    }

    /// Return the first face (in detector order) with at least two eyes.
    ///
    /// Later candidates are not examined once one qualifies. `Ok(None)` means
    /// the image cannot be classified; it is not an error.
    pub fn locate(&self, img: &RgbImage) -> Result<Option<Detection>> {
        let gray = intensity(img);
        let faces = self.faces.detect(&gray, &self.face_params)?;
        debug!(faces = faces.len(), "face candidates");
        for face in faces {
            let eyes = self.eyes_in(&gray, &face, &self.eye_params)?;
            debug!(?face, eyes = eyes.len(), "eye search");
            if eyes.len() >= 2 {
                return Ok(Some(Detection { face, eyes }));
            }
        }
        Ok(None)
    }

    /// Copy of `img` with every eye of every detected face outlined.
    ///
    /// This pass is for display only and never feeds the classifier.
    pub fn annotate(&self, img: &RgbImage) -> Result<RgbImage> {
        let gray = intensity(img);
        let mut out = img.clone();
        for face in self.faces.detect(&gray, &self.face_params)? {
            for eye in self.eyes_in(&gray, &face, &self.annotate_params)? {
                outline(&mut out, &face.offset_within(&eye));
            }
        }
        Ok(out)
    }

    fn eyes_in(&self, gray: &GrayImage, face: &Region, params: &DetectParams) -> Result<Vec<Region>> {
        if face.is_empty() {
            return Ok(Vec::new());
        }
        self.eyes.detect(&crop_gray(gray, face), params)
    }
}

fn outline(img: &mut RgbImage, region: &Region) {
    for inset in 0..EYE_THICKNESS {
        let w = region.width.saturating_sub(2 * inset);
        let h = region.height.saturating_sub(2 * inset);
        if w == 0 || h == 0 {
            break;
        }
        let rect = Rect::at((region.x + inset) as i32, (region.y + inset) as i32).of_size(w, h);
        draw_hollow_rect_mut(img, rect, EYE_COLOR);
    }
}
