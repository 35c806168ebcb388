use image::{imageops, RgbImage};

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a region from signed detector output, clipped to a
    /// `bound_w` x `bound_h` image. Returns `None` when nothing is left.
    pub fn clipped(x: i32, y: i32, width: i32, height: i32, bound_w: u32, bound_h: u32) -> Option<Self> {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + width as i64).min(bound_w as i64);
        let y1 = (y as i64 + height as i64).min(bound_h as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self::new(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shift a region found inside `self` back into the parent's coordinates.
    pub fn offset_within(&self, inner: &Region) -> Region {
        Region::new(self.x + inner.x, self.y + inner.y, inner.width, inner.height)
    }

    /// Copy the pixels under this region out of `img`.
    pub fn crop(&self, img: &RgbImage) -> RgbImage {
        imageops::crop_imm(img, self.x, self.y, self.width, self.height).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipped_trims_to_bounds() {
        let r = Region::clipped(-5, 10, 20, 100, 50, 60).unwrap();
        assert_eq!(r, Region::new(0, 10, 15, 50));
    }

    #[test]
    fn clipped_outside_is_none() {
        assert!(Region::clipped(60, 0, 10, 10, 50, 50).is_none());
        assert!(Region::clipped(0, 0, 0, 10, 50, 50).is_none());
    }

    #[test]
    fn offset_within_translates() {
        let face = Region::new(10, 20, 100, 100);
        let eye = Region::new(5, 6, 7, 8);
        assert_eq!(face.offset_within(&eye), Region::new(15, 26, 7, 8));
    }

    #[test]
    fn crop_takes_sub_image() {
        let img = RgbImage::from_fn(8, 8, |x, y| image::Rgb([x as u8, y as u8, 0]));
        let crop = Region::new(2, 3, 4, 2).crop(&img);
        assert_eq!(crop.dimensions(), (4, 2));
        assert_eq!(crop.get_pixel(0, 0), &image::Rgb([2, 3, 0]));
    }
}
