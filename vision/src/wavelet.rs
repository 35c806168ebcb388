//! Haar wavelet detail pass.
//!
//! The face crop is decomposed, its approximation band is zeroed and the
//! remaining detail bands are recombined, leaving edges and texture.
//! Boundaries use symmetric extension, so a dimension of odd length grows
//! by one sample per level on the way back.

use image::{GrayImage, Luma, RgbImage};
use ndarray::{s, Array2, ArrayView2};

use crate::detector::luma;

const SQRT_2: f32 = std::f32::consts::SQRT_2;

/// Detail bands of one decomposition level.
struct Bands {
    lh: Array2<f32>,
    hl: Array2<f32>,
    hh: Array2<f32>,
}

/// High-frequency detail of a face crop as an 8-bit image.
pub fn detail_image(face: &RgbImage, levels: usize) -> GrayImage {
    let (w, h) = face.dimensions();
    // Weights are applied to the stored channels in B,G,R order, matching the
    // pass the classifier was trained on.
    let plane = Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
        let [r, g, b] = face.get_pixel(x as u32, y as u32).0;
        luma(b, g, r) as f32 / 255.0
    });
    let detail = haar_detail(plane.view(), levels);
    let (rows, cols) = detail.dim();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        Luma([quantize(detail[[y as usize, x as usize]] * 255.0)])
    })
}

/// Decompose `plane` over `levels`, zero the approximation and reconstruct.
pub fn haar_detail(plane: ArrayView2<f32>, levels: usize) -> Array2<f32> {
    let mut approx = plane.to_owned();
    let mut bands = Vec::with_capacity(levels);
    for _ in 0..levels {
        if approx.is_empty() {
            break;
        }
        let (a, d) = dwt2(approx.view());
        bands.push(d);
        approx = a;
    }
    approx.fill(0.0);
    for d in bands.iter().rev() {
        let (rows, cols) = d.lh.dim();
        let a = approx.slice(s![..rows, ..cols]).to_owned();
        approx = idwt2(a.view(), d);
    }
    approx
}

/// Truncate toward zero, wrapping modulo 256 like an unchecked 8-bit cast.
fn quantize(v: f32) -> u8 {
    (v as i32) as u8
}

fn dwt2(x: ArrayView2<f32>) -> (Array2<f32>, Bands) {
    let (lo, hi) = analyze(x);
    let (ll, lh) = analyze(lo.t());
    let (hl, hh) = analyze(hi.t());
    (
        ll.reversed_axes(),
        Bands {
            lh: lh.reversed_axes(),
            hl: hl.reversed_axes(),
            hh: hh.reversed_axes(),
        },
    )
}

fn idwt2(ll: ArrayView2<f32>, d: &Bands) -> Array2<f32> {
    let lo = synthesize(ll.t(), d.lh.t()).reversed_axes();
    let hi = synthesize(d.hl.t(), d.hh.t()).reversed_axes();
    synthesize(lo.view(), hi.view())
}

/// One Haar step along each row.
fn analyze(x: ArrayView2<f32>) -> (Array2<f32>, Array2<f32>) {
    let (rows, cols) = x.dim();
    let half = (cols + 1) / 2;
    let mut lo = Array2::zeros((rows, half));
    let mut hi = Array2::zeros((rows, half));
    for r in 0..rows {
        for k in 0..half {
            let a = x[[r, 2 * k]];
            let b = if 2 * k + 1 < cols { x[[r, 2 * k + 1]] } else { a };
            lo[[r, k]] = (a + b) / SQRT_2;
            hi[[r, k]] = (a - b) / SQRT_2;
        }
    }
    (lo, hi)
}

/// Inverse of [`analyze`]; output rows are twice as long as the inputs.
fn synthesize(lo: ArrayView2<f32>, hi: ArrayView2<f32>) -> Array2<f32> {
    let (rows, half) = lo.dim();
    let mut out = Array2::zeros((rows, half * 2));
    for r in 0..rows {
        for k in 0..half {
            let (a, d) = (lo[[r, k]], hi[[r, k]]);
            out[[r, 2 * k]] = (a + d) / SQRT_2;
            out[[r, 2 * k + 1]] = (a - d) / SQRT_2;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn analyze_then_synthesize_is_identity_for_even_rows() {
        let x = array![[1.0f32, 2.0, 3.0, 5.0], [0.5, 0.25, 8.0, 1.0]];
        let (lo, hi) = analyze(x.view());
        let back = synthesize(lo.view(), hi.view());
        for (a, b) in x.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn single_level_removes_block_means() {
        let x = array![[1.0f32, 3.0], [5.0, 7.0]];
        let d = haar_detail(x.view(), 1);
        assert_eq!(d.dim(), (2, 2));
        let expected = [-3.0f32, -1.0, 1.0, 3.0];
        for (v, e) in d.iter().zip(expected) {
            assert!((v - e).abs() < 1e-5, "{v} != {e}");
        }
    }

    #[test]
    fn quantize_wraps_negatives() {
        assert_eq!(quantize(-3.7), 253);
        assert_eq!(quantize(12.9), 12);
        assert_eq!(quantize(0.0), 0);
    }
}
