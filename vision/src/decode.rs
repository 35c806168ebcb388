//! Base64 payloads in, raster images out (and back again for responses).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::error::Result;

/// Drop a `data:<mime>;base64,` header if one is present.
///
/// Everything up to and including the first comma is discarded. Strings
/// without a comma are returned unchanged.
pub fn strip_data_uri(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((_, data)) => data,
        None => payload,
    }
}

/// Decode a base64 (or data-URI) payload into a 3-channel image.
pub fn decode_image(payload: &str) -> Result<RgbImage> {
    let bytes = BASE64.decode(strip_data_uri(payload).trim())?;
    let img = image::load_from_memory(&bytes)?;
    Ok(img.to_rgb8())
}

/// Encode `img` as JPEG and return the bare base64 text.
pub fn encode_jpeg_base64(img: &RgbImage) -> Result<String> {
    let mut buf = Vec::new();
    JpegEncoder::new(&mut buf).encode_image(img)?;
    Ok(BASE64.encode(buf))
}
