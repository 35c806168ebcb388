mod common;

use vision::{decode_image, encode_jpeg_base64, strip_data_uri, VisionError};

#[test]
fn data_uri_and_bare_payload_decode_the_same() {
    let img = common::portrait();
    let bare = common::png_base64(&img);
    let uri = format!("data:image/png;base64,{bare}");
    let a = decode_image(&bare).unwrap();
    let b = decode_image(&uri).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, img);
}

#[test]
fn strip_data_uri_cuts_at_first_comma() {
    assert_eq!(strip_data_uri("data:image/jpeg;base64,QUJD"), "QUJD");
    assert_eq!(strip_data_uri("QUJD"), "QUJD");
}

#[test]
fn invalid_base64_is_an_error() {
    let err = decode_image("data:image/png;base64,@@not base64@@").unwrap_err();
    assert!(matches!(err, VisionError::Base64(_)));
}

#[test]
fn non_image_bytes_are_an_error() {
    // "hello world"
    let err = decode_image("aGVsbG8gd29ybGQ=").unwrap_err();
    assert!(matches!(err, VisionError::Image(_)));
}

#[test]
fn jpeg_encoding_decodes_back() {
    let img = common::portrait();
    let text = encode_jpeg_base64(&img).unwrap();
    let back = decode_image(&text).unwrap();
    assert_eq!(back.dimensions(), img.dimensions());
}
