use std::io::Cursor;

use super::*;
use crate::foundation::error::ErrorKind;

#[test]
fn decode_png_keeps_straight_alpha() {
    let src = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 0]).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(src.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let atlas = decode_atlas(&buf).unwrap();
    assert_eq!(atlas.width(), 2);
    assert_eq!(atlas.height(), 1);
    assert_eq!(atlas.image().as_raw(), src.as_raw());
}

#[test]
fn decode_rgb_gains_opaque_alpha() {
    let src = image::RgbImage::from_raw(1, 1, vec![9, 8, 7]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(src)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let atlas = decode_atlas(&buf).unwrap();
    assert_eq!(atlas.image().get_pixel(0, 0).0, [9, 8, 7, 255]);
}

#[test]
fn garbage_bytes_are_decode_failures() {
    let err = decode_atlas(b"definitely not an image").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ImageDecode);
}

#[test]
fn missing_file_is_decode_failure() {
    let err = load_atlas(Path::new("target/does-not-exist/atlas.png")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ImageDecode);
    assert!(err.to_string().contains("atlas.png"));
}
