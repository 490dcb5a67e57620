use super::*;

#[test]
fn rect_edges_and_bounds() {
    let r = Rect::new(10, 20, 32, 48);
    assert_eq!(r.right(), Some(42));
    assert_eq!(r.bottom(), Some(68));
    assert!(r.fits_within(42, 68));
    assert!(!r.fits_within(41, 68));
    assert!(!r.fits_within(42, 67));
}

#[test]
fn rect_overflow_never_fits() {
    let r = Rect::new(u32::MAX, 0, 1, 1);
    assert_eq!(r.right(), None);
    assert!(!r.fits_within(u32::MAX, u32::MAX));
}

#[test]
fn rect_empty() {
    assert!(Rect::new(0, 0, 0, 4).is_empty());
    assert!(Rect::new(0, 0, 4, 0).is_empty());
    assert!(!Rect::new(0, 0, 1, 1).is_empty());
}

#[test]
fn offset_ignores_extra_keys() {
    let o: Offset = serde_json::from_str(r#"{"x":4,"y":2,"w":32,"h":48}"#).unwrap();
    assert_eq!(o, Offset { x: 4, y: 2 });
}

#[test]
fn transparent_converts_to_image_pixel() {
    assert!(Rgba8::TRANSPARENT.is_transparent());
    let px: image::Rgba<u8> = Rgba8::TRANSPARENT.into();
    assert_eq!(px.0, [0, 0, 0, 0]);
}

#[test]
fn canvas_limit_uses_wide_arithmetic() {
    assert_eq!(Size::new(u32::MAX, u32::MAX).rgba8_bytes(), u64::from(u32::MAX).pow(2) * 4);
    assert!(!Size::new(u32::MAX, u32::MAX).within_canvas_limit());
    assert!(Size::new(16384, 16384).within_canvas_limit());
    assert!(!Size::new(16384, 16385).within_canvas_limit());
}
