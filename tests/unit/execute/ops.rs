use super::*;

const A: [u8; 4] = [255, 0, 0, 255];
const B: [u8; 4] = [0, 255, 0, 255];

/// Image where every pixel encodes its position.
fn coord_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| image::Rgba([x as u8, y as u8, 7, 255]))
}

#[test]
fn crop_copies_region() {
    let src = coord_image(10, 8);
    let out = crop(&src, 2, 3, 4, 5).unwrap();
    assert_eq!(out.dimensions(), (4, 5));
    assert_eq!(out.get_pixel(0, 0).0, [2, 3, 7, 255]);
    assert_eq!(out.get_pixel(3, 4).0, [5, 7, 7, 255]);
}

#[test]
fn crop_outside_bounds_fails() {
    let src = coord_image(10, 8);
    assert!(crop(&src, 0, 0, 10, 8).is_ok());
    assert!(crop(&src, 1, 0, 10, 8).is_err());
    assert!(crop(&src, 0, 4, 1, 5).is_err());
    assert!(crop(&src, 0, 0, 0, 1).is_err());
    assert!(crop(&src, u32::MAX, 0, 2, 1).is_err());
}

#[test]
fn rotate_minus_ninety_turns_counter_clockwise() {
    let src = RgbaImage::from_fn(2, 1, |x, _| image::Rgba(if x == 0 { A } else { B }));
    let out = rotate(&src, -90).unwrap();
    assert_eq!(out.dimensions(), (1, 2));
    assert_eq!(out.get_pixel(0, 0).0, B);
    assert_eq!(out.get_pixel(0, 1).0, A);
}

#[test]
fn rotate_round_trips() {
    let src = coord_image(3, 5);
    let cw = rotate(&src, 90).unwrap();
    assert_eq!(cw.dimensions(), (5, 3));
    assert_eq!(rotate(&cw, -90).unwrap(), src);
    assert_eq!(rotate(&src, 360).unwrap(), src);
    assert_eq!(
        rotate(&rotate(&src, 180).unwrap(), -180).unwrap(),
        src
    );
}

#[test]
fn rotate_rejects_oblique_angles() {
    assert!(rotate(&coord_image(2, 2), 45).is_err());
}

#[test]
fn extend_anchors_to_each_edge() {
    let src = RgbaImage::from_pixel(2, 2, image::Rgba(A));

    let east = extend(&src, Edge::East, Rgba8::TRANSPARENT, 5, 2).unwrap();
    assert_eq!(east.get_pixel(3, 0).0, A);
    assert_eq!(east.get_pixel(2, 0).0, [0, 0, 0, 0]);

    let west = extend(&src, Edge::West, Rgba8::TRANSPARENT, 5, 2).unwrap();
    assert_eq!(west.get_pixel(1, 1).0, A);
    assert_eq!(west.get_pixel(2, 1).0, [0, 0, 0, 0]);

    let south = extend(&src, Edge::South, Rgba8::TRANSPARENT, 2, 4).unwrap();
    assert_eq!(south.get_pixel(0, 2).0, A);
    assert_eq!(south.get_pixel(0, 1).0, [0, 0, 0, 0]);

    let north = extend(&src, Edge::North, Rgba8::TRANSPARENT, 2, 4).unwrap();
    assert_eq!(north.get_pixel(0, 1).0, A);
    assert_eq!(north.get_pixel(0, 2).0, [0, 0, 0, 0]);
}

#[test]
fn extend_centers_the_free_axis() {
    let src = RgbaImage::from_pixel(1, 1, image::Rgba(A));
    let out = extend(&src, Edge::North, Rgba8::TRANSPARENT, 3, 1).unwrap();
    assert_eq!(out.get_pixel(1, 0).0, A);
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn extend_keeps_translucent_pixels_exact() {
    let px = [10, 20, 30, 77];
    let src = RgbaImage::from_pixel(1, 1, image::Rgba(px));
    let out = extend(&src, Edge::West, Rgba8::TRANSPARENT, 2, 1).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, px);
}

#[test]
fn extend_smaller_target_cuts_content() {
    let src = coord_image(4, 1);
    let out = extend(&src, Edge::East, Rgba8::TRANSPARENT, 2, 1).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [2, 0, 7, 255]);
    assert_eq!(out.get_pixel(1, 0).0, [3, 0, 7, 255]);
}

#[test]
fn extend_to_zero_fails() {
    let src = coord_image(1, 1);
    assert!(extend(&src, Edge::West, Rgba8::TRANSPARENT, 0, 1).is_err());
}

#[test]
fn extend_past_canvas_limit_fails_without_allocating() {
    let src = coord_image(1, 1);
    let err = extend(&src, Edge::West, Rgba8::TRANSPARENT, u32::MAX, u32::MAX).unwrap_err();
    assert!(err.to_string().contains("canvas limit"));
}
