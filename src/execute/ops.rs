use image::{RgbaImage, imageops};

use crate::{
    foundation::{
        core::{MAX_CANVAS_BYTES, Rect, Rgba8, Size},
        error::{ExtractError, ExtractResult},
    },
    plan::planner::Edge,
};

/// Copy the `width x height` rectangle at `(x, y)` out of `src`.
///
/// The rectangle must be non-empty and lie fully inside `src`.
pub fn crop(src: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> ExtractResult<RgbaImage> {
    let rect = Rect::new(x, y, width, height);
    if rect.is_empty() {
        return Err(ExtractError::transform(format!(
            "crop {width}x{height}+{x}+{y} is empty"
        )));
    }
    if !rect.fits_within(src.width(), src.height()) {
        return Err(ExtractError::transform(format!(
            "crop {width}x{height}+{x}+{y} exceeds {}x{} image",
            src.width(),
            src.height()
        )));
    }
    Ok(imageops::crop_imm(src, x, y, width, height).to_image())
}

/// Rotate by a multiple of 90 degrees; positive angles turn clockwise.
pub fn rotate(src: &RgbaImage, degrees: i32) -> ExtractResult<RgbaImage> {
    match degrees.rem_euclid(360) {
        0 => Ok(src.clone()),
        90 => Ok(imageops::rotate90(src)),
        180 => Ok(imageops::rotate180(src)),
        270 => Ok(imageops::rotate270(src)),
        _ => Err(ExtractError::transform(format!(
            "rotation by {degrees} degrees is not a right angle"
        ))),
    }
}

/// Resize the canvas to `width x height`, anchoring content to `edge`.
///
/// New pixels take `background`; content is copied without blending. Along the axis
/// the edge does not constrain, content is centered. A target smaller than the
/// content cuts it.
pub fn extend(
    src: &RgbaImage,
    edge: Edge,
    background: Rgba8,
    width: u32,
    height: u32,
) -> ExtractResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(ExtractError::transform(format!(
            "extent {width}x{height} is empty"
        )));
    }
    if !Size::new(width, height).within_canvas_limit() {
        return Err(ExtractError::transform(format!(
            "extent {width}x{height} exceeds the {MAX_CANVAS_BYTES}-byte canvas limit"
        )));
    }

    let (x, y) = anchor_offset(edge, (src.width(), src.height()), (width, height));
    let mut canvas = RgbaImage::from_pixel(width, height, background.into());
    imageops::replace(&mut canvas, src, x, y);
    Ok(canvas)
}

fn anchor_offset(edge: Edge, content: (u32, u32), target: (u32, u32)) -> (i64, i64) {
    let dx = i64::from(target.0) - i64::from(content.0);
    let dy = i64::from(target.1) - i64::from(content.1);
    match edge {
        Edge::North => (dx / 2, 0),
        Edge::South => (dx / 2, dy),
        Edge::East => (dx, dy / 2),
        Edge::West => (0, dy / 2),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/execute/ops.rs"]
mod tests;
