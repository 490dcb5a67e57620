use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};

use crate::{
    atlas::decode::Atlas,
    execute::ops,
    foundation::error::{ExtractError, ExtractResult},
    plan::planner::{Op, OperationPlan},
};

/// Run `plan` against the atlas and return the reconstructed sprite.
///
/// The first operation reads from the atlas; every later one consumes the previous
/// result. The atlas itself is never modified.
pub fn apply_plan(atlas: &Atlas, plan: &OperationPlan) -> ExtractResult<RgbaImage> {
    let mut current: Option<RgbaImage> = None;
    for op in &plan.ops {
        let src = current.as_ref().unwrap_or_else(|| atlas.image());
        let next = match *op {
            Op::Crop {
                width,
                height,
                x,
                y,
            } => ops::crop(src, x, y, width, height)?,
            Op::RotateTransparent { degrees } => ops::rotate(src, degrees)?,
            Op::PadEdge {
                edge,
                background,
                width,
                height,
            } => ops::extend(src, edge, background, width, height)?,
        };
        current = Some(next);
    }
    current.ok_or_else(|| ExtractError::transform("operation plan is empty"))
}

/// Encode `image` to `path`, creating parent directories as needed.
///
/// The format follows the file extension and falls back to PNG. The sprite is converted
/// to the pixel layout the encoder accepts; formats without an alpha channel get it
/// dropped. A format that cannot be encoded at all is a transform error, while a failure
/// to write the bytes is an I/O error.
pub fn write_sprite(image: RgbaImage, path: &Path) -> ExtractResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ExtractError::io(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }

    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    encode_layout(image, format)
        .save_with_format(path, format)
        .map_err(|e| match e {
            ImageError::IoError(e) => ExtractError::io(format!("write '{}': {e}", path.display())),
            other => ExtractError::transform(format!(
                "encode '{}' as {format:?}: {other}",
                path.display()
            )),
        })
}

/// Apply `plan` and write the result to `out_path`.
pub fn execute(atlas: &Atlas, plan: &OperationPlan, out_path: &Path) -> ExtractResult<()> {
    let sprite = apply_plan(atlas, plan)?;
    tracing::debug!(
        path = %out_path.display(),
        width = sprite.width(),
        height = sprite.height(),
        "writing sprite"
    );
    write_sprite(sprite, out_path)
}

fn encode_layout(image: RgbaImage, format: ImageFormat) -> DynamicImage {
    let image = DynamicImage::ImageRgba8(image);
    match format {
        ImageFormat::Jpeg | ImageFormat::Pnm => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::Hdr => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ImageFormat::OpenExr => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        ImageFormat::Farbfeld => DynamicImage::ImageRgba16(image.to_rgba16()),
        _ => image,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/execute/executor.rs"]
mod tests;
