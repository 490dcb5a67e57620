use std::path::Path;

use image::RgbaImage;

use crate::foundation::error::{ExtractError, ExtractResult};

/// Decoded atlas, straight RGBA8. Read-only once loaded and shared by every sprite.
#[derive(Clone, Debug)]
pub struct Atlas {
    image: RgbaImage,
}

impl Atlas {
    /// Wrap an already-decoded image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Atlas width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Decode an atlas from in-memory bytes of any format the `image` crate recognizes.
pub fn decode_atlas(bytes: &[u8]) -> ExtractResult<Atlas> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ExtractError::image_decode(format!("decode atlas: {e}")))?;
    Ok(Atlas::from_image(dyn_img.to_rgba8()))
}

/// Read and decode an atlas file.
pub fn load_atlas(path: &Path) -> ExtractResult<Atlas> {
    let bytes = std::fs::read(path).map_err(|e| {
        ExtractError::image_decode(format!("read atlas '{}': {e}", path.display()))
    })?;
    decode_atlas(&bytes).map_err(|e| match e {
        ExtractError::ImageDecode(msg) => {
            ExtractError::image_decode(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/decode.rs"]
mod tests;
