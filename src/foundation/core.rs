/// Axis-aligned pixel rectangle, as written in the manifest (`{x, y, w, h}`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl Rect {
    /// Build a rectangle from its origin and size.
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge, `None` on overflow.
    pub fn right(self) -> Option<u32> {
        self.x.checked_add(self.w)
    }

    /// Exclusive bottom edge, `None` on overflow.
    pub fn bottom(self) -> Option<u32> {
        self.y.checked_add(self.h)
    }

    /// `true` when the rectangle lies inside a `width x height` image.
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        matches!(
            (self.right(), self.bottom()),
            (Some(r), Some(b)) if r <= width && b <= height
        )
    }
}

/// Offset of a trimmed sprite inside its original canvas (`spriteSourceSize`).
///
/// TexturePacker also writes `w`/`h` here; they repeat `frame.w`/`frame.h` and are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    /// Horizontal offset.
    pub x: u32,
    /// Vertical offset.
    pub y: u32,
}

/// Pixel dimensions (`{w, h}`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

/// Largest RGBA8 canvas, in bytes, the pipeline will allocate for one sprite (1 GiB).
pub const MAX_CANVAS_BYTES: u64 = 1 << 30;

impl Size {
    /// Build a size.
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Bytes needed for an RGBA8 buffer of this size.
    pub fn rgba8_bytes(self) -> u64 {
        u64::from(self.w) * u64::from(self.h) * 4
    }

    /// `true` when an RGBA8 buffer of this size stays within [`MAX_CANVAS_BYTES`].
    pub fn within_canvas_limit(self) -> bool {
        self.rgba8_bytes() <= MAX_CANVAS_BYTES
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// `true` when alpha is zero.
    pub fn is_transparent(self) -> bool {
        self.0[3] == 0
    }
}

impl From<Rgba8> for image::Rgba<u8> {
    fn from(c: Rgba8) -> Self {
        image::Rgba(c.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
