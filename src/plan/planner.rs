use crate::{
    foundation::{
        core::{Rgba8, Size},
        error::{ExtractError, ExtractResult},
    },
    manifest::model::FrameGeometry,
};

/// Edge an extend operation anchors existing content to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Content stays at the top; new rows are added below.
    North,
    /// Content stays at the bottom; new rows are added above.
    South,
    /// Content stays at the right; new columns are added on the left.
    East,
    /// Content stays at the left; new columns are added on the right.
    West,
}

/// One geometric step of a sprite reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Cut a `width x height` rectangle at `(x, y)`.
    Crop {
        /// Crop width.
        width: u32,
        /// Crop height.
        height: u32,
        /// Left edge.
        x: u32,
        /// Top edge.
        y: u32,
    },
    /// Rotate by `degrees` (positive is clockwise), exposing transparent pixels.
    RotateTransparent {
        /// Rotation angle in degrees.
        degrees: i32,
    },
    /// Grow (or cut) the canvas to `width x height`, anchoring content to `edge`.
    PadEdge {
        /// Anchor edge.
        edge: Edge,
        /// Fill for new pixels.
        background: Rgba8,
        /// Target canvas width.
        width: u32,
        /// Target canvas height.
        height: u32,
    },
}

/// Ordered operations reconstructing one sprite from the atlas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationPlan {
    /// Operations in application order. The first one is always a crop of the atlas.
    pub ops: Vec<Op>,
}

impl OperationPlan {
    /// Canvas size after every operation has been applied.
    pub fn output_size(&self) -> Option<Size> {
        self.ops.iter().fold(None, |size, op| match *op {
            Op::Crop { width, height, .. } => Some(Size::new(width, height)),
            Op::RotateTransparent { degrees } => {
                size.map(|s| if degrees.rem_euclid(180) == 90 { Size::new(s.h, s.w) } else { s })
            }
            Op::PadEdge { width, height, .. } => Some(Size::new(width, height)),
        })
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// `true` when the plan has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Derive the operations that turn a packed rectangle back into the original sprite.
///
/// Steps, in order:
///
/// 1. crop the stored footprint (`h x w` when rotated);
/// 2. rotate by -90 degrees when rotated;
/// 3. when trimmed, extend East, West, South, North so the content lands at
///    `spriteSourceSize` inside a `sourceSize` canvas.
///
/// The pad order matters: each step's target is defined relative to the previous output.
pub fn plan_frame(geometry: &FrameGeometry) -> ExtractResult<OperationPlan> {
    let frame = geometry.frame;
    let (crop_w, crop_h) = if geometry.rotated {
        (frame.h, frame.w)
    } else {
        (frame.w, frame.h)
    };

    let mut ops = Vec::with_capacity(6);
    ops.push(Op::Crop {
        width: crop_w,
        height: crop_h,
        x: frame.x,
        y: frame.y,
    });

    if geometry.rotated {
        ops.push(Op::RotateTransparent { degrees: -90 });
    }

    if geometry.trimmed {
        let (offset, source) = geometry.trim_records()?;
        let padded_w = frame.w.checked_add(offset.x).ok_or_else(|| {
            ExtractError::malformed_manifest("frame.w + spriteSourceSize.x overflows")
        })?;
        let padded_h = frame.h.checked_add(offset.y).ok_or_else(|| {
            ExtractError::malformed_manifest("frame.h + spriteSourceSize.y overflows")
        })?;

        let pad = |edge, width, height| Op::PadEdge {
            edge,
            background: Rgba8::TRANSPARENT,
            width,
            height,
        };
        ops.push(pad(Edge::East, padded_w, frame.h));
        ops.push(pad(Edge::West, source.w, frame.h));
        ops.push(pad(Edge::South, source.w, padded_h));
        ops.push(pad(Edge::North, source.w, source.h));
    }

    Ok(OperationPlan { ops })
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;
