//! Extract individual sprites from a packed texture atlas.
//!
//! The atlas is described by a TexturePacker-style "JSON hash" manifest: a `frames`
//! object mapping each sprite name to its packed rectangle plus rotation and trim
//! metadata. Every sprite goes through the same pipeline:
//!
//! 1. **Load**: `bytes -> Manifest` (entries kept in document order) and `file -> Atlas`
//! 2. **Plan**: `FrameGeometry -> OperationPlan` (crop, rotate back, re-pad trimmed borders)
//! 3. **Execute**: `Atlas + OperationPlan -> RgbaImage -> file`
//!
//! [`BatchDriver`] runs the pipeline over a whole manifest. It is sequential and
//! fail-fast by default; [`ExtractOpts::parallel`] switches to a rayon fan-out that
//! attempts every sprite and aggregates failures.
//!
//! ```no_run
//! use std::path::Path;
//! use sprite_extractor::{ExtractOpts, extract_files};
//!
//! # fn main() -> sprite_extractor::ExtractResult<()> {
//! let report = extract_files(Path::new("out.png"), Path::new("out.json"), &ExtractOpts::default())?;
//! println!("wrote {} sprites", report.written.len());
//! # Ok(()) }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod atlas;
mod batch;
mod execute;
mod foundation;
mod manifest;
mod plan;

pub use atlas::decode::{Atlas, decode_atlas, load_atlas};
pub use batch::driver::{
    BatchDriver, BatchState, ExtractOpts, ExtractReport, THREADS_ENV, extract_files,
    extract_sprites,
};
pub use execute::executor::{apply_plan, execute, write_sprite};
pub use execute::ops::{crop, extend, rotate};
pub use foundation::core::{MAX_CANVAS_BYTES, Offset, Rect, Rgba8, Size};
pub use foundation::error::{ErrorKind, ExtractError, ExtractResult};
pub use manifest::model::{FrameGeometry, Manifest, Meta, SpriteEntry};
pub use plan::planner::{Edge, Op, OperationPlan, plan_frame};
