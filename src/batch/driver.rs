use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    atlas::decode::{Atlas, load_atlas},
    execute::executor::execute,
    foundation::error::{ExtractError, ExtractResult},
    manifest::model::{Manifest, SpriteEntry},
    plan::planner::plan_frame,
};

/// Environment variable consulted for the worker count when [`ExtractOpts::threads`] is unset.
pub const THREADS_ENV: &str = "SPRITE_EXTRACTOR_THREADS";

/// Lifecycle of a [`BatchDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchState {
    /// Nothing has run yet.
    Idle,
    /// Reading the manifest and decoding the atlas.
    Loading,
    /// Working on the sprite at this index (manifest order). Only sequential mode
    /// passes through this state; a parallel batch goes from loading straight to a
    /// terminal state.
    Processing(usize),
    /// Every sprite was written.
    Done,
    /// A failure stopped the batch.
    Failed,
}

impl BatchState {
    /// `true` for [`BatchState::Done`] and [`BatchState::Failed`].
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Options for a batch extraction.
#[derive(Clone, Debug)]
pub struct ExtractOpts {
    /// Directory sprite names are resolved against.
    pub out_dir: PathBuf,
    /// Fan sprites out over a thread pool. Every sprite is attempted and failures are
    /// aggregated instead of stopping at the first one.
    pub parallel: bool,
    /// Worker threads for parallel mode.
    pub threads: Option<usize>,
}

impl Default for ExtractOpts {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            parallel: false,
            threads: None,
        }
    }
}

/// Outcome of a successful batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Written files, in manifest order.
    pub written: Vec<PathBuf>,
}

/// Drives manifest entries through planning and execution.
#[derive(Debug)]
pub struct BatchDriver {
    opts: ExtractOpts,
    state: BatchState,
}

impl BatchDriver {
    /// Create an idle driver.
    pub fn new(opts: ExtractOpts) -> Self {
        Self {
            opts,
            state: BatchState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Load the manifest and atlas from disk, then extract every sprite.
    ///
    /// A loading failure ends the batch before any sprite is touched.
    #[tracing::instrument(skip_all, fields(sheet = %sheet.display(), data = %data.display()))]
    pub fn run(&mut self, sheet: &Path, data: &Path) -> ExtractResult<ExtractReport> {
        self.enter(BatchState::Loading);
        let loaded = Manifest::from_path(data)
            .and_then(|manifest| load_atlas(sheet).map(|atlas| (manifest, atlas)));
        let (manifest, atlas) = match loaded {
            Ok(v) => v,
            Err(e) => {
                self.enter(BatchState::Failed);
                return Err(e);
            }
        };

        warn_on_meta_mismatch(&manifest, &atlas);
        self.process(&atlas, &manifest)
    }

    /// Extract every sprite of an already-loaded manifest.
    #[tracing::instrument(skip_all, fields(sprites = manifest.len(), parallel = self.opts.parallel))]
    pub fn process(&mut self, atlas: &Atlas, manifest: &Manifest) -> ExtractResult<ExtractReport> {
        if let (false, Some(threads)) = (self.opts.parallel, self.opts.threads) {
            tracing::warn!(threads, "worker thread count is ignored without parallel mode");
        }
        let result = if self.opts.parallel {
            self.process_parallel(atlas, manifest)
        } else {
            self.process_sequential(atlas, manifest)
        };
        match &result {
            Ok(report) => {
                tracing::info!(written = report.written.len(), "extraction done");
                self.enter(BatchState::Done);
            }
            Err(e) => {
                tracing::debug!(error = %e, "extraction failed");
                self.enter(BatchState::Failed);
            }
        }
        result
    }

    fn process_sequential(
        &mut self,
        atlas: &Atlas,
        manifest: &Manifest,
    ) -> ExtractResult<ExtractReport> {
        let mut written = Vec::with_capacity(manifest.len());
        for (index, entry) in manifest.entries.iter().enumerate() {
            self.enter(BatchState::Processing(index));
            written.push(extract_one(atlas, entry, &self.opts.out_dir)?);
        }
        Ok(ExtractReport { written })
    }

    fn process_parallel(
        &mut self,
        atlas: &Atlas,
        manifest: &Manifest,
    ) -> ExtractResult<ExtractReport> {
        let pool = build_thread_pool(self.opts.threads)?;

        let out_dir = self.opts.out_dir.as_path();
        let results: Vec<ExtractResult<PathBuf>> = pool.install(|| {
            manifest
                .entries
                .par_iter()
                .map(|entry| extract_one(atlas, entry, out_dir))
                .collect()
        });

        let total = results.len();
        let mut written = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(path) => written.push(path),
                Err(e) => failures.push(e),
            }
        }

        let failed = failures.len();
        let mut failures = failures.into_iter();
        match (failures.next(), failed) {
            (None, _) => Ok(ExtractReport { written }),
            (Some(only), 1) => Err(only),
            (Some(first), _) => Err(ExtractError::Batch {
                failed,
                total,
                first: Box::new(first),
            }),
        }
    }

    fn enter(&mut self, next: BatchState) {
        tracing::trace!(from = ?self.state, to = ?next, "batch state");
        self.state = next;
    }
}

/// Extract every sprite of `manifest` from `atlas`.
pub fn extract_sprites(
    atlas: &Atlas,
    manifest: &Manifest,
    opts: &ExtractOpts,
) -> ExtractResult<ExtractReport> {
    BatchDriver::new(opts.clone()).process(atlas, manifest)
}

/// Load `sheet` and `data` from disk and extract every sprite.
pub fn extract_files(sheet: &Path, data: &Path, opts: &ExtractOpts) -> ExtractResult<ExtractReport> {
    BatchDriver::new(opts.clone()).run(sheet, data)
}

fn extract_one(atlas: &Atlas, entry: &SpriteEntry, out_dir: &Path) -> ExtractResult<PathBuf> {
    let path = out_dir.join(&entry.name);
    plan_frame(&entry.geometry)
        .and_then(|plan| {
            tracing::debug!(sprite = %entry.name, ops = plan.len(), "planned sprite");
            execute(atlas, &plan, &path)
        })
        .map_err(|e| e.for_sprite(&entry.name))?;
    Ok(path)
}

fn warn_on_meta_mismatch(manifest: &Manifest, atlas: &Atlas) {
    let Some(size) = manifest.meta.as_ref().and_then(|m| m.size) else {
        return;
    };
    if size.w != atlas.width() || size.h != atlas.height() {
        tracing::warn!(
            meta_w = size.w,
            meta_h = size.h,
            atlas_w = atlas.width(),
            atlas_h = atlas.height(),
            "manifest meta.size does not match the atlas"
        );
    }
}

fn build_thread_pool(threads: Option<usize>) -> ExtractResult<rayon::ThreadPool> {
    let threads = threads.or_else(|| threads_from_env(std::env::var(THREADS_ENV).ok()));
    if threads == Some(0) {
        return Err(ExtractError::Other(anyhow::anyhow!(
            "worker thread count must be >= 1 when set"
        )));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ExtractError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

/// Parse the raw [`THREADS_ENV`] value. Unusable values are reported and ignored.
fn threads_from_env(raw: Option<String>) -> Option<usize> {
    let raw = raw?;
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            tracing::warn!(
                var = THREADS_ENV,
                value = %raw,
                "ignoring worker thread count; expected a positive integer"
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/driver.rs"]
mod tests;
