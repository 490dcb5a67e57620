/// Convenience result type used across the extractor.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Coarse classification of an [`ExtractError`], independent of sprite wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The manifest could not be parsed or failed validation.
    MalformedManifest,
    /// The atlas image could not be read or decoded.
    ImageDecode,
    /// An image primitive rejected an operation.
    Transform,
    /// Reading or writing a file failed.
    Io,
    /// Several sprites failed in a parallel batch.
    Batch,
    /// Anything else.
    Other,
}

/// Top-level error taxonomy used by the extraction pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    /// Unparsable manifest, missing required fields or invalid geometry.
    #[error("malformed manifest: {0}")]
    MalformedManifest(String),

    /// The atlas image is unreadable.
    #[error("image decode failure: {0}")]
    ImageDecode(String),

    /// An image-processing primitive rejected an operation.
    #[error("transform failure: {0}")]
    Transform(String),

    /// Writing an output image (or reading an input file) failed.
    #[error("io failure: {0}")]
    Io(String),

    /// A failure attributed to one sprite of the manifest.
    #[error("sprite '{sprite}': {cause}")]
    Sprite {
        /// Sprite name as written in the manifest.
        sprite: String,
        /// Underlying failure.
        cause: Box<ExtractError>,
    },

    /// Aggregate of a parallel batch where more than one sprite failed.
    #[error("{failed} of {total} sprites failed, first: {first}")]
    Batch {
        /// Number of failed sprites.
        failed: usize,
        /// Number of sprites attempted.
        total: usize,
        /// First failure in manifest order.
        first: Box<ExtractError>,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExtractError {
    /// Build a [`ExtractError::MalformedManifest`] value.
    pub fn malformed_manifest(msg: impl Into<String>) -> Self {
        Self::MalformedManifest(msg.into())
    }

    /// Build a [`ExtractError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`ExtractError::Transform`] value.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    /// Build a [`ExtractError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Attach a sprite name to this error.
    pub fn for_sprite(self, sprite: impl Into<String>) -> Self {
        Self::Sprite {
            sprite: sprite.into(),
            cause: Box::new(self),
        }
    }

    /// Kind of the underlying failure; sprite wrappers are looked through.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedManifest(_) => ErrorKind::MalformedManifest,
            Self::ImageDecode(_) => ErrorKind::ImageDecode,
            Self::Transform(_) => ErrorKind::Transform,
            Self::Io(_) => ErrorKind::Io,
            Self::Sprite { cause, .. } => cause.kind(),
            Self::Batch { .. } => ErrorKind::Batch,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Name of the sprite this error is attributed to, if any.
    pub fn sprite(&self) -> Option<&str> {
        match self {
            Self::Sprite { sprite, .. } => Some(sprite),
            Self::Batch { first, .. } => first.sprite(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
