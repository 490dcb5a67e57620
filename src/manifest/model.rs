use std::{
    collections::HashSet,
    fmt,
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use serde::de::{Error as _, MapAccess, Visitor};

use crate::foundation::{
    core::{MAX_CANVAS_BYTES, Offset, Rect, Size},
    error::{ExtractError, ExtractResult},
};

/// Placement and trim metadata of one sprite inside the atlas.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameGeometry {
    /// Packed rectangle. `w`/`h` are the logical (unrotated) sprite size.
    pub frame: Rect,
    /// Stored rotated 90 degrees clockwise; the footprint in the atlas is `h x w`.
    #[serde(default)]
    pub rotated: bool,
    /// Transparent borders were stripped before packing.
    #[serde(default)]
    pub trimmed: bool,
    /// Offset of `frame` inside the untrimmed canvas. Required when trimmed.
    #[serde(
        rename = "spriteSourceSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sprite_source_size: Option<Offset>,
    /// Size of the untrimmed canvas. Required when trimmed.
    #[serde(rename = "sourceSize", default, skip_serializing_if = "Option::is_none")]
    pub source_size: Option<Size>,
}

impl FrameGeometry {
    /// Untrimmed, unrotated sprite at `frame`.
    pub fn plain(frame: Rect) -> Self {
        Self {
            frame,
            rotated: false,
            trimmed: false,
            sprite_source_size: None,
            source_size: None,
        }
    }

    /// Check the geometric invariants the transform pipeline relies on.
    pub fn validate(&self) -> ExtractResult<()> {
        if self.frame.is_empty() {
            return Err(ExtractError::malformed_manifest("frame w/h must be > 0"));
        }
        if !self.trimmed {
            return Ok(());
        }

        let (offset, source) = self.trim_records()?;
        if !source.within_canvas_limit() {
            return Err(ExtractError::malformed_manifest(format!(
                "sourceSize {}x{} exceeds the {MAX_CANVAS_BYTES}-byte canvas limit",
                source.w, source.h
            )));
        }
        let right = offset.x.checked_add(self.frame.w);
        let bottom = offset.y.checked_add(self.frame.h);
        if !matches!(right, Some(r) if r <= source.w) {
            return Err(ExtractError::malformed_manifest(format!(
                "spriteSourceSize.x ({}) + frame.w ({}) exceeds sourceSize.w ({})",
                offset.x, self.frame.w, source.w
            )));
        }
        if !matches!(bottom, Some(b) if b <= source.h) {
            return Err(ExtractError::malformed_manifest(format!(
                "spriteSourceSize.y ({}) + frame.h ({}) exceeds sourceSize.h ({})",
                offset.y, self.frame.h, source.h
            )));
        }
        Ok(())
    }

    /// Both trim records, or an error naming the missing one.
    pub fn trim_records(&self) -> ExtractResult<(Offset, Size)> {
        let offset = self.sprite_source_size.ok_or_else(|| {
            ExtractError::malformed_manifest("trimmed frame is missing spriteSourceSize")
        })?;
        let source = self.source_size.ok_or_else(|| {
            ExtractError::malformed_manifest("trimmed frame is missing sourceSize")
        })?;
        Ok((offset, source))
    }
}

/// A sprite name paired with its geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteEntry {
    /// Key from the manifest; also the output file name.
    pub name: String,
    /// Geometry record.
    pub geometry: FrameGeometry,
}

/// Informational `meta` block written by atlas packers.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Meta {
    /// Packer that produced the atlas.
    #[serde(default)]
    pub app: Option<String>,
    /// Packer version.
    #[serde(default)]
    pub version: Option<String>,
    /// Atlas image file name.
    #[serde(default)]
    pub image: Option<String>,
    /// Pixel format label, e.g. `RGBA8888`.
    #[serde(default)]
    pub format: Option<String>,
    /// Atlas dimensions.
    #[serde(default)]
    pub size: Option<Size>,
    /// Scale factor; packers write it as either a string or a number.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub scale: serde_json::Value,
}

/// Parsed atlas manifest. Entries keep the order they appear in the document.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifest {
    /// Sprites in document order.
    pub entries: Vec<SpriteEntry>,
    /// Optional `meta` block.
    pub meta: Option<Meta>,
}

#[derive(serde::Deserialize)]
struct ManifestDoc {
    #[serde(deserialize_with = "frames_in_document_order")]
    frames: Vec<SpriteEntry>,
    #[serde(default)]
    meta: Option<Meta>,
}

impl Manifest {
    /// Parse and validate a manifest from raw document bytes.
    pub fn from_slice(bytes: &[u8]) -> ExtractResult<Self> {
        let doc: ManifestDoc = serde_json::from_slice(bytes)
            .map_err(|e| ExtractError::malformed_manifest(e.to_string()))?;
        let manifest = Self {
            entries: doc.frames,
            meta: doc.meta,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    pub fn from_path(path: &Path) -> ExtractResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| ExtractError::io(format!("read manifest '{}': {e}", path.display())))?;
        Self::from_slice(&bytes)
    }

    /// Validate names and geometry of every entry.
    pub fn validate(&self) -> ExtractResult<()> {
        for entry in &self.entries {
            validate_sprite_name(&entry.name)?;
            entry.geometry.validate().map_err(|e| match e {
                ExtractError::MalformedManifest(msg) => ExtractError::malformed_manifest(
                    format!("sprite '{}': {msg}", entry.name),
                ),
                other => other,
            })?;
        }
        Ok(())
    }

    /// Number of sprites.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the manifest lists no sprites.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a sprite by name.
    pub fn get(&self, name: &str) -> Option<&FrameGeometry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.geometry)
    }

    /// Sprite names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl FromStr for Manifest {
    type Err = ExtractError;

    fn from_str(s: &str) -> ExtractResult<Self> {
        Self::from_slice(s.as_bytes())
    }
}

// Names become output paths relative to the output directory.
fn validate_sprite_name(name: &str) -> ExtractResult<()> {
    if name.trim().is_empty() {
        return Err(ExtractError::malformed_manifest("sprite name must be non-empty"));
    }
    let escapes = Path::new(name)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ExtractError::malformed_manifest(format!(
            "sprite name '{name}' must be a relative path without '..'"
        )));
    }
    Ok(())
}

/// Names that resolve to the same output file compare equal (`a.png`, `./a.png`).
fn output_key(name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn frames_in_document_order<'de, D>(deserializer: D) -> Result<Vec<SpriteEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct FramesVisitor;

    impl<'de> Visitor<'de> for FramesVisitor {
        type Value = Vec<SpriteEntry>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of sprite name to frame record")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            let mut seen = HashSet::new();
            while let Some((name, geometry)) = map.next_entry::<String, FrameGeometry>()? {
                if !seen.insert(output_key(&name)) {
                    return Err(A::Error::custom(format!("duplicate sprite name '{name}'")));
                }
                entries.push(SpriteEntry { name, geometry });
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(FramesVisitor)
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
