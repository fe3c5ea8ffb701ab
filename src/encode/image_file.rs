use std::io::{Cursor, Write as _};
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{StampError, StampResult};
use crate::normalize::orientation::normalize;
use crate::raster::photo::Photo;

/// Encoded output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Alpha is flattened away; JPEG has no alpha channel.
    Jpeg,
}

impl OutputFormat {
    /// Guess from a file extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        match image::ImageFormat::from_path(path) {
            Ok(image::ImageFormat::Jpeg) => Self::Jpeg,
            _ => Self::Png,
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Encode a photo. Tagged photos are normalized first, since the encoders drop the tag.
pub fn encode_photo(photo: &Photo, format: OutputFormat) -> StampResult<Vec<u8>> {
    let upright = normalize(photo)?;
    let rgba = image::DynamicImage::ImageRgba8(upright.to_rgba_image()?);
    let img = match format {
        OutputFormat::Png => rgba,
        OutputFormat::Jpeg => image::DynamicImage::ImageRgb8(rgba.to_rgb8()),
    };

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format.image_format())
        .map_err(|e| StampError::encode(format!("encode {format:?}: {e}")))?;
    Ok(buf)
}

/// [`encode_photo`] as PNG.
pub fn encode_png(photo: &Photo) -> StampResult<Vec<u8>> {
    encode_photo(photo, OutputFormat::Png)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> StampResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode and write atomically: bytes land in a temp file next to `path`, then get renamed.
///
/// Readers never observe a half-written image, and a failed encode leaves `path` untouched.
#[tracing::instrument(level = "debug", skip(photo, path), fields(path = %path.display()))]
pub fn save_photo(photo: &Photo, path: &Path, format: OutputFormat) -> StampResult<()> {
    let bytes = encode_photo(photo, format)?;
    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in '{}'", dir.display()))?;
    tmp.write_all(&bytes)
        .with_context(|| format!("write temp file for '{}'", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("flush temp file for '{}'", path.display()))?;
    tmp.persist(path)
        .map_err(|e| StampError::encode(format!("persist '{}': {}", path.display(), e.error)))?;

    tracing::info!(bytes = bytes.len(), "photo saved");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/image_file.rs"]
mod tests;
