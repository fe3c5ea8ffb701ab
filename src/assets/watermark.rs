use std::path::Path;

use crate::assets::decode::decode_photo;
use crate::foundation::error::{StampError, StampResult};
use crate::normalize::orientation::normalize;
use crate::raster::photo::Photo;

/// The watermark image, loaded once and owned by a [`Compositor`](crate::Compositor).
///
/// Always stored upright and non-empty. Construction is the only fallible step, so a missing or
/// corrupt resource is reported at startup rather than on every composite.
#[derive(Clone, Debug, PartialEq)]
pub struct WatermarkAsset {
    photo: Photo,
}

impl WatermarkAsset {
    /// Load and decode the watermark from disk.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load(path: impl AsRef<Path>) -> StampResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            StampError::asset_load(format!("read watermark '{}': {e}", path.display()))
        })?;
        let asset = Self::from_bytes(&bytes).map_err(|e| match e {
            StampError::AssetLoad(msg) => {
                StampError::asset_load(format!("watermark '{}': {msg}", path.display()))
            }
            other => other,
        })?;
        tracing::info!(
            path = %path.display(),
            width = asset.width(),
            height = asset.height(),
            "watermark loaded"
        );
        Ok(asset)
    }

    /// Decode an encoded watermark image from memory.
    pub fn from_bytes(bytes: &[u8]) -> StampResult<Self> {
        let photo = decode_photo(bytes).map_err(|e| StampError::asset_load(e.to_string()))?;
        Self::from_photo(photo)
    }

    /// Wrap an in-memory photo, baking its orientation.
    pub fn from_photo(photo: Photo) -> StampResult<Self> {
        if photo.is_empty() {
            return Err(StampError::asset_load(format!(
                "watermark must not be empty, got {}x{}",
                photo.width(),
                photo.height()
            )));
        }
        let photo = normalize(&photo).map_err(|e| StampError::asset_load(e.to_string()))?;
        Ok(Self { photo })
    }

    /// The upright watermark pixels.
    pub fn photo(&self) -> &Photo {
        &self.photo
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.photo.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.photo.height()
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.photo.aspect_ratio()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/watermark.rs"]
mod tests;
