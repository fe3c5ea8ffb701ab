use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::assets::watermark::WatermarkAsset;
use crate::composite::compositor::{Compositor, CompositorOpts};
use crate::composite::geometry::GeometryPolicy;
use crate::composite::resample::ResampleFilter;
use crate::foundation::core::ScaleFactor;
use crate::foundation::error::{StampError, StampResult};
use crate::raster::surface::{DEFAULT_MAX_SURFACE_BYTES, SurfaceAllocator};
use crate::session::stamp_session::{DEFAULT_PREVIEW_THROTTLE, SessionOpts};

/// On-disk configuration, read from JSON. Every field is optional.
///
/// ```json
/// {
///   "watermark": "assets/watermark.png",
///   "scale": 0.2,
///   "geometry": { "margin_ratio": 0.015, "margin_basis": "width", "box_shape": "square" },
///   "resample": "triangle",
///   "max_surface_bytes": 268435456,
///   "preview_throttle_ms": 200
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StampConfig {
    /// Watermark image. Relative paths resolve against the config file's directory.
    pub watermark: Option<PathBuf>,
    /// Default scale factor.
    pub scale: ScaleFactor,
    /// Placement rules.
    pub geometry: GeometryPolicy,
    /// Watermark resample filter.
    pub resample: ResampleFilter,
    /// Byte budget per off-screen surface.
    pub max_surface_bytes: usize,
    /// Minimum spacing between preview renders.
    pub preview_throttle_ms: u64,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            watermark: None,
            scale: ScaleFactor::default(),
            geometry: GeometryPolicy::default(),
            resample: ResampleFilter::default(),
            max_surface_bytes: DEFAULT_MAX_SURFACE_BYTES,
            preview_throttle_ms: DEFAULT_PREVIEW_THROTTLE.as_millis() as u64,
        }
    }
}

impl StampConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> StampResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| StampError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a config file and resolve its watermark path.
    pub fn load(path: impl AsRef<Path>) -> StampResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg = Self::from_json_str(&json)?;
        if let Some(wm) = cfg.watermark.take() {
            let root = path.parent().unwrap_or_else(|| Path::new("."));
            cfg.watermark = Some(if wm.is_relative() { root.join(wm) } else { wm });
        }
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Check value ranges that serde alone cannot express.
    pub fn validate(&self) -> StampResult<()> {
        self.geometry.validate()?;
        if self.max_surface_bytes == 0 {
            return Err(StampError::invalid_input("max_surface_bytes must be > 0"));
        }
        Ok(())
    }

    /// Compositor options derived from this config.
    pub fn compositor_opts(&self) -> CompositorOpts {
        CompositorOpts {
            geometry: self.geometry,
            resample: self.resample,
            allocator: SurfaceAllocator::new(self.max_surface_bytes),
        }
    }

    /// Session options derived from this config.
    pub fn session_opts(&self) -> SessionOpts {
        SessionOpts {
            preview_throttle: Duration::from_millis(self.preview_throttle_ms),
            initial_scale: self.scale,
        }
    }

    /// Load the watermark and build a compositor. Fails fast when the asset is unusable.
    pub fn build_compositor(&self) -> StampResult<Compositor> {
        let path = self
            .watermark
            .as_ref()
            .ok_or_else(|| StampError::asset_load("no watermark configured"))?;
        let watermark = WatermarkAsset::load(path)?;
        Compositor::new(watermark, self.compositor_opts())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/stamp_config.rs"]
mod tests;
