use std::borrow::Cow;
use std::str::FromStr;

use image::imageops::FilterType;

use crate::foundation::error::{StampError, StampResult};
use crate::foundation::math::clamp_premul_rgba8_in_place;
use crate::raster::photo::Photo;
use crate::raster::surface::{SurfaceAllocator, SurfaceDesc};

/// Resampling filter used when scaling the watermark into its draw rect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbour; hard pixel edges.
    Nearest,
    /// Linear (tent) filter.
    #[default]
    Triangle,
    /// Cubic; sharper, may ring.
    CatmullRom,
    /// Gaussian blur kernel.
    Gaussian,
    /// Windowed sinc; sharpest, rings the most.
    Lanczos3,
}

impl ResampleFilter {
    /// Every filter, in the same order as [`ResampleFilter::NAMES`].
    pub const ALL: [ResampleFilter; 5] = [
        Self::Nearest,
        Self::Triangle,
        Self::CatmullRom,
        Self::Gaussian,
        Self::Lanczos3,
    ];

    /// Canonical config and CLI names.
    pub const NAMES: [&'static str; 5] =
        ["nearest", "triangle", "catmull_rom", "gaussian", "lanczos3"];

    fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ResampleFilter {
    type Err = StampError;

    fn from_str(s: &str) -> StampResult<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmull_rom" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(StampError::invalid_input(format!(
                "unknown resample filter '{other}', expected one of {:?}",
                Self::NAMES
            ))),
        }
    }
}

/// Scale premultiplied pixels of `src` to `width`x`height`.
///
/// Filtering premultiplied data keeps transparent edges free of color fringes. Returns the
/// source buffer untouched when no scaling is needed.
pub(crate) fn resample<'a>(
    src: &'a Photo,
    width: u32,
    height: u32,
    filter: ResampleFilter,
    alloc: &SurfaceAllocator,
) -> StampResult<Cow<'a, [u8]>> {
    if (src.width(), src.height()) == (width, height) {
        return Ok(Cow::Borrowed(src.pixels()));
    }
    alloc.check(SurfaceDesc::rgba8_premul(width, height))?;

    let view = image::ImageBuffer::<image::Rgba<u8>, &[u8]>::from_raw(
        src.width(),
        src.height(),
        src.pixels(),
    )
    .ok_or_else(|| StampError::render_surface("watermark buffer does not match its dimensions"))?;
    let scaled = image::imageops::resize(&view, width, height, filter.filter_type());
    let mut raw = scaled.into_raw();
    // Negative lobes can push color above alpha.
    clamp_premul_rgba8_in_place(&mut raw);
    Ok(Cow::Owned(raw))
}

#[cfg(test)]
#[path = "../../tests/unit/composite/resample.rs"]
mod tests;
