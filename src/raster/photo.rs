use std::sync::Arc;

use crate::foundation::core::{Orientation, PixelFormat, Size};
use crate::foundation::error::{StampError, StampResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// Immutable raster photo.
///
/// `width`/`height` describe the stored buffer; the orientation tag says how that buffer has to
/// be transformed to appear upright. Pixels are premultiplied RGBA8 and shared, so clones are
/// cheap and never copy pixel data.
#[derive(Clone, Debug)]
pub struct Photo {
    width: u32,
    height: u32,
    display_scale: f64,
    orientation: Orientation,
    format: PixelFormat,
    pixels: Arc<Vec<u8>>,
}

impl Photo {
    /// Wrap an already premultiplied RGBA8 buffer.
    pub fn from_premul_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> StampResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(PixelFormat::Rgba8Premul.bytes_per_pixel()))
            .ok_or_else(|| StampError::invalid_input("photo dimensions overflow"))?;
        if pixels.len() != expected {
            return Err(StampError::invalid_input(format!(
                "expected {expected} bytes for {width}x{height} rgba8, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            display_scale: 1.0,
            orientation: Orientation::Identity,
            format: PixelFormat::Rgba8Premul,
            pixels: Arc::new(pixels),
        })
    }

    /// Wrap a straight-alpha RGBA8 buffer, premultiplying it.
    pub fn from_straight_rgba8(width: u32, height: u32, mut pixels: Vec<u8>) -> StampResult<Self> {
        premultiply_rgba8_in_place(&mut pixels);
        Self::from_premul_rgba8(width, height, pixels)
    }

    /// Take ownership of a straight-alpha image, premultiplying it.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut pixels = img.into_raw();
        premultiply_rgba8_in_place(&mut pixels);
        Self {
            width,
            height,
            display_scale: 1.0,
            orientation: Orientation::Identity,
            format: PixelFormat::Rgba8Premul,
            pixels: Arc::new(pixels),
        }
    }

    /// Single-color photo, mostly useful for tests and fixtures.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> StampResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| StampError::invalid_input("photo dimensions overflow"))?;
        Self::from_premul_rgba8(width, height, premul.repeat(len))
    }

    /// Replace the orientation tag without touching pixels.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Device pixels per logical point; must be finite and positive.
    pub fn with_display_scale(mut self, display_scale: f64) -> StampResult<Self> {
        if !display_scale.is_finite() || display_scale <= 0.0 {
            return Err(StampError::invalid_input(format!(
                "display scale must be > 0, got {display_scale}"
            )));
        }
        self.display_scale = display_scale;
        Ok(self)
    }

    /// Stored width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Stored height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Device pixels per logical point.
    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    /// Orientation tag of the stored pixels.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Pixel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Premultiplied RGBA8, row-major, tightly packed.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Upright pixel dimensions, after the orientation tag is applied.
    pub fn upright_dims(&self) -> (u32, u32) {
        self.orientation.oriented_dims(self.width, self.height)
    }

    /// Upright size in logical points.
    pub fn logical_size(&self) -> Size {
        let (w, h) = self.upright_dims();
        Size::new(
            f64::from(w) / self.display_scale,
            f64::from(h) / self.display_scale,
        )
    }

    /// Width over height of the upright image.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.upright_dims();
        if h == 0 {
            return 0.0;
        }
        f64::from(w) / f64::from(h)
    }

    /// Premultiplied pixel at stored coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.pixels.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// True when both photos share one pixel allocation.
    pub fn shares_pixels(&self, other: &Photo) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Straight-alpha copy of the stored buffer, for encoders.
    pub fn to_rgba_image(&self) -> StampResult<image::RgbaImage> {
        let mut raw = self.pixels.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut raw);
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .ok_or_else(|| StampError::render_surface("photo buffer does not match its dimensions"))
    }
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.display_scale == other.display_scale
            && self.orientation == other.orientation
            && self.format == other.format
            && self.pixels == other.pixels
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/photo.rs"]
mod tests;
