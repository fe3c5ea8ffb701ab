use crate::foundation::core::{Orientation, PixelFormat};
use crate::foundation::error::{StampError, StampResult};
use crate::raster::photo::Photo;

/// Default cap on a single surface: enough for a 64 MP RGBA8 photo.
pub const DEFAULT_MAX_SURFACE_BYTES: usize = 256 * 1024 * 1024;

/// Dimensions and format of an off-screen surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceDesc {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
    /// Pixel layout.
    pub format: PixelFormat,
}

impl SurfaceDesc {
    /// Premultiplied RGBA8 surface of the given size.
    pub fn rgba8_premul(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Rgba8Premul,
        }
    }

    /// Buffer size in bytes, `None` on overflow.
    pub fn byte_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.format.bytes_per_pixel())
    }
}

/// Writable off-screen pixel buffer. Finalized into an immutable [`Photo`].
#[derive(Debug)]
pub struct Surface {
    desc: SurfaceDesc,
    data: Vec<u8>,
}

impl Surface {
    /// Descriptor this surface was allocated with.
    pub fn desc(&self) -> SurfaceDesc {
        self.desc
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.desc.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.desc.height
    }

    /// Premultiplied RGBA8, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Flatten into an upright photo with the given display scale.
    pub fn into_photo(self, display_scale: f64) -> StampResult<Photo> {
        let Self { desc, data } = self;
        if Some(data.len()) != desc.byte_len() {
            return Err(StampError::render_surface(format!(
                "surface {}x{} holds {} bytes",
                desc.width,
                desc.height,
                data.len()
            )));
        }
        Photo::from_premul_rgba8(desc.width, desc.height, data)
            .and_then(|p| p.with_display_scale(display_scale))
            .map(|p| p.with_orientation(Orientation::Identity))
            .map_err(|e| StampError::render_surface(format!("finalize surface: {e}")))
    }
}

/// Allocates off-screen surfaces under a byte budget.
///
/// Allocation goes through `try_reserve_exact`, so an exhausted heap surfaces as
/// [`StampError::RenderSurface`] instead of aborting the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceAllocator {
    max_surface_bytes: usize,
}

impl Default for SurfaceAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SURFACE_BYTES)
    }
}

impl SurfaceAllocator {
    /// Allocator refusing surfaces larger than `max_surface_bytes`.
    pub fn new(max_surface_bytes: usize) -> Self {
        Self { max_surface_bytes }
    }

    /// Allocator limited only by the heap.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Byte budget per surface.
    pub fn max_surface_bytes(&self) -> usize {
        self.max_surface_bytes
    }

    /// Validate a descriptor against the budget without allocating.
    pub fn check(&self, desc: SurfaceDesc) -> StampResult<usize> {
        if desc.width == 0 || desc.height == 0 {
            return Err(StampError::render_surface(format!(
                "cannot create empty surface {}x{}",
                desc.width, desc.height
            )));
        }
        let len = desc.byte_len().ok_or_else(|| {
            StampError::render_surface(format!(
                "surface {}x{} overflows the address space",
                desc.width, desc.height
            ))
        })?;
        if len > self.max_surface_bytes {
            return Err(StampError::render_surface(format!(
                "surface {}x{} needs {len} bytes, budget is {}",
                desc.width, desc.height, self.max_surface_bytes
            )));
        }
        Ok(len)
    }

    /// Allocate a transparent surface.
    pub fn allocate(&self, desc: SurfaceDesc) -> StampResult<Surface> {
        let len = self.check(desc)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            StampError::render_surface(format!(
                "allocate {}x{} surface: {e}",
                desc.width, desc.height
            ))
        })?;
        data.resize(len, 0);
        tracing::trace!(width = desc.width, height = desc.height, len, "surface allocated");
        Ok(Surface { desc, data })
    }

    /// Allocate a surface initialized with a copy of an upright photo.
    pub fn allocate_from(&self, photo: &Photo) -> StampResult<Surface> {
        let mut surface =
            self.allocate(SurfaceDesc::rgba8_premul(photo.width(), photo.height()))?;
        if surface.data.len() != photo.pixels().len() {
            return Err(StampError::render_surface(
                "photo buffer does not match its dimensions",
            ));
        }
        surface.data.copy_from_slice(photo.pixels());
        Ok(surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
