use crate::foundation::error::{StampError, StampResult};
use crate::raster::photo::Photo;
use crate::raster::surface::{SurfaceAllocator, SurfaceDesc};

/// Bake the photo's orientation tag into its pixels.
///
/// Upright photos come back as a clone sharing the same buffer. Everything else is re-rendered
/// into a new surface whose tag is [`Orientation::Identity`](crate::Orientation::Identity);
/// quarter turns and diagonal mirrors swap width and height. The display scale is kept.
pub fn normalize(photo: &Photo) -> StampResult<Photo> {
    normalize_with(photo, &SurfaceAllocator::default())
}

/// [`normalize`] with an explicit surface allocator.
#[tracing::instrument(
    level = "debug",
    skip(photo, alloc),
    fields(width = photo.width(), height = photo.height(), orientation = ?photo.orientation())
)]
pub fn normalize_with(photo: &Photo, alloc: &SurfaceAllocator) -> StampResult<Photo> {
    let orientation = photo.orientation();
    if orientation.is_identity() {
        return Ok(photo.clone());
    }
    if photo.is_empty() {
        return Err(StampError::invalid_input(format!(
            "cannot normalize empty photo {}x{}",
            photo.width(),
            photo.height()
        )));
    }

    let (src_w, src_h) = (photo.width(), photo.height());
    let (dst_w, dst_h) = orientation.oriented_dims(src_w, src_h);
    let mut surface = alloc.allocate(SurfaceDesc::rgba8_premul(dst_w, dst_h))?;

    let src = photo.pixels();
    let stride = src_w as usize * 4;
    if src.len() != stride * src_h as usize {
        return Err(StampError::render_surface(
            "photo buffer does not match its dimensions",
        ));
    }

    let dst = surface.data_mut();
    for (dy, row) in dst.chunks_exact_mut(dst_w as usize * 4).enumerate() {
        for (dx, px) in row.chunks_exact_mut(4).enumerate() {
            let (sx, sy) = orientation.source_pixel(dx as u32, dy as u32, src_w, src_h);
            let i = sy as usize * stride + sx as usize * 4;
            px.copy_from_slice(&src[i..i + 4]);
        }
    }

    tracing::debug!(dst_w, dst_h, "orientation baked");
    surface.into_photo(photo.display_scale())
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/orientation.rs"]
mod tests;
