use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::ImageDecoder as _;

use crate::foundation::core::Orientation;
use crate::foundation::error::{StampError, StampResult};
use crate::raster::photo::Photo;

/// Decode an encoded image, keeping its EXIF orientation as a tag instead of applying it.
///
/// Pixels come back premultiplied; the display scale is 1.
pub fn decode_photo(bytes: &[u8]) -> StampResult<Photo> {
    let mut decoder = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?
        .into_decoder()
        .context("create image decoder")?;
    let orientation = decoder.orientation().context("read image orientation")?;
    let dyn_img = image::DynamicImage::from_decoder(decoder).context("decode image from memory")?;

    let photo = Photo::from_rgba_image(dyn_img.to_rgba8()).with_orientation(orientation.into());
    tracing::debug!(
        width = photo.width(),
        height = photo.height(),
        orientation = ?photo.orientation(),
        "photo decoded"
    );
    Ok(photo)
}

/// Read and decode a photo from disk. See [`decode_photo`].
pub fn load_photo(path: impl AsRef<Path>) -> StampResult<Photo> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read photo '{}'", path.display()))?;
    decode_photo(&bytes).map_err(|e| {
        let context = format!("decode photo '{}'", path.display());
        StampError::Other(anyhow::Error::new(e).context(context))
    })
}

/// Orientation tag a photo would carry, for callers that only need metadata.
pub fn peek_orientation(bytes: &[u8]) -> StampResult<Orientation> {
    let mut decoder = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?
        .into_decoder()
        .context("create image decoder")?;
    Ok(decoder.orientation().context("read image orientation")?.into())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
