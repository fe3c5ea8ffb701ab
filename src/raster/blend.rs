use crate::foundation::error::{StampError, StampResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};
use crate::raster::surface::Surface;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels: `out = src + dst * (1 - src.a)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Blend a premultiplied `src_w`x`src_h` buffer over `dst` with its top-left corner at `(x, y)`.
///
/// Parts of `src` falling outside `dst` are clipped.
pub fn blit_over(
    dst: &mut Surface,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x: i64,
    y: i64,
) -> StampResult<()> {
    let expected = (src_w as usize) * (src_h as usize) * 4;
    if src.len() != expected {
        return Err(StampError::render_surface(format!(
            "blit_over expects {expected} source bytes, got {}",
            src.len()
        )));
    }

    let dst_w = i64::from(dst.width());
    let dst_h = i64::from(dst.height());
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src_w)).min(dst_w);
    let y1 = (y + i64::from(src_h)).min(dst_h);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let span = ((x1 - x0) * 4) as usize;
    let data = dst.data_mut();
    for row in y0..y1 {
        let s_off = (((row - y) * i64::from(src_w) + (x0 - x)) * 4) as usize;
        let d_off = ((row * dst_w + x0) * 4) as usize;
        let s_row = &src[s_off..s_off + span];
        let d_row = &mut data[d_off..d_off + span];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
