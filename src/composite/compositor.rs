use crate::assets::watermark::WatermarkAsset;
use crate::composite::geometry::{GeometryPolicy, fit_bottom_right, pixel_bounds, preview_rect};
use crate::composite::resample::{ResampleFilter, resample};
use crate::foundation::core::{PlacementRect, ScaleFactor, Size};
use crate::foundation::error::{StampError, StampResult};
use crate::normalize::orientation::normalize_with;
use crate::raster::blend::blit_over;
use crate::raster::photo::Photo;
use crate::raster::surface::SurfaceAllocator;

/// Compositor configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompositorOpts {
    /// Margin and box rules.
    pub geometry: GeometryPolicy,
    /// Filter used to scale the watermark.
    pub resample: ResampleFilter,
    /// Budget for every surface the compositor allocates.
    pub allocator: SurfaceAllocator,
}

/// Paints a fixed watermark over photos.
///
/// Stateless apart from the immutable watermark and options, so one instance can be shared
/// across threads and called concurrently.
#[derive(Clone, Debug)]
pub struct Compositor {
    watermark: WatermarkAsset,
    opts: CompositorOpts,
}

impl Compositor {
    /// Build a compositor, rejecting an invalid geometry policy.
    pub fn new(watermark: WatermarkAsset, opts: CompositorOpts) -> StampResult<Self> {
        opts.geometry.validate()?;
        Ok(Self { watermark, opts })
    }

    /// The watermark painted by this compositor.
    pub fn watermark(&self) -> &WatermarkAsset {
        &self.watermark
    }

    /// Options this compositor was built with.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Watermark box for an upright `width`x`height` base, in pixels.
    pub fn placement(&self, width: u32, height: u32, scale: ScaleFactor) -> PlacementRect {
        self.opts.geometry.placement(
            Size::new(f64::from(width), f64::from(height)),
            scale,
            self.watermark.aspect_ratio(),
        )
    }

    /// Where the watermark pixels land inside a placement box.
    pub fn draw_rect(&self, placement: PlacementRect) -> PlacementRect {
        fit_bottom_right(placement, self.watermark.aspect_ratio())
    }

    /// Preview overlay rect for a view of `container` size showing an image of
    /// `image_display` size aspect-fit.
    pub fn preview_rect(
        &self,
        container: Size,
        image_display: Size,
        scale: ScaleFactor,
    ) -> PlacementRect {
        preview_rect(
            container,
            image_display,
            scale,
            &self.opts.geometry,
            self.watermark.aspect_ratio(),
        )
    }

    /// Normalize `base` and paint the watermark over it.
    ///
    /// The result has the normalized base's dimensions and display scale and is always upright.
    #[tracing::instrument(
        level = "debug",
        skip(self, base),
        fields(width = base.width(), height = base.height(), scale = scale.get())
    )]
    pub fn composite(&self, base: &Photo, scale: ScaleFactor) -> StampResult<Photo> {
        if base.is_empty() {
            return Err(StampError::invalid_input(format!(
                "cannot watermark empty photo {}x{}",
                base.width(),
                base.height()
            )));
        }
        let normalized = normalize_with(base, &self.opts.allocator)?;
        self.composite_normalized(&normalized, scale)
    }

    /// [`Compositor::composite`] for a base that is already upright.
    pub fn composite_normalized(&self, base: &Photo, scale: ScaleFactor) -> StampResult<Photo> {
        if !base.orientation().is_identity() {
            return Err(StampError::invalid_input(format!(
                "composite_normalized needs an upright photo, got {:?}",
                base.orientation()
            )));
        }
        if base.is_empty() {
            return Err(StampError::invalid_input(format!(
                "cannot watermark empty photo {}x{}",
                base.width(),
                base.height()
            )));
        }

        let placement = self.placement(base.width(), base.height(), scale);
        let draw = self.draw_rect(placement);
        let (x, y, w, h) = pixel_bounds(draw);
        tracing::debug!(?placement, x, y, w, h, "watermark geometry");

        let mut surface = self.opts.allocator.allocate_from(base)?;
        if w > 0 && h > 0 {
            let pixels = resample(
                self.watermark.photo(),
                w,
                h,
                self.opts.resample,
                &self.opts.allocator,
            )?;
            blit_over(&mut surface, &pixels, w, h, x, y)?;
        }
        surface.into_photo(base.display_scale())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/compositor.rs"]
mod tests;
