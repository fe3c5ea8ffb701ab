//! Watermark placement math shared by the pixel pipeline and the live preview.
//!
//! All rectangles are in the frame's own coordinate space with the origin at the top-left.
//! The watermark box is anchored to the bottom-right corner, inset by the margin on both edges.

use crate::foundation::core::{PlacementRect, Point, Rect, ScaleFactor, Size};
use crate::foundation::error::{StampError, StampResult};

/// Margin as a fraction of [`MarginBasis`].
pub const DEFAULT_MARGIN_RATIO: f64 = 0.015;

/// Which frame dimension the margin is derived from. The same value insets both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginBasis {
    /// `width * ratio`.
    #[default]
    Width,
    /// `min(width, height) * ratio`.
    ShortSide,
}

/// Shape of the watermark's bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxShape {
    /// Square box whose side is `available_width * scale`. The watermark is fitted inside it.
    #[default]
    Square,
    /// Box width is `available_width * scale`, height follows the watermark's aspect ratio.
    AssetAspect,
}

/// Geometry knobs. The default reproduces the classic 1.5%-of-width square placement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeometryPolicy {
    /// Margin as a fraction of the basis dimension, in `[0, 0.5)`.
    pub margin_ratio: f64,
    /// Dimension the margin is measured against.
    pub margin_basis: MarginBasis,
    /// Shape of the watermark box.
    pub box_shape: BoxShape,
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        Self {
            margin_ratio: DEFAULT_MARGIN_RATIO,
            margin_basis: MarginBasis::default(),
            box_shape: BoxShape::default(),
        }
    }
}

impl GeometryPolicy {
    /// Reject ratios outside `[0, 0.5)`.
    pub fn validate(&self) -> StampResult<()> {
        if !self.margin_ratio.is_finite() || !(0.0..0.5).contains(&self.margin_ratio) {
            return Err(StampError::invalid_input(format!(
                "margin_ratio must be within [0, 0.5), got {}",
                self.margin_ratio
            )));
        }
        Ok(())
    }

    /// Inset from the right and bottom edges of `frame`.
    pub fn margin(&self, frame: Size) -> f64 {
        let basis = match self.margin_basis {
            MarginBasis::Width => frame.width,
            MarginBasis::ShortSide => frame.width.min(frame.height),
        };
        basis * self.margin_ratio
    }

    /// Size of the watermark box. `watermark_aspect` is width over height.
    pub fn watermark_box(&self, frame: Size, scale: ScaleFactor, watermark_aspect: f64) -> Size {
        let available = (frame.width - self.margin(frame) * 2.0).max(0.0);
        let width = available * scale.get();
        let height = match self.box_shape {
            BoxShape::AssetAspect if watermark_aspect.is_finite() && watermark_aspect > 0.0 => {
                width / watermark_aspect
            }
            _ => width,
        };
        Size::new(width, height)
    }

    /// Bottom-right anchored watermark box inside `frame`.
    pub fn placement(
        &self,
        frame: Size,
        scale: ScaleFactor,
        watermark_aspect: f64,
    ) -> PlacementRect {
        let margin = self.margin(frame);
        let size = self.watermark_box(frame, scale, watermark_aspect);
        PlacementRect {
            x: frame.width - size.width - margin,
            y: frame.height - size.height - margin,
            width: size.width,
            height: size.height,
        }
    }
}

/// Largest rect with the watermark's aspect ratio inside `bounds`, aligned to its bottom-right.
pub fn fit_bottom_right(bounds: PlacementRect, watermark_aspect: f64) -> PlacementRect {
    if bounds.is_empty() || !watermark_aspect.is_finite() || watermark_aspect <= 0.0 {
        return bounds;
    }
    let (width, height) = if bounds.width / bounds.height > watermark_aspect {
        (bounds.height * watermark_aspect, bounds.height)
    } else {
        (bounds.width, bounds.width / watermark_aspect)
    };
    PlacementRect {
        x: bounds.right() - width,
        y: bounds.bottom() - height,
        width,
        height,
    }
}

/// Centered aspect-fit of `content` inside `container`.
pub fn aspect_fit(content: Size, container: Rect) -> Rect {
    if content.width <= 0.0 || content.height <= 0.0 || container.area() <= 0.0 {
        return Rect::from_center_size(container.center(), Size::ZERO);
    }
    let k = (container.width() / content.width).min(container.height() / content.height);
    Rect::from_center_size(container.center(), content * k)
}

/// Preview overlay rect for an image shown aspect-fit inside a view of `container` size.
///
/// Uses the same margin, box and anchoring rules as the compositor, applied to the on-screen
/// image frame, then offset by that frame's origin.
pub fn preview_rect(
    container: Size,
    image_display: Size,
    scale: ScaleFactor,
    policy: &GeometryPolicy,
    watermark_aspect: f64,
) -> PlacementRect {
    let frame = aspect_fit(image_display, Rect::from_origin_size(Point::ORIGIN, container));
    policy
        .placement(frame.size(), scale, watermark_aspect)
        .translated(frame.x0, frame.y0)
}

/// Round a float rect to whole pixels, snapping edges rather than sizes.
pub(crate) fn pixel_bounds(r: PlacementRect) -> (i64, i64, u32, u32) {
    let x0 = r.x.round();
    let y0 = r.y.round();
    let x1 = r.right().round();
    let y1 = r.bottom().round();
    let w = (x1 - x0).max(0.0) as u32;
    let h = (y1 - y0).max(0.0) as u32;
    (x0 as i64, y0 as i64, w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/geometry.rs"]
mod tests;
