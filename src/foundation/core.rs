use crate::foundation::error::{StampError, StampResult};

pub use kurbo::{Point, Rect, Size};

/// Orientation tag carried by a photo, using the eight EXIF orientations.
///
/// Each variant names the transform that must be applied to the stored pixels to display them
/// upright. Rotations are clockwise.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Stored pixels are already upright.
    #[default]
    Identity,
    /// Mirror left/right.
    FlipHorizontal,
    /// Rotate by 180 degrees.
    Rotate180,
    /// Mirror top/bottom.
    FlipVertical,
    /// Mirror across the main diagonal.
    Transpose,
    /// Rotate by 90 degrees clockwise.
    Rotate90,
    /// Mirror across the anti-diagonal.
    Transverse,
    /// Rotate by 270 degrees clockwise.
    Rotate270,
}

impl Orientation {
    /// All orientations, in EXIF code order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Identity,
        Orientation::FlipHorizontal,
        Orientation::Rotate180,
        Orientation::FlipVertical,
        Orientation::Transpose,
        Orientation::Rotate90,
        Orientation::Transverse,
        Orientation::Rotate270,
    ];

    /// Parse an EXIF orientation code (`1..=8`).
    pub fn from_exif(code: u8) -> Option<Self> {
        match code {
            1..=8 => Some(Self::ALL[usize::from(code - 1)]),
            _ => None,
        }
    }

    /// The EXIF orientation code (`1..=8`).
    pub fn to_exif(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::FlipHorizontal => 2,
            Self::Rotate180 => 3,
            Self::FlipVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// Whether the stored pixels are already upright.
    pub fn is_identity(self) -> bool {
        self == Self::Identity
    }

    /// Whether baking this orientation swaps width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// The orientation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate270 => Self::Rotate90,
            other => other,
        }
    }

    /// Upright dimensions for a buffer stored as `(width, height)`.
    pub fn oriented_dims(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Map an upright destination pixel back to its stored source pixel.
    ///
    /// `width`/`height` are the stored (source) dimensions.
    pub fn source_pixel(self, dx: u32, dy: u32, width: u32, height: u32) -> (u32, u32) {
        let (w1, h1) = (width - 1, height - 1);
        match self {
            Self::Identity => (dx, dy),
            Self::FlipHorizontal => (w1 - dx, dy),
            Self::Rotate180 => (w1 - dx, h1 - dy),
            Self::FlipVertical => (dx, h1 - dy),
            Self::Transpose => (dy, dx),
            Self::Rotate90 => (dy, h1 - dx),
            Self::Transverse => (w1 - dy, h1 - dx),
            Self::Rotate270 => (w1 - dy, dx),
        }
    }
}

impl From<image::metadata::Orientation> for Orientation {
    fn from(value: image::metadata::Orientation) -> Self {
        use image::metadata::Orientation as O;
        match value {
            O::NoTransforms => Self::Identity,
            O::FlipHorizontal => Self::FlipHorizontal,
            O::Rotate180 => Self::Rotate180,
            O::FlipVertical => Self::FlipVertical,
            O::Rotate90FlipH => Self::Transpose,
            O::Rotate90 => Self::Rotate90,
            O::Rotate270FlipH => Self::Transverse,
            O::Rotate270 => Self::Rotate270,
        }
    }
}

/// Watermark width as a fraction of the base photo's available width.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Smallest accepted scale.
    pub const MIN: f64 = 0.0;
    /// Largest accepted scale.
    pub const MAX: f64 = 1.0;

    /// Validated constructor. Zero is accepted and yields an empty watermark box.
    pub fn new(value: f64) -> StampResult<Self> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(StampError::invalid_input(format!(
                "scale factor must be within [0, 1], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Clamp arbitrary slider input into range. NaN maps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// The raw fraction.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(0.2)
    }
}

impl TryFrom<f64> for ScaleFactor {
    type Error = StampError;

    fn try_from(value: f64) -> StampResult<Self> {
        Self::new(value)
    }
}

impl From<ScaleFactor> for f64 {
    fn from(value: ScaleFactor) -> Self {
        value.0
    }
}

/// Destination rectangle of the watermark, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacementRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl PlacementRect {
    /// Right edge.
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Width times height.
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// True when either side is zero or negative.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Uniformly scale position and size, e.g. from view points into image pixels.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Offset the origin by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Convert to a kurbo [`Rect`].
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for PlacementRect {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x0,
            y: r.y0,
            width: r.width(),
            height: r.height(),
        }
    }
}

/// Pixel layout of photo and surface buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// Premultiplied RGBA8, row-major, tightly packed.
    Rgba8Premul,
}

impl PixelFormat {
    /// Size of one pixel in bytes.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8Premul => 4,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
