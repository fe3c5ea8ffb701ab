//! CamStamp stamps a watermark into the bottom-right corner of photos.
//!
//! The pipeline is small and deterministic:
//!
//! - Decode a [`Photo`] and keep its EXIF [`Orientation`] as a tag
//! - [`normalize`] it into upright pixels
//! - [`Compositor::composite`] the [`WatermarkAsset`] at a [`ScaleFactor`]
//! - Hand the result to a [`PhotoSink`]
//!
//! [`preview_rect`] computes where the watermark lands inside an aspect-fit on-screen preview,
//! using the same [`GeometryPolicy`] as the pixel path. [`StampSession`] drives interactive
//! previews with throttling and last-writer-wins results.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod composite;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod normalize;
pub(crate) mod raster;
pub(crate) mod session;

pub use crate::foundation::core::{
    Orientation, PixelFormat, PlacementRect, Point, Rect, ScaleFactor, Size,
};
pub use crate::foundation::error::{StampError, StampResult};

pub use crate::assets::decode::{decode_photo, load_photo, peek_orientation};
pub use crate::assets::watermark::WatermarkAsset;
pub use crate::composite::compositor::{Compositor, CompositorOpts};
pub use crate::composite::geometry::{
    BoxShape, DEFAULT_MARGIN_RATIO, GeometryPolicy, MarginBasis, aspect_fit, fit_bottom_right,
    preview_rect,
};
pub use crate::composite::resample::ResampleFilter;
pub use crate::config::stamp_config::StampConfig;
pub use crate::encode::image_file::{
    OutputFormat, encode_photo, encode_png, ensure_parent_dir, save_photo,
};
pub use crate::encode::sink::{DirSink, FileSink, InMemorySink, PhotoSink, unique_names};
pub use crate::normalize::orientation::{normalize, normalize_with};
pub use crate::raster::blend::{PremulRgba8, blit_over, over};
pub use crate::raster::photo::Photo;
pub use crate::raster::surface::{
    DEFAULT_MAX_SURFACE_BYTES, Surface, SurfaceAllocator, SurfaceDesc,
};
pub use crate::session::stamp_session::{
    DEFAULT_PREVIEW_THROTTLE, RenderOutcome, RenderRequest, RenderTicket, SessionOpts,
    StampSession,
};
pub use crate::session::throttle::Throttle;
