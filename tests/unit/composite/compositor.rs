use super::*;
use crate::foundation::core::Orientation;

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn compositor_with(watermark: Photo, opts: CompositorOpts) -> Compositor {
    Compositor::new(WatermarkAsset::from_photo(watermark).unwrap(), opts).unwrap()
}

fn white_square() -> Compositor {
    compositor_with(
        Photo::solid(10, 10, WHITE).unwrap(),
        CompositorOpts::default(),
    )
}

fn scale(v: f64) -> ScaleFactor {
    ScaleFactor::new(v).unwrap()
}

#[test]
fn portrait_scenario_places_194px_box_at_791_1791() {
    let c = white_square();
    let base = Photo::solid(1000, 2000, BLACK).unwrap();
    let out = c.composite(&base, scale(0.2)).unwrap();

    assert_eq!((out.width(), out.height()), (1000, 2000));
    assert_eq!(out.pixel(790, 1790), Some(BLACK));
    assert_eq!(out.pixel(791, 1791), Some(WHITE));
    assert_eq!(out.pixel(984, 1984), Some(WHITE));
    assert_eq!(out.pixel(985, 1984), Some(BLACK));
    assert_eq!(out.pixel(984, 1985), Some(BLACK));
}

#[test]
fn composite_is_deterministic() {
    let c = white_square();
    let base = Photo::solid(300, 200, [10, 20, 30, 255]).unwrap();
    let a = c.composite(&base, scale(0.35)).unwrap();
    let b = c.composite(&base, scale(0.35)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn output_keeps_normalized_dims_and_display_scale() {
    let c = white_square();
    let base = Photo::solid(100, 200, BLACK)
        .unwrap()
        .with_display_scale(3.0)
        .unwrap()
        .with_orientation(Orientation::Rotate90);
    let out = c.composite(&base, scale(0.2)).unwrap();
    assert_eq!((out.width(), out.height()), (200, 100));
    assert_eq!(out.display_scale(), 3.0);
    assert_eq!(out.orientation(), Orientation::Identity);
}

#[test]
fn zero_scale_leaves_base_untouched() {
    let c = white_square();
    let base = Photo::solid(50, 40, BLACK).unwrap();
    let out = c.composite(&base, scale(0.0)).unwrap();
    assert_eq!(out.pixels(), base.pixels());
    assert!(!out.shares_pixels(&base));
}

#[test]
fn full_scale_spans_available_width() {
    let c = white_square();
    let base = Photo::solid(200, 400, BLACK).unwrap();
    let out = c.composite(&base, scale(1.0)).unwrap();
    // margin = 3, box = 194 wide.
    assert_eq!(out.pixel(2, 396), Some(BLACK));
    assert_eq!(out.pixel(3, 396), Some(WHITE));
    assert_eq!(out.pixel(196, 396), Some(WHITE));
    assert_eq!(out.pixel(197, 396), Some(BLACK));
    assert_eq!(out.pixel(100, 202), Some(BLACK));
    assert_eq!(out.pixel(100, 203), Some(WHITE));
}

#[test]
fn wide_watermark_keeps_aspect_inside_square_box() {
    let c = compositor_with(
        Photo::solid(20, 10, WHITE).unwrap(),
        CompositorOpts::default(),
    );
    let placement = c.placement(1000, 2000, scale(0.2));
    let draw = c.draw_rect(placement);
    assert_eq!(draw.width, placement.width);
    assert_eq!(draw.height, placement.height / 2.0);
    assert!((draw.bottom() - placement.bottom()).abs() < 1e-9);

    let base = Photo::solid(1000, 2000, BLACK).unwrap();
    let out = c.composite(&base, scale(0.2)).unwrap();
    assert_eq!(out.pixel(800, 1887), Some(BLACK));
    assert_eq!(out.pixel(800, 1888), Some(WHITE));
}

#[test]
fn watermark_alpha_blends_over_base() {
    let c = compositor_with(
        Photo::from_straight_rgba8(1, 1, vec![255, 255, 255, 128]).unwrap(),
        CompositorOpts::default(),
    );
    let base = Photo::solid(100, 100, BLACK).unwrap();
    let out = c.composite(&base, scale(0.5)).unwrap();
    let px = out.pixel(90, 90).unwrap();
    for (got, want) in px.iter().zip([128u8, 128, 128, 255]) {
        assert!(got.abs_diff(want) <= 1, "{px:?}");
    }
    assert_eq!(out.pixel(5, 5), Some(BLACK));
}

#[test]
fn forced_surface_failure_is_reported() {
    let c = compositor_with(
        Photo::solid(10, 10, WHITE).unwrap(),
        CompositorOpts {
            allocator: SurfaceAllocator::new(1024),
            ..CompositorOpts::default()
        },
    );
    let base = Photo::solid(100, 100, BLACK).unwrap();
    let err = c.composite(&base, scale(0.2)).unwrap_err();
    assert!(matches!(err, StampError::RenderSurface(_)));
}

#[test]
fn empty_base_is_invalid_input() {
    let c = white_square();
    let base = Photo::from_premul_rgba8(0, 10, Vec::new()).unwrap();
    assert!(matches!(
        c.composite(&base, scale(0.2)),
        Err(StampError::InvalidInput(_))
    ));
}

#[test]
fn composite_normalized_rejects_tagged_input() {
    let c = white_square();
    let base = Photo::solid(10, 10, BLACK)
        .unwrap()
        .with_orientation(Orientation::Rotate180);
    assert!(matches!(
        c.composite_normalized(&base, scale(0.2)),
        Err(StampError::InvalidInput(_))
    ));
}

#[test]
fn invalid_geometry_is_rejected_at_construction() {
    let mut opts = CompositorOpts::default();
    opts.geometry.margin_ratio = 0.75;
    let wm = WatermarkAsset::from_photo(Photo::solid(1, 1, WHITE).unwrap()).unwrap();
    assert!(Compositor::new(wm, opts).is_err());
}

#[test]
fn preview_agrees_with_rendered_placement() {
    let c = white_square();
    let (w, h) = (1200u32, 900u32);
    let s = scale(0.3);
    let placement = c.placement(w, h, s);
    // View shows the photo at a quarter of its pixel size, no letterboxing.
    let preview = c.preview_rect(Size::new(300.0, 225.0), Size::new(1200.0, 900.0), s);
    let scaled = placement.scaled(0.25);
    for (a, b) in [
        (preview.x, scaled.x),
        (preview.y, scaled.y),
        (preview.width, scaled.width),
        (preview.height, scaled.height),
    ] {
        assert!((a - b).abs() < 1e-9, "{preview:?} vs {scaled:?}");
    }
}
