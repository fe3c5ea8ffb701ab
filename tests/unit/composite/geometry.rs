use super::*;

fn scale(v: f64) -> ScaleFactor {
    ScaleFactor::new(v).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn portrait_1000x2000_at_0_2() {
    let policy = GeometryPolicy::default();
    let frame = Size::new(1000.0, 2000.0);
    assert!(approx(policy.margin(frame), 15.0));

    let r = policy.placement(frame, scale(0.2), 3.0);
    assert!(approx(r.x, 791.0));
    assert!(approx(r.y, 1791.0));
    assert!(approx(r.width, 194.0));
    assert!(approx(r.height, 194.0));
}

#[test]
fn anchored_at_bottom_right_minus_margin() {
    let policy = GeometryPolicy::default();
    for (w, h) in [(640.0, 480.0), (1000.0, 2000.0), (37.0, 11.0)] {
        let frame = Size::new(w, h);
        let m = w * DEFAULT_MARGIN_RATIO;
        for s in [0.0, 0.1, 0.5, 1.0] {
            let r = policy.placement(frame, scale(s), 1.0);
            assert!(approx(r.right(), w - m));
            assert!(approx(r.bottom(), h - m));
        }
    }
}

#[test]
fn area_grows_strictly_with_scale() {
    let policy = GeometryPolicy::default();
    let frame = Size::new(800.0, 600.0);
    let mut last = -1.0;
    for s in [0.0, 0.05, 0.2, 0.5, 0.9, 1.0] {
        let area = policy.placement(frame, scale(s), 2.0).area();
        assert!(area > last);
        last = area;
    }
}

#[test]
fn zero_scale_is_empty_and_full_scale_spans_available_width() {
    let policy = GeometryPolicy::default();
    let frame = Size::new(1000.0, 2000.0);
    assert_eq!(policy.placement(frame, scale(0.0), 1.0).area(), 0.0);

    let full = policy.placement(frame, scale(1.0), 1.0);
    assert!(approx(full.x, 15.0));
    assert!(approx(full.width, 970.0));
}

#[test]
fn short_side_margin_uses_min_dimension() {
    let policy = GeometryPolicy {
        margin_basis: MarginBasis::ShortSide,
        ..GeometryPolicy::default()
    };
    assert!(approx(policy.margin(Size::new(2000.0, 1000.0)), 15.0));
}

#[test]
fn asset_aspect_box_follows_watermark_ratio() {
    let policy = GeometryPolicy {
        box_shape: BoxShape::AssetAspect,
        ..GeometryPolicy::default()
    };
    let r = policy.placement(Size::new(1000.0, 2000.0), scale(0.2), 2.0);
    assert!(approx(r.width, 194.0));
    assert!(approx(r.height, 97.0));
    assert!(approx(r.bottom(), 1985.0));
}

#[test]
fn validate_rejects_degenerate_margins() {
    let mut policy = GeometryPolicy::default();
    assert!(policy.validate().is_ok());
    policy.margin_ratio = 0.5;
    assert!(policy.validate().is_err());
    policy.margin_ratio = f64::NAN;
    assert!(policy.validate().is_err());
}

#[test]
fn fit_bottom_right_keeps_aspect_and_corner() {
    let bounds = PlacementRect {
        x: 10.0,
        y: 10.0,
        width: 100.0,
        height: 100.0,
    };
    let wide = fit_bottom_right(bounds, 2.0);
    assert!(approx(wide.width, 100.0));
    assert!(approx(wide.height, 50.0));
    assert!(approx(wide.right(), 110.0));
    assert!(approx(wide.bottom(), 110.0));

    let tall = fit_bottom_right(bounds, 0.5);
    assert!(approx(tall.width, 50.0));
    assert!(approx(tall.x, 60.0));
    assert_eq!(fit_bottom_right(bounds, 1.0), bounds);
}

#[test]
fn aspect_fit_letterboxes_and_centers() {
    let container = Rect::new(0.0, 0.0, 400.0, 400.0);
    let fitted = aspect_fit(Size::new(1000.0, 2000.0), container);
    assert!(approx(fitted.width(), 200.0));
    assert!(approx(fitted.height(), 400.0));
    assert!(approx(fitted.x0, 100.0));
    assert!(approx(fitted.y0, 0.0));
}

#[test]
fn preview_matches_placement_when_view_is_a_scaled_image() {
    let policy = GeometryPolicy::default();
    let image = Size::new(1000.0, 2000.0);
    let view = Size::new(250.0, 500.0);
    let p = preview_rect(view, image, scale(0.2), &policy, 1.0);
    let expected = policy.placement(image, scale(0.2), 1.0).scaled(0.25);
    assert!(approx(p.x, expected.x));
    assert!(approx(p.y, expected.y));
    assert!(approx(p.width, expected.width));
    assert!(approx(p.height, expected.height));
}

#[test]
fn preview_is_offset_by_letterbox() {
    let policy = GeometryPolicy::default();
    let p = preview_rect(
        Size::new(400.0, 400.0),
        Size::new(1000.0, 2000.0),
        scale(0.2),
        &policy,
        1.0,
    );
    // Frame is 200x400 at x=100: margin 3, box 38.8.
    assert!(approx(p.right(), 100.0 + 200.0 - 3.0));
    assert!(approx(p.bottom(), 400.0 - 3.0));
    assert!(approx(p.width, 194.0 * 0.2));
}

#[test]
fn pixel_bounds_snaps_edges() {
    let r = PlacementRect {
        x: 791.0,
        y: 1791.0,
        width: 194.0,
        height: 194.0,
    };
    assert_eq!(pixel_bounds(r), (791, 1791, 194, 194));

    let r = PlacementRect {
        x: 0.4,
        y: 0.6,
        width: 2.2,
        height: 0.0,
    };
    assert_eq!(pixel_bounds(r), (0, 1, 3, 0));
}
