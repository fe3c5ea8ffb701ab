use super::*;

#[test]
fn rejects_mismatched_buffer_length() {
    let err = Photo::from_premul_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, StampError::InvalidInput(_)));
}

#[test]
fn straight_input_is_premultiplied() {
    let p = Photo::from_straight_rgba8(1, 1, vec![200, 100, 50, 0]).unwrap();
    assert_eq!(p.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn clones_share_pixels() {
    let a = Photo::solid(4, 4, [1, 2, 3, 255]).unwrap();
    let b = a.clone();
    assert!(a.shares_pixels(&b));
    assert_eq!(a, b);
}

#[test]
fn logical_size_accounts_for_display_scale_and_orientation() {
    let p = Photo::solid(300, 600, [0, 0, 0, 255])
        .unwrap()
        .with_display_scale(3.0)
        .unwrap()
        .with_orientation(Orientation::Rotate90);
    assert_eq!(p.upright_dims(), (600, 300));
    assert_eq!(p.logical_size(), Size::new(200.0, 100.0));
    assert_eq!(p.aspect_ratio(), 2.0);
}

#[test]
fn display_scale_must_be_positive() {
    let p = Photo::solid(1, 1, [0, 0, 0, 255]).unwrap();
    assert!(p.clone().with_display_scale(0.0).is_err());
    assert!(p.with_display_scale(f64::INFINITY).is_err());
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let p = Photo::solid(2, 3, [9, 9, 9, 255]).unwrap();
    assert_eq!(p.pixel(1, 2), Some([9, 9, 9, 255]));
    assert_eq!(p.pixel(2, 0), None);
    assert_eq!(p.pixel(0, 3), None);
}

#[test]
fn to_rgba_image_unpremultiplies() {
    let p = Photo::from_premul_rgba8(1, 1, vec![64, 0, 0, 128]).unwrap();
    let img = p.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
}
