use super::*;

#[test]
fn parses_names_and_aliases() {
    assert_eq!(
        "lanczos".parse::<ResampleFilter>().unwrap(),
        ResampleFilter::Lanczos3
    );
    assert_eq!(
        "Catmull-Rom".parse::<ResampleFilter>().unwrap(),
        ResampleFilter::CatmullRom
    );
    for name in ResampleFilter::NAMES {
        assert!(name.parse::<ResampleFilter>().is_ok(), "{name}");
    }
    assert!(matches!(
        "sinc".parse::<ResampleFilter>(),
        Err(StampError::InvalidInput(_))
    ));
}

#[test]
fn same_size_borrows_source() {
    let p = Photo::solid(3, 3, [1, 2, 3, 255]).unwrap();
    let out = resample(&p, 3, 3, ResampleFilter::Triangle, &SurfaceAllocator::default()).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
}

#[test]
fn solid_color_survives_scaling() {
    let p = Photo::solid(8, 4, [40, 80, 120, 160]).unwrap();
    for filter in [ResampleFilter::Nearest, ResampleFilter::Triangle] {
        let out = resample(&p, 3, 5, filter, &SurfaceAllocator::default()).unwrap();
        assert_eq!(out.len(), 3 * 5 * 4);
        for px in out.chunks_exact(4) {
            for (got, want) in px.iter().zip([40u8, 80, 120, 160]) {
                assert!(got.abs_diff(want) <= 1, "{px:?}");
            }
        }
    }
}

#[test]
fn budget_applies_to_scaled_buffer() {
    let p = Photo::solid(2, 2, [0, 0, 0, 255]).unwrap();
    let err = resample(&p, 100, 100, ResampleFilter::Nearest, &SurfaceAllocator::new(64))
        .unwrap_err();
    assert!(matches!(err, StampError::RenderSurface(_)));
}

#[test]
fn ringing_filters_keep_premultiplied_invariant() {
    let mut px = [128u8, 128, 128, 128].repeat(2);
    px.extend_from_slice(&[0, 0, 0, 255, 0, 0, 0, 255]);
    let p = Photo::from_premul_rgba8(4, 1, px).unwrap();
    for filter in ResampleFilter::ALL {
        let out = resample(&p, 32, 1, filter, &SurfaceAllocator::default()).unwrap();
        for px in out.chunks_exact(4) {
            assert!(px[..3].iter().all(|&c| c <= px[3]), "{filter:?}: {px:?}");
        }
    }
}
